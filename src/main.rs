//! Eat The Rich entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, Response};

    use eat_the_rich::consts::*;
    use eat_the_rich::renderer::{self, CanvasRenderer};
    use eat_the_rich::roster::{Billionaire, BillionaireDto, fallback_roster};
    use eat_the_rich::settings::Settings;
    use eat_the_rich::sim::{GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Pending animation-frame handle so teardown can cancel the loop
        raf_id: Option<i32>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                renderer: None,
                settings: Settings::load(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                raf_id: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.activate = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                let cmds = renderer::build_scene(&self.state, &self.settings.render_options());
                renderer.draw(&cmds);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            if !self.settings.show_fps {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.fps.to_string()));
            }
        }

        /// Install the roster and warm the sprite cache
        fn install_roster(&mut self, roster: Vec<Billionaire>) {
            if let Some(renderer) = &mut self.renderer {
                for b in &roster {
                    renderer.preload_image(&b.image);
                }
            }
            self.state.set_roster(roster);
        }

        /// Stop the loop; no tick or draw can run after this
        fn teardown(&mut self) {
            self.state.teardown();
            if let Some(id) = self.raf_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
    }

    /// Fetch the roster from the API; errors bubble to the caller's fallback
    async fn fetch_roster() -> Result<Vec<Billionaire>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let resp_value = JsFuture::from(window.fetch_with_str("/api/billionaires")).await?;
        let resp: Response = resp_value.dyn_into()?;
        let text = JsFuture::from(resp.text()?).await?;
        let text = text
            .as_string()
            .ok_or_else(|| JsValue::from_str("non-text body"))?;
        let dtos: Vec<BillionaireDto> =
            serde_json::from_str(&text).map_err(|err| JsValue::from_str(&err.to_string()))?;
        // The wire-carried price is discarded here; scoring recomputes it
        Ok(dtos.into_iter().map(Billionaire::from).collect())
    }

    /// Fill the "High-Value Targets" table and hide the loading placeholder
    fn populate_roster_table(roster: &[Billionaire]) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("roster-loading") {
            let _ = el.set_attribute("class", "hidden");
        }
        if let Some(body) = document.get_element_by_id("roster-body") {
            let rows: String = roster
                .iter()
                .map(|b| {
                    format!(
                        "<tr><td><img src=\"{}\" alt=\"{}\">{}</td><td>${:.1}B</td><td>${}</td></tr>",
                        b.image,
                        b.name,
                        b.name,
                        b.net_worth as f64 / 1e9,
                        b.price_to_eat()
                    )
                })
                .collect();
            body.set_inner_html(&rows);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Eat The Rich starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // The field is a fixed size; CSS may scale it
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        let mut canvas_renderer = CanvasRenderer::new(&canvas);
        canvas_renderer.preload_image("/dinomouthopen2.png");
        canvas_renderer.preload_image("/dinomouthopen2right.png");
        game.borrow_mut().renderer = Some(canvas_renderer);

        log::info!("Game initialized with seed: {}", seed);

        // Load the roster in the background; the game is already playable
        // and spawning starts once this resolves
        {
            let game = game.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let roster = match fetch_roster().await {
                    Ok(roster) if !roster.is_empty() => roster,
                    Ok(_) => {
                        log::warn!("API returned an empty roster; using fallback");
                        fallback_roster()
                    }
                    Err(err) => {
                        log::warn!("roster fetch failed ({err:?}); using fallback");
                        fallback_roster()
                    }
                };
                populate_roster_table(&roster);
                game.borrow_mut().install_roster(roster);
            });
        }

        setup_input_handlers(&canvas, game.clone());
        setup_teardown(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Eat The Rich running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Held movement keys
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "Space" => {
                        event.prevent_default();
                        g.input.jump = true;
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "Space" => {
                        event.prevent_default();
                        g.input.jump = false;
                    }
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click starts the game, or restarts it after game over
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.activate = true;
                g.input.restart_seed = js_sys::Date::now() as u64;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Cancel the loop when the page goes away; a stale callback must never
    /// mutate a torn-down session
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().teardown();
            log::info!("session torn down");
        });
        let _ = window
            .add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let g = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(g, time);
        });
        if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            game.borrow_mut().raf_id = Some(id);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Torn down between frames: stop scheduling
            if g.state.phase == GamePhase::Idle {
                g.raf_id = None;
                return;
            }

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Eat The Rich (native) starting...");
    log::info!("The game targets the browser - build with `trunk serve` for the web version");
    log::info!("Run the `networth-api` binary for the billionaire data service");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
