//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Catches and
//! misses are collected against one snapshot per tick, then applied in a
//! single step together with the derived difficulty parameters.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::level;
use super::spawn;
use super::state::{
    CATCH_BURST_COLOR, Facing, FallKind, GamePhase, GameState, RAINBOW_COLORS,
};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move-left key held
    pub left: bool,
    /// Move-right key held
    pub right: bool,
    /// Jump key held
    pub jump: bool,
    /// Pointer press: starts a session, or restarts after game over
    pub activate: bool,
    /// Seed for the session begun when `activate` fires
    pub restart_seed: u64,
}

/// What happened to the field this tick, collected before any of it is applied
#[derive(Debug, Default)]
struct FieldOutcome {
    catches: Vec<(FallKind, Vec2)>,
    misses: u8,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Idle => return,
        GamePhase::Start | GamePhase::GameOver => {
            if input.activate {
                state.start_session(input.restart_seed);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    update_dino(state, input, dt);
    run_spawn_clock(state, dt);

    let outcome = advance_objects(state, dt);
    apply_outcome(state, outcome);

    update_effects(state, dt);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("game over at score {}", state.score);
    }
}

/// Horizontal run, jump arc, ground clamp
fn update_dino(state: &mut GameState, input: &TickInput, dt: f32) {
    let dino = &mut state.dino;
    let step = DINO_SPEED * dt;

    if input.left {
        dino.pos.x = (dino.pos.x - step).max(0.0);
        dino.facing = Facing::Left;
    }
    if input.right {
        dino.pos.x = (dino.pos.x + step).min(FIELD_WIDTH - DINO_SIZE);
        dino.facing = Facing::Right;
    }

    if dino.jumping {
        dino.vel_y += GRAVITY * dt;
        dino.pos.y += dino.vel_y * dt;
        if dino.pos.y >= GROUND_Y {
            dino.pos.y = GROUND_Y;
            dino.jumping = false;
            dino.vel_y = 0.0;
        }
    } else if input.jump {
        // Only from the ground; holding the key mid-air does nothing
        dino.jumping = true;
        dino.vel_y = JUMP_IMPULSE;
    }
}

/// At most one spawn attempt per elapsed interval; the clock resets whether
/// or not a free lane was found
fn run_spawn_clock(state: &mut GameState, dt: f32) {
    state.spawn_clock_ms += dt * 1000.0;
    if state.spawn_clock_ms >= state.spawn_interval_ms {
        state.spawn_clock_ms = 0.0;
        spawn::spawn_in_free_lane(state);
    }
}

/// Advance every falling object and flag catches and misses.
///
/// Consumed objects are skipped here and filtered out in `apply_outcome`;
/// the dino position is read once, so every object sees the same snapshot.
fn advance_objects(state: &mut GameState, dt: f32) -> FieldOutcome {
    let mut outcome = FieldOutcome::default();
    let fall = state.fall_speed * dt;
    let dino = &state.dino;

    for obj in state.objects.iter_mut() {
        if obj.consumed {
            continue;
        }
        obj.pos.y += fall;
        if collision::dino_catches(dino, obj) {
            obj.consumed = true;
            outcome.catches.push((obj.kind, obj.pos));
        } else if obj.pos.y >= FIELD_HEIGHT {
            obj.consumed = true;
            outcome.misses += 1;
        }
    }
    outcome
}

/// Apply the collected catches and misses, then recompute the level and its
/// derived parameters in the same step
fn apply_outcome(state: &mut GameState, outcome: FieldOutcome) {
    let mut score_delta: u64 = 0;

    for (kind, pos) in outcome.catches {
        let center = pos + Vec2::splat(OBJECT_SIZE / 2.0);
        match kind {
            FallKind::Tycoon(index) => {
                if let Some(b) = state.roster.get(index) {
                    score_delta += u64::from(b.price_to_eat() / 2);
                }
                state.push_particle_burst(center, CATCH_BURST_COLOR);
                state.push_money_rain(center);
            }
            FallKind::Rainbow => {
                let color = RAINBOW_COLORS[state.rng.random_range(0..RAINBOW_COLORS.len())];
                state.push_particle_burst(center, color);

                // Clear the rest of the field; every billionaire swept away
                // pays a flat bonus
                let mut cleared: u64 = 0;
                for obj in state.objects.iter_mut() {
                    if !obj.consumed && matches!(obj.kind, FallKind::Tycoon(_)) {
                        obj.consumed = true;
                        cleared += 1;
                    }
                }
                score_delta += cleared * RAINBOW_CLEAR_BONUS;
                state.push_rainbow_curtain();
            }
        }
    }

    state.objects.retain(|o| !o.consumed);
    state.lives = state.lives.saturating_sub(outcome.misses);

    if score_delta > 0 {
        state.score += score_delta;
        let new_level = level::level_for_score(state.score);
        if new_level != state.level {
            state.level = new_level;
            state.spawn_interval_ms = level::spawn_interval_for_level(new_level);
            state.fall_speed = level::fall_speed_for_level(new_level);
            log::info!(
                "level {new_level}: spawn every {:.0}ms, fall {:.0}px/s",
                state.spawn_interval_ms,
                state.fall_speed
            );
        }
    }
}

/// Advance and prune cosmetic entities; none of this touches gameplay
fn update_effects(state: &mut GameState, dt: f32) {
    for p in state.particles.iter_mut() {
        p.pos += p.vel * dt;
        p.life -= PARTICLE_FADE_RATE * dt;
    }
    state.particles.retain(|p| p.life > 0.0);

    for m in state.money_rain.iter_mut() {
        m.pos.y += m.speed * dt;
    }
    state.money_rain.retain(|m| m.pos.y < FIELD_HEIGHT);

    for fx in state.rainbow_fx.iter_mut() {
        fx.top -= RAINBOW_RISE_SPEED * dt;
        if fx.top < 0.0 {
            fx.opacity -= RAINBOW_FADE_RATE * dt;
        }
    }
    state.rainbow_fx.retain(|fx| fx.opacity > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{fallback_roster, price_to_eat};
    use crate::sim::state::FallingObject;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.set_roster(fallback_roster());
        state.phase = GamePhase::Playing;
        state
    }

    fn object(id: u32, x: f32, y: f32, kind: FallKind) -> FallingObject {
        FallingObject {
            id,
            pos: Vec2::new(x, y),
            kind,
            consumed: false,
        }
    }

    fn activate(seed: u64) -> TickInput {
        TickInput {
            activate: true,
            restart_seed: seed,
            ..Default::default()
        }
    }

    #[test]
    fn activate_starts_a_session() {
        let mut state = GameState::new(1);
        state.set_roster(fallback_roster());

        // A plain tick leaves us waiting
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Start);

        tick(&mut state, &activate(1), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn movement_input_is_ignored_outside_playing() {
        let mut state = GameState::new(1);
        let before = state.dino.pos;
        let input = TickInput {
            left: true,
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.dino.pos, before);
    }

    #[test]
    fn idle_ignores_even_activate() {
        let mut state = GameState::new(1);
        state.set_roster(fallback_roster());
        state.teardown();
        tick(&mut state, &activate(1), SIM_DT);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn sixth_miss_ends_the_game_not_before() {
        let mut state = GameState::new(1);
        state.set_roster(fallback_roster());
        tick(&mut state, &activate(1), SIM_DT);
        state.objects.clear();
        // Park the dino far from the drop point
        state.dino.pos.x = 0.0;

        for miss in 1..=6u8 {
            state
                .objects
                .push(object(100 + u32::from(miss), 700.0, 599.5, FallKind::Tycoon(0)));
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert_eq!(state.lives, STARTING_LIVES - miss);
            if miss < 6 {
                assert_eq!(state.phase, GamePhase::Playing, "ended early at miss {miss}");
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn catching_a_billionaire_pays_half_price() {
        let mut state = playing_state(1);
        // Over the mouth: dino at (350, 500), mouth 370..430 x 520..580
        state.objects.push(object(1, 375.0, 521.0, FallKind::Tycoon(0)));

        tick(&mut state, &TickInput::default(), SIM_DT);

        let expected = u64::from(price_to_eat(state.roster[0].net_worth) / 2);
        assert_eq!(state.score, expected);
        assert!(state.objects.is_empty());
        assert!(!state.particles.is_empty());
        assert!(!state.money_rain.is_empty());
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn rainbow_clears_the_field_and_pays_per_target() {
        let mut state = playing_state(1);
        state.objects.push(object(1, 50.0, 100.0, FallKind::Tycoon(0)));
        state.objects.push(object(2, 150.0, 150.0, FallKind::Tycoon(1)));
        state.objects.push(object(3, 650.0, 200.0, FallKind::Tycoon(3)));
        state.objects.push(object(4, 375.0, 521.0, FallKind::Rainbow));

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.objects.is_empty());
        assert_eq!(state.score, 3 * RAINBOW_CLEAR_BONUS);
        assert_eq!(state.rainbow_fx.len(), 1);
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn restart_after_game_over_resets_everything() {
        let mut state = playing_state(1);
        state.score = 900;
        state.level = 4;
        state.lives = 1;
        state.objects.push(object(1, 700.0, 599.5, FallKind::Tycoon(0)));
        state.push_particle_burst(Vec2::new(10.0, 10.0), CATCH_BURST_COLOR);
        state.dino.pos.x = 0.0;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &activate(2), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.spawn_interval_ms, INITIAL_SPAWN_INTERVAL_MS);
        assert_eq!(state.fall_speed, FALL_SPEED_INITIAL);
        assert_eq!(state.objects.len(), 1);
        assert!(state.particles.is_empty());
        assert!(state.rainbow_fx.is_empty());
        assert_eq!(state.dino.pos, Vec2::new(DINO_START_X, GROUND_Y));
    }

    #[test]
    fn level_up_updates_both_derived_parameters() {
        let mut state = playing_state(1);
        // Musk pays 765; 765 / 250 + 1 = level 4
        state.objects.push(object(1, 375.0, 521.0, FallKind::Tycoon(0)));
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.level, 4);
        assert_eq!(state.spawn_interval_ms, level::spawn_interval_for_level(4));
        assert_eq!(state.fall_speed, level::fall_speed_for_level(4));
    }

    #[test]
    fn spawn_clock_fires_after_the_interval() {
        let mut state = playing_state(5);
        state.objects.clear();
        let ticks = (2.1 / SIM_DT) as usize;
        for _ in 0..ticks {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(!state.objects.is_empty());
    }

    #[test]
    fn jump_arc_returns_to_the_ground() {
        let mut state = playing_state(1);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        assert!(state.dino.jumping);

        let mut apex = GROUND_Y;
        for _ in 0..400 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            apex = apex.min(state.dino.pos.y);
        }
        assert!(!state.dino.jumping);
        assert_eq!(state.dino.pos.y, GROUND_Y);
        assert!(apex < GROUND_Y - 100.0);
    }

    #[test]
    fn held_movement_clamps_at_the_field_edges() {
        let mut state = playing_state(1);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..1000 {
            tick(&mut state, &left, SIM_DT);
        }
        assert_eq!(state.dino.pos.x, 0.0);
        assert_eq!(state.dino.facing, Facing::Left);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..1000 {
            tick(&mut state, &right, SIM_DT);
        }
        assert_eq!(state.dino.pos.x, FIELD_WIDTH - DINO_SIZE);
        assert_eq!(state.dino.facing, Facing::Right);
    }

    #[test]
    fn score_never_decreases_during_a_session() {
        let mut state = playing_state(77);
        let mut last_score = 0;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for i in 0..5_000 {
            let input = if i % 3 == 0 { &right } else { &TickInput::default() };
            tick(&mut state, input, SIM_DT);
            assert!(state.score >= last_score);
            last_score = state.score;
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }

    #[test]
    fn sessions_are_deterministic_for_a_seed() {
        let mut a = GameState::new(4242);
        let mut b = GameState::new(4242);
        for state in [&mut a, &mut b] {
            state.set_roster(fallback_roster());
        }

        let inputs = [
            activate(4242),
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for input in &inputs {
            for _ in 0..300 {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.objects.len(), b.objects.len());
        assert_eq!(a.dino.pos, b.dino.pos);
    }
}
