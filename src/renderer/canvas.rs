//! Canvas 2D backend
//!
//! Replays a draw-command list onto a `CanvasRenderingContext2d`. A missing
//! context silently no-ops every draw. Sprites are preloaded once and looked
//! up by path; a sprite still decoding is skipped for that frame.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{DrawCmd, TextAlign};
use crate::consts::*;

pub struct CanvasRenderer {
    ctx: Option<CanvasRenderingContext2d>,
    images: HashMap<String, HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Self {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());
        if ctx.is_none() {
            log::warn!("no 2d context available; rendering disabled");
        }
        Self {
            ctx,
            images: HashMap::new(),
        }
    }

    /// Begin loading a sprite; it draws once the browser finishes decoding
    pub fn preload_image(&mut self, src: &str) {
        if self.images.contains_key(src) {
            return;
        }
        if let Ok(img) = HtmlImageElement::new() {
            img.set_src(src);
            self.images.insert(src.to_owned(), img);
        }
    }

    /// Replay one frame of draw commands
    pub fn draw(&self, cmds: &[DrawCmd]) {
        let Some(ctx) = &self.ctx else {
            return;
        };

        for cmd in cmds {
            match cmd {
                DrawCmd::Clear { color } => {
                    ctx.set_global_alpha(1.0);
                    ctx.clear_rect(0.0, 0.0, f64::from(FIELD_WIDTH), f64::from(FIELD_HEIGHT));
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(0.0, 0.0, f64::from(FIELD_WIDTH), f64::from(FIELD_HEIGHT));
                }
                DrawCmd::Rect {
                    x,
                    y,
                    w,
                    h,
                    color,
                    alpha,
                } => {
                    ctx.set_global_alpha(f64::from(*alpha));
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(f64::from(*x), f64::from(*y), f64::from(*w), f64::from(*h));
                }
                DrawCmd::Circle {
                    x,
                    y,
                    radius,
                    color,
                    alpha,
                } => {
                    ctx.set_global_alpha(f64::from(*alpha));
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    let _ = ctx.arc(
                        f64::from(*x),
                        f64::from(*y),
                        f64::from(*radius),
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.fill();
                }
                DrawCmd::Text {
                    text,
                    x,
                    y,
                    font,
                    color,
                    align,
                    alpha,
                } => {
                    ctx.set_global_alpha(f64::from(*alpha));
                    ctx.set_font(font);
                    ctx.set_text_align(match align {
                        TextAlign::Left => "left",
                        TextAlign::Center => "center",
                    });
                    ctx.set_fill_style_str(color);
                    let _ = ctx.fill_text(text, f64::from(*x), f64::from(*y));
                }
                DrawCmd::Image { src, x, y, w, h } => {
                    ctx.set_global_alpha(1.0);
                    if let Some(img) = self.images.get(src) {
                        if img.complete() {
                            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                                img,
                                f64::from(*x),
                                f64::from(*y),
                                f64::from(*w),
                                f64::from(*h),
                            );
                        }
                    }
                }
                DrawCmd::GradientBand { y, h, stops, alpha } => {
                    let gradient =
                        ctx.create_linear_gradient(0.0, 0.0, f64::from(FIELD_WIDTH), 0.0);
                    let last = stops.len().saturating_sub(1).max(1);
                    for (i, stop) in stops.iter().enumerate() {
                        let _ = gradient.add_color_stop(i as f32 / last as f32, stop);
                    }
                    ctx.set_global_alpha(f64::from(*alpha));
                    ctx.set_fill_style_canvas_gradient(&gradient);
                    ctx.fill_rect(
                        0.0,
                        f64::from(*y),
                        f64::from(FIELD_WIDTH),
                        f64::from(*h),
                    );
                }
            }
        }

        ctx.set_global_alpha(1.0);
    }
}
