//! Scene building and drawing
//!
//! The simulation is projected into a flat list of draw commands; the canvas
//! backend (wasm only) just replays them. Keeping the projection pure makes
//! every frame testable without a browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::consts::*;
use crate::sim::state::RAINBOW_COLORS;
use crate::sim::{Facing, FallKind, GamePhase, GameState};

/// Background of the play field
const FIELD_COLOR: &str = "#065f46";
/// Score readout and money symbols
const GOLD: &str = "#eab308";
/// Heart row
const HEART_COLOR: &str = "#ef4444";

const DINO_LEFT_SPRITE: &str = "/dinomouthopen2.png";
const DINO_RIGHT_SPRITE: &str = "/dinomouthopen2right.png";

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One drawing command for the 2D backend
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole field with a color
    Clear { color: &'static str },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: &'static str,
        alpha: f32,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: &'static str,
        alpha: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        font: &'static str,
        color: &'static str,
        align: TextAlign,
        alpha: f32,
    },
    Image {
        src: String,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    /// Horizontal gradient band across the full field width
    GradientBand {
        y: f32,
        h: f32,
        stops: &'static [&'static str],
        alpha: f32,
    },
}

/// What the settings allow the scene to contain
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub particles: bool,
    pub money_rain: bool,
    /// Skips the full-field curtain flash
    pub reduced_motion: bool,
    pub max_particles: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            particles: true,
            money_rain: true,
            reduced_motion: false,
            max_particles: MAX_PARTICLES,
        }
    }
}

/// Project the current state into draw commands, back to front
pub fn build_scene(state: &GameState, opts: &RenderOptions) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Clear { color: FIELD_COLOR }];

    match state.phase {
        GamePhase::Idle => {
            cmds.clear();
        }
        GamePhase::Start => {
            push_overlay(&mut cmds, "Ready to eat?", "Click to start");
        }
        GamePhase::Playing => {
            push_hud(&mut cmds, state);
            push_dino(&mut cmds, state);
            push_objects(&mut cmds, state);
            push_effects(&mut cmds, state, opts);
        }
        GamePhase::GameOver => {
            push_overlay(&mut cmds, "Game Over!", "Click to eat again");
            cmds.push(DrawCmd::Text {
                text: format!("Final score: ${}", state.score),
                x: FIELD_WIDTH / 2.0,
                y: FIELD_HEIGHT / 2.0 + 60.0,
                font: "24px serif",
                color: GOLD,
                align: TextAlign::Center,
                alpha: 1.0,
            });
        }
    }

    cmds
}

fn push_overlay(cmds: &mut Vec<DrawCmd>, title: &str, prompt: &str) {
    cmds.push(DrawCmd::Rect {
        x: 0.0,
        y: 0.0,
        w: FIELD_WIDTH,
        h: FIELD_HEIGHT,
        color: "#000000",
        alpha: 0.8,
    });
    cmds.push(DrawCmd::Text {
        text: title.to_owned(),
        x: FIELD_WIDTH / 2.0,
        y: FIELD_HEIGHT / 2.0 - 20.0,
        font: "bold 48px serif",
        color: GOLD,
        align: TextAlign::Center,
        alpha: 1.0,
    });
    cmds.push(DrawCmd::Text {
        text: prompt.to_owned(),
        x: FIELD_WIDTH / 2.0,
        y: FIELD_HEIGHT / 2.0 + 24.0,
        font: "24px serif",
        color: "#d1fae5",
        align: TextAlign::Center,
        alpha: 1.0,
    });
}

/// Score and hearts. Lives are the single source of truth; one heart shows
/// for every two lives, with a dimmed heart for an odd remainder.
fn push_hud(cmds: &mut Vec<DrawCmd>, state: &GameState) {
    cmds.push(DrawCmd::Text {
        text: format!("${}", state.score),
        x: 20.0,
        y: 40.0,
        font: "bold 24px serif",
        color: GOLD,
        align: TextAlign::Left,
        alpha: 1.0,
    });

    let full_hearts = usize::from(state.lives / 2);
    if full_hearts > 0 {
        cmds.push(DrawCmd::Text {
            text: "♥".repeat(full_hearts),
            x: 20.0,
            y: 70.0,
            font: "bold 24px serif",
            color: HEART_COLOR,
            align: TextAlign::Left,
            alpha: 1.0,
        });
    }
    if state.lives % 2 == 1 {
        cmds.push(DrawCmd::Text {
            text: "♥".to_owned(),
            x: 20.0 + full_hearts as f32 * 26.0,
            y: 70.0,
            font: "bold 24px serif",
            color: HEART_COLOR,
            align: TextAlign::Left,
            alpha: 0.5,
        });
    }
}

fn push_dino(cmds: &mut Vec<DrawCmd>, state: &GameState) {
    let src = match state.dino.facing {
        Facing::Left => DINO_LEFT_SPRITE,
        Facing::Right => DINO_RIGHT_SPRITE,
    };
    cmds.push(DrawCmd::Image {
        src: src.to_owned(),
        x: state.dino.pos.x,
        y: state.dino.pos.y,
        w: DINO_SIZE,
        h: DINO_SIZE,
    });
}

fn push_objects(cmds: &mut Vec<DrawCmd>, state: &GameState) {
    for obj in &state.objects {
        match obj.kind {
            FallKind::Tycoon(index) => {
                if let Some(b) = state.roster.get(index) {
                    cmds.push(DrawCmd::Image {
                        src: b.image.clone(),
                        x: obj.pos.x,
                        y: obj.pos.y,
                        w: OBJECT_SIZE,
                        h: OBJECT_SIZE,
                    });
                }
            }
            FallKind::Rainbow => {
                cmds.push(DrawCmd::Text {
                    text: "🌈".to_owned(),
                    x: obj.pos.x,
                    y: obj.pos.y + 40.0,
                    font: "40px Arial",
                    color: GOLD,
                    align: TextAlign::Left,
                    alpha: 1.0,
                });
            }
        }
    }
}

fn push_effects(cmds: &mut Vec<DrawCmd>, state: &GameState, opts: &RenderOptions) {
    if opts.particles {
        for p in state.particles.iter().take(opts.max_particles) {
            cmds.push(DrawCmd::Circle {
                x: p.pos.x,
                y: p.pos.y,
                radius: 3.0,
                color: p.color,
                alpha: p.life.clamp(0.0, 1.0),
            });
        }
    }

    if opts.money_rain {
        for m in &state.money_rain {
            cmds.push(DrawCmd::Text {
                text: m.symbol.to_owned(),
                x: m.pos.x,
                y: m.pos.y,
                font: "24px serif",
                color: GOLD,
                align: TextAlign::Left,
                alpha: 1.0,
            });
        }
    }

    if !opts.reduced_motion {
        for fx in &state.rainbow_fx {
            let h = FIELD_HEIGHT - fx.top;
            cmds.push(DrawCmd::GradientBand {
                y: fx.top,
                h,
                stops: &RAINBOW_COLORS,
                alpha: fx.opacity.clamp(0.0, 1.0),
            });
            cmds.push(DrawCmd::Text {
                text: fx.label.to_owned(),
                x: FIELD_WIDTH / 2.0,
                y: fx.top + h / 2.0,
                font: "bold 48px Arial",
                color: "#ffffff",
                align: TextAlign::Center,
                alpha: fx.opacity.clamp(0.0, 1.0),
            });
        }
    }
}
