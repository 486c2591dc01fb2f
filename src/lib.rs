//! Eat The Rich - a billionaire-catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: Scene building + canvas 2D drawing backend
//! - `roster`: Billionaire data model, shared with the net-worth API
//! - `settings`: Visual quality preferences

pub mod renderer;
pub mod roster;
pub mod settings;
pub mod sim;

pub use roster::Billionaire;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Ground line the dino stands on
    pub const GROUND_Y: f32 = 500.0;

    /// Dino sprite size (square)
    pub const DINO_SIZE: f32 = 100.0;
    pub const DINO_START_X: f32 = 350.0;
    /// Horizontal run speed (px/s)
    pub const DINO_SPEED: f32 = 840.0;
    /// Upward impulse applied on jump (px/s, negative is up)
    pub const JUMP_IMPULSE: f32 = -1200.0;
    /// Downward acceleration while airborne (px/s²)
    pub const GRAVITY: f32 = 4320.0;

    /// Mouth hitbox: a region inset into the sprite, not the full bounds
    pub const MOUTH_INSET: f32 = 20.0;
    pub const MOUTH_SIZE: f32 = 60.0;

    /// Falling object sprite size (square)
    pub const OBJECT_SIZE: f32 = 50.0;

    /// Chance per spawn of a rainbow power-up instead of a billionaire
    pub const RAINBOW_CHANCE: f32 = 0.05;
    /// Score for each billionaire cleared by a rainbow
    pub const RAINBOW_CLEAR_BONUS: u64 = 50;
    /// Never allow more than this many billionaires on the field
    pub const MAX_OBJECTS: usize = 8;

    /// Difficulty curve
    pub const INITIAL_SPAWN_INTERVAL_MS: f32 = 2000.0;
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 800.0;
    pub const SPAWN_INTERVAL_DECREASE_MS: f32 = 40.0;
    pub const FALL_SPEED_INITIAL: f32 = 120.0;
    pub const FALL_SPEED_INCREASE: f32 = 9.0;
    pub const MAX_FALL_SPEED: f32 = 360.0;
    pub const LEVEL_SCORE_REQUIREMENT: u64 = 250;

    /// Lives at session start
    pub const STARTING_LIVES: u8 = 6;

    /// Cosmetic effect budgets
    pub const PARTICLE_BURST: usize = 20;
    pub const MONEY_BURST: usize = 15;
    pub const MAX_PARTICLES: usize = 500;
    pub const MAX_MONEY_RAIN: usize = 300;
    pub const MAX_RAINBOW_EFFECTS: usize = 10;

    /// Cosmetic decay rates
    /// Particle life drains from 1.0 at this rate (per second)
    pub const PARTICLE_FADE_RATE: f32 = 1.2;
    /// Rainbow curtain rise speed (px/s)
    pub const RAINBOW_RISE_SPEED: f32 = 1200.0;
    /// Curtain opacity fade once it tops out (per second)
    pub const RAINBOW_FADE_RATE: f32 = 2.4;
}
