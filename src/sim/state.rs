//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::level;
use crate::consts::*;
use crate::roster::Billionaire;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Component torn down; every input is ignored
    Idle,
    /// Waiting for the first activate input
    Start,
    /// Active gameplay
    Playing,
    /// Terminal until the next activate input
    GameOver,
}

/// Which way the dino sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player's dino
#[derive(Debug, Clone)]
pub struct Dino {
    /// Top-left of the sprite
    pub pos: Vec2,
    /// Vertical velocity while airborne (px/s, negative is up)
    pub vel_y: f32,
    pub jumping: bool,
    pub facing: Facing,
}

impl Default for Dino {
    fn default() -> Self {
        Self {
            pos: Vec2::new(DINO_START_X, GROUND_Y),
            vel_y: 0.0,
            jumping: false,
            facing: Facing::Right,
        }
    }
}

/// What a falling object is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallKind {
    /// Index into the session roster
    Tycoon(usize),
    /// Clears the field on contact
    Rainbow,
}

/// A falling object
#[derive(Debug, Clone)]
pub struct FallingObject {
    pub id: u32,
    /// Top-left of the sprite
    pub pos: Vec2,
    pub kind: FallKind,
    /// Flagged on catch or miss; filtered out at the end of the tick
    pub consumed: bool,
}

/// A burst particle (cosmetic)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, drains over time
    pub life: f32,
    pub color: &'static str,
}

/// A falling money symbol (cosmetic)
#[derive(Debug, Clone)]
pub struct MoneyGlyph {
    pub pos: Vec2,
    /// Fall speed (px/s)
    pub speed: f32,
    pub symbol: &'static str,
}

/// Full-field rainbow curtain (cosmetic; the field clear and payout happen
/// at collision time, not here)
#[derive(Debug, Clone)]
pub struct RainbowCurtain {
    /// Top edge; rises toward 0, then fades
    pub top: f32,
    pub opacity: f32,
    pub label: &'static str,
}

pub const MONEY_SYMBOLS: [&str; 4] = ["$", "💵", "💰", "💎"];

pub const RAINBOW_COLORS: [&str; 7] = [
    "#FF0000", "#FF7F00", "#FFFF00", "#00FF00", "#0000FF", "#4B0082", "#8B00FF",
];

/// Color of the money burst when a billionaire is eaten
pub const CATCH_BURST_COLOR: &str = "#eab308";

/// Complete session state (no globals; every update step receives this)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Never decremented while playing
    pub score: u64,
    pub lives: u8,
    /// Derived from score; see [`level`]
    pub level: u32,
    /// Derived from level; always updated together with it
    pub spawn_interval_ms: f32,
    /// Derived from level; always updated together with it
    pub fall_speed: f32,
    /// Time since the last spawn attempt (ms)
    pub spawn_clock_ms: f32,
    /// Catchable targets; empty until the fetch resolves
    pub roster: Vec<Billionaire>,
    pub dino: Dino,
    pub objects: Vec<FallingObject>,
    /// Visual only, not gameplay-affecting
    pub particles: Vec<Particle>,
    pub money_rain: Vec<MoneyGlyph>,
    pub rainbow_fx: Vec<RainbowCurtain>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh state waiting for the first activate input
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            spawn_interval_ms: level::spawn_interval_for_level(1),
            fall_speed: level::fall_speed_for_level(1),
            spawn_clock_ms: 0.0,
            roster: Vec::new(),
            dino: Dino::default(),
            objects: Vec::new(),
            particles: Vec::new(),
            money_rain: Vec::new(),
            rainbow_fx: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Install the fetched roster; gameplay state is left alone
    pub fn set_roster(&mut self, roster: Vec<Billionaire>) {
        log::info!("roster loaded: {} targets", roster.len());
        self.roster = roster;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Billionaires currently falling (rainbows don't count toward the ceiling)
    pub fn tycoon_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| matches!(o.kind, FallKind::Tycoon(_)))
            .count()
    }

    /// Reset everything for a fresh run and enter Playing.
    ///
    /// Spawns the first object immediately; a no-op while the roster is
    /// still loading, in which case the spawn clock will catch up once the
    /// fetch resolves.
    pub fn start_session(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.spawn_interval_ms = level::spawn_interval_for_level(1);
        self.fall_speed = level::fall_speed_for_level(1);
        self.spawn_clock_ms = 0.0;
        self.dino = Dino::default();
        self.objects.clear();
        self.particles.clear();
        self.money_rain.clear();
        self.rainbow_fx.clear();
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        super::spawn::spawn_unplaced(self);
        log::info!("session started with seed {seed}");
    }

    /// Tear the session down; no later callback may mutate state
    pub fn teardown(&mut self) {
        self.phase = GamePhase::Idle;
        self.objects.clear();
        self.particles.clear();
        self.money_rain.clear();
        self.rainbow_fx.clear();
    }

    /// Ring of particles bursting out of `center`
    pub fn push_particle_burst(&mut self, center: Vec2, color: &'static str) {
        for i in 0..PARTICLE_BURST {
            let angle = std::f32::consts::TAU * i as f32 / PARTICLE_BURST as f32;
            let speed = self.rng.random::<f32>() * 300.0 + 120.0;
            self.particles.push(Particle {
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
                color,
            });
        }
        let excess = self.particles.len().saturating_sub(MAX_PARTICLES);
        if excess > 0 {
            self.particles.drain(..excess);
        }
    }

    /// Shower of money symbols around `center`
    pub fn push_money_rain(&mut self, center: Vec2) {
        for _ in 0..MONEY_BURST {
            let dx = self.rng.random::<f32>() * 100.0 - 50.0;
            let speed = self.rng.random::<f32>() * 180.0 + 120.0;
            let symbol = MONEY_SYMBOLS[self.rng.random_range(0..MONEY_SYMBOLS.len())];
            self.money_rain.push(MoneyGlyph {
                pos: Vec2::new(center.x + dx, center.y),
                speed,
                symbol,
            });
        }
        let excess = self.money_rain.len().saturating_sub(MAX_MONEY_RAIN);
        if excess > 0 {
            self.money_rain.drain(..excess);
        }
    }

    /// Full-field curtain rising from the bottom edge
    pub fn push_rainbow_curtain(&mut self) {
        self.rainbow_fx.push(RainbowCurtain {
            top: FIELD_HEIGHT,
            opacity: 1.0,
            label: "QUEER AGENDA",
        });
        let excess = self.rainbow_fx.len().saturating_sub(MAX_RAINBOW_EFFECTS);
        if excess > 0 {
            self.rainbow_fx.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::fallback_roster;

    #[test]
    fn new_state_waits_for_input() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn start_session_spawns_immediately_with_roster() {
        let mut state = GameState::new(7);
        state.set_roster(fallback_roster());
        state.start_session(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn start_session_without_roster_spawns_nothing() {
        let mut state = GameState::new(7);
        state.start_session(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn teardown_freezes_everything() {
        let mut state = GameState::new(7);
        state.set_roster(fallback_roster());
        state.start_session(7);
        state.teardown();
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.objects.is_empty());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn particle_burst_respects_cap() {
        let mut state = GameState::new(7);
        for _ in 0..(MAX_PARTICLES / PARTICLE_BURST + 5) {
            state.push_particle_burst(Vec2::new(100.0, 100.0), CATCH_BURST_COLOR);
        }
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn entity_ids_are_unique() {
        let mut state = GameState::new(7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
