//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, dino_catches, mouth_hitbox, object_hitbox};
pub use state::{Dino, Facing, FallKind, FallingObject, GamePhase, GameState};
pub use tick::{TickInput, tick};
