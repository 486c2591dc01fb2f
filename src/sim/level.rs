//! Score-driven difficulty curve
//!
//! Level, spawn interval and fall speed are pure functions of cumulative
//! score. Callers recompute all three together whenever the score moves, so
//! the derived parameters can never drift from the level.

use crate::consts::*;

/// Level for a cumulative score (1-based)
pub fn level_for_score(score: u64) -> u32 {
    u32::try_from(score / LEVEL_SCORE_REQUIREMENT + 1).unwrap_or(u32::MAX)
}

/// Milliseconds between spawn attempts at a level, floored at the minimum
pub fn spawn_interval_for_level(level: u32) -> f32 {
    (INITIAL_SPAWN_INTERVAL_MS - level.saturating_sub(1) as f32 * SPAWN_INTERVAL_DECREASE_MS)
        .max(MIN_SPAWN_INTERVAL_MS)
}

/// Fall speed (px/s) at a level, capped at the ceiling
pub fn fall_speed_for_level(level: u32) -> f32 {
    (FALL_SPEED_INITIAL + level.saturating_sub(1) as f32 * FALL_SPEED_INCREASE).min(MAX_FALL_SPEED)
}

/// How many billionaires may fall at once at a level
pub fn target_ceiling(level: u32) -> usize {
    ((level as usize * 3) / 2 + 1).min(MAX_OBJECTS)
}
