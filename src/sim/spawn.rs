//! Entity spawning: weighted selection and lane placement
//!
//! Billionaires are picked by inverse net-worth roulette, so the richest
//! targets fall the most rarely. Horizontal placement divides the field into
//! as many lanes as the current target ceiling and only uses a free one.

use glam::Vec2;
use rand::Rng;

use super::level;
use super::state::{FallKind, FallingObject, GameState};
use crate::consts::*;
use crate::roster::Billionaire;

/// Roulette-wheel pick over explicit weights for a draw in [0, 1).
///
/// Deterministic for a given draw. Returns None when the list is empty or
/// every weight is zero.
pub fn roulette_pick(weights: &[f32], draw: f32) -> Option<usize> {
    let total: f32 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let mut cursor = draw * total;
    for (i, w) in weights.iter().enumerate() {
        if cursor < *w {
            return Some(i);
        }
        cursor -= w;
    }
    // draw rounding can land exactly on the total
    Some(weights.len() - 1)
}

/// Inverse-worth selection weights: `1 - worth / total`
pub fn spawn_weights(roster: &[Billionaire]) -> Vec<f32> {
    let total: f64 = roster.iter().map(|b| b.net_worth as f64).sum();
    if total <= 0.0 {
        return vec![1.0; roster.len()];
    }
    roster
        .iter()
        .map(|b| (1.0 - b.net_worth as f64 / total) as f32)
        .collect()
}

/// Lanes currently free of falling objects, out of `lane_count` equal bands
pub fn free_lanes(objects: &[FallingObject], lane_count: usize) -> Vec<usize> {
    let lane_width = FIELD_WIDTH / lane_count as f32;
    (0..lane_count)
        .filter(|&lane| {
            let left = lane as f32 * lane_width;
            !objects
                .iter()
                .any(|o| o.pos.x >= left && o.pos.x < left + lane_width)
        })
        .collect()
}

/// One spawn attempt, honoring the per-level ceiling and lane exclusion.
///
/// Returns true if something spawned. A no-op while the roster is loading,
/// when the field is at capacity, or when every lane is occupied.
pub fn spawn_in_free_lane(state: &mut GameState) -> bool {
    if state.roster.is_empty() {
        return false;
    }
    let ceiling = level::target_ceiling(state.level);
    if state.tycoon_count() >= ceiling {
        return false;
    }
    let lanes = free_lanes(&state.objects, ceiling);
    if lanes.is_empty() {
        return false;
    }
    let lane_width = FIELD_WIDTH / ceiling as f32;
    let lane = lanes[state.rng.random_range(0..lanes.len())];
    let offset = state.rng.random::<f32>() * (lane_width - OBJECT_SIZE).max(0.0);
    spawn_at(state, lane as f32 * lane_width + offset);
    true
}

/// Immediate spawn at a random x (used on session start)
pub fn spawn_unplaced(state: &mut GameState) -> bool {
    if state.roster.is_empty() {
        return false;
    }
    let x = state.rng.random::<f32>() * (FIELD_WIDTH - OBJECT_SIZE);
    spawn_at(state, x);
    true
}

/// Materialize one object at `x`: a rare rainbow, otherwise a billionaire
/// picked by inverse-worth roulette. Starts above the visible field.
fn spawn_at(state: &mut GameState, x: f32) {
    let y = -OBJECT_SIZE - state.rng.random::<f32>() * 100.0;
    let kind = if state.rng.random::<f32>() < RAINBOW_CHANCE {
        FallKind::Rainbow
    } else {
        let weights = spawn_weights(&state.roster);
        let draw = state.rng.random::<f32>();
        FallKind::Tycoon(roulette_pick(&weights, draw).unwrap_or(0))
    };
    let id = state.next_entity_id();
    state.objects.push(FallingObject {
        id,
        pos: Vec2::new(x, y),
        kind,
        consumed: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::fallback_roster;
    use crate::sim::state::GamePhase;

    fn obj_at_x(id: u32, x: f32) -> FallingObject {
        FallingObject {
            id,
            pos: Vec2::new(x, 100.0),
            kind: FallKind::Tycoon(0),
            consumed: false,
        }
    }

    #[test]
    fn roulette_is_deterministic_for_a_draw() {
        let weights = [0.25, 0.25, 0.5];
        assert_eq!(roulette_pick(&weights, 0.0), Some(0));
        assert_eq!(roulette_pick(&weights, 0.24), Some(0));
        assert_eq!(roulette_pick(&weights, 0.25), Some(1));
        assert_eq!(roulette_pick(&weights, 0.49), Some(1));
        assert_eq!(roulette_pick(&weights, 0.5), Some(2));
        assert_eq!(roulette_pick(&weights, 0.999), Some(2));
    }

    #[test]
    fn roulette_rejects_degenerate_weights() {
        assert_eq!(roulette_pick(&[], 0.5), None);
        assert_eq!(roulette_pick(&[0.0, 0.0], 0.5), None);
    }

    #[test]
    fn richer_targets_get_smaller_weights() {
        let roster = fallback_roster();
        let weights = spawn_weights(&roster);
        assert_eq!(weights.len(), roster.len());
        // Musk (richest) must be the rarest, Trump (poorest) the most common
        let musk = weights[0];
        let trump = weights[3];
        assert!(trump > musk);
        // Every weight stays inside (0, 1)
        assert!(weights.iter().all(|w| *w > 0.0 && *w < 1.0));
    }

    #[test]
    fn free_lanes_excludes_occupied_bands() {
        // 4 lanes over 800px: 0-200, 200-400, 400-600, 600-800
        let objects = vec![obj_at_x(1, 50.0), obj_at_x(2, 450.0)];
        assert_eq!(free_lanes(&objects, 4), vec![1, 3]);
        assert_eq!(free_lanes(&[], 4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn spawn_is_noop_without_roster() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        assert!(!spawn_in_free_lane(&mut state));
        assert!(!spawn_unplaced(&mut state));
        assert!(state.objects.is_empty());
    }

    #[test]
    fn spawn_honors_the_target_ceiling() {
        let mut state = GameState::new(1);
        state.set_roster(fallback_roster());
        state.phase = GamePhase::Playing;
        // Level 1 ceiling is 2 targets
        state.objects.push(obj_at_x(1, 50.0));
        state.objects.push(obj_at_x(2, 450.0));
        assert!(!spawn_in_free_lane(&mut state));
        assert_eq!(state.objects.len(), 2);
    }

    #[test]
    fn spawn_skips_when_every_lane_is_occupied() {
        let mut state = GameState::new(1);
        state.set_roster(fallback_roster());
        state.phase = GamePhase::Playing;
        state.level = 2; // ceiling 4, lanes 0-200/200-400/400-600/600-800
        state.objects.push(obj_at_x(1, 10.0));
        state.objects.push(obj_at_x(2, 210.0));
        state.objects.push(obj_at_x(3, 410.0));
        // One rainbow occupying the last lane: doesn't count toward the
        // ceiling but still blocks placement
        state.objects.push(FallingObject {
            id: 4,
            pos: Vec2::new(610.0, 100.0),
            kind: FallKind::Rainbow,
            consumed: false,
        });
        assert!(!spawn_in_free_lane(&mut state));
    }

    #[test]
    fn spawned_objects_start_above_the_field() {
        let mut state = GameState::new(42);
        state.set_roster(fallback_roster());
        state.phase = GamePhase::Playing;
        assert!(spawn_in_free_lane(&mut state));
        let obj = &state.objects[0];
        assert!(obj.pos.y <= -OBJECT_SIZE);
        assert!(obj.pos.x >= 0.0 && obj.pos.x <= FIELD_WIDTH - OBJECT_SIZE);
    }

    #[test]
    fn spawns_are_reproducible_for_a_seed() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        for state in [&mut a, &mut b] {
            state.set_roster(fallback_roster());
            state.phase = GamePhase::Playing;
            spawn_in_free_lane(state);
        }
        assert_eq!(a.objects[0].pos, b.objects[0].pos);
        assert_eq!(a.objects[0].kind, b.objects[0].kind);
    }
}
