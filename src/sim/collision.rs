//! Axis-aligned collision detection
//!
//! The dino only catches with its mouth: a fixed-size box inset into the
//! sprite, not the full sprite bounds. Falling objects collide with their
//! full square bounds. Hits are binary; there is no partial-overlap scoring.

use glam::Vec2;

use super::state::{Dino, FallingObject};
use crate::consts::*;

/// An axis-aligned box (top-left anchored)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// True iff both the X and Y intervals overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// The dino's mouth hitbox
pub fn mouth_hitbox(dino: &Dino) -> Aabb {
    Aabb::new(dino.pos + Vec2::splat(MOUTH_INSET), Vec2::splat(MOUTH_SIZE))
}

/// A falling object's hitbox
pub fn object_hitbox(obj: &FallingObject) -> Aabb {
    Aabb::new(obj.pos, Vec2::splat(OBJECT_SIZE))
}

/// Did the dino catch this object?
pub fn dino_catches(dino: &Dino, obj: &FallingObject) -> bool {
    mouth_hitbox(dino).overlaps(&object_hitbox(obj))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FallKind;
    use proptest::prelude::*;

    fn obj_at(x: f32, y: f32) -> FallingObject {
        FallingObject {
            id: 1,
            pos: Vec2::new(x, y),
            kind: FallKind::Tycoon(0),
            consumed: false,
        }
    }

    #[test]
    fn overlapping_boxes_collide() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        // Separated on X only
        assert!(!a.overlaps(&Aabb::new(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0))));
        // Separated on Y only
        assert!(!a.overlaps(&Aabb::new(Vec2::new(0.0, 20.0), Vec2::new(10.0, 10.0))));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn mouth_is_inset_into_the_sprite() {
        let dino = Dino::default();
        let mouth = mouth_hitbox(&dino);
        assert_eq!(mouth.pos, dino.pos + Vec2::splat(MOUTH_INSET));
        assert_eq!(mouth.size, Vec2::splat(MOUTH_SIZE));

        // An object brushing the sprite corner outside the mouth is a miss
        let grazing = obj_at(dino.pos.x - OBJECT_SIZE + 10.0, dino.pos.y);
        assert!(!dino_catches(&dino, &grazing));

        // The same object over the mouth is a hit
        let caught = obj_at(dino.pos.x + 25.0, dino.pos.y + 25.0);
        assert!(dino_catches(&dino, &caught));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Aabb::new(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Aabb::new(Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn overlap_iff_both_intervals_overlap(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Aabb::new(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Aabb::new(Vec2::new(bx, by), Vec2::new(bw, bh));
            let x_overlap = ax < bx + bw && ax + aw > bx;
            let y_overlap = ay < by + bh && ay + ah > by;
            prop_assert_eq!(a.overlaps(&b), x_overlap && y_overlap);
        }
    }
}
