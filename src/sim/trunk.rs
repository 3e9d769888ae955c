//! Trunk obstacle: paired barriers plus a scoring trigger
//!
//! A trunk owns three static bodies on one x coordinate: the upper barrier
//! hanging from the top of the screen, the lower barrier standing on the
//! bottom, and a thin sensor in the gap between them. All three move
//! together through [`Trunk::move_x`] and are released by [`Trunk::destroy`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::BoxShape;
use super::contact::Category;
use super::view::DrawRect;
use super::world::{BodyDef, BodyId, PhysicsWorld};
use crate::consts::*;

#[derive(Debug, Serialize, Deserialize)]
pub struct Trunk {
    pub id: u32,
    /// Shared centre x of all three bodies
    x: f32,
    /// Vertical offset from the centre baseline, fixed at spawn
    offset_y: f32,
    /// Barrier width and half-height unit
    size: Vec2,
    /// Bottom edge of each barrier (also its body origin)
    upper_y: f32,
    lower_y: f32,
    /// Centre of the scoring trigger
    score_y: f32,
    upper: BodyId,
    lower: BodyId,
    score_box: BodyId,
}

impl Trunk {
    /// Create a trunk centred on `x`. `baseline_y` is the top of the
    /// visible area the upper barrier hangs from.
    pub fn spawn(world: &mut PhysicsWorld, id: u32, offset_y: f32, x: f32, baseline_y: f32) -> Self {
        let size = Vec2::new(TRUNK_WIDTH, TRUNK_HALF_HEIGHT);
        let h = size.y;

        // The hit box sits above the body origin so the origin marks the
        // barrier's bottom edge
        let barrier = BoxShape::with_offset(size.x / 2.0, h, Vec2::new(0.0, h));
        let upper_y = baseline_y - h + h / 4.0 + offset_y;
        let lower_y = -h - h / 4.0 + offset_y;
        let score_y = baseline_y / 2.0 + offset_y;

        let upper = world.create_body(BodyDef::fixed(Vec2::new(x, upper_y), barrier, Category::Trunk));
        let lower = world.create_body(BodyDef::fixed(Vec2::new(x, lower_y), barrier, Category::Trunk));
        let score_box = world.create_body(BodyDef::fixed(
            Vec2::new(x, score_y),
            BoxShape::centered(SCORE_BOX_WIDTH / 2.0, SCORE_BOX_HEIGHT / 2.0),
            Category::ScoreHitBox,
        ));

        Self {
            id,
            x,
            offset_y,
            size,
            upper_y,
            lower_y,
            score_y,
            upper,
            lower,
            score_box,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    /// Barrier width and half-height unit
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Bodies owned by this trunk: upper, lower, score trigger
    pub fn bodies(&self) -> [BodyId; 3] {
        [self.upper, self.lower, self.score_box]
    }

    /// Move all three bodies to `x`, keeping their heights
    pub fn move_x(&mut self, world: &mut PhysicsWorld, x: f32) {
        self.x = x;
        world.set_transform(self.upper, Vec2::new(x, self.upper_y));
        world.set_transform(self.lower, Vec2::new(x, self.lower_y));
        world.set_transform(self.score_box, Vec2::new(x, self.score_y));
    }

    /// True once the trunk has scrolled fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.x + self.size.x < 0.0
    }

    /// Release all bodies. Consumes the trunk so it cannot be destroyed twice.
    pub fn destroy(self, world: &mut PhysicsWorld) {
        for body in self.bodies() {
            world.destroy_body(body);
        }
    }

    /// Sprite rectangles for the upper and lower barrier
    pub fn draw_rects(&self) -> [DrawRect; 2] {
        let left = self.x - self.size.x / 2.0;
        let height = self.size.y * 2.0;
        [
            DrawRect::new(left, self.upper_y, self.size.x, height),
            DrawRect::new(left, self.lower_y, self.size.x, height),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(world: &mut PhysicsWorld, offset: f32) -> Trunk {
        Trunk::spawn(world, 1, offset, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn test_spawn_creates_three_bodies() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let trunk = spawn(&mut world, 10.0);
        assert_eq!(world.body_count(), 3);
        assert_eq!(trunk.x(), 480.0);
        assert_eq!(trunk.offset_y(), 10.0);
        for id in trunk.bodies() {
            assert_eq!(world.position(id).unwrap().x, 480.0);
        }
    }

    #[test]
    fn test_gap_geometry() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let trunk = spawn(&mut world, 0.0);
        let [upper, lower, score] = trunk.bodies();

        let upper = world.body(upper).unwrap();
        let lower = world.body(lower).unwrap();
        let score = world.body(score).unwrap();

        let upper_box = upper.shape.aabb(upper.position);
        let lower_box = lower.shape.aabb(lower.position);
        let score_box = score.shape.aabb(score.position);

        assert_eq!(lower_box.max.y, 33.75);
        assert_eq!(upper_box.min.y, SCREEN_HEIGHT - 33.75);
        assert_eq!(score_box.center().y, SCREEN_HEIGHT / 2.0);
        assert_eq!(score_box.max.x - score_box.min.x, SCORE_BOX_WIDTH);
        assert_eq!(upper_box.max.x - upper_box.min.x, TRUNK_WIDTH);
    }

    #[test]
    fn test_move_x_keeps_heights() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let mut trunk = spawn(&mut world, -20.0);
        let before: Vec<f32> = trunk.bodies().iter().map(|&id| world.position(id).unwrap().y).collect();

        trunk.move_x(&mut world, 123.0);

        assert_eq!(trunk.x(), 123.0);
        for (id, y) in trunk.bodies().into_iter().zip(before) {
            assert_eq!(world.position(id), Some(Vec2::new(123.0, y)));
        }
    }

    #[test]
    fn test_off_screen_uses_right_edge() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let mut trunk = spawn(&mut world, 0.0);
        trunk.move_x(&mut world, -TRUNK_WIDTH);
        assert!(!trunk.is_off_screen());
        trunk.move_x(&mut world, -TRUNK_WIDTH - 0.01);
        assert!(trunk.is_off_screen());
    }

    #[test]
    fn test_destroy_releases_bodies() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let keep = spawn(&mut world, 0.0);
        let trunk = spawn(&mut world, 5.0);
        let ids = trunk.bodies();
        trunk.destroy(&mut world);
        assert_eq!(world.body_count(), 3);
        assert!(ids.iter().all(|&id| !world.contains(id)));
        assert!(keep.bodies().iter().all(|&id| world.contains(id)));
    }

    #[test]
    fn test_draw_rects_centre_on_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let trunk = spawn(&mut world, 0.0);
        let [upper, lower] = trunk.draw_rects();
        assert_eq!(upper.x, 480.0 - TRUNK_WIDTH / 2.0);
        assert_eq!(upper.height, TRUNK_HALF_HEIGHT * 2.0);
        assert_eq!(lower.y, -56.25);
    }
}
