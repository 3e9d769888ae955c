//! Physics world: body table, fixed-step integration and contact tracking
//!
//! The world owns every body. Entities keep a [`BodyId`] and go through the
//! world to move, query or destroy their bodies.
//!
//! A step runs in this order:
//! 1. Integrate velocities (gravity) and positions for dynamic bodies
//! 2. Find overlapping pairs and look each pair up in the contact table once
//! 3. Solve velocity constraints, then position constraints, for solid pairs
//!
//! Contacts are returned to the caller after the step instead of being
//! dispatched from inside it, so gameplay reactions never mutate the world
//! while it is being iterated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{BoxShape, aabb_overlap};
use super::contact::{Category, ContactRule, contact_rule};
use crate::consts::*;

/// Handle to a body owned by a [`PhysicsWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Never moved by the solver; only teleported by its owner
    Static,
    /// Integrated under gravity and pushed out of solid contacts
    Dynamic,
}

/// Everything needed to create a body
#[derive(Debug, Clone)]
pub struct BodyDef {
    pub kind: BodyKind,
    pub position: Vec2,
    pub shape: BoxShape,
    pub category: Option<Category>,
    pub gravity_scale: f32,
}

impl BodyDef {
    pub fn fixed(position: Vec2, shape: BoxShape, category: Category) -> Self {
        Self {
            kind: BodyKind::Static,
            position,
            shape,
            category: Some(category),
            gravity_scale: 0.0,
        }
    }

    pub fn dynamic(position: Vec2, shape: BoxShape, category: Category, gravity_scale: f32) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position,
            shape,
            category: Some(category),
            gravity_scale,
        }
    }
}

/// A rigid body with a single box fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub shape: BoxShape,
    pub category: Option<Category>,
}

/// An overlapping pair found during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// Lower body id of the pair
    pub a: BodyId,
    pub b: BodyId,
    pub rule: ContactRule,
    /// True only on the first step of an overlap episode
    pub began: bool,
}

/// The physics world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsWorld {
    gravity: Vec2,
    /// Live bodies (sorted by id for determinism)
    bodies: Vec<Body>,
    /// Pairs overlapping at the end of the last step (sorted)
    active_pairs: Vec<(BodyId, BodyId)>,
    next_id: u32,
    step_count: u64,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            active_pairs: Vec::new(),
            next_id: 1,
            step_count: 0,
        }
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Number of steps taken since creation
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Pairs that were overlapping at the end of the last step
    pub fn active_pairs(&self) -> &[(BodyId, BodyId)] {
        &self.active_pairs
    }

    pub fn create_body(&mut self, def: BodyDef) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            kind: def.kind,
            position: def.position,
            velocity: Vec2::ZERO,
            gravity_scale: def.gravity_scale,
            shape: def.shape,
            category: def.category,
        });
        id
    }

    /// Remove a body and forget any contacts it was part of.
    ///
    /// Destroying an unknown body is a logic fault: it asserts in debug
    /// builds and is a logged no-op otherwise. Returns whether a body was
    /// removed.
    pub fn destroy_body(&mut self, id: BodyId) -> bool {
        debug_assert!(self.contains(id), "destroy_body: unknown body {id:?}");
        let Some(index) = self.index_of(id) else {
            log::warn!("destroy_body: unknown body {:?}", id);
            return false;
        };
        self.bodies.remove(index);
        self.active_pairs.retain(|&(a, b)| a != id && b != id);
        true
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub fn position(&self, id: BodyId) -> Option<Vec2> {
        self.body(id).map(|b| b.position)
    }

    pub fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.body(id).map(|b| b.velocity)
    }

    /// Teleport a body. Velocity is left untouched.
    pub fn set_transform(&mut self, id: BodyId, position: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.position = position;
        }
    }

    /// Overwrite a body's velocity
    pub fn set_linear_velocity(&mut self, id: BodyId, velocity: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.velocity = velocity;
        }
    }

    /// Advance the world by one fixed step and report every overlapping pair
    pub fn step(&mut self, dt: f32, velocity_iterations: u32, position_iterations: u32) -> Vec<Contact> {
        self.step_count += 1;

        let gravity = self.gravity;
        for body in &mut self.bodies {
            if body.kind == BodyKind::Dynamic {
                body.velocity += gravity * body.gravity_scale * dt;
                body.position += body.velocity * dt;
            }
        }

        let mut contacts = Vec::new();
        let mut current_pairs = Vec::new();
        let mut solid = Vec::new();

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if a.kind == BodyKind::Static && b.kind == BodyKind::Static {
                    continue;
                }
                if !a.shape.aabb(a.position).overlaps(&b.shape.aabb(b.position)) {
                    continue;
                }

                let pair = (a.id, b.id);
                let rule = contact_rule(a.category, b.category);
                let began = self.active_pairs.binary_search(&pair).is_err();
                contacts.push(Contact {
                    a: a.id,
                    b: b.id,
                    rule,
                    began,
                });
                current_pairs.push(pair);
                if rule.solid {
                    solid.push((i, j));
                }
            }
        }
        self.active_pairs = current_pairs;

        for _ in 0..velocity_iterations {
            for &(i, j) in &solid {
                self.solve_velocity(i, j);
            }
        }
        for _ in 0..position_iterations {
            for &(i, j) in &solid {
                self.solve_position(i, j);
            }
        }

        contacts
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.binary_search_by_key(&id, |b| b.id).ok()
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        debug_assert!(self.contains(id), "unknown body {id:?}");
        match self.index_of(id) {
            Some(index) => Some(&mut self.bodies[index]),
            None => {
                log::warn!("Ignoring update to unknown body {:?}", id);
                None
            }
        }
    }

    /// Inverse-mass style weights: static bodies never move
    fn weights(&self, i: usize, j: usize) -> (f32, f32) {
        match (self.bodies[i].kind, self.bodies[j].kind) {
            (BodyKind::Dynamic, BodyKind::Dynamic) => (0.5, 0.5),
            (BodyKind::Dynamic, BodyKind::Static) => (1.0, 0.0),
            (BodyKind::Static, BodyKind::Dynamic) => (0.0, 1.0),
            (BodyKind::Static, BodyKind::Static) => (0.0, 0.0),
        }
    }

    /// Remove the approaching part of the relative normal velocity
    fn solve_velocity(&mut self, i: usize, j: usize) {
        let (a, b) = (&self.bodies[i], &self.bodies[j]);
        let result = aabb_overlap(&a.shape.aabb(a.position), &b.shape.aabb(b.position));
        if !result.hit {
            return;
        }

        let vn = (a.velocity - b.velocity).dot(result.normal);
        if vn >= 0.0 {
            return;
        }

        let (wa, wb) = self.weights(i, j);
        self.bodies[i].velocity -= result.normal * vn * wa;
        self.bodies[j].velocity += result.normal * vn * wb;
    }

    /// Push the pair apart by a fraction of the remaining penetration
    fn solve_position(&mut self, i: usize, j: usize) {
        let (a, b) = (&self.bodies[i], &self.bodies[j]);
        let result = aabb_overlap(&a.shape.aabb(a.position), &b.shape.aabb(b.position));
        if !result.hit {
            return;
        }

        let correction =
            (BAUMGARTE * (result.penetration - LINEAR_SLOP)).clamp(0.0, MAX_LINEAR_CORRECTION);
        let (wa, wb) = self.weights(i, j);
        self.bodies[i].position += result.normal * correction * wa;
        self.bodies[j].position -= result.normal * correction * wb;
    }
}
