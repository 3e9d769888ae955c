//! Read-only frame snapshot for a renderer
//!
//! Carries no physics meaning. A renderer picks sprites and text from it and
//! never writes back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned sprite rectangle, anchored at its bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DrawRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Body centre
    pub pos: Vec2,
    pub rect: DrawRect,
    /// Moved up since the previous frame (wings-up sprite)
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrunkView {
    pub id: u32,
    pub upper: DrawRect,
    pub lower: DrawRect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub player: PlayerView,
    pub trunks: Vec<TrunkView>,
    /// Current score while running, high score while idle
    pub score: u32,
    /// False while waiting for the first tap ("tap to start" prompt)
    pub started: bool,
}
