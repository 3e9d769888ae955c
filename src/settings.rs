//! Game settings and tuning
//!
//! Screen-space constants and gameplay tuning are configuration inputs, not
//! computed values. Every field has a default so partial JSON files work.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Screen, physics and pacing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    /// Logical resolution all positions are expressed in
    pub screen_width: f32,
    pub screen_height: f32,

    // === Physics ===
    /// World gravity magnitude (applied downward)
    pub gravity: f32,
    /// Multiplier applied to world gravity for the player
    pub player_gravity_scale: f32,
    /// Player box edge length
    pub player_size: f32,
    /// Player x as a fraction of screen width
    pub player_x_ratio: f32,
    /// Vertical velocity set by a tap
    pub jump_velocity: f32,
    /// Upward velocity given to the player on game over
    pub death_pop_velocity: f32,

    // === Obstacles ===
    /// Leftward trunk speed (px/s)
    pub scroll_speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Inclusive trunk offset range from the centre baseline
    pub trunk_offset_min: i32,
    pub trunk_offset_max: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            gravity: GRAVITY,
            player_gravity_scale: PLAYER_GRAVITY_SCALE,
            player_size: PLAYER_SIZE,
            player_x_ratio: PLAYER_X_RATIO,
            jump_velocity: JUMP_VELOCITY,
            death_pop_velocity: DEATH_POP_VELOCITY,

            scroll_speed: SCROLL_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            trunk_offset_min: MIN_TRUNK_OFFSET,
            trunk_offset_max: MAX_TRUNK_OFFSET,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Swap a reversed offset range so sampling never sees an empty range
    pub fn sanitized(mut self) -> Self {
        if self.trunk_offset_min > self.trunk_offset_max {
            std::mem::swap(&mut self.trunk_offset_min, &mut self.trunk_offset_max);
        }
        self.spawn_interval = self.spawn_interval.max(SIM_DT);
        self
    }

    /// World gravity vector
    pub fn gravity_vec(&self) -> Vec2 {
        Vec2::new(0.0, -self.gravity)
    }

    /// Player reset position, vertically centred
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            self.screen_width * self.player_x_ratio,
            self.screen_height / 2.0 - self.player_size / 2.0,
        )
    }

    /// Trunks enter at the right edge of the visible area
    pub fn spawn_x(&self) -> f32 {
        self.screen_width
    }

    /// Baseline the upper trunk hangs from
    pub fn spawn_y(&self) -> f32 {
        self.screen_height
    }

    /// Playfield band the player centre must stay in
    pub fn vertical_bounds(&self) -> (f32, f32) {
        let half = self.player_size / 2.0;
        (half, self.screen_height - half)
    }
}
