//! Fixed timestep accumulator
//!
//! Variable frame deltas go in, whole simulation steps come out. Frame
//! deltas are clamped to [`MAX_FRAME_TIME`] before accumulation so a stall
//! never turns into a burst of catch-up steps.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixedStepper {
    accumulator: f32,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leftover simulation time not yet consumed by a step
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Add one frame's delta (clamped)
    pub fn accumulate(&mut self, frame_dt: f32) {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_TIME);
    }

    /// Take one step's worth of time if enough has built up
    pub fn consume_step(&mut self) -> bool {
        if self.accumulator + STEP_EPSILON >= SIM_DT {
            self.accumulator = (self.accumulator - SIM_DT).max(0.0);
            true
        } else {
            false
        }
    }

    /// Drop any leftover time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
