//! Cooperative spawn timer
//!
//! Serviced from the frame update, never from another thread. Cancelling
//! clears the pending time, so nothing fires after a cancel even if the
//! interval had already elapsed during the current frame.

use serde::{Deserialize, Serialize};

use crate::consts::{SIM_DT, TIMER_EPSILON};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    interval: f32,
    elapsed: f32,
    active: bool,
}

impl Spawner {
    /// Intervals shorter than one step are raised to one step
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(SIM_DT),
            elapsed: 0.0,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin a fresh interval
    pub fn start(&mut self) {
        self.active = true;
        self.elapsed = 0.0;
    }

    /// Stop firing and drop any partial interval
    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
    }

    /// Advance by `dt` and return how many intervals completed
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.active {
            return 0;
        }

        self.elapsed += dt.max(0.0);
        let mut fires = 0;
        while self.elapsed + TIMER_EPSILON >= self.interval {
            self.elapsed = (self.elapsed - self.interval).max(0.0);
            fires += 1;
        }
        fires
    }
}
