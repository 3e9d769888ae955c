//! Flappy Trunks - a Flappy-Bird style arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics world, contacts, obstacles, session)
//! - `settings`: Screen-space and tuning configuration
//!
//! Rendering, audio and asset handling live outside this crate. A renderer
//! feeds one tap flag per frame into [`sim::update`] and draws whatever
//! [`sim::GameState::view`] returns.

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Longest frame delta fed into the accumulator (prevents spiral of death)
    pub const MAX_FRAME_TIME: f32 = 0.25;
    /// Slack when comparing the accumulator against a whole step
    pub const STEP_EPSILON: f32 = 1e-6;
    /// Slack for the spawn timer, whose frame deltas sum over a whole interval
    pub const TIMER_EPSILON: f32 = 1e-4;

    /// Solver quality
    pub const VELOCITY_ITERATIONS: u32 = 8;
    pub const POSITION_ITERATIONS: u32 = 3;
    /// Fraction of penetration removed per position iteration
    pub const BAUMGARTE: f32 = 0.2;
    /// Allowed overlap before position correction kicks in
    pub const LINEAR_SLOP: f32 = 0.005;
    /// Largest single position correction (px)
    pub const MAX_LINEAR_CORRECTION: f32 = 2.0;

    /// Trunk barrier dimensions. Each barrier is drawn and collides at twice
    /// the half-height unit.
    pub const TRUNK_WIDTH: f32 = 5.0;
    pub const TRUNK_HALF_HEIGHT: f32 = 45.0;

    /// Invisible scoring trigger in the gap between the barriers
    pub const SCORE_BOX_WIDTH: f32 = 2.0;
    pub const SCORE_BOX_HEIGHT: f32 = 50.0;

    /// Default logical resolution
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 160.0;

    /// World gravity (px/s², pointing down). With the player scale this
    /// clears the 70 px fall from centre to floor in 21 steps.
    pub const GRAVITY: f32 = 80.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0 / 4.0;
    pub const PLAYER_GRAVITY_SCALE: f32 = 14.0;
    pub const PLAYER_X_RATIO: f32 = 0.3;
    pub const JUMP_VELOCITY: f32 = 50.0;
    pub const DEATH_POP_VELOCITY: f32 = 20.0;

    /// Horizontal obstacle scroll (px/s)
    pub const SCROLL_SPEED: f32 = 20.0;
    /// Seconds between trunk spawns
    pub const SPAWN_INTERVAL: f32 = 2.0;
    /// Trunk vertical offset range from the centre baseline (px, inclusive)
    pub const MIN_TRUNK_OFFSET: i32 = -35;
    pub const MAX_TRUNK_OFFSET: i32 = 35;
}
