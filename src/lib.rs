//! Neon Pong - a headless two-paddle arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, AI, match state)
//! - `config`: Validated configuration and difficulty presets
//! - `highscores`: In-memory leaderboard (storage belongs to a collaborator)
//!
//! The crate performs no rendering, audio, input capture, or I/O. An external
//! scheduler drives [`sim::step`] once per frame and consumes the returned
//! event list.

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::{ConfigError, DifficultyProfile, GameConfig};
pub use highscores::HighScores;

/// Fixed tuning constants (not part of the configuration surface)
pub mod consts {
    /// Vertical velocity added per unit of off-center paddle contact
    pub const SPIN_FACTOR: f32 = 5.0;
    /// AI makes no move while its center is within this distance of its target
    pub const AI_DEAD_ZONE: f32 = 10.0;
    /// Width of the uniform jitter applied to an inaccurate AI's target
    pub const AI_JITTER_RANGE: f32 = 100.0;
    /// Maximum number of trail points carried for the render collaborator
    pub const TRAIL_LENGTH: usize = 10;
    /// Total angular spread of the launch cone (radians, centered on horizontal)
    pub const LAUNCH_SPREAD: f32 = std::f32::consts::FRAC_PI_3;
    /// Horizontal speeds below this count as "not approaching" for AI prediction
    pub const MIN_PREDICT_VX: f32 = 1e-3;
}
