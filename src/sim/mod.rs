//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One logical tick per call to [`step`], driven from outside
//! - Seeded RNG only; no thread-local randomness
//! - No rendering, input capture, or platform dependencies
//!
//! Given the same seed and the same input sequence, two sessions produce
//! identical trajectories.

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;

pub use ai::ai_update;
pub use collision::{CollisionOutcome, resolve};
pub use state::{Aabb, Ball, GameState, MatchPhase, Paddle, Scoreboard, Side};
pub use tick::{GameEvent, TickInput, step};
