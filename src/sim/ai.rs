//! AI paddle controller
//!
//! Picks a target each tick, then chases it at a capped rate. The cap is what
//! keeps the AI beatable: it never snaps to the ball, it has to travel.

use rand::Rng;

use crate::config::{DifficultyProfile, GameConfig};
use crate::consts::{AI_DEAD_ZONE, AI_JITTER_RANGE, MIN_PREDICT_VX};

use super::state::{Ball, Paddle};

/// Move the AI paddle one tick toward its chosen target
pub fn ai_update(
    paddle: &mut Paddle,
    ball: &Ball,
    difficulty: &DifficultyProfile,
    config: &GameConfig,
    rng: &mut impl Rng,
) {
    let center = paddle.center_y();
    let mut target_y = ball.center().y;

    // High-accuracy profiles predict the intercept point while the ball is
    // inbound. Pure linear extrapolation: wall bounces between here and the
    // paddle are ignored on purpose, difficulty tuning leans on that error.
    if difficulty.accuracy > 0.8 && ball.vel.x > MIN_PREDICT_VX {
        let time_to_reach = (paddle.pos.x - ball.pos.x) / ball.vel.x;
        target_y = ball.pos.y + ball.vel.y * time_to_reach;
    }

    // Occasional miss-tracking keeps the AI human-shaped
    if rng.random::<f32>() > difficulty.accuracy {
        target_y += (rng.random::<f32>() - 0.5) * AI_JITTER_RANGE;
    }

    let diff = target_y - center;
    if diff.abs() > AI_DEAD_ZONE {
        paddle.pos.y += diff.signum() * difficulty.speed.min(diff.abs());
    }

    paddle.clamp_to_bounds(config.canvas_height);
}
