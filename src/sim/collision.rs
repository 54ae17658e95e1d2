//! Ball integration and collision resolution
//!
//! One outcome per tick, evaluated in a fixed order: integrate, wall check,
//! paddle checks, scoring check. Integration is a single full Euler step with
//! no substepping, so a step larger than the paddle-plus-ball overlap window
//! can tunnel straight through; at stock tuning (max speed 12, window 26)
//! that cannot happen. Known limitation, kept from the original rules.

use crate::config::GameConfig;
use crate::consts::SPIN_FACTOR;

use super::state::{Ball, Paddle, Side};

/// What the resolver observed this tick (mutually exclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    None,
    WallBounce,
    /// Side whose paddle was struck
    PaddleHit(Side),
    /// Side awarded the point
    Scored(Side),
}

/// Advance the ball one tick and resolve whatever it ran into
pub fn resolve(
    ball: &mut Ball,
    player: &Paddle,
    ai: &Paddle,
    config: &GameConfig,
) -> CollisionOutcome {
    ball.pos += ball.vel;

    // Walls reflect without repositioning; a sliver of overlap on the frame
    // of impact is accepted behavior.
    if ball.pos.y <= 0.0 || ball.pos.y + ball.size >= config.canvas_height {
        ball.vel.y = -ball.vel.y;
        return CollisionOutcome::WallBounce;
    }

    for paddle in [player, ai] {
        if ball.bounds().overlaps(&paddle.bounds()) {
            paddle_response(ball, paddle, config);
            return CollisionOutcome::PaddleHit(paddle.side);
        }
    }

    // Ball must be fully past the edge before the rally is over
    if ball.pos.x < -ball.size {
        return CollisionOutcome::Scored(Side::Ai);
    }
    if ball.pos.x > config.canvas_width {
        return CollisionOutcome::Scored(Side::Player);
    }

    CollisionOutcome::None
}

/// Reflect, spin, speed up, and depenetrate after a paddle strike
fn paddle_response(ball: &mut Ball, paddle: &Paddle, config: &GameConfig) {
    ball.vel.x = -ball.vel.x;

    // Off-center contact imparts spin: -0.5 at the top edge, +0.5 at the
    // bottom, zero dead center.
    let hit_pos = (ball.center().y - paddle.pos.y) / paddle.height - 0.5;
    ball.vel.y += hit_pos * SPIN_FACTOR;

    // Each strike below the cap adds speed_increment to the magnitude;
    // spin can momentarily overshoot, so clamp back to the cap.
    let speed = ball.vel.length();
    if speed < config.max_ball_speed {
        ball.vel *= 1.0 + config.speed_increment / speed;
    }
    let speed = ball.vel.length();
    if speed > config.max_ball_speed {
        ball.vel *= config.max_ball_speed / speed;
    }

    // Snap the leading edge flush with the paddle's far edge so the same
    // strike cannot re-trigger next tick.
    let bounds = paddle.bounds();
    if ball.vel.x > 0.0 {
        ball.pos.x = bounds.right;
    } else {
        ball.pos.x = bounds.left - ball.size;
    }
}
