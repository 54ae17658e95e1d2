//! Match state and core entity types
//!
//! Everything one session owns lives in [`GameState`]. Sessions are
//! self-contained: any number can run side by side in one process.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, DifficultyProfile, GameConfig};
use crate::consts::{LAUNCH_SPREAD, TRAIL_LENGTH};

/// Which contestant an entity or a point belongs to
///
/// The player defends the left edge, the AI the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

/// Axis-aligned bounding box in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// A paddle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels moved per tick under directional input
    pub speed: f32,
    pub side: Side,
    pub is_human: bool,
}

impl Paddle {
    pub fn new(pos: Vec2, speed: f32, side: Side, is_human: bool, config: &GameConfig) -> Self {
        Self {
            pos,
            width: config.paddle_width,
            height: config.paddle_height,
            speed,
            side,
            is_human,
        }
    }

    /// Apply one tick of pre-sanitized input
    ///
    /// A present `pointer_y` overrides directional intent and snaps the
    /// paddle's vertical center to it. Caller clamps afterwards.
    pub fn apply_intent(&mut self, move_up: bool, move_down: bool, pointer_y: Option<f32>) {
        if move_up {
            self.pos.y -= self.speed;
        }
        if move_down {
            self.pos.y += self.speed;
        }
        if let Some(y) = pointer_y {
            self.pos.y = y - self.height / 2.0;
        }
    }

    /// Keep the paddle fully inside the canvas
    pub fn clamp_to_bounds(&mut self, canvas_height: f32) {
        self.pos.y = self.pos.y.clamp(0.0, canvas_height - self.height);
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            left: self.pos.x,
            right: self.pos.x + self.width,
            top: self.pos.y,
            bottom: self.pos.y + self.height,
        }
    }
}

/// The ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub size: f32,
    /// Recent centers for the render collaborator (oldest first)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Ball {
    /// Create a ball already launched with a randomized serve
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: config.ball_size,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        };
        ball.reset(config, rng);
        ball
    }

    /// Recenter and relaunch at a random angle within the serve cone
    ///
    /// Launch direction (left or right) is a coin flip; launch speed is
    /// always exactly `initial_ball_speed`.
    pub fn reset(&mut self, config: &GameConfig, rng: &mut impl Rng) {
        self.pos = Vec2::new(
            (config.canvas_width - self.size) / 2.0,
            (config.canvas_height - self.size) / 2.0,
        );

        let angle = (rng.random::<f32>() - 0.5) * LAUNCH_SPREAD;
        let direction = if rng.random::<bool>() { 1.0 } else { -1.0 };
        self.vel = Vec2::new(
            angle.cos() * config.initial_ball_speed * direction,
            angle.sin() * config.initial_ball_speed,
        );

        self.trail.clear();
    }

    /// Record current center to the trail (call each Playing tick)
    pub fn record_trail(&mut self) {
        self.trail.push(self.center());
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            left: self.pos.x,
            right: self.pos.x + self.size,
            top: self.pos.y,
            bottom: self.pos.y + self.size,
        }
    }
}

/// Per-side point totals for the current match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub player: u32,
    pub ai: u32,
}

impl Scoreboard {
    pub fn record_point(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Ai => self.ai += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }

    /// The side that has reached the winning score, if any
    ///
    /// Only one side scores per rally, so a tie at the winning score cannot
    /// occur.
    pub fn winner(&self, win_score: u32) -> Option<Side> {
        if self.player >= win_score {
            Some(Side::Player)
        } else if self.ai >= win_score {
            Some(Side::Ai)
        } else {
            None
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for the match to start
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-match
    Paused,
    /// Match decided; scores and clock frozen
    GameOver,
}

/// Complete state of one match session (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Fixed for the duration of the match
    pub difficulty: DifficultyProfile,
    pub player: Paddle,
    pub ai: Paddle,
    pub ball: Ball,
    pub scoreboard: Scoreboard,
    pub phase: MatchPhase,
    pub winner: Option<Side>,
    /// Wall-clock milliseconds accumulated while Playing
    pub elapsed_ms: f64,
    /// Session RNG; the sole source of randomness (serve angles, AI jitter)
    pub rng: Pcg32,
}

/// Gap between each paddle and its goal edge
const PADDLE_MARGIN: f32 = 10.0;

impl GameState {
    /// Build a session in the `Menu` phase
    ///
    /// Rejects invalid configuration outright rather than clamping it.
    pub fn new(
        config: GameConfig,
        difficulty: DifficultyProfile,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if !(0.0..=1.0).contains(&difficulty.accuracy) {
            return Err(ConfigError::AccuracyOutOfRange {
                name: "selected".into(),
                accuracy: difficulty.accuracy,
            });
        }
        if difficulty.speed <= 0.0 {
            return Err(ConfigError::PresetSpeedInvalid {
                name: "selected".into(),
                speed: difficulty.speed,
            });
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle_y = (config.canvas_height - config.paddle_height) / 2.0;
        let player = Paddle::new(
            Vec2::new(PADDLE_MARGIN, paddle_y),
            config.paddle_speed,
            Side::Player,
            true,
            &config,
        );
        let ai = Paddle::new(
            Vec2::new(
                config.canvas_width - config.paddle_width - PADDLE_MARGIN,
                paddle_y,
            ),
            config.ai_base_speed,
            Side::Ai,
            false,
            &config,
        );
        let ball = Ball::new(&config, &mut rng);

        Ok(Self {
            config,
            difficulty,
            player,
            ai,
            ball,
            scoreboard: Scoreboard::default(),
            phase: MatchPhase::Menu,
            winner: None,
            elapsed_ms: 0.0,
            rng,
        })
    }

    /// Build a session using a named difficulty preset from the config
    pub fn from_preset(config: GameConfig, preset: &str, seed: u64) -> Result<Self, ConfigError> {
        let difficulty = config
            .preset(preset)
            .ok_or_else(|| ConfigError::UnknownPreset(preset.to_string()))?;
        Self::new(config, difficulty, seed)
    }

    /// Zero scores and clock, re-center paddles, relaunch the ball
    pub(crate) fn reset_match(&mut self) {
        self.scoreboard = Scoreboard::default();
        self.winner = None;
        self.elapsed_ms = 0.0;
        let paddle_y = (self.config.canvas_height - self.config.paddle_height) / 2.0;
        self.player.pos.y = paddle_y;
        self.ai.pos.y = paddle_y;
        self.ball.reset(&self.config, &mut self.rng);
    }
}
