//! Game configuration and difficulty presets
//!
//! All tunable numbers come through [`GameConfig`]. Invalid configuration is
//! rejected at construction time with a [`ConfigError`]; the simulation never
//! silently clamps config values (only runtime positions are clamped).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected at construction time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("paddle height {paddle} exceeds canvas height {canvas}")]
    PaddleTooTall { paddle: f32, canvas: f32 },

    #[error("initial ball speed {initial} exceeds max ball speed {max}")]
    InitialSpeedTooHigh { initial: f32, max: f32 },

    #[error("win score must be at least 1")]
    ZeroWinScore,

    #[error("difficulty preset '{name}': accuracy {accuracy} outside [0, 1]")]
    AccuracyOutOfRange { name: String, accuracy: f32 },

    #[error("difficulty preset '{name}': speed {speed} must be positive")]
    PresetSpeedInvalid { name: String, speed: f32 },

    #[error("unknown difficulty preset '{0}'")]
    UnknownPreset(String),

    #[error("config parse error: {0}")]
    Parse(String),
}

/// A named difficulty level: AI movement cap and targeting accuracy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Maximum pixels the AI paddle center moves per tick
    pub speed: f32,
    /// Probability in [0, 1] that the AI tracks its true target on a tick
    pub accuracy: f32,
}

/// Full configuration surface for one match session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Human paddle pixels per tick
    pub paddle_speed: f32,
    /// Fallback AI speed when a preset supplies none
    pub ai_base_speed: f32,
    pub ball_size: f32,
    pub initial_ball_speed: f32,
    pub max_ball_speed: f32,
    /// Speed gained per paddle hit while below the cap
    pub speed_increment: f32,
    pub win_score: u32,
    pub difficulty_presets: BTreeMap<String, DifficultyProfile>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut presets = BTreeMap::new();
        presets.insert("easy".to_string(), DifficultyProfile { speed: 3.0, accuracy: 0.7 });
        presets.insert("medium".to_string(), DifficultyProfile { speed: 5.0, accuracy: 0.85 });
        presets.insert("hard".to_string(), DifficultyProfile { speed: 7.0, accuracy: 0.95 });

        Self {
            canvas_width: 800.0,
            canvas_height: 500.0,
            paddle_width: 10.0,
            paddle_height: 100.0,
            paddle_speed: 6.0,
            ai_base_speed: 5.0,
            ball_size: 16.0,
            initial_ball_speed: 5.0,
            max_ball_speed: 12.0,
            speed_increment: 0.5,
            win_score: 11,
            difficulty_presets: presets,
        }
    }
}

impl GameConfig {
    /// Parse config from JSON, then validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field; called by `GameState::new` before any state is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(ConfigError::InvalidCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }

        let positive = [
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ai_base_speed", self.ai_base_speed),
            ("ball_size", self.ball_size),
            ("initial_ball_speed", self.initial_ball_speed),
            ("max_ball_speed", self.max_ball_speed),
            ("speed_increment", self.speed_increment),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.paddle_height > self.canvas_height {
            return Err(ConfigError::PaddleTooTall {
                paddle: self.paddle_height,
                canvas: self.canvas_height,
            });
        }
        if self.initial_ball_speed > self.max_ball_speed {
            return Err(ConfigError::InitialSpeedTooHigh {
                initial: self.initial_ball_speed,
                max: self.max_ball_speed,
            });
        }
        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }

        for (name, preset) in &self.difficulty_presets {
            if !(0.0..=1.0).contains(&preset.accuracy) {
                return Err(ConfigError::AccuracyOutOfRange {
                    name: name.clone(),
                    accuracy: preset.accuracy,
                });
            }
            if preset.speed <= 0.0 {
                return Err(ConfigError::PresetSpeedInvalid {
                    name: name.clone(),
                    speed: preset.speed,
                });
            }
        }

        Ok(())
    }

    /// Look up a named difficulty preset
    pub fn preset(&self, name: &str) -> Option<DifficultyProfile> {
        self.difficulty_presets.get(name).copied()
    }
}
