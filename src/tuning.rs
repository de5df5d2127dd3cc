//! Data-driven game balance
//!
//! Mirrors the `consts` defaults in a serde struct so frontends can
//! load balance data without recompiling. Every simulation component
//! reads its dimensions, speeds and intervals from here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub paddle_size: Vec2,
    /// Distance of each paddle's column from its wall.
    pub paddle_margin: f32,
    pub paddle_speed: f32,

    pub ball_size: Vec2,
    pub ball_speed: f32,
    /// Added to a ball's speed on every paddle hit.
    pub ball_speed_increment: f32,
    pub ball_count: usize,

    pub creature_size: Vec2,
    pub creatures_per_kind: usize,
    pub spawn_interval_secs: f64,
    pub step_interval_secs: f64,
    pub scale_step: f32,
    pub rotation_step_degrees: f32,

    pub countdown_interval_secs: f64,
    pub frame_rate: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: consts::FIELD_WIDTH,
            field_height: consts::FIELD_HEIGHT,
            paddle_size: consts::PADDLE_SIZE,
            paddle_margin: consts::PADDLE_MARGIN,
            paddle_speed: consts::PADDLE_SPEED,
            ball_size: consts::BALL_SIZE,
            ball_speed: consts::BALL_SPEED,
            ball_speed_increment: consts::BALL_SPEED_INCREMENT,
            ball_count: consts::BALL_COUNT,
            creature_size: consts::CREATURE_SIZE,
            creatures_per_kind: consts::CREATURES_PER_KIND,
            spawn_interval_secs: consts::SPAWN_INTERVAL_SECS,
            step_interval_secs: consts::STEP_INTERVAL_SECS,
            scale_step: consts::SCALE_STEP,
            rotation_step_degrees: consts::ROTATION_STEP_DEGREES,
            countdown_interval_secs: consts::COUNTDOWN_INTERVAL_SECS,
            frame_rate: consts::FRAME_RATE,
        }
    }
}

impl Tuning {
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Seconds each frame may take before the governor stops sleeping.
    pub fn frame_budget(&self) -> f64 {
        1.0 / self.frame_rate
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
