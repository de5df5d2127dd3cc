//! Cat Pong - a two-player arcade pong match with power-up cats
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, rounds, power-ups)
//! - `platform`: Renderer / InputSource / Clock capabilities frontends supply
//! - `game`: The fixed-rate frame loop tying simulation and capabilities together
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Frame-rate cap enforced by the frame governor
    pub const FRAME_RATE: f64 = 60.0;

    /// Playing field dimensions
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Paddle defaults - a fixed margin in from each wall, vertical travel only
    pub const PADDLE_SIZE: Vec2 = Vec2::new(20.0, 120.0);
    pub const PADDLE_MARGIN: f32 = 50.0;
    pub const PADDLE_SPEED: f32 = 6.0;

    /// Ball defaults
    pub const BALL_SIZE: Vec2 = Vec2::new(16.0, 16.0);
    pub const BALL_SPEED: f32 = 4.0;
    /// Speed added on every paddle hit; rallies only get faster
    pub const BALL_SPEED_INCREMENT: f32 = 1.0;
    pub const BALL_COUNT: usize = 3;

    /// Creature defaults
    pub const CREATURE_SIZE: Vec2 = Vec2::new(48.0, 48.0);
    pub const CREATURES_PER_KIND: usize = 2;
    /// Wall-clock gap between activation rolls
    pub const SPAWN_INTERVAL_SECS: f64 = 2.5;
    /// Per-creature cooldown between animation steps
    pub const STEP_INTERVAL_SECS: f64 = 0.05;
    pub const SCALE_STEP: f32 = 0.1;
    pub const ROTATION_STEP_DEGREES: f32 = 5.0;

    /// Countdown cadence ("3", "2", "1", "GO!")
    pub const COUNTDOWN_INTERVAL_SECS: f64 = 1.0;
}
