//! Game state registry and frame events
//!
//! One `GameState` owns every entity pool, the seeded RNG, and the
//! round/scheduler machinery. It is constructed once at match start and
//! passed by reference to whatever needs it; nothing in the crate
//! reaches for global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{random_diagonal, Ball, Creature, CreatureKind, Paddle};
use super::powerup::PowerupScheduler;
use super::rect::Rect;
use super::round::RoundState;
use crate::tuning::Tuning;

/// Cues and notifications produced while advancing one frame. External
/// collaborators (audio, telemetry) map these; the core only records
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A ball bounced off the top or bottom wall.
    WallBounce,
    /// A ball came off a paddle.
    PaddleHit { paddle: usize },
    /// A point was booked for `player` (0 = left, 1 = right).
    PointScored { player: usize },
    CreatureActivated { kind: CreatureKind },
    CreatureStruck { kind: CreatureKind },
    /// Countdown finished; play began.
    RoundStarted,
    /// Every ball parked; the match went back to a countdown.
    RoundReset,
}

/// Complete match state. Entities are created here once and reused for
/// the whole process lifetime - repositioned and reset, never destroyed.
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub paddles: [Paddle; 2],
    pub balls: Vec<Ball>,
    pub creatures: Vec<Creature>,
    pub round: RoundState,
    pub powerups: PowerupScheduler,
    /// Events from the frame currently being advanced.
    pub events: Vec<GameEvent>,
    /// Cooperative quit flag; the loop exits after the in-flight frame.
    pub quit: bool,
}

impl GameState {
    pub fn new(tuning: Tuning, seed: u64, now: f64) -> Self {
        let field = tuning.field();
        let paddle_y = (field.y - tuning.paddle_size.y) / 2.0;

        let paddles = [
            Paddle::new(
                Rect::new(
                    tuning.paddle_margin,
                    paddle_y,
                    tuning.paddle_size.x,
                    tuning.paddle_size.y,
                ),
                tuning.paddle_speed,
            ),
            Paddle::new(
                Rect::new(
                    field.x - tuning.paddle_margin - tuning.paddle_size.x,
                    paddle_y,
                    tuning.paddle_size.x,
                    tuning.paddle_size.y,
                ),
                tuning.paddle_speed,
            ),
        ];

        let balls = (0..tuning.ball_count)
            .map(|_| {
                Ball::new(
                    Rect::from_center(field / 2.0, tuning.ball_size),
                    tuning.ball_speed,
                )
            })
            .collect();

        let mut creatures = Vec::with_capacity(CreatureKind::ALL.len() * tuning.creatures_per_kind);
        for &kind in &CreatureKind::ALL {
            for _ in 0..tuning.creatures_per_kind {
                creatures.push(Creature::new(kind, field / 2.0, tuning.creature_size));
            }
        }

        let round = RoundState::new(now, tuning.countdown_interval_secs);
        let powerups = PowerupScheduler::new(now, &tuning);

        log::info!(
            "match ready: {} balls, {} cats, field {}x{}",
            tuning.ball_count,
            creatures.len(),
            field.x,
            field.y
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            paddles,
            balls,
            creatures,
            round,
            powerups,
            events: Vec::new(),
            quit: false,
        }
    }

    pub fn field(&self) -> Vec2 {
        self.tuning.field()
    }

    /// The Active -> Countdown transition: recenter everything, park
    /// every ball, collapse every cat, restart the countdown timer and
    /// fade the score text. Idempotent on positions.
    pub fn reset_round(&mut self, now: f64) {
        let field = self.field();
        for paddle in &mut self.paddles {
            paddle.recenter(field);
        }
        for ball in &mut self.balls {
            ball.recenter(field);
        }
        for creature in &mut self.creatures {
            creature.reset_dormant(field);
        }
        self.round.restart(now);
        self.events.push(GameEvent::RoundReset);
        log::info!(
            "round reset: score {} - {}",
            self.paddles[0].score,
            self.paddles[1].score
        );
    }

    /// Put the first ball into play with a fresh diagonal. The rest
    /// stay parked for a white cat to release.
    pub fn serve_ball(&mut self) {
        if let Some(ball) = self.balls.first_mut() {
            ball.serve(random_diagonal(&mut self.rng));
        }
        self.events.push(GameEvent::RoundStarted);
    }
}
