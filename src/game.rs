//! Frame-loop orchestrator
//!
//! Owns the three platform capabilities and drives poll -> tick -> draw
//! at a fixed rate. Everything here is frontend-agnostic: the same loop
//! runs against a windowed renderer or the headless demo in `main`.

use glam::Vec2;

use crate::platform::{Clock, Color, InputSource, Renderer, Sprite};
use crate::sim::{tick, GameState, TickInput};
use crate::tuning::Tuning;

/// Normal score text color.
pub const SCORE_COLOR: Color = Color::rgb(20, 20, 20);
/// Faded "round about to start" score color.
pub const SCORE_COLOR_FADED: Color = Color::rgb(170, 170, 170);

const HUD_TEXT_SIZE: u32 = 16;
const OVERLAY_TEXT_SIZE: u32 = 48;

pub struct Game<R, I, C> {
    pub state: GameState,
    renderer: R,
    input: I,
    clock: C,
    // Smoothed FPS readout over the last 60 frames
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl<R: Renderer, I: InputSource, C: Clock> Game<R, I, C> {
    pub fn new(tuning: Tuning, seed: u64, renderer: R, input: I, clock: C) -> Self {
        let now = clock.now();
        log::info!("match starting with seed {seed}");
        Self {
            state: GameState::new(tuning, seed, now),
            renderer,
            input,
            clock,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Run frames until quit is requested. The frame that sees the quit
    /// flag still completes before the loop exits.
    pub fn run(&mut self) {
        while !self.state.quit {
            self.frame();
        }
        log::info!(
            "match over: {} - {}",
            self.state.paddles[0].score,
            self.state.paddles[1].score
        );
    }

    /// One poll -> tick -> draw pass plus the frame governor's sleep.
    pub fn frame(&mut self) {
        let start = self.clock.now();
        let input = TickInput {
            paddle_dirs: [
                self.input.paddle_direction(0).signum(),
                self.input.paddle_direction(1).signum(),
            ],
            quit: self.input.poll_quit(),
        };
        tick(&mut self.state, &input, start);

        for event in &self.state.events {
            log::debug!("event: {event:?}");
        }

        self.track_fps(start);
        self.draw();

        let elapsed = self.clock.now() - start;
        let budget = self.state.tuning.frame_budget();
        if elapsed < budget {
            self.clock.sleep(budget - elapsed);
        }
    }

    fn track_fps(&mut self, now: f64) {
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now - oldest;
            if elapsed > 0.0 {
                self.fps = ((self.frame_times.len() as f64 - 1.0) / elapsed).round() as u32;
            }
        }
    }

    /// Issue draw calls for everything that can have changed this
    /// frame, presenting the union of each entity's old and new rects.
    fn draw(&mut self) {
        let field = self.state.tuning.field();

        for paddle in &self.state.paddles {
            self.renderer.draw_sprite(Sprite::Paddle, paddle.body.rect);
            self.renderer
                .present_region(paddle.body.prev_rect.union(&paddle.body.rect));
        }
        for ball in &self.state.balls {
            self.renderer.draw_sprite(Sprite::Ball, ball.body.rect);
            self.renderer
                .present_region(ball.body.prev_rect.union(&ball.body.rect));
        }
        for creature in &self.state.creatures {
            if creature.dormant() {
                continue;
            }
            self.renderer
                .draw_sprite(Sprite::Creature(creature.kind), creature.body.rect);
            self.renderer
                .present_region(creature.body.prev_rect.union(&creature.body.rect));
        }

        let score_color = if self.state.round.score_faded {
            SCORE_COLOR_FADED
        } else {
            SCORE_COLOR
        };
        let score = format!(
            "{:>3}   {:<3}",
            self.state.paddles[0].score, self.state.paddles[1].score
        );
        self.renderer.draw_text(
            &score,
            Vec2::new(field.x / 2.0 - 48.0, 8.0),
            HUD_TEXT_SIZE,
            score_color,
        );

        let overlay = self.state.round.overlay_text();
        if !overlay.is_empty() {
            self.renderer
                .draw_text(overlay, field / 2.0, OVERLAY_TEXT_SIZE, SCORE_COLOR);
        }

        self.renderer.draw_text(
            &format!("{} FPS", self.fps),
            Vec2::new(field.x - 90.0, 8.0),
            HUD_TEXT_SIZE,
            SCORE_COLOR,
        );
    }
}
