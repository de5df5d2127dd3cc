//! Cat Pong entry point
//!
//! Runs a headless self-playing demo match: a logging renderer, a
//! scripted input source and the system clock. A windowed frontend
//! would swap in real implementations of the same three capabilities.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use cat_pong::platform::{Color, InputSource, Renderer, Sprite, SystemClock};
use cat_pong::sim::Rect;
use cat_pong::{Game, Tuning};

/// Renderer that narrates draw calls at trace level instead of blitting.
struct LogRenderer;

impl Renderer for LogRenderer {
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
        log::trace!("draw {:?} at ({:.0},{:.0})", sprite, rect.x, rect.y);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: u32, _color: Color) {
        if !text.is_empty() {
            log::trace!("text {:?} at ({:.0},{:.0}) size {}", text, pos.x, pos.y, size);
        }
    }

    fn present_region(&mut self, _rect: Rect) {}
}

/// Scripted two-player input: both paddles wiggle on offset square
/// waves, and the match quits after a fixed number of frames.
struct DemoInput {
    frame: u32,
    frames_budget: u32,
}

impl DemoInput {
    fn new(frames_budget: u32) -> Self {
        Self {
            frame: 0,
            frames_budget,
        }
    }
}

impl InputSource for DemoInput {
    fn poll_quit(&mut self) -> bool {
        self.frame += 1;
        self.frame >= self.frames_budget
    }

    fn paddle_direction(&mut self, player: usize) -> i32 {
        let phase = (self.frame / 30 + player as u32 * 2) % 4;
        match phase {
            0 => 1,
            2 => -1,
            _ => 0,
        }
    }
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0xCA7);

    log::info!("cat-pong (headless demo) starting...");

    // ~15 seconds of play at 60 FPS
    let mut game = Game::new(
        Tuning::default(),
        seed,
        LogRenderer,
        DemoInput::new(15 * 60),
        SystemClock::new(),
    );
    game.run();

    println!(
        "final score: {} - {}",
        game.state.paddles[0].score, game.state.paddles[1].score
    );
}
