//! Collision detection and response
//!
//! The tricky part of Cat Pong: at high rally speed a ball's rect can
//! land deep inside a paddle in a single frame, so plain AABB overlap
//! can't tell which face was struck. The resolver sweeps the ball's
//! *previous* rect along one velocity axis at a time to classify the
//! hit, then snaps the ball flush to the face it came through.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::entity::{random_diagonal, Ball, Creature, CreatureKind, Paddle};
use super::state::GameEvent;

/// Index of the first paddle overlapping `ball`, pool order. `None` is
/// the normal no-collision outcome, never conflated with index 0.
fn first_overlapping_paddle(paddles: &[Paddle], ball: &Ball) -> Option<usize> {
    paddles
        .iter()
        .position(|p| p.body.rect.overlaps(&ball.body.rect))
}

/// Resolve ball/paddle contacts for the frame.
///
/// Per ball, only the first overlapping paddle in pool order is
/// resolved. Classification is binary: if the paddle overlaps the
/// ball's previous rect swept along the y velocity it is a top/bottom
/// hit; everything else - including a diagonal corner where neither
/// swept rect touches - counts as a left/right hit.
pub fn resolve_paddle_collisions(
    paddles: &mut [Paddle],
    balls: &mut [Ball],
    field: Vec2,
    speed_increment: f32,
    events: &mut Vec<GameEvent>,
) {
    for ball in balls.iter_mut() {
        let Some(pi) = first_overlapping_paddle(paddles, ball) else {
            continue;
        };
        let paddle_rect = paddles[pi].body.rect;
        let vel = ball.body.velocity();
        let prev = ball.body.prev_rect;

        // Near x edge: the face the ball came through.
        let snap_x = if ball.body.dir.x > 0 {
            paddle_rect.x - ball.body.rect.w
        } else {
            paddle_rect.right()
        };

        if paddle_rect.overlaps(&prev.translated(0.0, vel.y)) {
            // Top/bottom face. The vertical offset is the smaller of
            // the two edge overlaps, signed by the inverted y travel;
            // that is what produces the bounce angle.
            let bounce = -ball.body.dir.y;
            let top_gap = (ball.body.rect.bottom() - paddle_rect.y).abs();
            let bottom_gap = (paddle_rect.bottom() - ball.body.rect.y).abs();
            let offset = top_gap.min(bottom_gap) * bounce as f32;
            let dx = snap_x - ball.body.rect.x;
            ball.body.shift(dx, offset, field, true);
            if bounce != 0 {
                ball.body.dir.y = bounce;
            }
        } else {
            // Left/right face. The previous rect is deliberately kept
            // so the next swept test still sees the pre-collision path.
            let dx = snap_x - ball.body.rect.x;
            ball.body.shift(dx, 0.0, field, false);
            ball.body.dir.x = -ball.body.dir.x;
        }

        ball.body.speed += speed_increment;
        events.push(GameEvent::PaddleHit { paddle: pi });
    }
}

/// Resolve ball/creature contacts. Only fully materialized creatures
/// (upright and not collapsed) can be struck; the struck creature
/// always drops back to dormant afterwards.
pub fn resolve_creature_collisions(
    balls: &mut [Ball],
    creatures: &mut [Creature],
    field: Vec2,
    rng: &mut Pcg32,
    events: &mut Vec<GameEvent>,
) {
    for ci in 0..creatures.len() {
        if !creatures[ci].materialized() {
            continue;
        }
        let rect = creatures[ci].body.rect;
        if !balls.iter().any(|b| b.body.rect.overlaps(&rect)) {
            continue;
        }

        let kind = creatures[ci].kind;
        match kind {
            CreatureKind::White => {
                // Release up to two parked balls from the struck cat's
                // position, each with a fresh diagonal.
                let center = rect.center();
                let mut released = 0;
                for ball in balls.iter_mut() {
                    if released == 2 {
                        break;
                    }
                    if !ball.parked() {
                        continue;
                    }
                    let pos = center - ball.body.rect.size() / 2.0;
                    ball.body.teleport(pos, field);
                    ball.serve(random_diagonal(rng));
                    released += 1;
                }
                log::debug!("white cat struck; released {released} parked balls");
            }
            CreatureKind::Black => {
                log::info!("black cat struck");
            }
            CreatureKind::Ginger => {
                log::info!("ginger cat struck");
            }
        }

        creatures[ci].reset_dormant(field);
        events.push(GameEvent::CreatureStruck { kind });
    }
}
