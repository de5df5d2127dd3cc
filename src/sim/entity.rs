//! Entity records and per-kind behavior
//!
//! One shared `Body` record carries the fields every moving object has
//! (rect, previous rect, direction, speed); `Paddle`, `Ball` and
//! `Creature` wrap it with their own state. Velocity is always derived:
//! `direction * speed`, with direction components kept in {-1, 0, 1}.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};
use rand::Rng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::state::GameEvent;

/// Common positional state for every moving entity.
#[derive(Debug, Clone)]
pub struct Body {
    pub rect: Rect,
    /// Rect as of the last position-updating move; the collision
    /// resolver's swept tests read this.
    pub prev_rect: Rect,
    /// Per-axis sign of travel, components in {-1, 0, 1}.
    pub dir: IVec2,
    pub speed: f32,
    pub base_speed: f32,
}

impl Body {
    pub fn new(rect: Rect, base_speed: f32) -> Self {
        Self {
            rect,
            prev_rect: rect,
            dir: IVec2::ZERO,
            speed: base_speed,
            base_speed,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.dir.as_vec2() * self.speed
    }

    /// Offset the rect by `(dx, dy)`, clamped inside the field. When
    /// `update_previous` is set, the pre-move rect becomes `prev_rect`.
    pub fn shift(&mut self, dx: f32, dy: f32, field: Vec2, update_previous: bool) {
        let next = self.rect.translated(dx, dy).clamped(field);
        if update_previous {
            self.prev_rect = self.rect;
        }
        self.rect = next;
    }

    /// Jump to an absolute position with no motion history.
    pub fn teleport(&mut self, pos: Vec2, field: Vec2) {
        self.rect = Rect::new(pos.x, pos.y, self.rect.w, self.rect.h).clamped(field);
        self.prev_rect = self.rect;
    }
}

/// Fresh diagonal direction, each component ±1.
pub fn random_diagonal(rng: &mut Pcg32) -> IVec2 {
    let x = if rng.random_bool(0.5) { 1 } else { -1 };
    let y = if rng.random_bool(0.5) { 1 } else { -1 };
    IVec2::new(x, y)
}

// ---------------------------------------------------------------------------
// Paddle

/// A player's paddle: vertical travel only, plus the score it defends.
#[derive(Debug, Clone)]
pub struct Paddle {
    pub body: Body,
    pub score: u32,
}

impl Paddle {
    pub fn new(rect: Rect, speed: f32) -> Self {
        Self {
            body: Body::new(rect, speed),
            score: 0,
        }
    }

    /// Set this frame's travel from the input source: -1 up, 0 hold, 1 down.
    pub fn steer(&mut self, dir: i32) {
        self.body.dir = IVec2::new(0, dir.signum());
    }

    pub fn advance(&mut self, field: Vec2) {
        let v = self.body.velocity();
        self.body.shift(v.x, v.y, field, true);
    }

    /// Back to vertical center; the paddle keeps its column.
    pub fn recenter(&mut self, field: Vec2) {
        let y = (field.y - self.body.rect.h) / 2.0;
        self.body.rect.y = y;
        self.body.prev_rect = self.body.rect;
        self.body.dir = IVec2::ZERO;
    }
}

// ---------------------------------------------------------------------------
// Ball

/// What a ball's move reported: the only entity move with a meaningful
/// return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    NoScore,
    /// Ball reached the right boundary.
    PlayerOne,
    /// Ball reached the left boundary.
    PlayerTwo,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub body: Body,
}

impl Ball {
    pub fn new(rect: Rect, base_speed: f32) -> Self {
        Self {
            body: Body::new(rect, base_speed),
        }
    }

    /// Direction `(0,0)` is the sentinel for "out of play".
    pub fn parked(&self) -> bool {
        self.body.dir == IVec2::ZERO
    }

    pub fn park(&mut self) {
        self.body.dir = IVec2::ZERO;
        self.body.speed = self.body.base_speed;
    }

    /// Put the ball back into play at base speed.
    pub fn serve(&mut self, dir: IVec2) {
        self.body.dir = dir;
        self.body.speed = self.body.base_speed;
    }

    /// Park at the field center.
    pub fn recenter(&mut self, field: Vec2) {
        self.body.rect = Rect::from_center(field / 2.0, self.body.rect.size());
        self.body.prev_rect = self.body.rect;
        self.park();
    }

    /// Move one frame. Top/bottom contact inverts the y direction and
    /// emits a wall-bounce cue; reaching the left boundary scores for
    /// player two, the right boundary for player one, either of which
    /// parks the ball and resets its speed.
    pub fn advance(&mut self, field: Vec2, events: &mut Vec<GameEvent>) -> MoveOutcome {
        if self.parked() {
            return MoveOutcome::NoScore;
        }
        let v = self.body.velocity();
        self.body.shift(v.x, v.y, field, true);

        let rect = self.body.rect;
        if rect.y <= 0.0 || rect.bottom() >= field.y {
            self.body.dir.y = -self.body.dir.y;
            events.push(GameEvent::WallBounce);
        }
        if rect.x <= 0.0 {
            self.park();
            return MoveOutcome::PlayerTwo;
        }
        if rect.right() >= field.x {
            self.park();
            return MoveOutcome::PlayerOne;
        }
        MoveOutcome::NoScore
    }
}

// ---------------------------------------------------------------------------
// Creature

/// Power-up creature types, each with a spawn weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatureKind {
    White,
    Black,
    Ginger,
}

impl CreatureKind {
    pub const ALL: [CreatureKind; 3] =
        [CreatureKind::White, CreatureKind::Black, CreatureKind::Ginger];

    /// Relative weight in the scheduler's activation roll.
    pub fn spawn_weight(self) -> u32 {
        match self {
            CreatureKind::White => 20,
            CreatureKind::Black => 35,
            CreatureKind::Ginger => 45,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CreatureKind::White => "white",
            CreatureKind::Black => "black",
            CreatureKind::Ginger => "ginger",
        }
    }
}

/// One queued animation step. The scheduler dispatches on the tag;
/// `Resize` carries its own parameters while `Relocate` and `Spin` take
/// none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimStep {
    /// Move scale by `step` per gated tick until it reaches `target`.
    Resize { step: f32, target: f32 },
    /// Jump to a random spot on the field.
    Relocate,
    /// Keep turning by a fixed degree step until something resets the
    /// creature.
    Spin,
}

/// A power-up creature. Dormant creatures are collapsed to zero scale
/// and invisible; a creature counts as fully materialized only when it
/// is upright (rotation % 360 == 0) and not collapsed.
#[derive(Debug, Clone)]
pub struct Creature {
    pub body: Body,
    pub kind: CreatureKind,
    /// Degrees; 0 = upright/dormant, anything else = mid-animation.
    pub rotation: f32,
    /// 0.0 collapsed .. 1.0 full sprite size.
    pub scale: f32,
    pub queue: VecDeque<AnimStep>,
    pub full_size: Vec2,
    /// Wall-clock gate for the next queued-step advance.
    pub next_step_at: f64,
}

impl Creature {
    pub fn new(kind: CreatureKind, center: Vec2, full_size: Vec2) -> Self {
        Self {
            body: Body::new(Rect::from_center(center, Vec2::ZERO), 0.0),
            kind,
            rotation: 0.0,
            scale: 0.0,
            queue: VecDeque::new(),
            full_size,
            next_step_at: 0.0,
        }
    }

    pub fn dormant(&self) -> bool {
        self.scale <= 0.0
    }

    /// Dormant with nothing queued: eligible for a fresh activation.
    pub fn idle(&self) -> bool {
        self.dormant() && self.queue.is_empty()
    }

    /// Visible, upright, and therefore hittable.
    pub fn materialized(&self) -> bool {
        self.rotation.rem_euclid(360.0) == 0.0 && !self.dormant()
    }

    /// Load the activation program: collapse, relocate, grow, then spin.
    /// Valid from dormant (the collapse completes immediately) or from
    /// fully enlarged (a restart shrinks it back down first).
    pub fn begin_activation(&mut self, scale_step: f32) {
        self.queue.clear();
        self.queue.push_back(AnimStep::Resize {
            step: -scale_step,
            target: 0.0,
        });
        self.queue.push_back(AnimStep::Relocate);
        self.queue.push_back(AnimStep::Resize {
            step: scale_step,
            target: 1.0,
        });
        self.queue.push_back(AnimStep::Spin);
    }

    /// Rescale around the current center so the sprite doesn't drift.
    pub fn set_scale_centered(&mut self, scale: f32, field: Vec2) {
        let center = self.body.rect.center();
        self.scale = scale;
        self.body.rect = Rect::from_center(center, self.full_size * scale).clamped(field);
        self.body.prev_rect = self.body.rect;
    }

    /// Move the sprite center, keeping the current scale.
    pub fn recenter_at(&mut self, center: Vec2, field: Vec2) {
        self.body.rect = Rect::from_center(center, self.full_size * self.scale).clamped(field);
        self.body.prev_rect = self.body.rect;
    }

    /// Collapse back to dormant: zero scale, upright, queue cleared.
    pub fn reset_dormant(&mut self, field: Vec2) {
        self.rotation = 0.0;
        self.queue.clear();
        self.set_scale_centered(0.0, field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    const FIELD: Vec2 = Vec2::new(1280.0, 720.0);

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball::new(Rect::new(x, y, 16.0, 16.0), 4.0)
    }

    #[test]
    fn parked_ball_never_moves() {
        let mut ball = ball_at(100.0, 100.0);
        let mut events = Vec::new();
        assert!(ball.parked());
        let outcome = ball.advance(FIELD, &mut events);
        assert_eq!(outcome, MoveOutcome::NoScore);
        assert_eq!(ball.body.rect, Rect::new(100.0, 100.0, 16.0, 16.0));
        assert!(events.is_empty());
    }

    #[test]
    fn top_wall_inverts_y_only() {
        let mut ball = ball_at(200.0, 2.0);
        ball.serve(IVec2::new(1, -1));
        let mut events = Vec::new();
        let outcome = ball.advance(FIELD, &mut events);
        assert_eq!(outcome, MoveOutcome::NoScore);
        assert_eq!(ball.body.dir, IVec2::new(1, 1));
        assert_eq!(ball.body.speed, 4.0);
        assert_eq!(ball.body.rect.y, 0.0);
        assert_eq!(events, vec![GameEvent::WallBounce]);
    }

    #[test]
    fn bottom_wall_inverts_y_only() {
        let mut ball = ball_at(200.0, FIELD.y - 18.0);
        ball.serve(IVec2::new(-1, 1));
        let mut events = Vec::new();
        ball.advance(FIELD, &mut events);
        assert_eq!(ball.body.dir, IVec2::new(-1, -1));
        assert_eq!(ball.body.rect.bottom(), FIELD.y);
    }

    #[test]
    fn left_boundary_scores_for_player_two() {
        let mut ball = ball_at(2.0, 300.0);
        ball.serve(IVec2::new(-1, 0));
        ball.body.speed = 9.0;
        let mut events = Vec::new();
        let outcome = ball.advance(FIELD, &mut events);
        assert_eq!(outcome, MoveOutcome::PlayerTwo);
        assert!(ball.parked());
        assert_eq!(ball.body.speed, ball.body.base_speed);
        assert_eq!(ball.body.rect.x, 0.0);
    }

    #[test]
    fn right_boundary_scores_for_player_one() {
        let mut ball = ball_at(FIELD.x - 18.0, 300.0);
        ball.serve(IVec2::new(1, 0));
        let mut events = Vec::new();
        let outcome = ball.advance(FIELD, &mut events);
        assert_eq!(outcome, MoveOutcome::PlayerOne);
        assert!(ball.parked());
    }

    #[test]
    fn paddle_steer_is_vertical_and_clamped() {
        let mut paddle = Paddle::new(Rect::new(50.0, 300.0, 20.0, 120.0), 6.0);
        paddle.steer(5);
        assert_eq!(paddle.body.dir, IVec2::new(0, 1));
        paddle.steer(-3);
        assert_eq!(paddle.body.dir, IVec2::new(0, -1));

        // Hold the paddle against the top wall for a while
        for _ in 0..500 {
            paddle.advance(FIELD);
        }
        assert_eq!(paddle.body.rect.y, 0.0);
    }

    #[test]
    fn paddle_recenter_keeps_column() {
        let mut paddle = Paddle::new(Rect::new(50.0, 0.0, 20.0, 120.0), 6.0);
        paddle.recenter(FIELD);
        assert_eq!(paddle.body.rect.x, 50.0);
        assert_eq!(paddle.body.rect.y, (FIELD.y - 120.0) / 2.0);
    }

    #[test]
    fn spinning_creature_is_not_materialized() {
        let mut cat = Creature::new(CreatureKind::Black, FIELD / 2.0, Vec2::new(48.0, 48.0));
        cat.set_scale_centered(1.0, FIELD);
        assert!(cat.materialized());

        cat.rotation = 45.0;
        assert!(!cat.materialized());

        // A full revolution lands upright and hittable again
        cat.rotation = 0.0;
        assert!(cat.materialized());
    }

    #[test]
    fn collapsed_creature_is_not_materialized() {
        let cat = Creature::new(CreatureKind::White, FIELD / 2.0, Vec2::new(48.0, 48.0));
        assert!(cat.dormant());
        assert!(!cat.materialized());
    }

    #[test]
    fn reset_dormant_clears_everything() {
        let mut cat = Creature::new(CreatureKind::Ginger, FIELD / 2.0, Vec2::new(48.0, 48.0));
        cat.begin_activation(0.1);
        cat.set_scale_centered(1.0, FIELD);
        cat.rotation = 120.0;
        cat.reset_dormant(FIELD);
        assert!(cat.idle());
        assert_eq!(cat.rotation, 0.0);
        assert_eq!(cat.body.rect.size(), Vec2::ZERO);
    }

    #[test]
    fn random_diagonal_components_are_unit() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let d = random_diagonal(&mut rng);
            assert!(d.x == 1 || d.x == -1);
            assert!(d.y == 1 || d.y == -1);
        }
    }

    proptest! {
        /// Any move lands fully inside the field, whatever the offset.
        #[test]
        fn shift_stays_in_bounds(
            x in -200.0f32..1500.0,
            y in -200.0f32..900.0,
            dx in -50.0f32..50.0,
            dy in -50.0f32..50.0,
        ) {
            let mut body = Body::new(Rect::new(x, y, 16.0, 16.0).clamped(FIELD), 4.0);
            body.shift(dx, dy, FIELD, true);
            prop_assert!(body.rect.x >= 0.0);
            prop_assert!(body.rect.y >= 0.0);
            prop_assert!(body.rect.right() <= FIELD.x);
            prop_assert!(body.rect.bottom() <= FIELD.y);
        }
    }
}
