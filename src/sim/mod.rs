//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Wall-clock timestamps passed in, never read from the environment
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod powerup;
pub mod rect;
pub mod round;
pub mod state;
pub mod tick;

pub use collision::{resolve_creature_collisions, resolve_paddle_collisions};
pub use entity::{AnimStep, Ball, Body, Creature, CreatureKind, MoveOutcome, Paddle};
pub use powerup::PowerupScheduler;
pub use rect::Rect;
pub use round::{RoundPhase, RoundState, COUNTDOWN_TEXT};
pub use state::{GameEvent, GameState};
pub use tick::{tick, TickInput};
