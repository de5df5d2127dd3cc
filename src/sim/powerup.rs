//! Timer-driven creature activation
//!
//! A fixed wall-clock interval rolls a creature type from the weight
//! table and starts one idle instance on its activation program. Each
//! creature then advances at most one queued step per elapsed
//! per-entity cooldown, so the animation speed is frame-rate invariant.

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{AnimStep, Creature, CreatureKind};
use super::state::GameEvent;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct PowerupScheduler {
    next_spawn_at: f64,
}

impl PowerupScheduler {
    pub fn new(now: f64, tuning: &Tuning) -> Self {
        Self {
            next_spawn_at: now + tuning.spawn_interval_secs,
        }
    }

    /// Run one scheduler pass at wall-clock `now`.
    pub fn tick(
        &mut self,
        creatures: &mut [Creature],
        tuning: &Tuning,
        rng: &mut Pcg32,
        now: f64,
        events: &mut Vec<GameEvent>,
    ) {
        if now >= self.next_spawn_at {
            self.next_spawn_at = now + tuning.spawn_interval_secs;
            self.activate_one(creatures, tuning, rng, now, events);
        }

        let field = tuning.field();
        for creature in creatures.iter_mut() {
            if creature.queue.is_empty() {
                continue;
            }
            if now < creature.next_step_at {
                continue;
            }
            creature.next_step_at = now + tuning.step_interval_secs;
            advance_animation(creature, field, tuning, rng);
        }
    }

    fn activate_one(
        &mut self,
        creatures: &mut [Creature],
        tuning: &Tuning,
        rng: &mut Pcg32,
        now: f64,
        events: &mut Vec<GameEvent>,
    ) {
        let kind = pick_kind(rng);
        let idle: Vec<usize> = creatures
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == kind && c.idle())
            .map(|(i, _)| i)
            .collect();
        let Some(&idx) = idle.choose(rng) else {
            log::debug!("no idle {} cat to activate", kind.name());
            return;
        };
        let creature = &mut creatures[idx];
        creature.begin_activation(tuning.scale_step);
        creature.next_step_at = now;
        events.push(GameEvent::CreatureActivated { kind });
        log::info!("activating {} cat #{idx}", kind.name());
    }
}

/// Weighted roll across the fixed type table.
fn pick_kind(rng: &mut Pcg32) -> CreatureKind {
    let total: u32 = CreatureKind::ALL.iter().map(|k| k.spawn_weight()).sum();
    let mut roll = rng.random_range(0..total);
    for &kind in &CreatureKind::ALL {
        if roll < kind.spawn_weight() {
            return kind;
        }
        roll -= kind.spawn_weight();
    }
    // roll < total covers every weight above
    CreatureKind::White
}

/// Advance exactly one queued step. An empty queue is a guarded no-op,
/// never undefined behavior.
pub fn advance_animation(creature: &mut Creature, field: Vec2, tuning: &Tuning, rng: &mut Pcg32) {
    match creature.queue.front().copied() {
        None => {}
        Some(AnimStep::Resize { step, target }) => {
            let next = if step >= 0.0 {
                (creature.scale + step).min(target)
            } else {
                (creature.scale + step).max(target)
            };
            creature.set_scale_centered(next, field);
            if creature.scale == target {
                creature.queue.pop_front();
            }
        }
        Some(AnimStep::Relocate) => {
            let margin = creature.full_size / 2.0;
            let center = Vec2::new(
                rng.random_range(margin.x..=field.x - margin.x),
                rng.random_range(margin.y..=field.y - margin.y),
            );
            creature.recenter_at(center, field);
            creature.queue.pop_front();
        }
        Some(AnimStep::Spin) => {
            // Never popped: spins until a collision or round reset.
            creature.rotation =
                (creature.rotation + tuning.rotation_step_degrees).rem_euclid(360.0);
        }
    }
}
