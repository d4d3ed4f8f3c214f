//! Monster and power-up factories, plus the spawn timers that drive them

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::bestiary::Tier;
use super::state::{Adversary, AdversaryId, Behavior, GameEvent, GameState, Powerup, PowerupKind};
use crate::consts::*;

/// Spawn one monster just outside a random screen edge
pub fn spawn_adversary(state: &mut GameState) -> AdversaryId {
    let (w, h) = (state.bounds.width, state.bounds.height);
    let rng = &mut state.rng;

    let pos = match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random::<f32>() * w, -SPAWN_OFFSET),
        1 => Vec2::new(w + SPAWN_OFFSET, rng.random::<f32>() * h),
        2 => Vec2::new(rng.random::<f32>() * w, h + SPAWN_OFFSET),
        _ => Vec2::new(-SPAWN_OFFSET, rng.random::<f32>() * h),
    };

    let tier = Tier::from_roll(rng.random::<f64>(), state.progression.level);
    let table = tier.archetypes();
    let archetype = rng.random_range(0..table.len());
    let stats = &table[archetype];

    let size = stats.size * (1.0 + rng.random_range(-SIZE_JITTER..=SIZE_JITTER));
    let speed = stats.speed + rng.random::<f32>() * stats.speed_variation;
    let behavior = if rng.random_bool(CHASE_CHANCE) {
        Behavior::Chase
    } else {
        Behavior::Wander {
            heading: rng.random::<f32>() * TAU,
            elapsed: 0,
            interval: rng.random_range(100..200),
        }
    };

    let id = state.next_adversary_id();
    log::debug!("Spawned {} ({tier:?}) at {pos}", stats.name);
    state.adversaries.push(Adversary {
        id,
        tier,
        archetype,
        pos,
        size,
        speed,
        health: stats.health,
        max_health: stats.health,
        points: stats.points,
        behavior,
        spawn_grace: SPAWN_GRACE_TICKS,
        regen_ticks: 0,
    });
    state.events.push(GameEvent::AdversarySpawned { tier });
    id
}

/// Drop a random power-up at `at`, or somewhere inside the play area
pub fn spawn_powerup(state: &mut GameState, at: Option<Vec2>) -> PowerupKind {
    let rng = &mut state.rng;
    let pos = at.unwrap_or_else(|| {
        let span = |extent: f32| (extent - 2.0 * POWERUP_INSET).max(0.0);
        Vec2::new(
            rng.random::<f32>() * span(state.bounds.width) + POWERUP_INSET,
            rng.random::<f32>() * span(state.bounds.height) + POWERUP_INSET,
        )
    });
    let kind = PowerupKind::ALL[rng.random_range(0..PowerupKind::ALL.len())];

    log::debug!("Power-up {kind:?} at {pos}");
    state.powerups.push(Powerup {
        pos,
        kind,
        size: POWERUP_SIZE,
    });
    state.events.push(GameEvent::PowerupSpawned { kind, pos });
    kind
}

/// Run the per-frame spawn timers
///
/// Below the minimum population a monster appears every frame without
/// touching the timer. Otherwise one appears each time the timer reaches
/// the current spawn interval.
pub fn advance_spawning(state: &mut GameState) {
    state.spawn_counter += 1;
    if state.adversaries.len() < state.settings.min_population {
        spawn_adversary(state);
    } else if state.spawn_counter >= state.progression.spawn_interval {
        spawn_adversary(state);
        state.spawn_counter = 0;
    }

    if state.rng.random_bool(state.settings.powerup_chance) {
        spawn_powerup(state, None);
    }
}
