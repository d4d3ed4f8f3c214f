//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one frame. Order within a
//! frame is fixed: input, movement of everything, collisions, timers,
//! progression, weapons, spawning.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use super::collision::{self, purge_orphaned_missiles};
use super::effects::{advance_explosions, tick_timers};
use super::geometry::{direction_to, distance, unit};
use super::progression::check_level_up;
use super::spawn::advance_spawning;
use super::state::{Behavior, GameState};
use super::weapons::{Weapon, advance_blades, auto_fire, fire_manual, switch_weapon, unlocked_weapons};
use crate::consts::*;
use crate::{heading, normalize_angle};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Desired movement; each axis is clamped to [-1, 1] and scaled by avatar speed
    pub movement: Vec2,
    /// Pointer fire target, if the player clicked/tapped this frame
    pub fire_at: Option<Vec2>,
    /// Cycle to the next unlocked weapon
    pub switch_weapon: bool,
}

impl TickInput {
    /// Simple demo player: dodge, grab power-ups, shoot the closest monster
    pub fn autopilot(state: &GameState) -> Self {
        let me = state.avatar.pos;
        let nearest = state
            .adversaries
            .iter()
            .filter(|a| a.is_alive())
            .min_by(|a, b| distance(me, a.pos).total_cmp(&distance(me, b.pos)));

        let threat = nearest.filter(|a| distance(me, a.pos) < 120.0 + a.size);
        let movement = match threat {
            Some(a) => direction_to(a.pos, me).unwrap_or(Vec2::X),
            None => state
                .powerups
                .iter()
                .min_by(|a, b| distance(me, a.pos).total_cmp(&distance(me, b.pos)))
                .map(|p| p.pos)
                .or_else(|| Some(state.bounds.center()))
                .and_then(|goal| direction_to(me, goal))
                .unwrap_or(Vec2::ZERO),
        };

        // Prefer the strongest aimed weapon available
        let preferred = unlocked_weapons(state.progression.level)
            .filter(|w| *w != Weapon::Blades)
            .last()
            .unwrap_or(Weapon::Bullets);

        Self {
            movement,
            fire_at: nearest.map(|a| a.pos),
            switch_weapon: state.weapon != preferred,
        }
    }
}

/// Consume a state, advance it one frame and hand it back
pub fn tick(mut state: GameState, input: &TickInput) -> GameState {
    step(&mut state, input);
    state
}

/// Advance the game state by one frame in place
///
/// After game over this only clears the event list. On the frame the
/// avatar dies, kills and pickups still resolve but nothing later runs.
pub fn step(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    if state.is_over() {
        return;
    }
    state.frame += 1;

    // Player input
    if input.switch_weapon {
        switch_weapon(state);
    }
    move_avatar(state, input.movement);
    if let Some(target) = input.fire_at {
        fire_manual(state, target);
    }

    // Movement
    advance_bullets(state);
    advance_missiles(state);
    advance_grenades(state);
    advance_blades(state);
    advance_explosions(state);
    advance_adversaries(state);

    // Collisions and removals
    collision::resolve(state);
    if state.is_over() {
        return;
    }

    // Timers and progression
    tick_timers(state);
    check_level_up(state);

    // Cooldowns, then firing
    state.cooldowns.tick();
    state.manual_cooldown = state.manual_cooldown.saturating_sub(1);
    auto_fire(state);

    advance_spawning(state);
}

fn move_avatar(state: &mut GameState, movement: Vec2) {
    if !movement.is_finite() {
        return;
    }
    let avatar = &mut state.avatar;
    let delta = movement.clamp(Vec2::NEG_ONE, Vec2::ONE) * avatar.speed;
    avatar.pos = state.bounds.clamp_inside(avatar.pos + delta, avatar.size);
}

fn advance_bullets(state: &mut GameState) {
    let bounds = state.bounds;
    state.bullets.retain_mut(|b| {
        b.pos += b.vel;
        bounds.contains_with_margin(b.pos, 0.0)
    });
}

/// Home each missile on its target; orphans and strays are dropped
fn advance_missiles(state: &mut GameState) {
    let bounds = state.bounds;
    let adversaries = &state.adversaries;
    state.missiles.retain_mut(|m| {
        let Some(target) = adversaries.iter().find(|a| a.id == m.target) else {
            return false;
        };
        if let Some(dir) = direction_to(m.pos, target.pos) {
            m.angle = heading(dir);
            m.pos += dir * m.speed;
        }
        bounds.contains_with_margin(m.pos, MISSILE_MARGIN)
    });
}

/// Move grenades until they reach their range, then burn the fuse
fn advance_grenades(state: &mut GameState) {
    let bounds = state.bounds;
    state.grenades.retain_mut(|g| {
        if !g.halted {
            let remaining = g.max_travel - g.traveled();
            if g.vel.length() >= remaining {
                g.pos = g.origin + g.vel.normalize_or_zero() * g.max_travel;
                g.halted = true;
            } else {
                g.pos += g.vel;
            }
        }
        g.fuse = g.fuse.saturating_sub(1);
        // A live fuse off-screen is dropped without exploding
        g.fuse == 0 || bounds.contains_with_margin(g.pos, GRENADE_MARGIN)
    });
}

/// Grace, regeneration, movement and edge handling for every monster
fn advance_adversaries(state: &mut GameState) {
    let target = state.avatar.pos;
    let bounds = state.bounds;
    let center = bounds.center();
    let speed_factor = if state.buffs.freeze() {
        FREEZE_SPEED_FACTOR
    } else {
        1.0
    };
    let rng = &mut state.rng;

    let before = state.adversaries.len();
    state.adversaries.retain_mut(|a| {
        a.spawn_grace = a.spawn_grace.saturating_sub(1);

        // Regen
        if a.is_alive() && a.health < a.max_health {
            a.regen_ticks += 1;
            if a.regen_ticks >= REGEN_TICKS {
                a.health = (a.health + 1).min(a.max_health);
                a.regen_ticks = 0;
            }
        } else {
            a.regen_ticks = 0;
        }

        let speed = a.speed * speed_factor;
        match &mut a.behavior {
            Behavior::Chase => {
                if let Some(dir) = direction_to(a.pos, target) {
                    a.pos += dir * speed;
                }
            }
            Behavior::Wander {
                heading,
                elapsed,
                interval,
            } => {
                *elapsed += 1;
                if *elapsed >= *interval {
                    *heading = rng.random::<f32>() * TAU;
                    *elapsed = 0;
                    *interval = rng.random_range(60..180);
                }
                a.pos += unit(*heading) * speed;
            }
        }

        if bounds.contains_with_margin(a.pos, DESPAWN_MARGIN + a.size) {
            return true;
        }
        // Off-screen: usually turn back toward the middle, else despawn
        if !rng.random_bool(TURN_BACK_CHANCE) {
            return false;
        }
        if let Behavior::Wander {
            heading: h,
            elapsed,
            ..
        } = &mut a.behavior
        {
            *h = normalize_angle(heading(center - a.pos) + (rng.random::<f32>() - 0.5) * PI);
            *elapsed = 0;
        }
        true
    });

    if state.adversaries.len() != before {
        purge_orphaned_missiles(state);
    }
}
