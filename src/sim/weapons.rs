//! Weapon selection, cooldowns and projectile factories
//!
//! Four weapons, one handler each. Bullets, grenades and missiles are fired
//! through [`fire`]; blades have no shot and instead stay live around the
//! avatar while selected.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{direction_to, unit};
use super::state::{Bullet, GameEvent, GameState, Grenade, Missile};
use crate::consts::*;
use crate::{heading, polar_to_cartesian};

/// Weapon kinds, in switch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weapon {
    Bullets,
    Blades,
    Grenades,
    Missiles,
}

impl Weapon {
    pub const ALL: [Weapon; 4] = [
        Weapon::Bullets,
        Weapon::Blades,
        Weapon::Grenades,
        Weapon::Missiles,
    ];

    pub fn unlock_level(self) -> u32 {
        match self {
            Weapon::Bullets | Weapon::Blades => 1,
            Weapon::Grenades => GRENADE_UNLOCK_LEVEL,
            Weapon::Missiles => MISSILE_UNLOCK_LEVEL,
        }
    }

    pub fn is_unlocked(self, level: u32) -> bool {
        level >= self.unlock_level()
    }

    /// Frames until this weapon can fire again after a shot
    pub fn cooldown(self, rapid_fire: bool) -> u32 {
        match (self, rapid_fire) {
            (Weapon::Bullets, false) => BULLET_COOLDOWN,
            (Weapon::Bullets, true) => BULLET_COOLDOWN_RAPID,
            (Weapon::Grenades, false) => GRENADE_COOLDOWN,
            (Weapon::Grenades, true) => GRENADE_COOLDOWN_RAPID,
            (Weapon::Missiles, false) => MISSILE_COOLDOWN,
            (Weapon::Missiles, true) => MISSILE_COOLDOWN_RAPID,
            (Weapon::Blades, _) => 0,
        }
    }
}

/// Weapons available at `level`, in switch order
pub fn unlocked_weapons(level: u32) -> impl Iterator<Item = Weapon> {
    Weapon::ALL.into_iter().filter(move |w| w.is_unlocked(level))
}

/// Per-weapon frames remaining before the next shot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponCooldowns {
    pub bullets: u32,
    pub grenades: u32,
    pub missiles: u32,
}

impl WeaponCooldowns {
    pub fn get(&self, weapon: Weapon) -> u32 {
        match weapon {
            Weapon::Bullets => self.bullets,
            Weapon::Grenades => self.grenades,
            Weapon::Missiles => self.missiles,
            Weapon::Blades => 0,
        }
    }

    pub fn set(&mut self, weapon: Weapon, ticks: u32) {
        match weapon {
            Weapon::Bullets => self.bullets = ticks,
            Weapon::Grenades => self.grenades = ticks,
            Weapon::Missiles => self.missiles = ticks,
            Weapon::Blades => {}
        }
    }

    pub fn tick(&mut self) {
        self.bullets = self.bullets.saturating_sub(1);
        self.grenades = self.grenades.saturating_sub(1);
        self.missiles = self.missiles.saturating_sub(1);
    }
}

/// Select the next unlocked weapon
///
/// A selection that is no longer unlocked falls back to the first unlocked
/// weapon instead of advancing.
pub fn switch_weapon(state: &mut GameState) {
    let level = state.progression.level;
    let available: Vec<Weapon> = unlocked_weapons(level).collect();
    let next = match available.iter().position(|w| *w == state.weapon) {
        Some(i) => available[(i + 1) % available.len()],
        None => Weapon::Bullets,
    };
    log::debug!("Weapon switch {:?} -> {next:?}", state.weapon);
    state.weapon = next;
}

/// Frames between automatic (and pointer) shots
pub fn fire_cadence(rapid_fire: bool) -> u32 {
    if rapid_fire {
        AUTO_FIRE_TICKS_RAPID
    } else {
        AUTO_FIRE_TICKS
    }
}

/// Use the selected weapon toward `target`
///
/// Returns true if anything was launched. Locked weapons and weapons on
/// cooldown do nothing.
pub fn fire(state: &mut GameState, target: Vec2) -> bool {
    let weapon = state.weapon;
    if !weapon.is_unlocked(state.progression.level) || state.cooldowns.get(weapon) > 0 {
        return false;
    }
    match weapon {
        Weapon::Bullets => fire_bullets(state, target),
        Weapon::Blades => false,
        Weapon::Grenades => throw_grenades(state, target),
        Weapon::Missiles => fire_missiles(state),
    }
}

/// Pointer-triggered shot, rate limited separately from auto-fire
pub fn fire_manual(state: &mut GameState, target: Vec2) -> bool {
    if state.manual_cooldown > 0 {
        return false;
    }
    state.manual_cooldown = fire_cadence(state.buffs.rapid_fire());
    fire(state, target)
}

/// Count up the auto-fire clock and shoot at the nearest monster when due
pub fn auto_fire(state: &mut GameState) -> bool {
    state.auto_fire_counter += 1;
    if state.auto_fire_counter < fire_cadence(state.buffs.rapid_fire()) {
        return false;
    }
    state.auto_fire_counter = 0;

    let nearest = state
        .nearest_adversaries(state.avatar.pos, 1)
        .first()
        .and_then(|id| state.adversary(*id))
        .map(|a| a.pos);
    match nearest {
        Some(target) => fire(state, target),
        None => false,
    }
}

fn fire_bullets(state: &mut GameState, target: Vec2) -> bool {
    let origin = state.avatar.pos;
    let Some(aim) = direction_to(origin, target) else {
        return false;
    };
    state
        .cooldowns
        .set(Weapon::Bullets, Weapon::Bullets.cooldown(state.buffs.rapid_fire()));

    let directions: Vec<Vec2> = if state.buffs.multi_shot() {
        radial_spread(MULTI_SHOT_RAYS)
    } else {
        vec![aim]
    };
    let count = directions.len() as u32;
    state.bullets.extend(directions.into_iter().map(|dir| Bullet {
        pos: origin,
        vel: dir * BULLET_SPEED,
        size: BULLET_SIZE,
        damage: BULLET_DAMAGE,
    }));
    state.events.push(GameEvent::ShotFired { count });
    true
}

/// `count` unit vectors evenly spaced around the circle, starting at +x
pub fn radial_spread(count: u32) -> Vec<Vec2> {
    (0..count)
        .map(|i| unit(i as f32 * TAU / count as f32))
        .collect()
}

fn fire_missiles(state: &mut GameState) -> bool {
    state
        .cooldowns
        .set(Weapon::Missiles, Weapon::Missiles.cooldown(state.buffs.rapid_fire()));

    let count = if state.buffs.multi_shot() {
        MISSILE_TARGETS_MULTI
    } else {
        MISSILE_TARGETS
    };
    let origin = state.avatar.pos;
    let targets = state.nearest_adversaries(origin, count);
    for target in &targets {
        state.missiles.push(Missile {
            pos: origin,
            target: *target,
            speed: MISSILE_SPEED,
            size: MISSILE_SIZE,
            damage: MISSILE_DAMAGE,
            angle: 0.0,
        });
        state.events.push(GameEvent::MissileLaunched);
    }
    !targets.is_empty()
}

fn throw_grenades(state: &mut GameState, target: Vec2) -> bool {
    let origin = state.avatar.pos;
    let Some(aim) = direction_to(origin, target) else {
        return false;
    };
    state
        .cooldowns
        .set(Weapon::Grenades, Weapon::Grenades.cooldown(state.buffs.rapid_fire()));

    let count = if state.buffs.multi_shot() {
        GRENADE_COUNT_MULTI
    } else {
        1
    };
    let max_travel = state.bounds.width / 4.0;
    let base = heading(aim);
    for i in 0..count {
        let spread = if count > 1 {
            (i as f32 - 0.5) * GRENADE_SPREAD
        } else {
            0.0
        };
        state.grenades.push(Grenade {
            pos: origin,
            vel: unit(base + spread) * GRENADE_SPEED,
            origin,
            max_travel,
            size: GRENADE_SIZE,
            fuse: GRENADE_FUSE_TICKS,
            halted: false,
        });
    }
    state.events.push(GameEvent::GrenadeThrown { count });
    true
}

/// Spin the blades if they are the selected weapon
pub fn advance_blades(state: &mut GameState) {
    if state.weapon != Weapon::Blades {
        return;
    }
    let spin = if state.buffs.rapid_fire() {
        BLADE_SPIN * BLADE_SPIN_RAPID
    } else {
        BLADE_SPIN
    };
    state.blades.rotation += spin;

    // Kept in [0, TAU); one swoosh per wrap
    if state.blades.rotation >= TAU {
        state.blades.rotation = state.blades.rotation.rem_euclid(TAU);
        state.blades.revolutions = state.blades.revolutions.wrapping_add(1);
        state.events.push(GameEvent::BladeSwoosh);
    }
}

/// Current blade segments as (inner, outer) endpoints
///
/// Empty unless blades are selected.
pub fn blade_segments(state: &GameState) -> Vec<(Vec2, Vec2)> {
    if state.weapon != Weapon::Blades {
        return Vec::new();
    }
    let (count, radius) = if state.buffs.multi_shot() {
        (BLADE_COUNT_MULTI, BLADE_RADIUS * BLADE_RADIUS_MULTI)
    } else {
        (1, BLADE_RADIUS)
    };
    let center = state.avatar.pos;
    (0..count)
        .map(|i| {
            let angle = state.blades.rotation + i as f32 * TAU / count as f32;
            (
                center + polar_to_cartesian(radius - BLADE_LENGTH, angle),
                center + polar_to_cartesian(radius, angle),
            )
        })
        .collect()
}
