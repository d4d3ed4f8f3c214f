//! Power-up effects, area damage and timed visuals

use glam::Vec2;

use super::collision::reap_dead;
use super::geometry::distance;
use super::state::{BuffKind, Explosion, GameEvent, GameState, PowerupKind};
use crate::consts::*;

/// Apply a collected power-up
///
/// Buff pickups stack their duration onto whatever is left. A heart heals
/// one point (nothing, and no event, at full health or once dead). A bomb
/// goes off immediately.
pub fn apply_pickup(state: &mut GameState, kind: PowerupKind) {
    match kind {
        PowerupKind::MultiShot => gain_buff(state, kind, BuffKind::MultiShot),
        PowerupKind::RapidFire => gain_buff(state, kind, BuffKind::RapidFire),
        PowerupKind::Invincible => gain_buff(state, kind, BuffKind::Invincible),
        PowerupKind::Freeze => gain_buff(state, kind, BuffKind::Freeze),
        PowerupKind::Heart => {
            let health = state.avatar.health;
            if health > 0 && health < state.avatar.max_health {
                state.avatar.health += 1;
                state.events.push(GameEvent::PowerupCollected { kind });
            }
        }
        PowerupKind::Bomb => {
            state.events.push(GameEvent::PowerupCollected { kind });
            detonate_bomb(state);
        }
    }
}

fn gain_buff(state: &mut GameState, kind: PowerupKind, buff: BuffKind) {
    state.buffs.extend(buff, BUFF_TICKS);
    log::debug!("{buff:?} now {} frames", state.buffs.remaining(buff));
    state.events.push(GameEvent::PowerupCollected { kind });
}

/// Instant bomb: damage every monster, then clear out the dead
pub fn detonate_bomb(state: &mut GameState) {
    for adversary in state.adversaries.iter_mut().filter(|a| a.is_alive()) {
        adversary.take_damage(BOMB_DAMAGE);
    }
    state.flash_ticks = FLASH_TICKS;
    state.events.push(GameEvent::BombDetonated);
    log::debug!("Bomb detonated");
    reap_dead(state);
}

/// Splash damage around `pos`, plus the expanding ring visual
///
/// Monsters are hit when their edge is within the blast radius.
pub fn explode_at(state: &mut GameState, pos: Vec2) {
    for adversary in state
        .adversaries
        .iter_mut()
        .filter(|a| a.is_alive() && distance(pos, a.pos) <= EXPLOSION_RADIUS + a.size)
    {
        adversary.take_damage(BOMB_DAMAGE);
    }
    state.explosions.push(Explosion {
        pos,
        max_radius: EXPLOSION_RADIUS,
        radius: 0.0,
        ticks: EXPLOSION_TICKS,
    });
    state.events.push(GameEvent::Explosion { pos });
}

/// Grow and expire explosion rings
pub fn advance_explosions(state: &mut GameState) {
    let span = EXPLOSION_GROWTH_TICKS as f32;
    state.explosions.retain_mut(|e| {
        let progress = (span - e.ticks as f32) / span;
        e.radius = e.max_radius * progress;
        e.ticks = e.ticks.saturating_sub(1);
        e.ticks > 0
    });
}

/// Count down buffs and the bomb flash
pub fn tick_timers(state: &mut GameState) {
    state.buffs.tick();
    state.flash_ticks = state.flash_ticks.saturating_sub(1);
}
