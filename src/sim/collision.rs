//! Hit detection and damage resolution
//!
//! Everything is a plain distance check against every monster. Resolution
//! order within a frame matters: direct hits first, then avatar contact and
//! pickups, then the dead are removed in one pass.

use rand::Rng;

use super::effects::{apply_pickup, explode_at};
use super::geometry::{circles_overlap, direction_to, point_segment_distance};
use super::spawn::spawn_powerup;
use super::state::{GameEvent, GamePhase, GameState};
use super::weapons::blade_segments;
use crate::consts::*;

/// Run every collision pass for the frame
///
/// Kills landed this frame are still scored when the avatar dies in it.
pub fn resolve(state: &mut GameState) {
    // Direct hits, in weapon order
    resolve_bullet_hits(state);
    resolve_missile_hits(state);
    resolve_grenades(state);
    resolve_blade_hits(state);

    // Monsters hitting the avatar; may end the session
    resolve_avatar_contact(state);

    // Pickups can kill too (bomb), so they go before the reap
    resolve_pickups(state);
    reap_dead(state);
}

/// Each bullet hits at most one monster, the first found, and is consumed
pub fn resolve_bullet_hits(state: &mut GameState) {
    let adversaries = &mut state.adversaries;
    state.bullets.retain(|bullet| {
        match adversaries
            .iter_mut()
            .find(|a| a.is_alive() && circles_overlap(bullet.pos, bullet.size, a.pos, a.size))
        {
            Some(target) => {
                target.take_damage(bullet.damage);
                false
            }
            None => true,
        }
    });
}

/// Missiles only ever test against their own target
pub fn resolve_missile_hits(state: &mut GameState) {
    let adversaries = &mut state.adversaries;
    state.missiles.retain(|missile| {
        let Some(target) = adversaries
            .iter_mut()
            .find(|a| a.id == missile.target && a.is_alive())
        else {
            return true;
        };
        if circles_overlap(missile.pos, missile.size, target.pos, target.size) {
            target.take_damage(missile.damage);
            false
        } else {
            true
        }
    });
}

/// Contact stops a grenade in place; an expired fuse detonates it
pub fn resolve_grenades(state: &mut GameState) {
    // Damage waits for the fuse; contact only stops travel
    for grenade in state.grenades.iter_mut().filter(|g| !g.halted) {
        if state
            .adversaries
            .iter()
            .any(|a| circles_overlap(grenade.pos, grenade.size, a.pos, a.size))
        {
            grenade.halted = true;
        }
    }

    // Collect first: explode_at needs the whole state
    let mut blasts = Vec::new();
    state.grenades.retain(|g| {
        if g.fuse == 0 {
            blasts.push(g.pos);
            false
        } else {
            true
        }
    });
    for pos in blasts {
        explode_at(state, pos);
    }
}

/// Blades hurt every monster they touch, every frame, and shove it outward
pub fn resolve_blade_hits(state: &mut GameState) {
    let segments = blade_segments(state);
    if segments.is_empty() {
        return;
    }
    let center = state.avatar.pos;
    for adversary in state.adversaries.iter_mut().filter(|a| a.is_alive()) {
        // Each blade counts separately, so overlapping blades hit twice
        for (start, end) in &segments {
            if point_segment_distance(adversary.pos, *start, *end) < adversary.size + BLADE_WIDTH {
                adversary.take_damage(1);
                if let Some(away) = direction_to(center, adversary.pos) {
                    adversary.pos += away * BLADE_KNOCKBACK;
                }
            }
        }
    }
}

/// Monsters past their spawn grace hurt the avatar on contact
///
/// A hit grants a short invincibility window, so lingering contact costs
/// one point, not one per frame.
pub fn resolve_avatar_contact(state: &mut GameState) {
    let (pos, size) = (state.avatar.pos, state.avatar.size);
    for i in 0..state.adversaries.len() {
        // Covers both the power-up and the post-hit grace
        if state.buffs.invincible() {
            return;
        }
        let adversary = &state.adversaries[i];
        if !adversary.is_alive()
            || !adversary.is_dangerous()
            || !circles_overlap(pos, size, adversary.pos, adversary.size)
        {
            continue;
        }

        // Grace applies even on the fatal hit
        state.avatar.health = state.avatar.health.saturating_sub(1);
        state.buffs.invincible = CONTACT_GRACE_TICKS;

        if state.avatar.is_dead() {
            let killer = state.adversaries[i].clone();
            log::info!(
                "Game over at frame {} (score {}, killed by {})",
                state.frame,
                state.progression.score,
                killer.name()
            );
            state.events.push(GameEvent::GameOver {
                killed_by: killer.name(),
            });
            state.killed_by = Some(killer);
            state.phase = GamePhase::GameOver;
        } else {
            state.events.push(GameEvent::AvatarHit {
                health: state.avatar.health,
            });
        }
        return;
    }
}

/// Collect any power-ups the avatar is touching
pub fn resolve_pickups(state: &mut GameState) {
    let (pos, size) = (state.avatar.pos, state.avatar.size);
    let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.powerups)
        .into_iter()
        .partition(|p| circles_overlap(pos, size, p.pos, p.size));
    state.powerups = kept;
    for powerup in taken {
        apply_pickup(state, powerup.kind);
    }
}

/// Remove dead monsters, award their points and roll boss drops
///
/// Missiles bound to a removed monster are dropped in the same pass.
pub fn reap_dead(state: &mut GameState) {
    let (dead, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut state.adversaries)
        .into_iter()
        .partition(|a| !a.is_alive());
    state.adversaries = alive;
    if dead.is_empty() {
        return;
    }

    for adversary in &dead {
        state.progression.score += adversary.points;
        state.progression.kills += 1;
        state.events.push(GameEvent::AdversaryKilled {
            tier: adversary.tier,
            pos: adversary.pos,
            points: adversary.points,
        });
        log::debug!("{} killed (+{})", adversary.name(), adversary.points);

        // Only elite and above can drop
        let chance = adversary.tier.drop_chance();
        if chance > 0.0 && state.rng.random_bool(chance) {
            spawn_powerup(state, Some(adversary.pos));
        }
    }

    purge_orphaned_missiles(state);
}

/// Drop missiles whose target no longer exists
pub fn purge_orphaned_missiles(state: &mut GameState) {
    let adversaries = &state.adversaries;
    state
        .missiles
        .retain(|m| adversaries.iter().any(|a| a.id == m.target));
}
