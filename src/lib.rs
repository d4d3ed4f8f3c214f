//! Wizard Siege - A survival arcade game engine
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (movement, weapons, collisions, progression)
//! - `settings`: Session configuration loaded from JSON
//! - `audio`: Sound cue mapping for simulation events
//!
//! Rendering, input capture and audio playback are host concerns. The host
//! feeds a [`sim::TickInput`] snapshot into [`sim::tick`] once per frame and
//! reads the resulting [`sim::GameState`].

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
///
/// Everything is expressed in frames and pixels; the host drives the
/// simulation at roughly [`consts::SIM_HZ`] ticks per second.
pub mod consts {
    /// Nominal tick rate
    pub const SIM_HZ: u32 = 60;

    /// Default play area
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Avatar defaults
    pub const AVATAR_SIZE: f32 = 15.0;
    pub const AVATAR_SPEED: f32 = 5.0;
    pub const AVATAR_MAX_HEALTH: u32 = 3;
    /// Invincibility granted after taking a contact hit
    pub const CONTACT_GRACE_TICKS: u32 = 100;

    /// Bullets
    pub const BULLET_SPEED: f32 = 8.0;
    pub const BULLET_SIZE: f32 = 5.0;
    pub const BULLET_DAMAGE: i32 = 1;
    /// Number of bullets in a multi-shot ring
    pub const MULTI_SHOT_RAYS: u32 = 16;
    pub const BULLET_COOLDOWN: u32 = 60;
    pub const BULLET_COOLDOWN_RAPID: u32 = 20;

    /// Homing missiles
    pub const MISSILE_SPEED: f32 = 4.0;
    pub const MISSILE_SIZE: f32 = 3.0;
    pub const MISSILE_DAMAGE: i32 = 3;
    pub const MISSILE_TARGETS: usize = 1;
    pub const MISSILE_TARGETS_MULTI: usize = 4;
    /// Missiles further than this outside the play area are dropped
    pub const MISSILE_MARGIN: f32 = 100.0;
    pub const MISSILE_COOLDOWN: u32 = 120;
    pub const MISSILE_COOLDOWN_RAPID: u32 = 40;

    /// Grenades
    pub const GRENADE_SPEED: f32 = 6.0;
    pub const GRENADE_SIZE: f32 = 4.0;
    pub const GRENADE_FUSE_TICKS: u32 = 90;
    pub const GRENADE_COUNT_MULTI: u32 = 4;
    /// Angular offset between grenades of a multi-shot volley (radians)
    pub const GRENADE_SPREAD: f32 = 0.3;
    pub const GRENADE_MARGIN: f32 = 50.0;
    pub const GRENADE_COOLDOWN: u32 = 120;
    pub const GRENADE_COOLDOWN_RAPID: u32 = 40;

    /// Explosions (grenade detonation and instant bomb)
    pub const EXPLOSION_RADIUS: f32 = 40.0;
    pub const BOMB_DAMAGE: i32 = 8;
    pub const EXPLOSION_TICKS: u32 = 18;
    /// Nominal growth span; explosions vanish halfway through it
    pub const EXPLOSION_GROWTH_TICKS: u32 = 36;
    pub const FLASH_TICKS: u32 = 45;

    /// Rotating blades
    pub const BLADE_RADIUS: f32 = 45.0;
    pub const BLADE_LENGTH: f32 = 45.0;
    pub const BLADE_SPIN: f32 = 0.07;
    pub const BLADE_WIDTH: f32 = 2.0;
    pub const BLADE_KNOCKBACK: f32 = 2.0;
    pub const BLADE_COUNT_MULTI: u32 = 3;
    pub const BLADE_RADIUS_MULTI: f32 = 1.25;
    pub const BLADE_SPIN_RAPID: f32 = 3.0;

    /// Auto-fire cadence
    pub const AUTO_FIRE_TICKS: u32 = 60;
    pub const AUTO_FIRE_TICKS_RAPID: u32 = 20;

    /// Adversaries
    pub const SPAWN_OFFSET: f32 = 30.0;
    pub const DESPAWN_MARGIN: f32 = 50.0;
    pub const CHASE_CHANCE: f64 = 0.3;
    pub const TURN_BACK_CHANCE: f64 = 0.75;
    pub const SPAWN_GRACE_TICKS: u32 = 120;
    pub const REGEN_TICKS: u32 = 180;
    pub const SIZE_JITTER: f32 = 0.25;
    pub const FREEZE_SPEED_FACTOR: f32 = 0.5;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 15.0;
    /// Random drops keep this far from the play-area edge
    pub const POWERUP_INSET: f32 = 20.0;
    pub const BUFF_TICKS: u32 = 600;

    /// Progression
    pub const BASE_SPAWN_INTERVAL: u32 = 110;
    pub const GRENADE_UNLOCK_LEVEL: u32 = 20;
    pub const MISSILE_UNLOCK_LEVEL: u32 = 40;
    /// Highest level a session may start at
    pub const MAX_STARTING_LEVEL: u32 = 999;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Heading of a vector in radians
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-4);
        assert!((normalize_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-4);
        assert_eq!(normalize_angle(0.25), 0.25);
    }

    #[test]
    fn test_polar_round_trip_heading() {
        let p = polar_to_cartesian(10.0, 1.0);
        assert!((p.length() - 10.0).abs() < 1e-4);
        assert!((heading(p) - 1.0).abs() < 1e-4);
    }
}
