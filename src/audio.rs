//! Sound cues for simulation events
//!
//! The simulation never plays audio itself. Hosts drain `GameState::events`
//! each frame and hand them to an [`AudioManager`], which maps them to cues
//! and forwards those to whatever [`SoundBackend`] is plugged in. Backends
//! must not block; a backend that cannot play simply drops the cue.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Bullet volley
    Shoot,
    /// Blade completed a revolution
    Swoosh,
    /// Regular monster died
    MonsterDeath,
    /// Large-or-bigger monster died
    BossDeath,
    /// Power-up collected
    Powerup,
    /// Grenade detonation or instant bomb
    Boom,
    /// Grenade thrown
    Grenade,
    /// Missile launched
    Missile,
    /// Avatar took contact damage
    PlayerHit,
    GameOver,
    LevelUp,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        let effect = match event {
            GameEvent::ShotFired { .. } => SoundEffect::Shoot,
            GameEvent::MissileLaunched => SoundEffect::Missile,
            GameEvent::GrenadeThrown { .. } => SoundEffect::Grenade,
            GameEvent::BladeSwoosh => SoundEffect::Swoosh,
            GameEvent::Explosion { .. } | GameEvent::BombDetonated => SoundEffect::Boom,
            GameEvent::AdversaryKilled { tier, .. } if tier.is_boss() => SoundEffect::BossDeath,
            GameEvent::AdversaryKilled { .. } => SoundEffect::MonsterDeath,
            GameEvent::AvatarHit { .. } => SoundEffect::PlayerHit,
            GameEvent::PowerupCollected { .. } => SoundEffect::Powerup,
            GameEvent::LevelUp { .. } => SoundEffect::LevelUp,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
            GameEvent::AdversarySpawned { .. }
            | GameEvent::PowerupSpawned { .. }
            | GameEvent::WeaponUnlocked { .. }
            | GameEvent::TierUnlocked { .. } => return None,
        };
        Some(effect)
    }

    /// Mix level of this cue relative to the others
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.7,
            SoundEffect::Swoosh => 0.5,
            SoundEffect::Powerup => 0.6,
            SoundEffect::Boom => 0.9,
            SoundEffect::GameOver => 0.95,
            SoundEffect::MonsterDeath
            | SoundEffect::BossDeath
            | SoundEffect::Grenade
            | SoundEffect::Missile
            | SoundEffect::PlayerHit
            | SoundEffect::LevelUp => 0.8,
        }
    }
}

/// Something that can play a cue at a volume in [0, 1]
pub trait SoundBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Drops every cue
#[derive(Debug, Default)]
pub struct SilentBackend;

impl SoundBackend for SilentBackend {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Writes cues to the log instead of a speaker
#[derive(Debug, Default)]
pub struct LogBackend;

impl SoundBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {effect:?} @ {volume:.2}");
    }
}

/// Audio manager for the game
pub struct AudioManager<B: SoundBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: SoundBackend + Default> Default for AudioManager<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: SoundBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Play the cue for every event that has one
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
