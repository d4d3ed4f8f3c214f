//! Game state and core simulation types
//!
//! The whole session lives in one [`GameState`]. Entity collections are owned
//! here and mutated only by the tick; monsters are referenced from outside
//! their collection by [`AdversaryId`] and looked up on use.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bestiary::{Archetype, Tier};
use super::geometry::{Bounds, distance};
use super::weapons::{Weapon, WeaponCooldowns};
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Avatar died; ticking is a no-op from here on
    GameOver,
}

/// The player-controlled wizard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
}

impl Avatar {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: AVATAR_SIZE,
            speed: AVATAR_SPEED,
            health: AVATAR_MAX_HEALTH,
            max_health: AVATAR_MAX_HEALTH,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

/// Handle to a monster. Ids are never reused, so a handle to a removed
/// monster simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AdversaryId(pub u32);

/// How a monster moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Steer straight at the avatar every frame
    Chase,
    /// Hold a heading, re-roll it every `interval` frames
    Wander {
        heading: f32,
        elapsed: u32,
        interval: u32,
    },
}

/// A monster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub id: AdversaryId,
    pub tier: Tier,
    /// Index into `tier.archetypes()`
    pub archetype: usize,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub points: u64,
    pub behavior: Behavior,
    /// Frames left before contact can hurt the avatar
    pub spawn_grace: u32,
    /// Frames spent below max health since the last damage or heal
    pub regen_ticks: u32,
}

impl Adversary {
    pub fn archetype(&self) -> &'static Archetype {
        let table = self.tier.archetypes();
        &table[self.archetype.min(table.len() - 1)]
    }

    pub fn name(&self) -> &'static str {
        self.archetype().name
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Past the spawn grace window
    pub fn is_dangerous(&self) -> bool {
        self.spawn_grace == 0
    }

    /// Subtract damage, clamped at zero, and restart the regen clock
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).clamp(0, self.max_health);
        self.regen_ticks = 0;
    }
}

/// Straight-flying projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub damage: i32,
}

/// Homing projectile bound to one target for its whole flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    pub pos: Vec2,
    pub target: AdversaryId,
    pub speed: f32,
    pub size: f32,
    pub damage: i32,
    /// Facing, for the renderer
    pub angle: f32,
}

/// Thrown explosive: travels, halts, then detonates when the fuse runs out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grenade {
    pub pos: Vec2,
    pub vel: Vec2,
    pub origin: Vec2,
    pub max_travel: f32,
    pub size: f32,
    pub fuse: u32,
    pub halted: bool,
}

impl Grenade {
    pub fn traveled(&self) -> f32 {
        distance(self.pos, self.origin)
    }
}

/// Expanding ring left by a detonation. Damage is applied once, when created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub max_radius: f32,
    pub radius: f32,
    pub ticks: u32,
}

/// Rotating blades around the avatar, live while the melee weapon is held
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BladeField {
    /// Current angle in [0, TAU)
    pub rotation: f32,
    /// Completed revolutions, each announced with a swoosh
    pub revolutions: u32,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    MultiShot,
    RapidFire,
    Invincible,
    Freeze,
    Heart,
    Bomb,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 6] = [
        PowerupKind::MultiShot,
        PowerupKind::RapidFire,
        PowerupKind::Invincible,
        PowerupKind::Freeze,
        PowerupKind::Heart,
        PowerupKind::Bomb,
    ];
}

/// A pickup lying in the play area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec2,
    pub kind: PowerupKind,
    pub size: f32,
}

/// The four timed buffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffKind {
    MultiShot,
    RapidFire,
    Invincible,
    Freeze,
}

/// Frames remaining on each buff; a buff is active while its count is non-zero
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buffs {
    pub multi_shot: u32,
    pub rapid_fire: u32,
    pub invincible: u32,
    pub freeze: u32,
}

impl Buffs {
    pub fn remaining(&self, kind: BuffKind) -> u32 {
        match kind {
            BuffKind::MultiShot => self.multi_shot,
            BuffKind::RapidFire => self.rapid_fire,
            BuffKind::Invincible => self.invincible,
            BuffKind::Freeze => self.freeze,
        }
    }

    fn slot(&mut self, kind: BuffKind) -> &mut u32 {
        match kind {
            BuffKind::MultiShot => &mut self.multi_shot,
            BuffKind::RapidFire => &mut self.rapid_fire,
            BuffKind::Invincible => &mut self.invincible,
            BuffKind::Freeze => &mut self.freeze,
        }
    }

    pub fn is_active(&self, kind: BuffKind) -> bool {
        self.remaining(kind) > 0
    }

    /// Stack more frames onto a buff
    pub fn extend(&mut self, kind: BuffKind, ticks: u32) {
        let slot = self.slot(kind);
        *slot = slot.saturating_add(ticks);
    }

    /// Count every buff down by one frame
    pub fn tick(&mut self) {
        for count in [
            &mut self.multi_shot,
            &mut self.rapid_fire,
            &mut self.invincible,
            &mut self.freeze,
        ] {
            *count = count.saturating_sub(1);
        }
    }

    pub fn multi_shot(&self) -> bool {
        self.is_active(BuffKind::MultiShot)
    }

    pub fn rapid_fire(&self) -> bool {
        self.is_active(BuffKind::RapidFire)
    }

    pub fn invincible(&self) -> bool {
        self.is_active(BuffKind::Invincible)
    }

    pub fn freeze(&self) -> bool {
        self.is_active(BuffKind::Freeze)
    }
}

/// Score, kills and difficulty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub score: u64,
    pub kills: u32,
    pub level: u32,
    /// Frames between timed spawns at the current level
    pub spawn_interval: u32,
}

/// Something the host may want to react to (sound, screen effects).
/// Collected fresh every tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    ShotFired { count: u32 },
    MissileLaunched,
    GrenadeThrown { count: u32 },
    BladeSwoosh,
    Explosion { pos: Vec2 },
    AdversaryKilled { tier: Tier, pos: Vec2, points: u64 },
    AdversarySpawned { tier: Tier },
    AvatarHit { health: u32 },
    PowerupSpawned { kind: PowerupKind, pos: Vec2 },
    PowerupCollected { kind: PowerupKind },
    BombDetonated,
    LevelUp { level: u32 },
    WeaponUnlocked { weapon: Weapon },
    TierUnlocked { tier: Tier },
    GameOver { killed_by: &'static str },
}

/// Per-frame summary for HUDs and the headless runner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    pub frame: u64,
    pub score: u64,
    pub kills: u32,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub weapon: Weapon,
    pub buffs: Buffs,
    pub adversaries: usize,
    pub game_over: bool,
    pub killed_by: Option<&'static str>,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    pub bounds: Bounds,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub frame: u64,
    pub avatar: Avatar,
    /// Live monsters, in spawn order
    pub adversaries: Vec<Adversary>,
    pub bullets: Vec<Bullet>,
    pub missiles: Vec<Missile>,
    pub grenades: Vec<Grenade>,
    pub explosions: Vec<Explosion>,
    pub blades: BladeField,
    pub powerups: Vec<Powerup>,
    pub buffs: Buffs,
    pub weapon: Weapon,
    pub cooldowns: WeaponCooldowns,
    /// Rate limit for pointer-triggered fire
    pub manual_cooldown: u32,
    pub auto_fire_counter: u32,
    pub spawn_counter: u32,
    pub progression: Progression,
    /// Full-screen flash after an instant bomb (render-only)
    pub flash_ticks: u32,
    /// Monster that landed the fatal hit
    pub killed_by: Option<Adversary>,
    /// Events raised during the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New session with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let bounds = Bounds::new(settings.play_width, settings.play_height);
        let level = settings.starting_level;
        let spawn_interval =
            super::progression::initial_spawn_interval(level, settings.min_spawn_interval);

        log::info!(
            "Session seed {seed}: {}x{} play area, level {level}",
            bounds.width,
            bounds.height
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            phase: GamePhase::Playing,
            frame: 0,
            avatar: Avatar::new(bounds.center()),
            adversaries: Vec::new(),
            bullets: Vec::new(),
            missiles: Vec::new(),
            grenades: Vec::new(),
            explosions: Vec::new(),
            blades: BladeField::default(),
            powerups: Vec::new(),
            buffs: Buffs::default(),
            weapon: Weapon::Bullets,
            cooldowns: WeaponCooldowns::default(),
            manual_cooldown: 0,
            auto_fire_counter: 0,
            spawn_counter: 0,
            progression: Progression {
                score: 0,
                kills: 0,
                level,
                spawn_interval,
            },
            flash_ticks: 0,
            killed_by: None,
            events: Vec::new(),
            next_id: 1,
            settings,
        }
    }

    /// Allocate a new monster id
    pub fn next_adversary_id(&mut self) -> AdversaryId {
        let id = AdversaryId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn adversary(&self, id: AdversaryId) -> Option<&Adversary> {
        self.adversaries.iter().find(|a| a.id == id)
    }

    pub fn adversary_mut(&mut self, id: AdversaryId) -> Option<&mut Adversary> {
        self.adversaries.iter_mut().find(|a| a.id == id)
    }

    /// Up to `count` living monsters, closest to `from` first
    pub fn nearest_adversaries(&self, from: Vec2, count: usize) -> Vec<AdversaryId> {
        let mut by_distance: Vec<(f32, AdversaryId)> = self
            .adversaries
            .iter()
            .filter(|a| a.is_alive())
            .map(|a| (distance(from, a.pos), a.id))
            .collect();
        by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
        by_distance.into_iter().take(count).map(|(_, id)| id).collect()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            frame: self.frame,
            score: self.progression.score,
            kills: self.progression.kills,
            level: self.progression.level,
            health: self.avatar.health,
            max_health: self.avatar.max_health,
            weapon: self.weapon,
            buffs: self.buffs.clone(),
            adversaries: self.adversaries.len(),
            game_over: self.is_over(),
            killed_by: self.killed_by.as_ref().map(Adversary::name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.progression.level, 1);
        assert_eq!(state.progression.spawn_interval, 110);
        assert_eq!(state.avatar.health, 3);
        assert_eq!(state.avatar.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.weapon, Weapon::Bullets);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut state = GameState::new(7);
        let a = state.next_adversary_id();
        let b = state.next_adversary_id();
        assert_ne!(a, b);
        assert!(state.adversary(a).is_none());
    }

    #[test]
    fn test_buffs_extend_and_tick() {
        let mut buffs = Buffs::default();
        assert!(!buffs.freeze());
        buffs.extend(BuffKind::Freeze, 2);
        buffs.extend(BuffKind::Freeze, 3);
        assert_eq!(buffs.remaining(BuffKind::Freeze), 5);
        for _ in 0..5 {
            assert!(buffs.freeze());
            buffs.tick();
        }
        assert!(!buffs.freeze());
        buffs.tick();
        assert_eq!(buffs.freeze, 0);
    }

    #[test]
    fn test_take_damage_clamps() {
        let mut state = GameState::new(1);
        let id = state.next_adversary_id();
        let mut monster = Adversary {
            id,
            tier: Tier::Medium,
            archetype: 2,
            pos: Vec2::ZERO,
            size: 13.0,
            speed: 1.0,
            health: 3,
            max_health: 3,
            points: 25,
            behavior: Behavior::Chase,
            spawn_grace: 0,
            regen_ticks: 50,
        };
        monster.take_damage(8);
        assert_eq!(monster.health, 0);
        assert_eq!(monster.regen_ticks, 0);
        assert!(!monster.is_alive());
        assert_eq!(monster.name(), "Troll");
    }
}
