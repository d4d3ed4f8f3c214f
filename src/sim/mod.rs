//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only, stored in the state
//! - Monsters referenced by id, never by position in a collection

pub mod bestiary;
pub mod collision;
pub mod effects;
pub mod geometry;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapons;

pub use bestiary::{Archetype, Tier};
pub use geometry::Bounds;
pub use progression::{initial_spawn_interval, level_threshold, spawn_interval};
pub use state::{
    Adversary, AdversaryId, Avatar, Behavior, BuffKind, Buffs, GameEvent, GamePhase, GameState,
    Powerup, PowerupKind, SessionStats,
};
pub use tick::{TickInput, step, tick};
pub use weapons::Weapon;
