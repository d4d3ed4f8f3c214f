//! Monster tiers and archetype tables
//!
//! Tiers gate stats, unlock level and boss drops. Each tier owns a static
//! slice of archetypes; a spawned monster stores its tier plus an index
//! into that slice.

use serde::{Deserialize, Serialize};

/// Rarity/difficulty class of a monster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Small,
    Medium,
    Large,
    Elite,
    Legendary,
    Mythic,
    Ancient,
    Ultimate,
}

/// Fixed stats for a named monster kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archetype {
    pub name: &'static str,
    pub size: f32,
    pub speed: f32,
    /// Upper bound of the random speed bonus rolled at spawn
    pub speed_variation: f32,
    pub health: i32,
    pub points: u64,
}

const fn archetype(
    name: &'static str,
    size: f32,
    speed: f32,
    speed_variation: f32,
    health: i32,
    points: u64,
) -> Archetype {
    Archetype {
        name,
        size,
        speed,
        speed_variation,
        health,
        points,
    }
}

static SMALL: [Archetype; 4] = [
    archetype("Imp", 11.0, 1.5, 0.5, 1, 10),
    archetype("Shadow", 8.0, 1.6, 0.4, 1, 10),
    archetype("Goblin", 9.0, 1.6, 0.5, 1, 10),
    archetype("Kobold", 10.0, 1.4, 0.4, 1, 10),
];

static MEDIUM: [Archetype; 3] = [
    archetype("Demon", 14.0, 1.2, 0.3, 2, 25),
    archetype("Wraith", 12.0, 1.3, 0.4, 2, 25),
    archetype("Troll", 13.0, 1.1, 0.3, 3, 25),
];

static LARGE: [Archetype; 3] = [
    archetype("Dragon Lord", 15.0, 0.8, 0.2, 5, 100),
    archetype("Ancient One", 19.0, 1.0, 0.2, 4, 80),
    archetype("Behemoth", 17.0, 0.7, 0.2, 6, 120),
];

static ELITE: [Archetype; 1] = [archetype("Elite Guard", 20.0, 1.4, 0.5, 3, 50)];
static LEGENDARY: [Archetype; 1] = [archetype("Legendary Beast", 24.0, 1.5, 0.3, 10, 150)];
static MYTHIC: [Archetype; 1] = [archetype("Mythic Titan", 28.0, 1.8, 0.4, 14, 250)];
static ANCIENT: [Archetype; 1] = [archetype("Ancient Horror", 34.0, 2.2, 0.5, 20, 400)];
static ULTIMATE: [Archetype; 1] = [archetype("Ultimate Destroyer", 40.0, 2.4, 0.8, 50, 1000)];

/// Level-gated tiers, checked top-down against a single roll.
/// (tier, unlock level, roll must be below)
const GATED_TIERS: [(Tier, u32, f64); 5] = [
    (Tier::Ultimate, 70, 0.05),
    (Tier::Ancient, 50, 0.08),
    (Tier::Mythic, 30, 0.10),
    (Tier::Legendary, 20, 0.12),
    (Tier::Elite, 10, 0.15),
];

/// Base table: 65% small, 25% medium, 10% large
const SMALL_BELOW: f64 = 0.65;
const MEDIUM_BELOW: f64 = 0.90;

impl Tier {
    pub const ALL: [Tier; 8] = [
        Tier::Small,
        Tier::Medium,
        Tier::Large,
        Tier::Elite,
        Tier::Legendary,
        Tier::Mythic,
        Tier::Ancient,
        Tier::Ultimate,
    ];

    pub fn archetypes(self) -> &'static [Archetype] {
        match self {
            Tier::Small => &SMALL,
            Tier::Medium => &MEDIUM,
            Tier::Large => &LARGE,
            Tier::Elite => &ELITE,
            Tier::Legendary => &LEGENDARY,
            Tier::Mythic => &MYTHIC,
            Tier::Ancient => &ANCIENT,
            Tier::Ultimate => &ULTIMATE,
        }
    }

    /// Level at which this tier can first spawn
    pub fn unlock_level(self) -> u32 {
        match self {
            Tier::Small | Tier::Medium | Tier::Large => 1,
            Tier::Elite => 10,
            Tier::Legendary => 20,
            Tier::Mythic => 30,
            Tier::Ancient => 50,
            Tier::Ultimate => 70,
        }
    }

    /// Bosses get the heavier death cue
    pub fn is_boss(self) -> bool {
        !matches!(self, Tier::Small | Tier::Medium)
    }

    /// Chance that killing this tier drops a power-up
    pub fn drop_chance(self) -> f64 {
        match self {
            Tier::Elite => 0.20,
            Tier::Legendary => 0.40,
            Tier::Mythic => 0.60,
            Tier::Ancient => 0.80,
            Tier::Ultimate => 1.0,
            _ => 0.0,
        }
    }

    /// Pick a tier from a uniform roll in [0, 1)
    ///
    /// Gated tiers sit on top of the base table and only take part once
    /// `level` reaches their unlock level.
    pub fn from_roll(roll: f64, level: u32) -> Tier {
        for (tier, unlock, below) in GATED_TIERS {
            if level >= unlock && roll < below {
                return tier;
            }
        }
        if roll < SMALL_BELOW {
            Tier::Small
        } else if roll < MEDIUM_BELOW {
            Tier::Medium
        } else {
            Tier::Large
        }
    }

    /// Tiers newly available at exactly `level`
    pub fn unlocked_at(level: u32) -> impl Iterator<Item = Tier> {
        Tier::ALL
            .into_iter()
            .filter(move |t| t.unlock_level() == level && level > 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_table_before_gates() {
        assert_eq!(Tier::from_roll(0.0, 1), Tier::Small);
        assert_eq!(Tier::from_roll(0.64, 1), Tier::Small);
        assert_eq!(Tier::from_roll(0.65, 1), Tier::Medium);
        assert_eq!(Tier::from_roll(0.89, 1), Tier::Medium);
        assert_eq!(Tier::from_roll(0.90, 1), Tier::Large);
        // Gates closed: a low roll is still small
        assert_eq!(Tier::from_roll(0.01, 9), Tier::Small);
    }

    #[test]
    fn test_gated_tiers_open_with_level() {
        assert_eq!(Tier::from_roll(0.01, 10), Tier::Elite);
        assert_eq!(Tier::from_roll(0.11, 20), Tier::Legendary);
        assert_eq!(Tier::from_roll(0.09, 30), Tier::Mythic);
        assert_eq!(Tier::from_roll(0.07, 50), Tier::Ancient);
        assert_eq!(Tier::from_roll(0.04, 70), Tier::Ultimate);
        assert_eq!(Tier::from_roll(0.04, 69), Tier::Ancient);
        assert_eq!(Tier::from_roll(0.15, 70), Tier::Small);
    }

    #[test]
    fn test_every_tier_has_archetypes() {
        for tier in Tier::ALL {
            assert!(!tier.archetypes().is_empty(), "{tier:?}");
        }
    }

    #[test]
    fn test_drop_chances() {
        assert_eq!(Tier::Large.drop_chance(), 0.0);
        assert_eq!(Tier::Elite.drop_chance(), 0.20);
        assert_eq!(Tier::Ultimate.drop_chance(), 1.0);
        assert!(Tier::Large.is_boss());
        assert!(!Tier::Medium.is_boss());
    }

    #[test]
    fn test_unlocked_at() {
        let at_ten: Vec<_> = Tier::unlocked_at(10).collect();
        assert_eq!(at_ten, vec![Tier::Elite]);
        assert_eq!(Tier::unlocked_at(1).count(), 0);
        assert_eq!(Tier::unlocked_at(11).count(), 0);
    }
}
