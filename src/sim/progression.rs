//! Score thresholds, level-ups and difficulty scaling

use super::bestiary::Tier;
use super::state::{GameEvent, GameState};
use super::weapons::Weapon;
use crate::consts::BASE_SPAWN_INTERVAL;

/// Cumulative score needed to advance past `level`
///
/// Level 2 needs 20, level 3 needs 50, level 4 needs 90: each step costs
/// ten times the level being reached. Saturates at `u64::MAX`.
pub fn level_threshold(level: u32) -> u64 {
    // Sum of 10*i for i in 2..=level+1
    let l = u64::from(level);
    5u64.saturating_mul(l + 1)
        .saturating_mul(l + 2)
        .saturating_sub(10)
}

/// Frames between timed spawns, shrinking by one per level down to `floor`
pub fn spawn_interval(level: u32, floor: u32) -> u32 {
    BASE_SPAWN_INTERVAL.saturating_sub(level).max(floor.max(1))
}

/// Spawn interval for a fresh session
///
/// Level 1 starts at the full base interval; the per-level reduction only
/// kicks in from the first level-up. Later starting levels use the scaled
/// interval directly.
pub fn initial_spawn_interval(level: u32, floor: u32) -> u32 {
    if level <= 1 {
        BASE_SPAWN_INTERVAL.max(floor.max(1))
    } else {
        spawn_interval(level, floor)
    }
}

/// Advance at most one level if the score allows it
///
/// Returns true on a level-up. A large score jump still only moves one
/// level per call; the next frame picks up the rest.
pub fn check_level_up(state: &mut GameState) -> bool {
    let progression = &mut state.progression;
    if progression.score < level_threshold(progression.level) {
        return false;
    }

    progression.level += 1;
    let level = progression.level;
    progression.spawn_interval = spawn_interval(level, state.settings.min_spawn_interval);

    log::info!(
        "Level {level} (score {}, spawn every {} frames)",
        progression.score,
        progression.spawn_interval
    );
    state.events.push(GameEvent::LevelUp { level });

    for weapon in Weapon::ALL {
        if weapon.unlock_level() == level && level > 1 {
            log::info!("{weapon:?} unlocked at level {level}");
            state.events.push(GameEvent::WeaponUnlocked { weapon });
        }
    }
    for tier in Tier::unlocked_at(level) {
        log::info!("{tier:?} monsters can now spawn");
        state.events.push(GameEvent::TierUnlocked { tier });
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(level_threshold(1), 20);
        assert_eq!(level_threshold(2), 50);
        assert_eq!(level_threshold(3), 90);
        assert_eq!(level_threshold(4), 140);
    }

    #[test]
    fn test_level_up_at_exact_threshold() {
        let mut state = GameState::new(3);
        state.progression.score = 19;
        assert!(!check_level_up(&mut state));
        assert_eq!(state.progression.level, 1);

        state.progression.score = 20;
        assert!(check_level_up(&mut state));
        assert_eq!(state.progression.level, 2);
        assert_eq!(state.progression.spawn_interval, 108);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_one_level_per_check() {
        let mut state = GameState::new(3);
        state.progression.score = 10_000;
        assert!(check_level_up(&mut state));
        assert_eq!(state.progression.level, 2);
        assert!(check_level_up(&mut state));
        assert_eq!(state.progression.level, 3);
    }

    #[test]
    fn test_unlock_events() {
        let mut state = GameState::new(3);
        state.progression.level = 19;
        state.progression.score = level_threshold(19);
        check_level_up(&mut state);
        assert!(state.events.contains(&GameEvent::WeaponUnlocked {
            weapon: Weapon::Grenades
        }));
        assert!(state.events.contains(&GameEvent::TierUnlocked {
            tier: Tier::Legendary
        }));
    }

    #[test]
    fn test_spawn_interval_floor() {
        assert_eq!(spawn_interval(1, 10), 109);
        assert_eq!(spawn_interval(100, 10), 10);
        assert_eq!(spawn_interval(500, 10), 10);
        assert_eq!(spawn_interval(500, 0), 1);
    }

    #[test]
    fn test_initial_spawn_interval() {
        assert_eq!(initial_spawn_interval(1, 10), BASE_SPAWN_INTERVAL);
        assert_eq!(initial_spawn_interval(1, 500), 500);
        assert_eq!(initial_spawn_interval(2, 10), 108);
        assert_eq!(initial_spawn_interval(40, 10), 70);
    }

    #[test]
    fn test_threshold_saturates_at_huge_levels() {
        assert_eq!(level_threshold(u32::MAX), u64::MAX);
        assert!(level_threshold(u32::MAX - 1) > level_threshold(1_000_000));
    }

    #[test]
    fn test_max_score_still_levels_up_at_top() {
        let mut state = GameState::new(3);
        state.progression.level = 1_000_000;
        state.progression.score = u64::MAX;
        assert!(check_level_up(&mut state));
        assert_eq!(state.progression.level, 1_000_001);
        assert_eq!(state.progression.spawn_interval, 10);
    }

    proptest! {
        #[test]
        fn threshold_matches_running_sum(level in 1u32..2_000) {
            let sum: u64 = (2..=u64::from(level) + 1).map(|i| i * 10).sum();
            prop_assert_eq!(level_threshold(level), sum);
        }

        #[test]
        fn thresholds_strictly_increase(level in 1u32..10_000) {
            prop_assert!(level_threshold(level + 1) > level_threshold(level));
        }
    }
}
