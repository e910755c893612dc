//! Roster operations on player tanks.
//!
//! These functions validate nothing beyond their own inputs; gold and
//! purchase caps are checked by the progression ledger.

use super::types::{PlayerUnit, Stat};
use crate::core::constants::*;

/// Fresh player roster: two level-1 tanks at full health.
pub fn create_player_roster() -> Vec<PlayerUnit> {
    (1..=PLAYER_ROSTER_SIZE as u32).map(PlayerUnit::new).collect()
}

/// Raise a stat by one upgrade step and record the purchase.
pub fn apply_upgrade(unit: &mut PlayerUnit, stat: Stat) {
    match stat {
        Stat::Atk => unit.atk += UPGRADE_STEP,
        Stat::Def => unit.def += UPGRADE_STEP,
    }
    unit.upgrades.push(stat);
}

/// Number of times `stat` has been purchased for this unit.
pub fn upgrade_count(unit: &PlayerUnit, stat: Stat) -> usize {
    unit.upgrades.iter().filter(|s| **s == stat).count()
}

/// Whether both stats are at the purchase cap. Gates the special weapon.
pub fn is_max_upgraded(unit: &PlayerUnit) -> bool {
    Stat::all()
        .iter()
        .all(|stat| upgrade_count(unit, *stat) == MAX_UPGRADES_PER_STAT)
}

/// Post-victory restore: heal, clear cooldown and re-arm the special weapon.
///
/// Applies to every tank, destroyed ones included.
pub fn restore_for_next_encounter(units: &mut [PlayerUnit]) {
    for unit in units.iter_mut() {
        unit.hp = (unit.hp + VICTORY_HEAL).min(unit.max_hp);
        unit.cooldown = 0;
        unit.special_used = false;
    }
}

/// Kills needed to leave `level`, or None at max level.
pub fn kill_threshold(level: u32) -> Option<u32> {
    if level >= PLAYER_MAX_LEVEL {
        return None;
    }
    let index = level.saturating_sub(1) as usize;
    KILL_THRESHOLDS.get(index).copied()
}

/// Credit a kill. Returns the new level if the unit leveled up.
///
/// The kill count is cumulative and checked against the threshold for the
/// current level, so at most one level is gained per kill.
pub fn register_kill(unit: &mut PlayerUnit) -> Option<u32> {
    unit.kills += 1;
    let threshold = kill_threshold(unit.level)?;
    if unit.kills < threshold {
        return None;
    }
    unit.level += 1;
    unit.atk += LEVEL_UP_ATK_BONUS;
    unit.def += LEVEL_UP_DEF_BONUS;
    Some(unit.level)
}

/// Heal a unit by `amount`, capped at its max hp.
pub fn repair(unit: &mut PlayerUnit, amount: f64) {
    unit.hp = (unit.hp + amount).min(unit.max_hp);
}

/// Index of the first living unit at or after `start`.
pub fn next_living_index(units: &[PlayerUnit], start: usize) -> Option<usize> {
    units
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, u)| u.hp > 0.0)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_out(unit: &mut PlayerUnit) {
        for _ in 0..MAX_UPGRADES_PER_STAT {
            apply_upgrade(unit, Stat::Atk);
            apply_upgrade(unit, Stat::Def);
        }
    }

    #[test]
    fn test_create_player_roster() {
        let roster = create_player_roster();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].id, 1);
        assert_eq!(roster[1].id, 2);
        for tank in &roster {
            assert_eq!((tank.hp, tank.atk, tank.def), (100.0, 10, 5));
            assert!(tank.upgrades.is_empty());
            assert_eq!(tank.cooldown, 0);
            assert!(!tank.special_used);
            assert_eq!(tank.kills, 0);
            assert_eq!(tank.level, 1);
        }
    }

    #[test]
    fn test_apply_upgrade_records_history() {
        let mut tank = PlayerUnit::new(1);
        apply_upgrade(&mut tank, Stat::Atk);
        apply_upgrade(&mut tank, Stat::Def);
        apply_upgrade(&mut tank, Stat::Atk);

        assert_eq!(tank.atk, 20);
        assert_eq!(tank.def, 10);
        assert_eq!(tank.upgrades, vec![Stat::Atk, Stat::Def, Stat::Atk]);
        assert_eq!(upgrade_count(&tank, Stat::Atk), 2);
        assert_eq!(upgrade_count(&tank, Stat::Def), 1);
    }

    #[test]
    fn test_is_max_upgraded_needs_both_stats() {
        let mut tank = PlayerUnit::new(1);
        for _ in 0..MAX_UPGRADES_PER_STAT {
            apply_upgrade(&mut tank, Stat::Atk);
        }
        assert!(!is_max_upgraded(&tank));

        let mut full = PlayerUnit::new(2);
        max_out(&mut full);
        assert!(is_max_upgraded(&full));
    }

    #[test]
    fn test_restore_caps_hp_and_clears_flags() {
        let mut roster = create_player_roster();
        roster[0].hp = 85.0;
        roster[0].cooldown = 2;
        roster[0].special_used = true;
        roster[1].hp = 0.0;

        restore_for_next_encounter(&mut roster);

        assert_eq!(roster[0].hp, 100.0);
        assert_eq!(roster[0].cooldown, 0);
        assert!(!roster[0].special_used);
        assert_eq!(roster[1].hp, 30.0);
    }

    #[test]
    fn test_restore_keeps_fractional_hp() {
        let mut roster = create_player_roster();
        roster[0].hp = 60.5;
        roster[1].hp = 80.5;

        restore_for_next_encounter(&mut roster);

        assert_eq!(roster[0].hp, 90.5);
        assert_eq!(roster[1].hp, 100.0);
    }

    #[test]
    fn test_first_kill_levels_up() {
        let mut tank = PlayerUnit::new(1);
        assert_eq!(register_kill(&mut tank), Some(2));
        assert_eq!(tank.level, 2);
        assert_eq!(tank.atk, 13);
        assert_eq!(tank.def, 7);
        assert_eq!(tank.kills, 1);
    }

    #[test]
    fn test_kill_thresholds_use_cumulative_count() {
        let mut tank = PlayerUnit::new(1);
        let mut level_ups = Vec::new();
        for kill in 1..=20 {
            if let Some(level) = register_kill(&mut tank) {
                level_ups.push((kill, level));
            }
        }
        // Thresholds 1/3/7/15 are compared against the running total
        assert_eq!(level_ups, vec![(1, 2), (3, 3), (7, 4), (15, 5)]);
        assert_eq!(tank.kills, 20);
        assert_eq!(tank.level, PLAYER_MAX_LEVEL);
    }

    #[test]
    fn test_max_level_never_levels_further() {
        let mut tank = PlayerUnit::new(1);
        tank.level = PLAYER_MAX_LEVEL;
        tank.kills = 100;
        let atk = tank.atk;
        assert_eq!(register_kill(&mut tank), None);
        assert_eq!(tank.level, PLAYER_MAX_LEVEL);
        assert_eq!(tank.atk, atk);
    }

    #[test]
    fn test_repair_caps_at_max() {
        let mut tank = PlayerUnit::new(1);
        tank.hp = 90.0;
        repair(&mut tank, REPAIR_AMOUNT);
        assert_eq!(tank.hp, 100.0);

        tank.hp = 0.0;
        repair(&mut tank, REPAIR_AMOUNT);
        assert_eq!(tank.hp, 20.0);

        tank.hp = 11.5;
        repair(&mut tank, REPAIR_AMOUNT);
        assert_eq!(tank.hp, 31.5);
    }

    #[test]
    fn test_next_living_index_does_not_wrap() {
        let mut roster = create_player_roster();
        assert_eq!(next_living_index(&roster, 0), Some(0));
        assert_eq!(next_living_index(&roster, 1), Some(1));
        assert_eq!(next_living_index(&roster, 2), None);

        roster[1].hp = 0.0;
        assert_eq!(next_living_index(&roster, 1), None);

        roster[1].hp = 0.5;
        assert_eq!(next_living_index(&roster, 1), Some(1));
    }
}
