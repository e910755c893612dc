//! Enemy targeting and enemy-turn attacks.

use crate::core::combat_math::{calculate_damage, resolve_attack, Combatant};
use crate::core::constants::LIGHT_WEAPON_MULTIPLIER;
use crate::units::{EnemyUnit, PlayerUnit};

use super::types::BattleEvent;

/// Pick the living player tank with the lowest defense.
/// Ties go to the earliest roster slot.
pub fn select_target(players: &[PlayerUnit]) -> Option<usize> {
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_alive())
        .min_by_key(|(_, p)| p.def)
        .map(|(i, _)| i)
}

/// One enemy attacks its chosen target. Returns None if no target is alive.
pub fn enemy_attack(enemy: &EnemyUnit, players: &mut [PlayerUnit]) -> Option<Vec<BattleEvent>> {
    let index = select_target(players)?;
    let target = &players[index];
    let damage = calculate_damage(enemy.atk, LIGHT_WEAPON_MULTIPLIER, target.def);
    let after = resolve_attack(enemy, target, LIGHT_WEAPON_MULTIPLIER);
    players[index] = after;

    let target = &players[index];
    let mut events = vec![BattleEvent::EnemyAttack {
        enemy_id: enemy.id,
        unit_id: target.id,
        damage,
        message: format!("{} hits {} for {} damage!", enemy.name(), target.name(), damage),
    }];
    if !target.is_alive() {
        events.push(BattleEvent::UnitDestroyed {
            unit_id: target.id,
            message: format!("{} is destroyed!", target.name()),
        });
    }
    Some(events)
}

/// Every living enemy attacks once, in roster order.
///
/// Targets are chosen afresh for each enemy, so a tank destroyed by an
/// earlier enemy is never attacked again in the same turn.
pub fn run_enemy_attacks(enemies: &[EnemyUnit], players: &mut [PlayerUnit]) -> Vec<BattleEvent> {
    let mut events = Vec::new();
    for enemy in enemies.iter().filter(|e| e.is_alive()) {
        match enemy_attack(enemy, players) {
            Some(attack_events) => events.extend(attack_events),
            None => break,
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{create_player_roster, SizeClass};

    #[test]
    fn test_targets_lowest_defense() {
        let mut players = create_player_roster();
        players[0].def = 10;
        players[1].def = 7;
        assert_eq!(select_target(&players), Some(1));
    }

    #[test]
    fn test_defense_tie_goes_to_first_slot() {
        let players = create_player_roster();
        assert_eq!(select_target(&players), Some(0));
    }

    #[test]
    fn test_dead_tanks_are_never_targeted() {
        let mut players = create_player_roster();
        players[0].def = 1;
        players[0].hp = 0.0;
        assert_eq!(select_target(&players), Some(1));

        players[1].hp = 0.0;
        assert_eq!(select_target(&players), None);
    }

    #[test]
    fn test_enemy_attack_applies_damage() {
        let mut players = create_player_roster();
        let enemy = EnemyUnit::new(1, SizeClass::Medium, 94, 16, 8);

        let events = enemy_attack(&enemy, &mut players).unwrap();

        assert_eq!(players[0].hp, 89.0);
        assert_eq!(players[1].hp, 100.0);
        assert!(matches!(
            events[0],
            BattleEvent::EnemyAttack { enemy_id: 1, unit_id: 1, damage, .. } if damage == 11.0
        ));
    }

    #[test]
    fn test_second_enemy_retargets_after_kill() {
        let mut players = create_player_roster();
        players[0].hp = 5.0;
        let enemies = vec![
            EnemyUnit::new(1, SizeClass::Medium, 94, 16, 8),
            EnemyUnit::new(2, SizeClass::Medium, 94, 16, 8),
        ];

        let events = run_enemy_attacks(&enemies, &mut players);

        assert_eq!(players[0].hp, 0.0);
        assert_eq!(players[1].hp, 89.0);
        assert!(events
            .iter()
            .any(|e| matches!(e, BattleEvent::UnitDestroyed { unit_id: 1, .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, BattleEvent::EnemyAttack { enemy_id: 2, unit_id: 2, .. })));
    }

    #[test]
    fn test_destroyed_enemies_do_not_attack() {
        let mut players = create_player_roster();
        let mut dead = EnemyUnit::new(1, SizeClass::Medium, 94, 16, 8);
        dead.hp = 0.0;

        let events = run_enemy_attacks(&[dead], &mut players);

        assert!(events.is_empty());
        assert_eq!(players[0].hp, 100.0);
    }
}
