//! Turn controller: whose turn it is, what a player attack may do, and how
//! an enemy turn resolves.
//!
//! Every function here either applies a command completely or returns a
//! [`CommandError`] without touching anything. Rewards for a victory are paid
//! by the engine once the phase reaches [`TurnPhase::Victory`].

use crate::core::combat_math::{calculate_damage, resolve_attack, Combatant, Weapon};
use crate::core::constants::HEAVY_WEAPON_COOLDOWN;
use crate::core::error::CommandError;
use crate::units::{is_max_upgraded, next_living_index, register_kill, EnemyUnit, PlayerUnit};

use super::enemy_ai::run_enemy_attacks;
use super::types::{BattleEvent, BattleOutcome, BattleSession, TurnPhase};

/// Open a battle against `enemies`. The first living player tank acts first.
pub fn begin_battle(players: &[PlayerUnit], enemies: Vec<EnemyUnit>) -> BattleSession {
    let active = next_living_index(players, 0).unwrap_or(0);
    BattleSession::new(enemies, TurnPhase::PlayerTurn { active })
}

/// Whether `unit` may fire its missile right now.
pub fn special_weapon_ready(unit: &PlayerUnit) -> bool {
    !unit.special_used && is_max_upgraded(unit)
}

/// Check a player attack without applying it. Returns the acting unit's index.
pub fn validate_attack(
    players: &[PlayerUnit],
    session: &BattleSession,
    target: usize,
    weapon: Weapon,
) -> Result<usize, CommandError> {
    let TurnPhase::PlayerTurn { active } = session.phase else {
        return Err(CommandError::WrongPhase);
    };
    let attacker = players.get(active).ok_or(CommandError::AttackerDown)?;
    if !attacker.is_alive() {
        return Err(CommandError::AttackerDown);
    }
    match session.enemies.get(target) {
        Some(enemy) if enemy.is_alive() => {}
        _ => return Err(CommandError::InvalidTarget(target)),
    }
    match weapon {
        Weapon::Heavy if attacker.cooldown > 0 => {
            Err(CommandError::WeaponOnCooldown(attacker.cooldown))
        }
        Weapon::Special if !special_weapon_ready(attacker) => Err(CommandError::SpecialUnavailable),
        _ => Ok(active),
    }
}

/// The active player tank attacks enemy slot `target` with `weapon`.
pub fn player_attack(
    players: &mut [PlayerUnit],
    session: &mut BattleSession,
    target: usize,
    weapon: Weapon,
) -> Result<Vec<BattleEvent>, CommandError> {
    let active = validate_attack(players, session, target, weapon)?;

    let attacker = &mut players[active];
    let enemy = &session.enemies[target];
    let damage = calculate_damage(attacker.atk, weapon.multiplier(), enemy.def);
    let after = resolve_attack(&*attacker, enemy, weapon.multiplier());

    let mut events = vec![BattleEvent::PlayerAttack {
        unit_id: attacker.id,
        enemy_id: after.id,
        weapon,
        damage,
        message: format!(
            "{} uses {} on {} for {} damage!",
            attacker.name(),
            weapon.name(),
            after.name(),
            damage
        ),
    }];

    match weapon {
        Weapon::Heavy => attacker.cooldown = HEAVY_WEAPON_COOLDOWN,
        Weapon::Special => attacker.special_used = true,
        Weapon::Light => {}
    }

    if !after.is_alive() {
        events.push(BattleEvent::EnemyDestroyed {
            enemy_id: after.id,
            message: format!("{} is destroyed!", after.name()),
        });
        if let Some(level) = register_kill(attacker) {
            events.push(BattleEvent::UnitLeveledUp {
                unit_id: attacker.id,
                level,
                message: format!("{} reached level {}!", attacker.name(), level),
            });
        }
    }
    session.enemies[target] = after;

    if session.all_enemies_destroyed() {
        session.phase = TurnPhase::Victory;
        return Ok(events);
    }

    let selection_lost = session
        .enemies
        .get(session.selected_target)
        .map_or(true, |e| !e.is_alive());
    if selection_lost {
        session.selected_target = session.first_living_enemy().unwrap_or(0);
    }

    events.push(advance_after_player_action(players, session, active));
    Ok(events)
}

/// Move to the next living player tank after `active`, or hand the turn to
/// the enemies. No wrap-around.
fn advance_after_player_action(
    players: &[PlayerUnit],
    session: &mut BattleSession,
    active: usize,
) -> BattleEvent {
    match next_living_index(players, active + 1) {
        Some(next) => {
            session.phase = TurnPhase::PlayerTurn { active: next };
            BattleEvent::PlayerTurnStarted {
                unit_id: players[next].id,
            }
        }
        None => {
            session.phase = TurnPhase::EnemyTurn;
            BattleEvent::EnemyTurnStarted
        }
    }
}

/// Heavy weapon cooldowns tick once per enemy turn.
pub fn tick_cooldowns(players: &mut [PlayerUnit]) {
    for unit in players.iter_mut() {
        unit.cooldown = unit.cooldown.saturating_sub(1);
    }
}

/// Decide whether the battle is over. Defeat is checked first.
pub fn check_outcome(players: &[PlayerUnit], session: &BattleSession) -> Option<BattleOutcome> {
    if players.iter().all(|p| !p.is_alive()) {
        Some(BattleOutcome::Defeat)
    } else if session.all_enemies_destroyed() {
        Some(BattleOutcome::Victory)
    } else {
        None
    }
}

/// Resolve a whole enemy turn. Only valid in [`TurnPhase::EnemyTurn`].
pub fn resolve_enemy_turn(
    players: &mut [PlayerUnit],
    session: &mut BattleSession,
) -> Result<Vec<BattleEvent>, CommandError> {
    if session.phase != TurnPhase::EnemyTurn {
        return Err(CommandError::WrongPhase);
    }

    let mut events = run_enemy_attacks(&session.enemies, players);
    tick_cooldowns(players);

    match check_outcome(players, session) {
        Some(BattleOutcome::Defeat) => session.phase = TurnPhase::Defeat,
        Some(BattleOutcome::Victory) => session.phase = TurnPhase::Victory,
        None => {
            // Turn order restarts from the first living tank every round
            let active = next_living_index(players, 0).unwrap_or(0);
            session.phase = TurnPhase::PlayerTurn { active };
            events.push(BattleEvent::PlayerTurnStarted {
                unit_id: players[active].id,
            });
        }
    }
    Ok(events)
}

/// Pick which enemy the player will attack.
pub fn select_target(session: &mut BattleSession, index: usize) -> Result<(), CommandError> {
    if !matches!(session.phase, TurnPhase::PlayerTurn { .. }) {
        return Err(CommandError::WrongPhase);
    }
    match session.enemies.get(index) {
        Some(enemy) if enemy.is_alive() => {
            session.selected_target = index;
            Ok(())
        }
        _ => Err(CommandError::InvalidTarget(index)),
    }
}
