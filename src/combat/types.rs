use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::combat_math::{Combatant, Weapon};
use crate::units::EnemyUnit;

/// Whose turn it is within a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// A player tank is acting. `active` indexes the player roster.
    PlayerTurn { active: usize },
    /// Every player tank has acted; waiting for the host to resolve the enemy turn.
    EnemyTurn,
    /// All enemies destroyed. Rewards are paid; waiting to return to the shop.
    Victory,
    /// All player tanks destroyed.
    Defeat,
}

impl TurnPhase {
    pub fn is_over(self) -> bool {
        matches!(self, TurnPhase::Victory | TurnPhase::Defeat)
    }
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Something that happened during a battle command.
///
/// The display layer maps these to effects; the engine turns the messages
/// into battle log lines.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    PlayerAttack {
        unit_id: u32,
        enemy_id: u32,
        weapon: Weapon,
        damage: f64,
        message: String,
    },
    EnemyAttack {
        enemy_id: u32,
        unit_id: u32,
        damage: f64,
        message: String,
    },
    EnemyDestroyed {
        enemy_id: u32,
        message: String,
    },
    UnitDestroyed {
        unit_id: u32,
        message: String,
    },
    UnitLeveledUp {
        unit_id: u32,
        level: u32,
        message: String,
    },
    /// No player tank is left to act this round.
    EnemyTurnStarted,
    PlayerTurnStarted {
        unit_id: u32,
    },
    Victory {
        gold_awarded: i64,
        level: u32,
        encounter: u32,
        message: String,
    },
    Defeat {
        message: String,
    },
}

impl BattleEvent {
    /// Log line for this event, if it has one.
    pub fn message(&self) -> Option<&str> {
        match self {
            BattleEvent::PlayerAttack { message, .. }
            | BattleEvent::EnemyAttack { message, .. }
            | BattleEvent::EnemyDestroyed { message, .. }
            | BattleEvent::UnitDestroyed { message, .. }
            | BattleEvent::UnitLeveledUp { message, .. }
            | BattleEvent::Victory { message, .. }
            | BattleEvent::Defeat { message } => Some(message),
            BattleEvent::EnemyTurnStarted | BattleEvent::PlayerTurnStarted { .. } => None,
        }
    }
}

/// State of the battle currently being fought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSession {
    pub enemies: Vec<EnemyUnit>,
    pub phase: TurnPhase,
    /// Newest entry first.
    pub log: VecDeque<String>,
    /// Enemy the player has picked to attack.
    pub selected_target: usize,
}

impl BattleSession {
    pub fn new(enemies: Vec<EnemyUnit>, phase: TurnPhase) -> Self {
        Self {
            enemies,
            phase,
            log: VecDeque::new(),
            selected_target: 0,
        }
    }

    /// Session with no enemies, used outside of battle.
    pub fn empty() -> Self {
        Self::new(Vec::new(), TurnPhase::PlayerTurn { active: 0 })
    }

    pub fn add_log_entry(&mut self, message: impl Into<String>) {
        self.log.push_front(message.into());
    }

    pub fn record(&mut self, events: &[BattleEvent]) {
        for message in events.iter().filter_map(BattleEvent::message) {
            self.add_log_entry(message);
        }
    }

    pub fn all_enemies_destroyed(&self) -> bool {
        self.enemies.iter().all(|e| !e.is_alive())
    }

    pub fn first_living_enemy(&self) -> Option<usize> {
        self.enemies.iter().position(|e| e.is_alive())
    }
}

impl Default for BattleSession {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::SizeClass;

    #[test]
    fn test_log_is_newest_first() {
        let mut session = BattleSession::empty();
        session.add_log_entry("first");
        session.add_log_entry("second");
        assert_eq!(session.log, VecDeque::from(vec!["second".to_string(), "first".to_string()]));
    }

    #[test]
    fn test_record_skips_silent_events() {
        let mut session = BattleSession::empty();
        session.record(&[
            BattleEvent::EnemyTurnStarted,
            BattleEvent::Defeat {
                message: "Game Over".to_string(),
            },
        ]);
        assert_eq!(session.log.len(), 1);
        assert_eq!(session.log[0], "Game Over");
    }

    #[test]
    fn test_first_living_enemy() {
        let mut session = BattleSession::new(
            vec![
                EnemyUnit::new(1, SizeClass::Medium, 94, 16, 8),
                EnemyUnit::new(2, SizeClass::Light, 47, 8, 4),
            ],
            TurnPhase::PlayerTurn { active: 0 },
        );
        assert_eq!(session.first_living_enemy(), Some(0));
        session.enemies[0].hp = 0.0;
        assert_eq!(session.first_living_enemy(), Some(1));
        assert!(!session.all_enemies_destroyed());
        session.enemies[1].hp = 0.0;
        assert_eq!(session.first_living_enemy(), None);
        assert!(session.all_enemies_destroyed());
    }
}
