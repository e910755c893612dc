//! Game engine: the shop / battle / gameover state machine.
//!
//! `GameEngine` owns the progression ledger, the player roster and the
//! current battle session. Hosts (the terminal UI, the simulator, tests)
//! drive it with commands and read it through queries. The engine never
//! sleeps: it reports `enemy_turn_ready()` and `victory_pending()` and lets
//! the host decide when to call `resolve_enemy_turn()` and `return_to_shop()`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

use crate::combat::logic;
use crate::combat::types::{BattleEvent, BattleSession, TurnPhase};
use crate::core::combat_math::Weapon;
use crate::core::config::GameConfig;
use crate::core::error::CommandError;
use crate::core::progression::ProgressionLedger;
use crate::encounter::generate_encounter;
use crate::units::{
    create_player_roster, repair, restore_for_next_encounter, EnemyUnit, PlayerUnit, Stat,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Shop,
    Battle,
    GameOver,
}

/// Serializable copy of everything a display needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub level: u32,
    pub encounter: u32,
    pub gold: i64,
    pub phase: TurnPhase,
    pub players: Vec<PlayerUnit>,
    pub enemies: Vec<EnemyUnit>,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameEngine {
    config: GameConfig,
    mode: GameMode,
    ledger: ProgressionLedger,
    players: Vec<PlayerUnit>,
    session: BattleSession,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            mode: GameMode::Shop,
            ledger: ProgressionLedger::new(config.starting_gold),
            players: create_player_roster(),
            session: BattleSession::empty(),
            config,
        }
    }

    // === Queries ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn progression(&self) -> &ProgressionLedger {
        &self.ledger
    }

    pub fn players(&self) -> &[PlayerUnit] {
        &self.players
    }

    pub fn enemies(&self) -> &[EnemyUnit] {
        &self.session.enemies
    }

    /// Battle log, newest entry first.
    pub fn log(&self) -> &VecDeque<String> {
        &self.session.log
    }

    pub fn phase(&self) -> TurnPhase {
        self.session.phase
    }

    pub fn selected_target(&self) -> usize {
        self.session.selected_target
    }

    /// The player tank whose turn it is, if it is a player turn in battle.
    pub fn active_unit(&self) -> Option<&PlayerUnit> {
        match (self.mode, self.session.phase) {
            (GameMode::Battle, TurnPhase::PlayerTurn { active }) => self.players.get(active),
            _ => None,
        }
    }

    /// Whether the tank with `unit_id` may fire its missile.
    pub fn special_weapon_available(&self, unit_id: u32) -> bool {
        self.find_unit(unit_id)
            .map(logic::special_weapon_ready)
            .unwrap_or(false)
    }

    /// True while the enemy turn is waiting to be resolved.
    pub fn enemy_turn_ready(&self) -> bool {
        self.mode == GameMode::Battle && self.session.phase == TurnPhase::EnemyTurn
    }

    /// True after a victory until the host calls `return_to_shop()`.
    pub fn victory_pending(&self) -> bool {
        self.mode == GameMode::Battle && self.session.phase == TurnPhase::Victory
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            mode: self.mode,
            level: self.ledger.level,
            encounter: self.ledger.encounter,
            gold: self.ledger.gold,
            phase: self.session.phase,
            players: self.players.clone(),
            enemies: self.session.enemies.clone(),
            log: self.session.log.iter().cloned().collect(),
        }
    }

    fn find_unit(&self, unit_id: u32) -> Option<&PlayerUnit> {
        self.players.iter().find(|u| u.id == unit_id)
    }

    fn find_unit_mut(&mut self, unit_id: u32) -> Result<&mut PlayerUnit, CommandError> {
        self.players
            .iter_mut()
            .find(|u| u.id == unit_id)
            .ok_or(CommandError::UnknownUnit(unit_id))
    }

    fn require_mode(&self, mode: GameMode) -> Result<(), CommandError> {
        if self.mode == mode {
            Ok(())
        } else {
            Err(CommandError::WrongMode(self.mode))
        }
    }

    // === Commands ===

    /// Leave the shop and fight the next encounter.
    pub fn start_battle(&mut self, rng: &mut impl Rng) -> Result<(), CommandError> {
        self.require_mode(GameMode::Shop)?;
        if self.players.iter().all(|u| u.hp <= 0.0) {
            return Err(CommandError::NoLivingUnits);
        }

        let enemies = generate_encounter(self.ledger.level, self.ledger.encounter, rng);
        info!(
            level = self.ledger.level,
            encounter = self.ledger.encounter,
            enemies = enemies.len(),
            "battle started"
        );
        self.session = logic::begin_battle(&self.players, enemies);
        self.session.add_log_entry(format!(
            "Level {} - Encounter {}: Battle begins!",
            self.ledger.level, self.ledger.encounter
        ));
        self.mode = GameMode::Battle;
        Ok(())
    }

    /// The active tank attacks enemy slot `target` with `weapon`.
    pub fn player_attack(
        &mut self,
        target: usize,
        weapon: Weapon,
    ) -> Result<Vec<BattleEvent>, CommandError> {
        self.require_mode(GameMode::Battle)?;
        let mut events = logic::player_attack(&mut self.players, &mut self.session, target, weapon)
            .inspect_err(|err| debug!(%err, target_index = target, ?weapon, "attack rejected"))?;
        self.finish_step(&mut events);
        Ok(events)
    }

    /// Attack the currently selected enemy.
    pub fn attack_selected(&mut self, weapon: Weapon) -> Result<Vec<BattleEvent>, CommandError> {
        self.player_attack(self.session.selected_target, weapon)
    }

    /// Let every living enemy act, then hand the turn back (or end the battle).
    pub fn resolve_enemy_turn(&mut self) -> Result<Vec<BattleEvent>, CommandError> {
        self.require_mode(GameMode::Battle)?;
        let mut events = logic::resolve_enemy_turn(&mut self.players, &mut self.session)?;
        self.finish_step(&mut events);
        Ok(events)
    }

    pub fn select_target(&mut self, index: usize) -> Result<(), CommandError> {
        self.require_mode(GameMode::Battle)?;
        logic::select_target(&mut self.session, index)
    }

    /// Close a won battle and go back to the shop.
    pub fn return_to_shop(&mut self) -> Result<(), CommandError> {
        if !self.victory_pending() {
            return Err(CommandError::WrongPhase);
        }
        self.session.enemies.clear();
        self.session.selected_target = 0;
        self.mode = GameMode::Shop;
        info!(
            level = self.ledger.level,
            encounter = self.ledger.encounter,
            "returned to shop"
        );
        Ok(())
    }

    pub fn purchase_upgrade(&mut self, unit_id: u32, stat: Stat) -> Result<(), CommandError> {
        self.require_mode(GameMode::Shop)?;
        let cost = self.config.upgrade_cost;
        let unit = self
            .players
            .iter_mut()
            .find(|u| u.id == unit_id)
            .ok_or(CommandError::UnknownUnit(unit_id))?;
        self.ledger
            .purchase_upgrade(unit, stat, cost)
            .inspect_err(|err| debug!(%err, unit_id, ?stat, "upgrade rejected"))?;
        debug!(unit_id, ?stat, gold = self.ledger.gold, "upgrade purchased");
        Ok(())
    }

    /// Out-of-band repair. Accepted in the shop and in battle.
    ///
    /// Gold is not checked and may go negative.
    pub fn repair_unit(&mut self, unit_id: u32) -> Result<(), CommandError> {
        if self.mode == GameMode::GameOver {
            return Err(CommandError::WrongMode(self.mode));
        }
        let amount = self.config.repair_amount;
        let cost = self.config.repair_cost;
        let unit = self.find_unit_mut(unit_id)?;
        repair(unit, amount);
        let message = format!("{} repaired to {} HP", unit.name(), unit.hp);
        self.ledger.charge_repair(cost);
        if self.mode == GameMode::Battle {
            self.session.add_log_entry(message);
        }
        debug!(unit_id, gold = self.ledger.gold, "unit repaired");
        Ok(())
    }

    /// Start over after a defeat.
    pub fn restart_game(&mut self) -> Result<(), CommandError> {
        self.require_mode(GameMode::GameOver)?;
        *self = Self::new(self.config.clone());
        info!("game restarted");
        Ok(())
    }

    /// Pay out or end the game if the last command finished the battle, then
    /// log everything that happened.
    fn finish_step(&mut self, events: &mut Vec<BattleEvent>) {
        match self.session.phase {
            TurnPhase::Victory => {
                let report = self.ledger.on_victory(self.config.victory_gold);
                restore_for_next_encounter(&mut self.players);
                info!(
                    gold = self.ledger.gold,
                    level = report.level,
                    encounter = report.encounter,
                    "battle won"
                );
                events.push(BattleEvent::Victory {
                    gold_awarded: report.gold_awarded,
                    level: report.level,
                    encounter: report.encounter,
                    message: format!(
                        "Victory! +{}g. Tanks restored. Returning to shop...",
                        report.gold_awarded
                    ),
                });
            }
            TurnPhase::Defeat => {
                self.mode = GameMode::GameOver;
                info!(
                    level = self.ledger.level,
                    encounter = self.ledger.encounter,
                    "battle lost"
                );
                events.push(BattleEvent::Defeat {
                    message: "Game Over".to_string(),
                });
            }
            TurnPhase::PlayerTurn { .. } | TurnPhase::EnemyTurn => {}
        }
        self.session.record(events);
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    /// Always rolls a single medium enemy.
    fn single_medium() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn in_battle() -> GameEngine {
        let mut engine = GameEngine::default();
        engine.start_battle(&mut single_medium()).unwrap();
        engine
    }

    #[test]
    fn test_new_engine_starts_in_shop() {
        let engine = GameEngine::default();
        assert_eq!(engine.mode(), GameMode::Shop);
        assert_eq!(engine.progression().gold, 50);
        assert_eq!(engine.players().len(), 2);
        assert!(engine.enemies().is_empty());
        assert!(engine.log().is_empty());
    }

    #[test]
    fn test_start_battle() {
        let engine = in_battle();
        assert_eq!(engine.mode(), GameMode::Battle);
        assert_eq!(engine.phase(), TurnPhase::PlayerTurn { active: 0 });
        assert_eq!(engine.enemies().len(), 1);
        assert_eq!(engine.log()[0], "Level 1 - Encounter 1: Battle begins!");
        assert_eq!(engine.active_unit().map(|u| u.id), Some(1));
    }

    #[test]
    fn test_start_battle_only_from_shop() {
        let mut engine = in_battle();
        assert_eq!(
            engine.start_battle(&mut single_medium()),
            Err(CommandError::WrongMode(GameMode::Battle))
        );
    }

    #[test]
    fn test_purchase_only_in_shop() {
        let mut engine = in_battle();
        assert_eq!(
            engine.purchase_upgrade(1, Stat::Atk),
            Err(CommandError::WrongMode(GameMode::Battle))
        );
    }

    #[test]
    fn test_purchase_unknown_unit() {
        let mut engine = GameEngine::default();
        assert_eq!(
            engine.purchase_upgrade(9, Stat::Atk),
            Err(CommandError::UnknownUnit(9))
        );
        assert_eq!(engine.progression().gold, 50);
    }

    #[test]
    fn test_enemy_turn_ready_signal() {
        let mut engine = in_battle();
        assert!(!engine.enemy_turn_ready());
        engine.player_attack(0, Weapon::Light).unwrap();
        assert!(!engine.enemy_turn_ready());
        engine.player_attack(0, Weapon::Light).unwrap();
        assert!(engine.enemy_turn_ready());

        engine.resolve_enemy_turn().unwrap();
        assert!(!engine.enemy_turn_ready());
        assert_eq!(
            engine.resolve_enemy_turn(),
            Err(CommandError::WrongPhase)
        );
    }

    #[test]
    fn test_repair_in_battle_logs_and_charges() {
        let mut engine = in_battle();
        engine.player_attack(0, Weapon::Light).unwrap();
        engine.player_attack(0, Weapon::Light).unwrap();
        engine.resolve_enemy_turn().unwrap();
        assert_eq!(engine.players()[0].hp, 89.0);

        engine.repair_unit(1).unwrap();

        assert_eq!(engine.players()[0].hp, 100.0);
        assert_eq!(engine.progression().gold, 40);
        assert_eq!(engine.log()[0], "Tank 1 repaired to 100 HP");
    }

    #[test]
    fn test_special_weapon_query() {
        let mut engine = GameEngine::new(GameConfig {
            starting_gold: 1000,
            ..GameConfig::default()
        });
        assert!(!engine.special_weapon_available(1));
        for _ in 0..5 {
            engine.purchase_upgrade(1, Stat::Atk).unwrap();
            engine.purchase_upgrade(1, Stat::Def).unwrap();
        }
        assert!(engine.special_weapon_available(1));
        assert!(!engine.special_weapon_available(2));
        assert!(!engine.special_weapon_available(7));
    }

    #[test]
    fn test_snapshot_serializes() {
        let engine = in_battle();
        let json = serde_json::to_string(&engine.snapshot()).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, engine.snapshot());
    }
}
