//! Progression ledger: gold, level and encounter bookkeeping across battles.

use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::core::error::CommandError;
use crate::units::{apply_upgrade, upgrade_count, PlayerUnit, Stat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionLedger {
    pub level: u32,
    pub encounter: u32,
    /// Signed: purchases never overdraw it, but repairs can.
    pub gold: i64,
}

/// What a victory paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VictoryReport {
    pub gold_awarded: i64,
    pub level: u32,
    pub encounter: u32,
    pub leveled_up: bool,
}

impl ProgressionLedger {
    pub fn new(starting_gold: i64) -> Self {
        Self {
            level: 1,
            encounter: 1,
            gold: starting_gold,
        }
    }

    pub fn can_afford(&self, cost: i64) -> bool {
        self.gold >= cost
    }

    /// Whether `unit` may still buy `stat` at `cost`.
    pub fn check_upgrade(&self, unit: &PlayerUnit, stat: Stat, cost: i64) -> Result<(), CommandError> {
        if !self.can_afford(cost) {
            return Err(CommandError::InsufficientGold);
        }
        if upgrade_count(unit, stat) >= MAX_UPGRADES_PER_STAT {
            return Err(CommandError::UpgradeCapReached);
        }
        Ok(())
    }

    /// Buy one upgrade. Gold is only spent if the upgrade is applied.
    pub fn purchase_upgrade(
        &mut self,
        unit: &mut PlayerUnit,
        stat: Stat,
        cost: i64,
    ) -> Result<(), CommandError> {
        self.check_upgrade(unit, stat, cost)?;
        self.gold -= cost;
        apply_upgrade(unit, stat);
        Ok(())
    }

    /// Pay out a victory and advance the encounter counter.
    ///
    /// The level rises once the encounter count passes `level * 5`; the
    /// encounter counter itself keeps counting.
    pub fn on_victory(&mut self, reward: i64) -> VictoryReport {
        self.gold += reward;
        self.encounter += 1;
        let leveled_up = self.encounter > self.level * ENCOUNTERS_PER_LEVEL;
        if leveled_up {
            self.level += 1;
        }
        VictoryReport {
            gold_awarded: reward,
            level: self.level,
            encounter: self.encounter,
            leveled_up,
        }
    }

    /// Charge for a repair. No balance check: gold may go negative.
    pub fn charge_repair(&mut self, cost: i64) {
        self.gold -= cost;
    }
}

impl Default for ProgressionLedger {
    fn default() -> Self {
        Self::new(STARTING_GOLD)
    }
}
