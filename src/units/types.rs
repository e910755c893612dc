use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::core::combat_math::Combatant;
use crate::core::constants::*;

/// Stable identity for a unit, unique across both sides.
///
/// Observers use this to follow a unit across redraws; `id` is only unique
/// within one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitKey(Uuid);

impl UnitKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stats that can be bought in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Atk,
    Def,
}

impl Stat {
    pub fn all() -> [Stat; 2] {
        [Stat::Atk, Stat::Def]
    }

    pub fn label(self) -> &'static str {
        match self {
            Stat::Atk => "ATK",
            Stat::Def => "DEF",
        }
    }
}

/// Enemy size class. Light tanks roll half stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Light,
    Medium,
}

impl SizeClass {
    pub fn stat_scale(self) -> f64 {
        match self {
            SizeClass::Light => LIGHT_ENEMY_STAT_SCALE,
            SizeClass::Medium => 1.0,
        }
    }
}

/// A player-controlled tank. Persists across battles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerUnit {
    pub id: u32,
    pub key: UnitKey,
    pub hp: f64,
    pub max_hp: f64,
    pub atk: u32,
    pub def: u32,
    /// Purchased stats, oldest first.
    pub upgrades: Vec<Stat>,
    /// Enemy turns left before the heavy weapon is ready again.
    pub cooldown: u32,
    pub special_used: bool,
    pub kills: u32,
    pub level: u32,
}

impl PlayerUnit {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            key: UnitKey::new(),
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            atk: PLAYER_BASE_ATK,
            def: PLAYER_BASE_DEF,
            upgrades: Vec::new(),
            cooldown: 0,
            special_used: false,
            kills: 0,
            level: 1,
        }
    }

    pub fn name(&self) -> String {
        format!("Tank {}", self.id)
    }
}

/// A computer-controlled tank. Lives for a single encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyUnit {
    pub id: u32,
    pub key: UnitKey,
    pub hp: f64,
    pub max_hp: f64,
    pub atk: u32,
    pub def: u32,
    pub size: SizeClass,
}

impl EnemyUnit {
    /// Enemies spawn with whole-number stats; HP only turns fractional
    /// once they take damage.
    pub fn new(id: u32, size: SizeClass, hp: u32, atk: u32, def: u32) -> Self {
        Self {
            id,
            key: UnitKey::new(),
            hp: hp as f64,
            max_hp: hp as f64,
            atk,
            def,
            size,
        }
    }

    /// Display name, with an `(LT)` tag for light tanks.
    pub fn name(&self) -> String {
        match self.size {
            SizeClass::Light => format!("Enemy {} (LT)", self.id),
            SizeClass::Medium => format!("Enemy {}", self.id),
        }
    }
}

impl Combatant for PlayerUnit {
    fn hp(&self) -> f64 {
        self.hp
    }
    fn max_hp(&self) -> f64 {
        self.max_hp
    }
    fn atk(&self) -> u32 {
        self.atk
    }
    fn def(&self) -> u32 {
        self.def
    }
    fn set_hp(&mut self, hp: f64) {
        self.hp = hp.min(self.max_hp);
    }
}

impl Combatant for EnemyUnit {
    fn hp(&self) -> f64 {
        self.hp
    }
    fn max_hp(&self) -> f64 {
        self.max_hp
    }
    fn atk(&self) -> u32 {
        self.atk
    }
    fn def(&self) -> u32 {
        self.def
    }
    fn set_hp(&mut self, hp: f64) {
        self.hp = hp.min(self.max_hp);
    }
}
