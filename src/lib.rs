//! Tanks - turn-based tank battle engine
//!
//! Two player tanks fight generated enemy encounters, upgrading between
//! battles. This library holds the whole engine; the terminal front end and
//! the simulator are thin hosts around [`GameEngine`].

pub mod build_info;
pub mod combat;
pub mod core;
pub mod encounter;
pub mod simulator;
pub mod units;

pub use crate::combat::types::{BattleEvent, BattleOutcome, TurnPhase};
pub use crate::core::combat_math::Weapon;
pub use crate::core::config::{ConfigError, GameConfig};
pub use crate::core::engine::{GameEngine, GameMode, GameSnapshot};
pub use crate::core::error::CommandError;
pub use crate::units::{EnemyUnit, PlayerUnit, SizeClass, Stat};
