use thiserror::Error;

use crate::core::engine::GameMode;

/// Why a command was refused. A refused command never changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command not available in {0:?} mode")]
    WrongMode(GameMode),
    #[error("command not available in the current turn phase")]
    WrongPhase,
    #[error("not enough gold")]
    InsufficientGold,
    #[error("stat already upgraded the maximum number of times")]
    UpgradeCapReached,
    #[error("no unit with id {0}")]
    UnknownUnit(u32),
    #[error("target slot {0} is empty or destroyed")]
    InvalidTarget(usize),
    #[error("acting tank is destroyed")]
    AttackerDown,
    #[error("cannon is reloading ({0} turns left)")]
    WeaponOnCooldown(u32),
    #[error("missile is not available")]
    SpecialUnavailable,
    #[error("no tank is able to fight")]
    NoLivingUnits,
}
