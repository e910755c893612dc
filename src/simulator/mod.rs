//! Headless autopilot games for balance checks.
//!
//! Each run plays a full game through `GameEngine` with a seeded RNG, so a
//! seed always reproduces the same game.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunReport, SimReport};
pub use runner::{choose_target, choose_upgrade, choose_weapon, play_game, run_simulation};
