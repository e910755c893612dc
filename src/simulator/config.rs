//! Simulation configuration.

use crate::core::config::GameConfig;

/// Configuration for a batch of headless games.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of games to play
    pub num_runs: u32,

    /// Seed for the first run; run `n` uses `seed + n`
    pub seed: u64,

    /// Safety cap on battles per game
    pub max_battles_per_run: u32,

    /// Safety cap on enemy turns per battle, for stalemates where no side
    /// can get through the other's defense
    pub max_rounds_per_battle: u32,

    /// Game settings shared by every run
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1,
            seed: 42,
            max_battles_per_run: 500,
            max_rounds_per_battle: 200,
            game: GameConfig::headless(),
        }
    }
}

impl SimConfig {
    /// Seed used for the run at `run_idx`.
    pub fn run_seed(&self, run_idx: u32) -> u64 {
        self.seed.wrapping_add(run_idx as u64)
    }
}
