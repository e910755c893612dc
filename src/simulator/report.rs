//! Per-run results and batch summaries.

use crate::core::engine::{GameEngine, GameMode, GameSnapshot};
use serde::Serialize;

/// Outcome of one simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub encounters_cleared: u32,
    pub level: u32,
    pub gold: i64,
    pub battles: u32,
    pub upgrades_bought: u32,
    pub total_kills: u32,
    /// Ended by a safety cap rather than a defeat
    pub timed_out: bool,
    pub snapshot: GameSnapshot,
}

impl RunReport {
    pub fn from_engine(
        engine: &GameEngine,
        seed: u64,
        battles: u32,
        upgrades_bought: u32,
        timed_out: bool,
    ) -> Self {
        let progress = engine.progression();
        // Battles won, counted across level boundaries
        let encounters_cleared = progress.encounter.saturating_sub(1);
        Self {
            seed,
            encounters_cleared,
            level: progress.level,
            gold: progress.gold,
            battles,
            upgrades_bought,
            total_kills: engine.players().iter().map(|u| u.kills).sum(),
            timed_out: timed_out && engine.mode() != GameMode::GameOver,
            snapshot: engine.snapshot(),
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "seed {:>6} | cleared {:>3} | level {:>2} | gold {:>5} | kills {:>4} | upgrades {:>2}{}",
            self.seed,
            self.encounters_cleared,
            self.level,
            self.gold,
            self.total_kills,
            self.upgrades_bought,
            if self.timed_out { " | capped" } else { "" }
        )
    }
}

/// Aggregated results from a batch of runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub runs: Vec<RunReport>,
    pub avg_encounters_cleared: f64,
    pub avg_level: f64,
    pub best_encounters_cleared: u32,
    pub runs_timed_out: u32,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunReport>) -> Self {
        let count = runs.len().max(1) as f64;
        let avg_encounters_cleared =
            runs.iter().map(|r| r.encounters_cleared as f64).sum::<f64>() / count;
        let avg_level = runs.iter().map(|r| r.level as f64).sum::<f64>() / count;
        let best_encounters_cleared = runs
            .iter()
            .map(|r| r.encounters_cleared)
            .max()
            .unwrap_or(0);
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;

        Self {
            runs,
            avg_encounters_cleared,
            avg_level,
            best_encounters_cleared,
            runs_timed_out,
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{} runs | avg cleared {:.1} | best {} | avg level {:.2} | capped {}",
            self.runs.len(),
            self.avg_encounters_cleared,
            self.best_encounters_cleared,
            self.avg_level,
            self.runs_timed_out
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(seed: u64, engine: &GameEngine, timed_out: bool) -> RunReport {
        RunReport::from_engine(engine, seed, 0, 0, timed_out)
    }

    #[test]
    fn test_fresh_engine_report() {
        let engine = GameEngine::default();
        let run = report(5, &engine, false);
        assert_eq!(run.encounters_cleared, 0);
        assert_eq!(run.level, 1);
        assert_eq!(run.gold, 50);
        assert_eq!(run.total_kills, 0);
        assert!(run.summary_line().starts_with("seed      5"));
    }

    #[test]
    fn test_aggregate() {
        let engine = GameEngine::default();
        let mut a = report(1, &engine, false);
        let mut b = report(2, &engine, true);
        a.encounters_cleared = 4;
        a.level = 1;
        b.encounters_cleared = 8;
        b.level = 2;

        let sim = SimReport::from_runs(vec![a, b]);
        assert_eq!(sim.avg_encounters_cleared, 6.0);
        assert_eq!(sim.avg_level, 1.5);
        assert_eq!(sim.best_encounters_cleared, 8);
        assert_eq!(sim.runs_timed_out, 1);
    }

    #[test]
    fn test_empty_batch() {
        let sim = SimReport::from_runs(Vec::new());
        assert_eq!(sim.avg_level, 0.0);
        assert_eq!(sim.best_encounters_cleared, 0);
    }
}
