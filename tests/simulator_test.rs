//! Simulator integration tests
//!
//! The autopilot plays real games through the engine. These tests check
//! reproducibility and that every run stops for a reason.

use tanks::simulator::{run_simulation, SimConfig};
use tanks::GameMode;

fn small_batch(seed: u64) -> SimConfig {
    SimConfig {
        num_runs: 4,
        seed,
        max_battles_per_run: 60,
        ..Default::default()
    }
}

#[test]
fn test_same_seed_same_results() {
    let a = run_simulation(&small_batch(1234));
    let b = run_simulation(&small_batch(1234));

    let outcome = |r: &tanks::simulator::RunReport| {
        (r.encounters_cleared, r.level, r.gold, r.battles, r.total_kills)
    };
    let a: Vec<_> = a.runs.iter().map(outcome).collect();
    let b: Vec<_> = b.runs.iter().map(outcome).collect();
    assert_eq!(a, b);
}

#[test]
fn test_every_run_ends_in_defeat_or_at_a_cap() {
    let report = run_simulation(&small_batch(7));
    assert_eq!(report.runs.len(), 4);

    for run in &report.runs {
        assert!(run.timed_out || run.snapshot.mode == GameMode::GameOver);
        assert!(run.battles <= 60);
        assert_eq!(run.encounters_cleared, run.snapshot.encounter - 1);
    }
}

#[test]
fn test_report_serializes_to_json() {
    let report = run_simulation(&SimConfig {
        max_battles_per_run: 3,
        ..Default::default()
    });
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["runs"].as_array().map(Vec::len), Some(1));
    assert!(json["runs"][0]["snapshot"]["players"].is_array());
}
