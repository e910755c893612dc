//! Headless games driven by a fixed autopilot.
//!
//! The autopilot plays through the same `GameEngine` commands as the
//! terminal UI, so a simulated run follows exactly the rules a player sees.

use super::config::SimConfig;
use super::report::{RunReport, SimReport};
use crate::core::combat_math::Weapon;
use crate::core::constants::MAX_UPGRADES_PER_STAT;
use crate::core::engine::{GameEngine, GameMode};
use crate::units::{upgrade_count, PlayerUnit, Stat};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

/// Play `config.num_runs` games and collect the results.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let runs = (0..config.num_runs)
        .map(|run_idx| {
            let seed = config.run_seed(run_idx);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let report = play_game(config, seed, &mut rng);
            info!(
                run = run_idx + 1,
                seed,
                encounters_cleared = report.encounters_cleared,
                level = report.level,
                "run finished"
            );
            report
        })
        .collect();
    SimReport::from_runs(runs)
}

/// Shop pick: the least-upgraded stat across the roster, if affordable.
///
/// Every upgrade costs the same, so this spreads purchases evenly and fills
/// both tanks towards the special weapon at the same pace.
pub fn choose_upgrade(engine: &GameEngine) -> Option<(u32, Stat)> {
    if !engine.progression().can_afford(engine.config().upgrade_cost) {
        return None;
    }
    engine
        .players()
        .iter()
        .flat_map(|unit| Stat::all().into_iter().map(move |stat| (unit, stat)))
        .filter(|(unit, stat)| upgrade_count(unit, *stat) < MAX_UPGRADES_PER_STAT)
        .min_by_key(|(unit, stat)| upgrade_count(unit, *stat))
        .map(|(unit, stat)| (unit.id, stat))
}

/// The living enemy with the least HP. Ties go to the lower slot.
pub fn choose_target(engine: &GameEngine) -> Option<usize> {
    engine
        .enemies()
        .iter()
        .enumerate()
        .filter(|(_, enemy)| enemy.hp > 0.0)
        .min_by(|(_, a), (_, b)| a.hp.total_cmp(&b.hp))
        .map(|(index, _)| index)
}

/// Strongest weapon the unit can fire: missile, then cannon, then machine gun.
pub fn choose_weapon(engine: &GameEngine, unit: &PlayerUnit) -> Weapon {
    if engine.special_weapon_available(unit.id) {
        Weapon::Special
    } else if unit.cooldown == 0 {
        Weapon::Heavy
    } else {
        Weapon::Light
    }
}

/// Spend gold until nothing affordable is left. Returns upgrades bought.
fn shop(engine: &mut GameEngine) -> u32 {
    let mut bought = 0;
    while let Some((unit_id, stat)) = choose_upgrade(engine) {
        if engine.purchase_upgrade(unit_id, stat).is_err() {
            break;
        }
        bought += 1;
    }
    bought
}

/// Take the active tank's action. Returns false if the engine refused it.
fn take_player_action(engine: &mut GameEngine) -> bool {
    let (Some(unit), Some(target)) = (engine.active_unit().cloned(), choose_target(engine)) else {
        return false;
    };
    let weapon = choose_weapon(engine, &unit);
    match engine.player_attack(target, weapon) {
        Ok(_) => true,
        Err(err) => {
            warn!(
                %err,
                unit_id = unit.id,
                target_index = target,
                ?weapon,
                "autopilot action rejected"
            );
            false
        }
    }
}

/// Play one game until defeat or a safety cap.
pub fn play_game(config: &SimConfig, seed: u64, rng: &mut impl Rng) -> RunReport {
    let mut engine = GameEngine::new(config.game.clone());
    let mut battles = 0u32;
    let mut upgrades_bought = 0u32;
    let mut rounds = 0u32;
    let mut timed_out = false;

    loop {
        match engine.mode() {
            GameMode::Shop => {
                if battles >= config.max_battles_per_run {
                    timed_out = true;
                    break;
                }
                upgrades_bought += shop(&mut engine);
                if engine.start_battle(rng).is_err() {
                    break;
                }
                battles += 1;
                rounds = 0;
                debug!(battle = battles, gold = engine.progression().gold, "battle started");
            }
            GameMode::Battle if engine.victory_pending() => {
                if engine.return_to_shop().is_err() {
                    break;
                }
            }
            GameMode::Battle if engine.enemy_turn_ready() => {
                if rounds >= config.max_rounds_per_battle {
                    timed_out = true;
                    break;
                }
                rounds += 1;
                if engine.resolve_enemy_turn().is_err() {
                    break;
                }
            }
            GameMode::Battle => {
                if !take_player_action(&mut engine) {
                    break;
                }
            }
            GameMode::GameOver => break,
        }
    }

    RunReport::from_engine(&engine, seed, battles, upgrades_bought, timed_out)
}
