//! Enemy roster generation, scaled by level and encounter.

use rand::Rng;

use crate::core::constants::*;
use crate::units::{EnemyUnit, SizeClass};

/// Difficulty rating for an encounter: `(encounter + level * 2) ^ 1.3`.
pub fn difficulty(level: u32, encounter: u32) -> f64 {
    let base = encounter + level * DIFFICULTY_LEVEL_WEIGHT;
    (base as f64).powf(DIFFICULTY_EXPONENT)
}

/// Unscaled (medium) enemy stats for an encounter. Returns (hp, atk, def).
pub fn baseline_stats(level: u32, encounter: u32) -> (u32, u32, u32) {
    let d = difficulty(level, encounter);
    let hp = (ENEMY_BASE_HP + d * ENEMY_HP_PER_DIFFICULTY).floor() as u32;
    let atk = (ENEMY_BASE_ATK + d * ENEMY_ATK_PER_DIFFICULTY).floor() as u32;
    let def = ENEMY_BASE_DEF + (d * ENEMY_DEF_PER_DIFFICULTY).floor() as u32;
    (hp, atk, def)
}

fn scale(stat: u32, size: SizeClass) -> u32 {
    (stat as f64 * size.stat_scale()).floor() as u32
}

/// Build one enemy of the given size from baseline stats.
pub fn build_enemy(id: u32, size: SizeClass, baseline: (u32, u32, u32)) -> EnemyUnit {
    let (hp, atk, def) = baseline;
    EnemyUnit::new(id, size, scale(hp, size), scale(atk, size), scale(def, size))
}

/// Generate a fresh enemy roster of one or two tanks.
///
/// Rolls the roster size first, then one size class per enemy in id order.
pub fn generate_encounter(level: u32, encounter: u32, rng: &mut impl Rng) -> Vec<EnemyUnit> {
    let baseline = baseline_stats(level, encounter);
    let count = if rng.gen_bool(0.5) {
        MAX_ENEMIES_PER_ENCOUNTER
    } else {
        1
    };

    (1..=count)
        .map(|id| {
            let size = if rng.gen_bool(0.5) {
                SizeClass::Light
            } else {
                SizeClass::Medium
            };
            build_enemy(id, size, baseline)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_baseline_stats_level_1_encounter_1() {
        // (1 + 2)^1.3 ~= 4.17
        let d = difficulty(1, 1);
        assert!((d - 4.1712).abs() < 0.001);
        assert_eq!(baseline_stats(1, 1), (94, 16, 8));
    }

    #[test]
    fn test_baseline_stats_grow_with_progress() {
        let early = baseline_stats(1, 2);
        let later = baseline_stats(2, 7);
        assert_eq!(early, (107, 18, 9));
        assert_eq!(later, (223, 38, 23));
    }

    #[test]
    fn test_light_enemy_halves_stats() {
        let enemy = build_enemy(1, SizeClass::Light, (94, 16, 8));
        assert_eq!((enemy.hp, enemy.atk, enemy.def), (47.0, 8, 4));
        assert_eq!(enemy.max_hp, 47.0);

        let odd = build_enemy(1, SizeClass::Light, (107, 18, 9));
        assert_eq!((odd.hp, odd.atk, odd.def), (53.0, 9, 4));
    }

    #[test]
    fn test_all_zero_rng_gives_two_light_enemies() {
        let mut rng = StepRng::new(0, 0);
        let roster = generate_encounter(1, 1, &mut rng);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].id, 1);
        assert_eq!(roster[1].id, 2);
        assert!(roster.iter().all(|e| e.size == SizeClass::Light));
        assert_ne!(roster[0].key, roster[1].key);
    }

    #[test]
    fn test_all_ones_rng_gives_single_medium_enemy() {
        let mut rng = StepRng::new(u64::MAX, 0);
        let roster = generate_encounter(1, 1, &mut rng);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].size, SizeClass::Medium);
        assert_eq!((roster[0].hp, roster[0].atk, roster[0].def), (94.0, 16, 8));
    }

    #[test]
    fn test_same_seed_same_composition() {
        let mut rng_a = create_test_rng();
        let mut rng_b = create_test_rng();
        for encounter in 1..=10 {
            let a = generate_encounter(1, encounter, &mut rng_a);
            let b = generate_encounter(1, encounter, &mut rng_b);
            let shape = |r: &[EnemyUnit]| {
                r.iter()
                    .map(|e| (e.id, e.size, e.hp, e.atk, e.def))
                    .collect::<Vec<_>>()
            };
            assert_eq!(shape(&a), shape(&b));
        }
    }

    #[test]
    fn test_roster_sizes_and_classes_all_occur() {
        let mut rng = create_test_rng();
        let mut sizes = [0u32; 3];
        let mut light = 0;
        let mut medium = 0;
        for _ in 0..200 {
            let roster = generate_encounter(2, 3, &mut rng);
            sizes[roster.len()] += 1;
            for enemy in &roster {
                match enemy.size {
                    SizeClass::Light => light += 1,
                    SizeClass::Medium => medium += 1,
                }
            }
        }
        assert_eq!(sizes[0], 0);
        assert!(sizes[1] > 0 && sizes[2] > 0);
        assert!(light > 0 && medium > 0);
    }
}
