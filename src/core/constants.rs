// Player roster
pub const PLAYER_ROSTER_SIZE: usize = 2;
pub const PLAYER_MAX_HP: f64 = 100.0;
pub const PLAYER_BASE_ATK: u32 = 10;
pub const PLAYER_BASE_DEF: u32 = 5;
pub const PLAYER_MAX_LEVEL: u32 = 5;

// Weapons
pub const LIGHT_WEAPON_MULTIPLIER: f64 = 1.0;
pub const HEAVY_WEAPON_MULTIPLIER: f64 = 1.5;
pub const SPECIAL_WEAPON_MULTIPLIER: f64 = 3.0;
pub const HEAVY_WEAPON_COOLDOWN: u32 = 2;

// Leveling: kills needed to leave level N, indexed by N - 1.
// Compared against the cumulative kill count, which never resets.
pub const KILL_THRESHOLDS: [u32; 4] = [1, 3, 7, 15];
pub const LEVEL_UP_ATK_BONUS: u32 = 3;
pub const LEVEL_UP_DEF_BONUS: u32 = 2;

// Shop
pub const STARTING_GOLD: i64 = 50;
pub const UPGRADE_COST: i64 = 20;
pub const UPGRADE_STEP: u32 = 5;
pub const MAX_UPGRADES_PER_STAT: usize = 5;

// Victory rewards
pub const VICTORY_GOLD: i64 = 50;
pub const VICTORY_HEAL: f64 = 30.0;
pub const ENCOUNTERS_PER_LEVEL: u32 = 5;

// Repair side channel
pub const REPAIR_COST: i64 = 10;
pub const REPAIR_AMOUNT: f64 = 20.0;

// Encounter scaling: difficulty = (encounter + level * LEVEL_WEIGHT) ^ EXPONENT
pub const DIFFICULTY_LEVEL_WEIGHT: u32 = 2;
pub const DIFFICULTY_EXPONENT: f64 = 1.3;
pub const ENEMY_BASE_HP: f64 = 65.0;
pub const ENEMY_HP_PER_DIFFICULTY: f64 = 7.0;
pub const ENEMY_BASE_ATK: f64 = 11.0;
pub const ENEMY_ATK_PER_DIFFICULTY: f64 = 1.2;
pub const ENEMY_BASE_DEF: u32 = 5;
pub const ENEMY_DEF_PER_DIFFICULTY: f64 = 0.8;
pub const LIGHT_ENEMY_STAT_SCALE: f64 = 0.5;
pub const MAX_ENEMIES_PER_ENCOUNTER: u32 = 2;

// Display pacing (honored by hosts, never by the engine)
pub const ENEMY_TURN_DELAY_MS: u64 = 500;
pub const VICTORY_DELAY_MS: u64 = 1500;
