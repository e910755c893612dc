//! Pure combat math shared by player attacks and enemy turns.
//!
//! Nothing here touches engine state; callers decide what to do with the
//! returned values.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Anything that can deal or receive damage.
///
/// Attack and defense are whole numbers; HP is fractional because weapon
/// multipliers are applied without rounding.
pub trait Combatant {
    fn hp(&self) -> f64;
    fn max_hp(&self) -> f64;
    fn atk(&self) -> u32;
    fn def(&self) -> u32;
    fn set_hp(&mut self, hp: f64);

    fn is_alive(&self) -> bool {
        self.hp() > 0.0
    }
}

/// Weapons available to player tanks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weapon {
    /// Machine gun, always available.
    Light,
    /// Cannon, goes on cooldown after use.
    Heavy,
    /// Missile, once per battle for fully upgraded tanks.
    Special,
}

impl Weapon {
    pub fn multiplier(self) -> f64 {
        match self {
            Weapon::Light => LIGHT_WEAPON_MULTIPLIER,
            Weapon::Heavy => HEAVY_WEAPON_MULTIPLIER,
            Weapon::Special => SPECIAL_WEAPON_MULTIPLIER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Weapon::Light => "machine gun",
            Weapon::Heavy => "cannon",
            Weapon::Special => "missile",
        }
    }

    pub fn all() -> [Weapon; 3] {
        [Weapon::Light, Weapon::Heavy, Weapon::Special]
    }
}

/// Damage dealt by an attack: `atk * multiplier - def`, never negative.
///
/// No rounding: a cannon shot from atk 13 carries 19.5 before defense.
pub fn calculate_damage(atk: u32, multiplier: f64, def: u32) -> f64 {
    (atk as f64 * multiplier - def as f64).max(0.0)
}

/// Apply damage to HP, returning remaining HP (minimum 0).
pub fn apply_damage(current_hp: f64, damage: f64) -> f64 {
    (current_hp - damage).max(0.0)
}

/// Returns the defender after taking the attacker's hit.
pub fn resolve_attack<A, D>(attacker: &A, defender: &D, multiplier: f64) -> D
where
    A: Combatant + ?Sized,
    D: Combatant + Clone,
{
    let mut result = defender.clone();
    let damage = calculate_damage(attacker.atk(), multiplier, defender.def());
    result.set_hp(apply_damage(defender.hp(), damage));
    result
}
