//! Battle types, turn controller and enemy AI.

#![allow(unused_imports)]

pub mod enemy_ai;
pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
