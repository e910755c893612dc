//! Unit registry: player tanks, enemy tanks and their per-unit combat state.

#![allow(unused_imports)]

pub mod roster;
pub mod types;

pub use roster::*;
pub use types::*;
