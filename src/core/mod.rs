//! Core engine: combat math, balance constants, progression and the game
//! mode state machine.

pub mod combat_math;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod progression;
