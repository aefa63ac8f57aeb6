//! STARFALL headless application.
//!
//! Wires the combat simulation into a game-loop thread driven by a command
//! channel, plus a scripted autopilot used by the headless binary.

pub mod autopilot;
pub mod client;
pub mod error;
pub mod game_loop;
pub mod state;

pub use starfall_core as core;
