//! Enemy AI for STARFALL.
//!
//! Implements the patrol/engage state machine and kind-driven
//! behavior profiles. Pure functions over plain data; no ECS dependency.

pub mod fsm;
pub mod profiles;

pub use starfall_core as core;
