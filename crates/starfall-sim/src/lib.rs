//! Combat simulation for STARFALL.
//!
//! Owns the hecs world of enemies and the projectile pool, runs the ordered
//! per-tick combat systems, and produces `CombatSnapshot`s for the rendering
//! layer. Headless and deterministic for a given seed.

pub mod actor;
pub mod effects;
pub mod mode;
pub mod pacing;
pub mod player;
pub mod pool;
pub mod resolver;
pub mod systems;
pub mod world_setup;

pub use mode::ModeController;
pub use player::Player;
pub use pool::{ProjectilePool, ProjectileSpec, SlotId};
pub use resolver::{CombatArena, CombatResolver};
pub use starfall_core as core;
