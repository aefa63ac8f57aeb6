//! Combat systems run by the resolver each tick.
//!
//! Systems are plain functions over the world, roster and pool.
//! They do not own state; the resolver passes everything in.

pub mod cleanup;
pub mod collision;
pub mod damage;
pub mod enemy_ai;
pub mod projectiles;
pub mod snapshot;
pub mod wave_spawner;
