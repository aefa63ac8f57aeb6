//! Terrain providers for STARFALL ground combat.
//!
//! Heightfield sampling and seeded synthetic landing sites. The combat core
//! only sees these through `HeightProvider`.

pub use starfall_core as core;

pub mod heightfield;
pub mod synthetic;

pub use heightfield::{FlatGround, Heightfield, HeightfieldHeader};
pub use synthetic::generate_landing_site;
