//! Core types and definitions for the STARFALL combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshots, events, configuration, errors and the
//! collaborator traits for rendering and terrain.
//! It has no dependency on any rendering or windowing framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod render;
pub mod state;
pub mod terrain;
pub mod types;

pub use glam::Vec3;

#[cfg(test)]
mod tests;
