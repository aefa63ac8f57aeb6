//! Combat snapshot: the read-only state published to the rendering layer each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{CombatEvent, EffectRequest};
use crate::types::SimTime;

/// Complete visible combat state after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    /// Combat mode the session was started in (`Overworld` when inactive).
    pub mode: GameMode,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub pool: PoolView,
    /// Enemies still alive (dying enemies are excluded).
    pub active_enemy_count: usize,
    pub events: Vec<CombatEvent>,
    pub effects: Vec<EffectRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub class: PlayerClass,
    pub position: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub energy: f32,
    pub max_energy: f32,
    pub level: u32,
    pub experience: u32,
    pub currency: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_id: u32,
    pub kind: EnemyKind,
    /// Logical position used by the simulation.
    pub position: Vec3,
    /// Position including the visual hover offset.
    pub render_position: Vec3,
    pub facing: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub ai_state: AiState,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub slot: usize,
    pub origin: ProjectileOrigin,
    pub position: Vec3,
    pub direction: Vec3,
    pub style: VisualStyle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolView {
    pub capacity: usize,
    pub in_use: usize,
}
