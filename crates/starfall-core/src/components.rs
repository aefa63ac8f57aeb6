//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in the simulation
//! systems and the AI state machine, not here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{AiState, EnemyKind};
use crate::render::VisualHandle;

/// Logical placement of an actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Unit facing direction (what the actor is oriented toward).
    pub facing: Vec3,
}

/// Hit points. `current` stays within `0.0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Zero or less means the actor is dead and inactive.
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Enemy AI memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub kind: EnemyKind,
    pub state: AiState,
    /// Seconds until the next shot is allowed; fires at <= 0.
    pub cooldown_remaining: f32,
    /// Centre of the patrol region.
    pub home: Vec3,
    /// Horizontal radius of the patrol region (zero for turrets).
    pub patrol_radius: f32,
    /// Current wander destination, if one has been picked.
    pub patrol_target: Option<Vec3>,
    /// Time accumulated since the last AI evaluation (throttled enemies).
    pub pending_dt: f32,
    /// Phase of the purely visual hover bob (radians).
    pub hover_phase: f32,
}

/// Whether an actor is still participating in combat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Alive,
    /// Health reached zero on `since_tick`; removed on a later tick.
    Dying { since_tick: u64 },
}

/// Rendering handle of an actor. `None` once the visual has been torn down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorVisual {
    pub handle: Option<VisualHandle>,
}

/// Stable per-session enemy number, used in events and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Marks an entity as a hostile combatant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;
