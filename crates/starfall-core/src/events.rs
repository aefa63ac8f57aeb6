//! Events emitted by the simulation for audio, UI and effects feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A projectile entered the pool.
    ProjectileSpawned {
        slot: usize,
        origin: ProjectileOrigin,
    },
    /// The pool was full; the oldest projectile was retired to make room.
    ProjectileRecycled { slot: usize },
    /// A projectile flew past its range without hitting anything.
    ProjectileExpired { slot: usize },
    EnemyHit { enemy_id: u32, damage: f32 },
    PlayerHit { damage: f32 },
    /// First tick an enemy's health reached zero. Emitted exactly once.
    EnemyKilled {
        enemy_id: u32,
        kind: EnemyKind,
        experience: u32,
        currency: u32,
    },
    /// A dead enemy was removed from the roster.
    EnemyRemoved { enemy_id: u32 },
    EnemyEngaged { enemy_id: u32 },
    EnemyDisengaged { enemy_id: u32 },
    /// A hit test skipped an enemy whose visual was already gone.
    TargetSkipped { enemy_id: u32 },
    PlayerLevelUp { level: u32 },
    PlayerDefeated,
    SessionComplete,
}

/// Data-driven visual effect, evaluated by the effects collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectRequest {
    pub kind: EffectKind,
    pub position: Vec3,
    pub start_tick: u64,
    pub duration_ticks: u32,
}

/// Mode changes reported by the mode controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModeEvent {
    CombatStarted { mode: GameMode },
    /// Every enemy was destroyed.
    CombatWon,
    /// The player was destroyed.
    CombatLost,
    /// The player left the combat area.
    CombatAbandoned,
    /// Combat could not start; back in the overworld.
    CombatAborted,
}
