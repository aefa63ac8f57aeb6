//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype. Fixed at creation; selects range, cooldown and movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Mobile hovering drone that patrols around its home point.
    #[default]
    Drone,
    /// Stationary emplacement; idle until something enters range.
    Turret,
}

/// Player class, chosen at character creation. Selects the special attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    /// Slow, heavy special shot with short reach.
    #[default]
    Titan,
    /// Fast, light special shot with long reach.
    Phantom,
}

/// Enemy AI state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// No target in range: drones wander, turrets idle.
    #[default]
    Patrol,
    /// Target in range: orient and fire on cooldown.
    Engage,
}

/// Combat session lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Inactive,
    /// Roster and pool are being prepared; waves may be spawned.
    Initializing,
    /// Per-tick update is running.
    Active,
    /// Every enemy is dead; waiting for the mode controller to hand back.
    Complete,
}

/// Top-level game mode owned by the mode controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Free flight in the universe; no combat session.
    #[default]
    Overworld,
    SpaceCombat,
    GroundCombat,
}

/// Attack input identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackButton {
    Basic,
    Special,
}

/// Upgradeable player stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeStat {
    /// +20% projectile power per level.
    Attack,
    /// -5% incoming damage per level.
    Defense,
    /// +10% max energy per level.
    Energy,
    /// +10% max health per level.
    Health,
}

impl UpgradeStat {
    pub const ALL: [UpgradeStat; 4] = [
        UpgradeStat::Attack,
        UpgradeStat::Defense,
        UpgradeStat::Energy,
        UpgradeStat::Health,
    ];
}

/// Which side fired a projectile; selects the roster it can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOrigin {
    Player,
    Enemy,
}

/// Rendering quality tier reported by the performance monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLevel {
    #[default]
    Normal,
    /// Frame times are over budget; far-away AI is throttled harder.
    Degraded,
}

/// Visual style hint passed to the rendering layer with a spawn request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualStyle {
    PlayerBolt,
    HeavyOrb,
    LanceBeam,
    EnemyBolt,
    DroneHull,
    TurretHull,
}

/// Data-driven visual effect kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    HitSpark,
    Explosion,
    MuzzleFlash,
    LevelUp,
}
