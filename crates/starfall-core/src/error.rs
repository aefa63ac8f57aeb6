//! Error taxonomy for the combat core.
//!
//! Only configuration problems are fatal. Per-tick faults are logged and
//! skipped, energy shortfalls are `None` results, and pool exhaustion is
//! resolved by recycling rather than reported.

use thiserror::Error;

use crate::enums::{SessionPhase, UpgradeStat};

/// Fatal setup problems. The session refuses to activate.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("projectile pool capacity must be at least 1")]
    ZeroPoolCapacity,
    #[error("player actor is missing or already dead at session initialize")]
    MissingPlayer,
    #[error("cannot {action} a combat session in phase {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: SessionPhase,
    },
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Recoverable faults met while running a tick.
#[derive(Debug, Error)]
pub enum TickFault {
    /// A hit test reached an actor whose visual was already torn down.
    #[error("enemy {enemy_id} has no live visual; skipped this tick")]
    MissingTarget { enemy_id: u32 },
    /// A roster entry no longer resolves to a world entity.
    #[error("roster entry {index} refers to a despawned actor")]
    MissingActor { index: usize },
}

/// Reasons an upgrade purchase is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpgradeError {
    #[error("{stat:?} is already at max level")]
    MaxLevel { stat: UpgradeStat },
    #[error("upgrade costs {cost} but only {available} currency is available")]
    InsufficientCurrency { cost: u32, available: u32 },
}
