//! Commands sent from the input layer to the game loop.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player and mode actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModeCommand {
    // --- Mode control ---
    /// Start a space combat session around `origin`.
    EnterSpaceCombat { origin: Vec3 },
    /// Land and start a ground combat session on seeded terrain.
    EnterGroundCombat { origin: Vec3, terrain_seed: u64 },
    /// Leave the combat area (deactivates the session).
    LeaveCombat,

    // --- Player ---
    Attack {
        button: AttackButton,
        direction: Vec3,
    },
    PurchaseUpgrade { stat: UpgradeStat },
    /// Position written by the movement/controls collaborator.
    SetPlayerPosition { position: Vec3 },

    // --- Simulation control ---
    Pause,
    Resume,
}
