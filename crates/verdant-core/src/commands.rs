//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and applied at the next tick boundary. Invalid
//! actions are rejected without any state change.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Level flow ---
    /// Set up a level from the catalog and start playing it.
    StartLevel { level_id: u32 },
    /// Tear down and set up the current level again.
    RestartLevel,
    /// Abandon the current level.
    ReturnToMenu,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,

    // --- Lawn actions ---
    /// Plant a defender in a grid cell.
    PlaceDefender {
        kind: DefenderKind,
        row: usize,
        col: i32,
    },
    /// Pick up a resource pickup by entity id (as exposed in the snapshot).
    CollectResource { entity: u64 },
    /// Dig up the defender in a grid cell. Free of charge.
    RemoveDefender { row: usize, col: i32 },
}
