//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and applied at the next tick boundary. A command
//! that makes no sense in the current game state is dropped.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Ship control ---
    /// Movement axes, each in [-1, 1].
    Steer { horizontal: f64, vertical: f64 },
    /// Hold or release the weapons.
    SetFire { primary: bool, secondary: bool },

    // --- Session control ---
    /// Pause the game (Playing only).
    Pause,
    /// Resume from pause.
    Resume,
    /// Leave a paused game for the main menu.
    Quit,
    /// Start a fresh session after game over.
    Restart,
}
