//! State shared between the game loop thread and its controller.

use std::sync::{Arc, Mutex};

use stardrift_core::commands::PlayerCommand;
use stardrift_core::state::GameStateSnapshot;

/// Commands sent from the controller to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after each tick and polled
/// by the controller. `None` until the first tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}
