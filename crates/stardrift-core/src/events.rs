//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Feedback events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Game state transition.
    StateChanged { from: GameState, to: GameState },
    /// A new wave began spawning.
    WaveStarted { wave: u32 },
    /// An entity was instantiated.
    Spawned { kind: EntityKind, position: Position },
    /// A player weapon fired.
    WeaponFired { slot: WeaponSlot },
    /// A target was destroyed and its points awarded.
    Destroyed { kind: EntityKind, points: u32 },
    /// The player took damage.
    PlayerDamaged { damage: f64, hit_points: f64 },
    /// The player ship was destroyed.
    PlayerDestroyed,
    /// The player picked up a powerup.
    PowerupCollected { kind: EntityKind },
    /// The world speed scale was overridden.
    WorldSpeedChanged { scale: f64, duration: f64 },
    /// A world speed override expired.
    WorldSpeedRestored { scale: f64 },
    /// The stored high score was beaten.
    NewHighScore { score: u32 },
    /// The player quit to the main menu.
    QuitToMenu,
}
