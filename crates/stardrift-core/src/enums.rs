//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Fading in; nothing moves yet.
    #[default]
    GetReady,
    Playing,
    /// Time multiplier is zero; input is still handled.
    Paused,
    /// Terminal until a restart rebuilds the session.
    GameOver,
}

/// What an entity is. Selects its overlap handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    PlayerShot,
    NukeBlast,
    Asteroid,
    EnemyShip,
    EnemyShot,
    /// Powerup: restores the player's hit points.
    ShipRepair,
    /// Powerup: arms the invincibility timer.
    Invincibility,
    /// Powerup: temporarily overrides the world speed scale.
    TimeWarp,
    /// Powerup: detonates a nuke blast at the player.
    Nuke,
}

impl EntityKind {
    /// Number of variants; size of per-kind lookup tables.
    pub const COUNT: usize = 10;

    /// Dense index for per-kind lookup tables.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_powerup(self) -> bool {
        matches!(
            self,
            EntityKind::ShipRepair | EntityKind::Invincibility | EntityKind::TimeWarp | EntityKind::Nuke
        )
    }

    /// Things that can be hit: hazards, enemies, enemy fire and powerups.
    pub fn is_target(self) -> bool {
        self.is_powerup()
            || matches!(
                self,
                EntityKind::Asteroid | EntityKind::EnemyShip | EntityKind::EnemyShot
            )
    }

    /// Things that hit targets.
    pub fn is_collider(self) -> bool {
        matches!(
            self,
            EntityKind::Player | EntityKind::PlayerShot | EntityKind::NukeBlast
        )
    }
}

/// Which player weapon fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponSlot {
    Primary,
    Secondary,
}
