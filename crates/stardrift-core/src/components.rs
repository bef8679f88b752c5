//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;

/// Entity kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kind(pub EntityKind);

/// Forward mover. `speed` is the cached, already scaled forward speed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mover {
    pub speed: f64,
    /// Whether world speed changes rescale this mover.
    pub affected_by_speed_scale: bool,
}

/// Sphere collider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
}

/// Something that can be destroyed for points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameEntity {
    pub score_value: u32,
    /// Percent chance of leaving a powerup behind.
    pub powerup_drop_chance: f64,
    /// Damage dealt to the player on contact.
    pub damage: f64,
    /// Set once destruction has been reported; blocks double scoring.
    pub dying: bool,
}

/// Parameters of a powerup's effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerupEffect {
    pub duration: f64,
    pub speed_scale: f64,
}

/// The player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip {
    pub hit_points: f64,
    pub max_hit_points: f64,
    /// Session clock after which the primary weapon may fire again.
    pub primary_next_fire: f64,
    pub secondary_next_fire: f64,
}

/// A player shot; consumed by its first hit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Shot {
    pub spent: bool,
}

/// Grows the collider radius toward a final size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Expander {
    pub rate: f64,
    pub final_radius: f64,
}

/// Despawns the entity when it runs out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining_secs: f64,
}
