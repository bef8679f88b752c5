//! Game state snapshot: the complete visible state published each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub state: GameState,
    /// Current world speed scale.
    pub speed_scale: f64,
    /// 0 = fully visible, 1 = black.
    pub screen_fade: f64,
    pub player: Option<PlayerView>,
    pub entities: Vec<EntityView>,
    pub score: ScoreView,
    pub events: Vec<GameEvent>,
}

/// Player ship status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub hit_points: f64,
    pub max_hit_points: f64,
    /// Seconds of invincibility left; drives the force-field effect.
    pub invincible_secs: f64,
}

/// Any non-player entity on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u64,
    pub kind: EntityKind,
    pub position: Position,
    pub radius: f64,
}

/// Running score for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub high_score: u32,
    pub waves_started: u32,
    pub hazards_destroyed: u32,
    pub powerups_collected: u32,
}
