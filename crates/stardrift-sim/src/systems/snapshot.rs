//! Snapshot system: queries the session and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use stardrift_core::components::{Collider, Kind, PlayerShip};
use stardrift_core::constants::INVINCIBLE_TIMER;
use stardrift_core::enums::EntityKind;
use stardrift_core::events::GameEvent;
use stardrift_core::state::*;
use stardrift_core::types::Position;

use crate::session::Session;

/// Build a complete GameStateSnapshot from the current session.
pub fn build_snapshot(
    session: &Session,
    fade_in_secs: f64,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: session.time,
        state: session.state,
        speed_scale: session.speed.get_scale(),
        screen_fade: session.screen_fade(fade_in_secs),
        player: build_player(session),
        entities: build_entities(&session.world),
        score: ScoreView {
            score: session.score.score,
            high_score: session.score.high_score,
            waves_started: session.spawner.wave(),
            hazards_destroyed: session.score.hazards_destroyed,
            powerups_collected: session.score.powerups_collected,
        },
        events,
    }
}

fn build_player(session: &Session) -> Option<PlayerView> {
    let entity = session.player?;
    let mut query = session
        .world
        .query_one::<(&Position, &PlayerShip)>(entity)
        .ok()?;
    let (pos, ship) = query.get()?;
    Some(PlayerView {
        position: *pos,
        hit_points: ship.hit_points,
        max_hit_points: ship.max_hit_points,
        invincible_secs: session.timers.get_remaining(INVINCIBLE_TIMER).max(0.0),
    })
}

/// Every entity except the player, sorted by id.
fn build_entities(world: &World) -> Vec<EntityView> {
    let mut entities: Vec<EntityView> = world
        .query::<(&Kind, &Position, &Collider)>()
        .iter()
        .filter(|(_, (kind, _, _))| kind.0 != EntityKind::Player)
        .map(|(entity, (kind, pos, collider))| EntityView {
            id: entity.to_bits().get(),
            kind: kind.0,
            position: *pos,
            radius: collider.radius,
        })
        .collect();
    entities.sort_by_key(|e| e.id);
    entities
}
