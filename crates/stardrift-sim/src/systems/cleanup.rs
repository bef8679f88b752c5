//! Cleanup system: removes entities that are out of bounds, expired or destroyed.

use hecs::{Entity, World};

use stardrift_core::components::{GameEntity, Kind, Lifetime, Shot};
use stardrift_core::enums::EntityKind;
use stardrift_core::types::Position;

/// Count down lifetimes.
pub fn tick_lifetimes(world: &mut World, dt: f64) {
    for (_entity, lifetime) in world.query_mut::<&mut Lifetime>() {
        lifetime.remaining_secs -= dt;
    }
}

/// Despawn dead entities and anything that left the play area.
/// `boundary` is x half-extent, z_min, z_max. The player is never removed here.
/// Uses a pre-allocated buffer to avoid per-step allocation.
pub fn run(world: &mut World, boundary: [f64; 3], despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let [half_x, z_min, z_max] = boundary;

    // Leaving the play area scores nothing.
    for (entity, (kind, pos)) in world.query_mut::<(&Kind, &Position)>() {
        if kind.0 == EntityKind::Player {
            continue;
        }
        if pos.x.abs() > half_x || pos.z < z_min || pos.z > z_max {
            despawn_buffer.push(entity);
        }
    }

    for (entity, game_entity) in world.query_mut::<&GameEntity>() {
        if game_entity.dying {
            despawn_buffer.push(entity);
        }
    }

    for (entity, shot) in world.query_mut::<&Shot>() {
        if shot.spent {
            despawn_buffer.push(entity);
        }
    }

    for (entity, lifetime) in world.query_mut::<&Lifetime>() {
        if lifetime.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    // An entity may be queued twice; the second despawn is a no-op.
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
