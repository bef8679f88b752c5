//! Enemy AI system: evasive manoeuvres and enemy gunfire.
//!
//! Calls the manoeuvre FSM from stardrift-enemy-ai for each enemy ship,
//! then writes the resulting velocity and clamped position back.

use hecs::World;
use rand::Rng;

use stardrift_core::components::Mover;
use stardrift_core::config::EntityTemplate;
use stardrift_core::events::GameEvent;
use stardrift_core::types::{Position, Velocity};

use stardrift_enemy_ai::fsm::{EvasiveManeuver, ManeuverContext};
use stardrift_enemy_ai::weapon::WeaponCadence;

use crate::world_setup;

/// Run the manoeuvre FSM and the guns of every enemy.
#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    enemy_shot: &EntityTemplate,
    now: f64,
    dt: f64,
    speed_scale: f64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    for (_entity, (maneuver, pos, vel, mover)) in world.query_mut::<(
        &mut EvasiveManeuver,
        &mut Position,
        &mut Velocity,
        &Mover,
    )>() {
        let ctx = ManeuverContext {
            position: *pos,
            velocity: *vel,
            forward_speed: mover.speed,
            now,
            dt,
            speed_scale,
        };
        let update = maneuver.evaluate(&ctx, rng);
        if update.phase_changed {
            log::trace!("enemy manoeuvre -> {:?}", maneuver.phase);
        }
        *vel = update.new_velocity;
        *pos = update.new_position;
    }

    // Collect muzzles first; spawning needs the world mutably.
    let mut muzzles: Vec<Position> = Vec::new();
    for (_entity, (cadence, pos)) in world.query_mut::<(&mut WeaponCadence, &Position)>() {
        for _ in 0..cadence.shots_due(now) {
            muzzles.push(pos.offset(cadence.muzzle));
        }
    }

    for position in muzzles {
        world_setup::spawn_template(world, enemy_shot, position, speed_scale, now, rng);
        events.push(GameEvent::Spawned {
            kind: enemy_shot.kind,
            position,
        });
    }
}
