//! Kinematic integration and world speed rescaling.
//!
//! Updates Position from Velocity each step: position += velocity * dt.

use hecs::World;

use stardrift_core::components::Mover;
use stardrift_core::types::{Position, Velocity};

use crate::world_speed::SpeedListener;

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        pos.z += vel.z * dt;
    }
}

/// Every live mover in a world, as a world speed listener.
///
/// Movers that opted out of the speed scale are left alone.
pub struct Movers<'w>(pub &'w mut World);

impl SpeedListener for Movers<'_> {
    fn update_velocity(&mut self, scale: f64) {
        for (_entity, (mover, vel)) in self.0.query_mut::<(&mut Mover, &mut Velocity)>() {
            if !mover.affected_by_speed_scale {
                continue;
            }
            mover.speed *= scale;
            *vel = vel.scaled(scale);
        }
    }

    fn reset_velocity(&mut self, scale: f64) {
        // A zero scale has already erased the original speed.
        if scale == 0.0 {
            return;
        }
        for (_entity, (mover, vel)) in self.0.query_mut::<(&mut Mover, &mut Velocity)>() {
            if !mover.affected_by_speed_scale {
                continue;
            }
            mover.speed /= scale;
            *vel = vel.scaled(1.0 / scale);
        }
    }
}
