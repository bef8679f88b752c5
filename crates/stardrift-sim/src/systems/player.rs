//! Player ship: steering, weapons and damage.

use hecs::{Entity, World};
use rand::Rng;

use stardrift_core::components::PlayerShip;
use stardrift_core::config::{PlayerConfig, WeaponConfig};
use stardrift_core::constants::INVINCIBLE_TIMER;
use stardrift_core::enums::WeaponSlot;
use stardrift_core::events::GameEvent;
use stardrift_core::types::{Position, Velocity};

use crate::session::PlayerInput;
use crate::timers::TimerRegistry;
use crate::world_setup;

/// Outcome of [`take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible, or no ship to hit.
    Ignored,
    Damaged,
    /// Hit points dropped below zero.
    Destroyed,
}

/// Steer the ship and fire any held weapon that has cooled down.
#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    player: Entity,
    input: &PlayerInput,
    config: &PlayerConfig,
    now: f64,
    speed_scale: f64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let horizontal = input.horizontal.clamp(-1.0, 1.0);
    let vertical = input.vertical.clamp(-1.0, 1.0);
    if let Ok(mut vel) = world.get::<&mut Velocity>(player) {
        *vel = Velocity::new(horizontal, 0.0, vertical).scaled(config.speed);
    }

    let Ok(origin) = world.get::<&Position>(player).map(|p| *p) else {
        return;
    };

    let mut volleys: Vec<(WeaponSlot, &WeaponConfig)> = Vec::new();
    if let Ok(mut ship) = world.get::<&mut PlayerShip>(player) {
        if input.primary && now > ship.primary_next_fire {
            ship.primary_next_fire = now + config.primary.fire_rate;
            volleys.push((WeaponSlot::Primary, &config.primary));
        }
        if input.secondary && now > ship.secondary_next_fire {
            ship.secondary_next_fire = now + config.secondary.fire_rate;
            volleys.push((WeaponSlot::Secondary, &config.secondary));
        }
    }

    for (slot, weapon) in volleys {
        for muzzle in &weapon.muzzles {
            let position = origin.offset(*muzzle);
            world_setup::spawn_template(world, &weapon.shot, position, speed_scale, now, rng);
        }
        events.push(GameEvent::WeaponFired { slot });
    }
}

/// Keep the ship inside its movement area.
pub fn confine(world: &mut World, player: Entity, config: &PlayerConfig) {
    let [x_min, x_max, z_min, z_max] = config.boundary;
    if let Ok(mut pos) = world.get::<&mut Position>(player) {
        pos.x = pos.x.clamp(x_min, x_max);
        pos.y = 0.0;
        pos.z = pos.z.clamp(z_min, z_max);
    }
}

/// Apply `damage` unless the invincibility timer is running.
pub fn take_damage(
    world: &mut World,
    player: Entity,
    damage: f64,
    timers: &TimerRegistry,
    events: &mut Vec<GameEvent>,
) -> DamageOutcome {
    if timers.get_remaining(INVINCIBLE_TIMER) > 0.0 {
        return DamageOutcome::Ignored;
    }
    let Ok(mut ship) = world.get::<&mut PlayerShip>(player) else {
        return DamageOutcome::Ignored;
    };

    ship.hit_points -= damage;
    events.push(GameEvent::PlayerDamaged {
        damage,
        hit_points: ship.hit_points,
    });
    if ship.hit_points < 0.0 {
        DamageOutcome::Destroyed
    } else {
        DamageOutcome::Damaged
    }
}

/// Restore the ship to full hit points.
pub fn repair(world: &mut World, player: Entity) {
    if let Ok(mut ship) = world.get::<&mut PlayerShip>(player) {
        ship.hit_points = ship.max_hit_points;
    }
}
