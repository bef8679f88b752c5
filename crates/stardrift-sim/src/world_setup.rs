//! Entity spawn factories.
//!
//! Turns configuration templates into component bundles. Everything the
//! simulation instantiates goes through here.

use hecs::{Entity, EntityBuilder, World};
use rand::Rng;

use stardrift_core::components::*;
use stardrift_core::config::{EntityTemplate, NukeConfig, PlayerConfig};
use stardrift_core::enums::EntityKind;
use stardrift_core::types::{Position, Velocity};

use stardrift_enemy_ai::fsm::EvasiveManeuver;
use stardrift_enemy_ai::weapon::WeaponCadence;

/// Spawn the player's ship at the origin with full hit points.
pub fn spawn_player(world: &mut World, config: &PlayerConfig) -> Entity {
    world.spawn((
        Kind(EntityKind::Player),
        Position::default(),
        Velocity::default(),
        Collider {
            radius: config.radius,
        },
        PlayerShip {
            hit_points: config.max_hit_points,
            max_hit_points: config.max_hit_points,
            primary_next_fire: 0.0,
            secondary_next_fire: 0.0,
        },
    ))
}

/// Instantiate a template at `position`, flying forward at its speed.
///
/// Movers affected by the world speed start at `speed * speed_scale`.
/// `now` seeds the timing of enemy manoeuvres and guns.
pub fn spawn_template<R: Rng + ?Sized>(
    world: &mut World,
    template: &EntityTemplate,
    position: Position,
    speed_scale: f64,
    now: f64,
    rng: &mut R,
) -> Entity {
    let speed = if template.affected_by_speed_scale {
        template.speed * speed_scale
    } else {
        template.speed
    };

    let mut builder = EntityBuilder::new();
    builder
        .add(Kind(template.kind))
        .add(position)
        .add(Velocity::forward(speed))
        .add(Mover {
            speed,
            affected_by_speed_scale: template.affected_by_speed_scale,
        })
        .add(Collider {
            radius: template.radius,
        });

    if template.kind.is_target() {
        builder.add(GameEntity {
            score_value: template.score_value,
            powerup_drop_chance: template.powerup_drop_chance,
            damage: template.damage,
            dying: false,
        });
    }
    if template.kind.is_powerup() {
        builder.add(PowerupEffect {
            duration: template.duration,
            speed_scale: template.speed_scale,
        });
    }
    if template.kind == EntityKind::PlayerShot {
        builder.add(Shot::default());
    }
    if let Some(profile) = &template.maneuver {
        builder.add(EvasiveManeuver::new(profile.clone(), now, speed_scale, rng));
    }
    if let Some(profile) = &template.weapon {
        builder.add(WeaponCadence::new(profile, now));
    }

    world.spawn(builder.build())
}

/// Spawn an expanding nuke blast centred on `position`.
pub fn spawn_nuke_blast(world: &mut World, position: Position, config: &NukeConfig) -> Entity {
    world.spawn((
        Kind(EntityKind::NukeBlast),
        position,
        Collider { radius: 0.0 },
        Expander {
            rate: config.rate,
            final_radius: config.final_radius,
        },
        Lifetime {
            remaining_secs: config.lifetime_secs,
        },
    ))
}
