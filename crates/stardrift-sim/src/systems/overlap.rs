//! Overlap resolution.
//!
//! Pairs every live target (hazard, enemy, enemy shot or powerup) with the
//! colliders touching it (player, player shots, nuke blasts). The target's
//! kind picks a handler from a lookup table; the handler's effect is
//! applied, then the target is destroyed for its points and may drop a
//! powerup. A target is destroyed at most once, however many colliders
//! touch it in the same step.

use hecs::{Entity, World};
use rand::Rng;

use stardrift_core::components::{Collider, GameEntity, Kind, PowerupEffect, Shot};
use stardrift_core::config::GameConfig;
use stardrift_core::constants::INVINCIBLE_TIMER;
use stardrift_core::enums::EntityKind;
use stardrift_core::events::GameEvent;
use stardrift_core::types::Position;

use crate::session::Session;
use crate::systems::movement::Movers;
use crate::systems::player::{self, DamageOutcome};
use crate::world_setup;

/// One target touching one collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub target_kind: EntityKind,
    pub collider_kind: EntityKind,
    pub target_position: Position,
    pub collider_position: Position,
    /// Contact damage of the target.
    pub damage: f64,
    pub powerup: Option<PowerupEffect>,
}

/// Side effect of an overlap, on top of the target's destruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlapEffect {
    DamagePlayer(f64),
    RepairPlayer,
    Invincible { seconds: f64 },
    WarpWorldSpeed { scale: f64, duration: f64 },
    NukeAt(Position),
}

pub type OverlapHandler = fn(&Overlap) -> Option<OverlapEffect>;

/// Indexed by [`EntityKind::index`].
const HANDLERS: [OverlapHandler; EntityKind::COUNT] = [
    no_effect,     // Player
    no_effect,     // PlayerShot
    no_effect,     // NukeBlast
    damage_player, // Asteroid
    damage_player, // EnemyShip
    damage_player, // EnemyShot
    ship_repair,   // ShipRepair
    invincibility, // Invincibility
    time_warp,     // TimeWarp
    nuke,          // Nuke
];

pub fn handler_for(kind: EntityKind) -> OverlapHandler {
    HANDLERS[kind.index()]
}

fn no_effect(_: &Overlap) -> Option<OverlapEffect> {
    None
}

fn damage_player(overlap: &Overlap) -> Option<OverlapEffect> {
    (overlap.collider_kind == EntityKind::Player).then_some(OverlapEffect::DamagePlayer(overlap.damage))
}

fn ship_repair(overlap: &Overlap) -> Option<OverlapEffect> {
    (overlap.collider_kind == EntityKind::Player).then_some(OverlapEffect::RepairPlayer)
}

fn invincibility(overlap: &Overlap) -> Option<OverlapEffect> {
    let effect = overlap.powerup?;
    (overlap.collider_kind == EntityKind::Player).then_some(OverlapEffect::Invincible {
        seconds: effect.duration,
    })
}

fn time_warp(overlap: &Overlap) -> Option<OverlapEffect> {
    let effect = overlap.powerup?;
    (overlap.collider_kind == EntityKind::Player).then_some(OverlapEffect::WarpWorldSpeed {
        scale: effect.speed_scale,
        duration: effect.duration,
    })
}

fn nuke(overlap: &Overlap) -> Option<OverlapEffect> {
    (overlap.collider_kind == EntityKind::Player).then_some(OverlapEffect::NukeAt(overlap.collider_position))
}

struct Body {
    entity: Entity,
    kind: EntityKind,
    position: Position,
    radius: f64,
}

/// Resolve all overlaps of this step. Returns true when the player ship
/// was destroyed.
pub fn run<R: Rng + ?Sized>(session: &mut Session, config: &GameConfig, rng: &mut R) -> bool {
    let colliders: Vec<Body> = session
        .world
        .query::<(&Kind, &Position, &Collider)>()
        .iter()
        .filter(|(_, (kind, _, _))| kind.0.is_collider())
        .map(|(entity, (kind, pos, collider))| Body {
            entity,
            kind: kind.0,
            position: *pos,
            radius: collider.radius,
        })
        .collect();

    let targets: Vec<(Body, GameEntity, Option<PowerupEffect>)> = session
        .world
        .query::<(&Kind, &Position, &Collider, &GameEntity, Option<&PowerupEffect>)>()
        .iter()
        .filter(|(_, (_, _, _, game_entity, _))| !game_entity.dying)
        .map(|(entity, (kind, pos, collider, game_entity, powerup))| {
            let body = Body {
                entity,
                kind: kind.0,
                position: *pos,
                radius: collider.radius,
            };
            (body, *game_entity, powerup.copied())
        })
        .collect();

    let mut player_destroyed = false;

    for (target, game_entity, powerup) in &targets {
        let Some(collider) = colliders
            .iter()
            .find(|c| touching(&session.world, target, c))
        else {
            continue;
        };

        let overlap = Overlap {
            target_kind: target.kind,
            collider_kind: collider.kind,
            target_position: target.position,
            collider_position: collider.position,
            damage: game_entity.damage,
            powerup: *powerup,
        };
        if let Some(effect) = handler_for(target.kind)(&overlap) {
            player_destroyed |= apply_effect(session, config, effect);
        }

        if collider.kind == EntityKind::PlayerShot {
            if let Ok(mut shot) = session.world.get::<&mut Shot>(collider.entity) {
                shot.spent = true;
            }
        }
        if target.kind.is_powerup() && collider.kind == EntityKind::Player {
            session.score.powerups_collected += 1;
            session.events.push(GameEvent::PowerupCollected { kind: target.kind });
        }

        destroy(session, config, target, game_entity, rng);
    }

    player_destroyed
}

/// Within reach, and the collider is still able to hit something.
fn touching(world: &World, target: &Body, collider: &Body) -> bool {
    if target.position.distance_to(&collider.position) > target.radius + collider.radius {
        return false;
    }
    if !world.contains(collider.entity) {
        return false;
    }
    match world.get::<&Shot>(collider.entity) {
        Ok(shot) => !shot.spent,
        Err(_) => true,
    }
}

/// Apply one effect. Returns true when it destroyed the player ship.
fn apply_effect(session: &mut Session, config: &GameConfig, effect: OverlapEffect) -> bool {
    let Some(ship) = session.player else {
        return false;
    };

    match effect {
        OverlapEffect::DamagePlayer(damage) => {
            let outcome = player::take_damage(
                &mut session.world,
                ship,
                damage,
                &session.timers,
                &mut session.events,
            );
            if outcome == DamageOutcome::Destroyed {
                log::info!("player ship destroyed at t={:.2}", session.now());
                let _ = session.world.despawn(ship);
                session.player = None;
                session.events.push(GameEvent::PlayerDestroyed);
                return true;
            }
        }
        OverlapEffect::RepairPlayer => player::repair(&mut session.world, ship),
        OverlapEffect::Invincible { seconds } => {
            session.timers.set_time(INVINCIBLE_TIMER, seconds);
        }
        OverlapEffect::WarpWorldSpeed { scale, duration } => {
            session.speed.set_scale(
                scale,
                duration,
                &mut session.timers,
                &mut Movers(&mut session.world),
            );
            log::debug!("world speed overridden to {scale} for {duration}s");
            session
                .events
                .push(GameEvent::WorldSpeedChanged { scale, duration });
        }
        OverlapEffect::NukeAt(position) => {
            world_setup::spawn_nuke_blast(&mut session.world, position, &config.nuke);
            session.events.push(GameEvent::Spawned {
                kind: EntityKind::NukeBlast,
                position,
            });
        }
    }
    false
}

/// Mark the target dying, award its points and roll for a powerup drop.
fn destroy<R: Rng + ?Sized>(
    session: &mut Session,
    config: &GameConfig,
    target: &Body,
    game_entity: &GameEntity,
    rng: &mut R,
) {
    match session.world.get::<&mut GameEntity>(target.entity) {
        Ok(mut live) if !live.dying => live.dying = true,
        _ => return,
    }

    session.score.score = session.score.score.saturating_add(game_entity.score_value);
    if !target.kind.is_powerup() {
        session.score.hazards_destroyed += 1;
    }
    session.events.push(GameEvent::Destroyed {
        kind: target.kind,
        points: game_entity.score_value,
    });

    let roll: f64 = rng.gen_range(0.0..100.0);
    if roll >= game_entity.powerup_drop_chance || session.powerup_table.is_empty() {
        return;
    }
    let index = session.powerup_table.select(rng);
    let Some(template) = config.powerups.get(index) else {
        return;
    };
    let now = session.now();
    let scale = session.speed.get_scale();
    world_setup::spawn_template(&mut session.world, template, target.position, scale, now, rng);
    log::debug!("{} dropped at x={:.2}", template.name, target.position.x);
    session.events.push(GameEvent::Spawned {
        kind: template.kind,
        position: target.position,
    });
}
