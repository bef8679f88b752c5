//! Game configuration.
//!
//! Loaded from JSON. Every section falls back to its defaults, so a file
//! only needs the values it changes. Call [`GameConfig::validate`] before
//! handing a configuration to the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::EntityKind;
use crate::error::ConfigError;

/// Everything a session needs to know about the game rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fade-in duration before play starts (seconds).
    pub fade_in_secs: f64,
    pub wave: WaveConfig,
    pub speed: SpeedConfig,
    pub player: PlayerConfig,
    pub nuke: NukeConfig,
    /// Despawn box: x half-extent, z_min, z_max.
    pub play_boundary: [f64; 3],
    /// Spawned by the wave spawner, chosen by weight.
    pub hazards: Vec<EntityTemplate>,
    /// Dropped by destroyed targets, chosen by weight.
    pub powerups: Vec<EntityTemplate>,
    /// Fired by enemy ships.
    pub enemy_shot: EntityTemplate,
}

/// Wave spawner timing and placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Entities per wave.
    pub count: u32,
    pub per_entity_delay: f64,
    pub pre_wave_delay: f64,
    pub inter_wave_delay: f64,
    /// x half-width, fixed y, fixed z.
    pub spawn_region: [f64; 3],
}

/// World speed ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Ambient increase per second.
    pub ramp_rate: f64,
    pub max_scale: f64,
}

/// Player ship and weapons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_hit_points: f64,
    pub speed: f64,
    pub radius: f64,
    /// x_min, x_max, z_min, z_max.
    pub boundary: [f64; 4],
    pub primary: WeaponConfig,
    pub secondary: WeaponConfig,
}

/// A player weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Minimum seconds between two shots.
    pub fire_rate: f64,
    /// One shot per muzzle, offset from the ship.
    pub muzzles: Vec<[f64; 3]>,
    pub shot: EntityTemplate,
}

/// Nuke blast expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NukeConfig {
    pub rate: f64,
    pub final_radius: f64,
    pub lifetime_secs: f64,
}

/// Spawnable entity description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub name: String,
    pub kind: EntityKind,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub score_value: u32,
    /// Percent chance of dropping a powerup when destroyed.
    #[serde(default)]
    pub powerup_drop_chance: f64,
    /// Forward speed; negative moves down the screen.
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_true")]
    pub affected_by_speed_scale: bool,
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Damage dealt to the player on contact.
    #[serde(default)]
    pub damage: f64,
    /// Powerup effect duration.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Speed scale applied by a time warp.
    #[serde(default = "default_warp_scale")]
    pub speed_scale: f64,
    #[serde(default)]
    pub maneuver: Option<ManeuverProfile>,
    #[serde(default)]
    pub weapon: Option<EnemyWeaponProfile>,
}

/// Evasive manoeuvre tuning. Ranges are `[min, max]` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManeuverProfile {
    /// Maximum lateral dodge speed.
    pub dodge: f64,
    /// How quickly lateral velocity reaches its target.
    pub smoothing: f64,
    pub start_wait: [f64; 2],
    pub maneuver_time: [f64; 2],
    pub maneuver_wait: [f64; 2],
    /// x_min, x_max, z_min, z_max.
    pub boundary: [f64; 4],
}

/// Fixed-cadence enemy gun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyWeaponProfile {
    /// Seconds before the first shot.
    pub delay: f64,
    /// Seconds between shots.
    pub fire_rate: f64,
    /// Muzzle offset from the ship.
    pub muzzle: [f64; 3],
}

fn default_weight() -> u32 {
    DEFAULT_WEIGHT
}

fn default_speed() -> f64 {
    HAZARD_SPEED
}

fn default_true() -> bool {
    true
}

fn default_radius() -> f64 {
    HAZARD_RADIUS
}

fn default_duration() -> f64 {
    POWERUP_DURATION
}

fn default_warp_scale() -> f64 {
    TIME_WARP_SCALE
}

impl EntityTemplate {
    /// Template with defaults for everything but name and kind.
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            weight: DEFAULT_WEIGHT,
            score_value: 0,
            powerup_drop_chance: 0.0,
            speed: HAZARD_SPEED,
            affected_by_speed_scale: true,
            radius: if kind.is_powerup() {
                POWERUP_RADIUS
            } else {
                HAZARD_RADIUS
            },
            damage: 0.0,
            duration: POWERUP_DURATION,
            speed_scale: TIME_WARP_SCALE,
            maneuver: None,
            weapon: None,
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_score(mut self, score_value: u32, powerup_drop_chance: f64) -> Self {
        self.score_value = score_value;
        self.powerup_drop_chance = powerup_drop_chance;
        self
    }

    pub fn with_damage(mut self, damage: f64) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_motion(mut self, speed: f64, affected_by_speed_scale: bool) -> Self {
        self.speed = speed;
        self.affected_by_speed_scale = affected_by_speed_scale;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fade_in_secs: FADE_IN_SECS,
            wave: WaveConfig::default(),
            speed: SpeedConfig::default(),
            player: PlayerConfig::default(),
            nuke: NukeConfig::default(),
            play_boundary: PLAY_BOUNDARY,
            hazards: vec![
                EntityTemplate::new("Asteroid Small", EntityKind::Asteroid)
                    .with_score(10, 5.0)
                    .with_damage(25.0),
                EntityTemplate::new("Asteroid Large", EntityKind::Asteroid)
                    .with_weight(60)
                    .with_score(20, 10.0)
                    .with_damage(40.0)
                    .with_radius(0.9)
                    .with_motion(-4.0, true),
                EntityTemplate {
                    maneuver: Some(ManeuverProfile::default()),
                    weapon: Some(EnemyWeaponProfile::default()),
                    ..EntityTemplate::new("Enemy Ship", EntityKind::EnemyShip)
                        .with_weight(40)
                        .with_score(40, 20.0)
                        .with_damage(50.0)
                },
            ],
            powerups: vec![
                EntityTemplate::new("Ship Repair", EntityKind::ShipRepair),
                EntityTemplate::new("Invincibility", EntityKind::Invincibility),
                EntityTemplate::new("Time Warp", EntityKind::TimeWarp),
                EntityTemplate::new("Nuke", EntityKind::Nuke).with_weight(50),
            ],
            enemy_shot: EntityTemplate::new("Enemy Bolt", EntityKind::EnemyShot)
                .with_damage(10.0)
                .with_motion(ENEMY_SHOT_SPEED, false)
                .with_radius(SHOT_RADIUS),
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            count: HAZARD_COUNT,
            per_entity_delay: SPAWN_WAIT,
            pre_wave_delay: START_WAIT,
            inter_wave_delay: WAVE_WAIT,
            spawn_region: SPAWN_REGION,
        }
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            ramp_rate: SPEEDUP_RATE,
            max_scale: MAX_SPEED_SCALE,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let bolt = EntityTemplate::new("Bolt", EntityKind::PlayerShot)
            .with_motion(PLAYER_SHOT_SPEED, false)
            .with_radius(SHOT_RADIUS);
        let heavy_bolt = EntityTemplate::new("Heavy Bolt", EntityKind::PlayerShot)
            .with_motion(PLAYER_SHOT_SPEED * 0.75, false)
            .with_radius(SHOT_RADIUS * 2.0);
        Self {
            max_hit_points: PLAYER_MAX_HIT_POINTS,
            speed: PLAYER_SPEED,
            radius: PLAYER_RADIUS,
            boundary: PLAYER_BOUNDARY,
            primary: WeaponConfig {
                fire_rate: PLAYER_PRIMARY_FIRE_RATE,
                muzzles: vec![MUZZLE_OFFSET],
                shot: bolt,
            },
            secondary: WeaponConfig {
                fire_rate: PLAYER_SECONDARY_FIRE_RATE,
                muzzles: vec![
                    [-0.5, MUZZLE_OFFSET[1], MUZZLE_OFFSET[2]],
                    [0.5, MUZZLE_OFFSET[1], MUZZLE_OFFSET[2]],
                ],
                shot: heavy_bolt,
            },
        }
    }
}

impl Default for NukeConfig {
    fn default() -> Self {
        Self {
            rate: NUKE_EXPAND_RATE,
            final_radius: NUKE_FINAL_RADIUS,
            lifetime_secs: NUKE_LIFETIME_SECS,
        }
    }
}

impl Default for ManeuverProfile {
    fn default() -> Self {
        Self {
            dodge: 5.0,
            smoothing: 7.5,
            start_wait: [0.5, 1.0],
            maneuver_time: [1.0, 2.0],
            maneuver_wait: [1.0, 2.0],
            boundary: [-6.0, 6.0, -20.0, 20.0],
        }
    }
}

impl Default for EnemyWeaponProfile {
    fn default() -> Self {
        Self {
            delay: 0.5,
            fire_rate: 1.5,
            muzzle: [0.0, 0.0, -1.0],
        }
    }
}

impl GameConfig {
    /// Parse a configuration document. Does not validate.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fade_in_secs", self.fade_in_secs)?;

        non_negative("wave.per_entity_delay", self.wave.per_entity_delay)?;
        non_negative("wave.pre_wave_delay", self.wave.pre_wave_delay)?;
        non_negative("wave.inter_wave_delay", self.wave.inter_wave_delay)?;
        non_negative("wave.spawn_region[0]", self.wave.spawn_region[0])?;

        non_negative("speed.ramp_rate", self.speed.ramp_rate)?;
        positive("speed.max_scale", self.speed.max_scale)?;

        positive("player.max_hit_points", self.player.max_hit_points)?;
        positive("player.speed", self.player.speed)?;
        positive("player.radius", self.player.radius)?;
        ordered("player.boundary x", self.player.boundary[0], self.player.boundary[1])?;
        ordered("player.boundary z", self.player.boundary[2], self.player.boundary[3])?;
        for (field, weapon) in [
            ("player.primary.fire_rate", &self.player.primary),
            ("player.secondary.fire_rate", &self.player.secondary),
        ] {
            positive(field, weapon.fire_rate)?;
            check_template(&weapon.shot, "shot", |k| k == EntityKind::PlayerShot)?;
        }

        positive("nuke.rate", self.nuke.rate)?;
        positive("nuke.final_radius", self.nuke.final_radius)?;
        positive("nuke.lifetime_secs", self.nuke.lifetime_secs)?;

        ordered(
            "play_boundary z",
            self.play_boundary[1],
            self.play_boundary[2],
        )?;

        if self.hazards.is_empty() {
            return Err(ConfigError::NoHazards);
        }
        for template in &self.hazards {
            check_template(template, "hazard", |k| k.is_target() && !k.is_powerup())?;
        }
        check_weights(&self.hazards, "hazard")?;

        for template in &self.powerups {
            check_template(template, "powerup", EntityKind::is_powerup)?;
        }
        if !self.powerups.is_empty() {
            check_weights(&self.powerups, "powerup")?;
        }

        check_template(&self.enemy_shot, "enemy shot", |k| k == EntityKind::EnemyShot)?;

        Ok(())
    }
}

fn check_template(
    template: &EntityTemplate,
    list: &'static str,
    allowed: impl Fn(EntityKind) -> bool,
) -> Result<(), ConfigError> {
    if !allowed(template.kind) {
        return Err(ConfigError::WrongKind {
            name: template.name.clone(),
            kind: format!("{:?}", template.kind),
            list,
        });
    }
    if !(0.0..=100.0).contains(&template.powerup_drop_chance) {
        return Err(ConfigError::DropChance {
            name: template.name.clone(),
            chance: template.powerup_drop_chance,
        });
    }
    positive("template radius", template.radius)?;
    if let Some(maneuver) = &template.maneuver {
        ordered("maneuver.start_wait", maneuver.start_wait[0], maneuver.start_wait[1])?;
        ordered(
            "maneuver.maneuver_time",
            maneuver.maneuver_time[0],
            maneuver.maneuver_time[1],
        )?;
        ordered(
            "maneuver.maneuver_wait",
            maneuver.maneuver_wait[0],
            maneuver.maneuver_wait[1],
        )?;
        ordered("maneuver.boundary x", maneuver.boundary[0], maneuver.boundary[1])?;
        ordered("maneuver.boundary z", maneuver.boundary[2], maneuver.boundary[3])?;
    }
    if let Some(weapon) = &template.weapon {
        non_negative("weapon.delay", weapon.delay)?;
        positive("weapon.fire_rate", weapon.fire_rate)?;
    }
    Ok(())
}

fn check_weights(templates: &[EntityTemplate], list: &'static str) -> Result<(), ConfigError> {
    let sum: u64 = templates.iter().map(|t| u64::from(t.weight)).sum();
    if sum == 0 {
        return Err(ConfigError::ZeroWeightSum { list });
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn ordered(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::Inverted { field, min, max })
    }
}
