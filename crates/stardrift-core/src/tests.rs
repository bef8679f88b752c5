use crate::commands::PlayerCommand;
use crate::config::*;
use crate::enums::*;
use crate::error::ConfigError;
use crate::events::GameEvent;
use crate::state::GameStateSnapshot;
use crate::types::{Position, SimTime, Velocity};

// ---- Wire formats ----

#[test]
fn test_game_state_serde() {
    let variants = vec![
        GameState::GetReady,
        GameState::Playing,
        GameState::Paused,
        GameState::GameOver,
    ];
    for v in variants {
        let json = serde_json::to_string(&v).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}

#[test]
fn test_player_command_tagged_json() {
    let cmd: PlayerCommand =
        serde_json::from_str(r#"{"type":"Steer","horizontal":-1.0,"vertical":0.5}"#).unwrap();
    assert_eq!(
        cmd,
        PlayerCommand::Steer {
            horizontal: -1.0,
            vertical: 0.5
        }
    );

    let json = serde_json::to_string(&PlayerCommand::Pause).unwrap();
    assert_eq!(json, r#"{"type":"Pause"}"#);
}

#[test]
fn test_event_serializes_with_tag() {
    let event = GameEvent::StateChanged {
        from: GameState::Playing,
        to: GameState::Paused,
    };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["type"], "StateChanged");
    assert_eq!(value["to"], "Paused");
}

#[test]
fn test_default_snapshot_serializes() {
    let snap = GameStateSnapshot::default();
    let json = serde_json::to_string(&snap).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.state, GameState::GetReady);
    assert!(back.player.is_none());
}

// ---- Entity kinds ----

#[test]
fn test_entity_kind_indices_are_dense() {
    let all = [
        EntityKind::Player,
        EntityKind::PlayerShot,
        EntityKind::NukeBlast,
        EntityKind::Asteroid,
        EntityKind::EnemyShip,
        EntityKind::EnemyShot,
        EntityKind::ShipRepair,
        EntityKind::Invincibility,
        EntityKind::TimeWarp,
        EntityKind::Nuke,
    ];
    assert_eq!(all.len(), EntityKind::COUNT);
    for (i, kind) in all.iter().enumerate() {
        assert_eq!(kind.index(), i);
    }
}

#[test]
fn test_entity_kind_roles() {
    assert!(EntityKind::Player.is_collider());
    assert!(!EntityKind::Player.is_target());
    assert!(EntityKind::Asteroid.is_target());
    assert!(EntityKind::TimeWarp.is_target());
    assert!(EntityKind::TimeWarp.is_powerup());
    assert!(!EntityKind::EnemyShot.is_powerup());
    assert!(EntityKind::NukeBlast.is_collider());
}

// ---- Types ----

#[test]
fn test_position_distance_and_offset() {
    let a = Position::new(0.0, 0.0, 0.0);
    let b = Position::new(3.0, 0.0, 4.0);
    assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);

    let c = a.offset([1.0, 0.0, -2.0]);
    assert_eq!(c, Position::new(1.0, 0.0, -2.0));
}

#[test]
fn test_velocity_forward_and_scale() {
    let v = Velocity::forward(-5.0);
    assert_eq!(v, Velocity::new(0.0, 0.0, -5.0));
    assert!((v.speed() - 5.0).abs() < 1e-10);
    assert_eq!(v.scaled(0.5), Velocity::new(0.0, 0.0, -2.5));
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..60 {
        time.advance(crate::constants::DT);
    }
    assert_eq!(time.tick, 60);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-9);

    // Paused steps count ticks but not seconds
    time.advance(0.0);
    assert_eq!(time.tick, 61);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
}

// ---- Configuration ----

#[test]
fn test_default_config_is_valid() {
    GameConfig::default().validate().unwrap();
}

#[test]
fn test_partial_config_uses_defaults() {
    let config = GameConfig::from_json_str(r#"{"wave": {"count": 3}}"#).unwrap();
    assert_eq!(config.wave.count, 3);
    assert_eq!(config.wave.inter_wave_delay, crate::constants::WAVE_WAIT);
    assert_eq!(config.hazards.len(), GameConfig::default().hazards.len());
    config.validate().unwrap();
}

#[test]
fn test_template_defaults_from_json() {
    let config = GameConfig::from_json_str(
        r#"{"hazards": [{"name": "Rock", "kind": "Asteroid", "score_value": 5}]}"#,
    )
    .unwrap();
    let rock = &config.hazards[0];
    assert_eq!(rock.weight, crate::constants::DEFAULT_WEIGHT);
    assert_eq!(rock.score_value, 5);
    assert!(rock.affected_by_speed_scale);
    assert!(rock.maneuver.is_none());
}

#[test]
fn test_config_round_trip() {
    let config = GameConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back = GameConfig::from_json_str(&json).unwrap();
    assert_eq!(config, back);
}

#[test]
fn test_malformed_config_is_parse_error() {
    let err = GameConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_validation_rejects_empty_hazards() {
    let config = GameConfig {
        hazards: Vec::new(),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::NoHazards)));
}

#[test]
fn test_validation_rejects_zero_weights() {
    let mut config = GameConfig::default();
    for hazard in &mut config.hazards {
        hazard.weight = 0;
    }
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroWeightSum { list: "hazard" })
    ));
}

#[test]
fn test_validation_allows_empty_powerups() {
    let config = GameConfig {
        powerups: Vec::new(),
        ..Default::default()
    };
    config.validate().unwrap();
}

#[test]
fn test_validation_rejects_powerup_in_hazard_list() {
    let mut config = GameConfig::default();
    config
        .hazards
        .push(EntityTemplate::new("Sneaky Repair", EntityKind::ShipRepair));
    assert!(matches!(
        config.validate(),
        Err(ConfigError::WrongKind { list: "hazard", .. })
    ));
}

#[test]
fn test_validation_rejects_bad_drop_chance() {
    let mut config = GameConfig::default();
    config.hazards[0].powerup_drop_chance = 150.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::DropChance { .. })
    ));
}

#[test]
fn test_validation_rejects_inverted_boundary() {
    let mut config = GameConfig::default();
    config.player.boundary = [6.0, -6.0, -4.0, 8.0];
    assert!(matches!(config.validate(), Err(ConfigError::Inverted { .. })));
}

#[test]
fn test_validation_rejects_negative_delay() {
    let mut config = GameConfig::default();
    config.wave.inter_wave_delay = -1.0;
    assert!(matches!(config.validate(), Err(ConfigError::Negative { .. })));
}

#[test]
fn test_load_missing_file_is_read_error() {
    let path = std::env::temp_dir().join("stardrift-definitely-missing-config.json");
    let err = GameConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("stardrift-definitely-missing-config.json"));
}
