//! A simple pilot for headless runs: keeps the guns hot and sidesteps
//! whatever is about to hit the ship.

use stardrift_core::commands::PlayerCommand;
use stardrift_core::enums::{EntityKind, GameState};
use stardrift_core::state::GameStateSnapshot;

/// How far ahead of the ship threats are considered.
const LOOKAHEAD: f64 = 6.0;

/// Lateral half-width of the danger lane.
const LANE: f64 = 1.5;

/// Steering for the current snapshot; empty outside `Playing`.
pub fn decide(snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
    if snapshot.state != GameState::Playing {
        return Vec::new();
    }
    let Some(player) = &snapshot.player else {
        return Vec::new();
    };
    let ship = player.position;

    let threat = snapshot
        .entities
        .iter()
        .filter(|e| is_threat(e.kind))
        .filter(|e| e.position.z > ship.z && e.position.z - ship.z < LOOKAHEAD)
        .filter(|e| (e.position.x - ship.x).abs() < LANE + e.radius)
        .min_by(|a, b| a.position.z.total_cmp(&b.position.z));

    let horizontal = match threat {
        Some(t) if t.position.x > ship.x => -1.0,
        Some(_) => 1.0,
        // Drift back toward the middle.
        None => (-ship.x / 3.0).clamp(-1.0, 1.0),
    };

    vec![
        PlayerCommand::Steer {
            horizontal,
            vertical: 0.0,
        },
        PlayerCommand::SetFire {
            primary: true,
            secondary: threat.is_some(),
        },
    ]
}

/// Flies whole games: steers with [`decide`] and restarts after game over
/// until it runs out of restarts.
#[derive(Debug, Clone)]
pub struct Pilot {
    restarts_left: u32,
}

impl Pilot {
    pub fn new(restarts: u32) -> Self {
        Self {
            restarts_left: restarts,
        }
    }

    /// Commands answering `snapshot`, or `None` once the pilot is done.
    pub fn respond(&mut self, snapshot: &GameStateSnapshot) -> Option<Vec<PlayerCommand>> {
        if snapshot.state != GameState::GameOver {
            return Some(decide(snapshot));
        }
        if self.restarts_left == 0 {
            return None;
        }
        self.restarts_left -= 1;
        Some(vec![PlayerCommand::Restart])
    }
}

fn is_threat(kind: EntityKind) -> bool {
    matches!(
        kind,
        EntityKind::Asteroid | EntityKind::EnemyShip | EntityKind::EnemyShot
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardrift_core::state::{EntityView, PlayerView};
    use stardrift_core::types::Position;

    fn playing(ship_x: f64, entities: Vec<EntityView>) -> GameStateSnapshot {
        GameStateSnapshot {
            state: GameState::Playing,
            player: Some(PlayerView {
                position: Position::new(ship_x, 0.0, 0.0),
                hit_points: 100.0,
                max_hit_points: 100.0,
                invincible_secs: 0.0,
            }),
            entities,
            ..Default::default()
        }
    }

    fn rock(x: f64, z: f64) -> EntityView {
        EntityView {
            id: 1,
            kind: EntityKind::Asteroid,
            position: Position::new(x, 0.0, z),
            radius: 0.5,
        }
    }

    fn steer(commands: &[PlayerCommand]) -> f64 {
        commands
            .iter()
            .find_map(|c| match c {
                PlayerCommand::Steer { horizontal, .. } => Some(*horizontal),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_idle_outside_playing() {
        let snapshot = GameStateSnapshot::default();
        assert!(decide(&snapshot).is_empty());
    }

    #[test]
    fn test_sidesteps_incoming_rock() {
        assert_eq!(steer(&decide(&playing(0.0, vec![rock(0.5, 3.0)]))), -1.0);
        assert_eq!(steer(&decide(&playing(0.0, vec![rock(-0.5, 3.0)]))), 1.0);
    }

    #[test]
    fn test_ignores_distant_and_passed_rocks() {
        let commands = decide(&playing(0.0, vec![rock(0.0, 12.0), rock(0.0, -2.0), rock(5.0, 2.0)]));
        assert_eq!(steer(&commands), 0.0);
    }

    #[test]
    fn test_pilot_restarts_then_stops() {
        let over = GameStateSnapshot {
            state: GameState::GameOver,
            ..Default::default()
        };
        let mut pilot = Pilot::new(1);

        assert!(pilot.respond(&playing(0.0, Vec::new())).is_some());
        assert_eq!(pilot.respond(&over), Some(vec![PlayerCommand::Restart]));
        assert_eq!(pilot.respond(&over), None);
    }

    #[test]
    fn test_recenters_when_clear() {
        assert!(steer(&decide(&playing(4.5, Vec::new()))) < 0.0);
        assert!(steer(&decide(&playing(-4.5, Vec::new()))) > 0.0);
    }
}
