//! Per-game state.
//!
//! A `Session` holds everything that lives for one game: the ECS world,
//! clock, timers, world speed, spawner, score and pending events. Systems
//! borrow the parts they need from it. Restarting replaces the whole
//! session, so nothing leaks from one game into the next.

use hecs::{Entity, World};

use stardrift_core::config::GameConfig;
use stardrift_core::constants::{INVINCIBLE_TIMER, PAUSE_SCREEN_FADE};
use stardrift_core::enums::GameState;
use stardrift_core::events::GameEvent;
use stardrift_core::types::SimTime;

use crate::systems::wave_spawner::WaveSpawner;
use crate::timers::TimerRegistry;
use crate::weights::WeightTable;
use crate::world_setup;
use crate::world_speed::WorldSpeed;

/// Running score for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    /// Best stored score, updated on game over.
    pub high_score: u32,
    pub hazards_destroyed: u32,
    pub powerups_collected: u32,
}

/// Latest steering and trigger state from the player.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub horizontal: f64,
    pub vertical: f64,
    pub primary: bool,
    pub secondary: bool,
}

pub struct Session {
    pub world: World,
    pub time: SimTime,
    pub state: GameState,
    /// 1 while running, 0 while paused.
    pub time_multiplier: f64,
    /// Seconds of fade-in left before play starts.
    pub fade_remaining: f64,
    pub timers: TimerRegistry,
    pub speed: WorldSpeed,
    pub spawner: WaveSpawner,
    pub hazard_table: WeightTable,
    pub powerup_table: WeightTable,
    pub score: ScoreState,
    pub input: PlayerInput,
    pub player: Option<Entity>,
    pub events: Vec<GameEvent>,
    pub despawn_buffer: Vec<Entity>,
}

impl Session {
    /// Fresh session in `GetReady`, with the player spawned and every
    /// timer registered at zero.
    pub fn new(config: &GameConfig, high_score: u32) -> Self {
        let mut timers = TimerRegistry::new();
        let speed = WorldSpeed::new(config.speed.ramp_rate, config.speed.max_scale, &mut timers);
        timers.register(INVINCIBLE_TIMER);

        let mut world = World::new();
        let player = world_setup::spawn_player(&mut world, &config.player);

        let hazard_weights: Vec<u32> = config.hazards.iter().map(|t| t.weight).collect();
        let powerup_weights: Vec<u32> = config.powerups.iter().map(|t| t.weight).collect();

        Self {
            world,
            time: SimTime::default(),
            state: GameState::GetReady,
            time_multiplier: 1.0,
            fade_remaining: config.fade_in_secs,
            timers,
            speed,
            spawner: WaveSpawner::new(config.wave.clone()),
            hazard_table: WeightTable::build(&hazard_weights),
            powerup_table: WeightTable::build(&powerup_weights),
            score: ScoreState {
                high_score,
                ..ScoreState::default()
            },
            input: PlayerInput::default(),
            player: Some(player),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Session clock in seconds.
    pub fn now(&self) -> f64 {
        self.time.elapsed_secs
    }

    /// Move to `to`, recording the transition.
    pub fn set_state(&mut self, to: GameState) {
        if self.state == to {
            return;
        }
        log::info!("game state {:?} -> {:?}", self.state, to);
        self.events.push(GameEvent::StateChanged {
            from: self.state,
            to,
        });
        self.state = to;
    }

    /// Fade level: counts down during `GetReady`, dimmed while paused.
    pub fn screen_fade(&self, fade_in_secs: f64) -> f64 {
        match self.state {
            GameState::GetReady if fade_in_secs > 0.0 => {
                (self.fade_remaining / fade_in_secs).clamp(0.0, 1.0)
            }
            GameState::Paused => PAUSE_SCREEN_FADE,
            _ => 0.0,
        }
    }
}
