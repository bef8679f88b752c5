//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the current `Session`, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use stardrift_core::commands::PlayerCommand;
use stardrift_core::config::GameConfig;
use stardrift_core::constants::DT;
use stardrift_core::enums::GameState;
use stardrift_core::error::ConfigError;
use stardrift_core::events::GameEvent;
use stardrift_core::state::GameStateSnapshot;
use stardrift_core::types::SimTime;

use crate::highscore::{HighScoreStore, MemoryHighScore};
use crate::session::{ScoreState, Session};
use crate::systems;
use crate::systems::movement::Movers;
use crate::world_speed::SpeedUpdate;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Game rules.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the session, the RNG and the high-score store.
pub struct SimulationEngine {
    config: GameConfig,
    rng: ChaCha8Rng,
    session: Session,
    command_queue: VecDeque<PlayerCommand>,
    store: Box<dyn HighScoreStore>,
    quit_requested: bool,
}

impl SimulationEngine {
    /// Create an engine that keeps its high score in memory.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_store(config, Box::new(MemoryHighScore::default()))
    }

    /// Create an engine backed by `store`. Validates the configuration.
    pub fn with_store(
        config: SimConfig,
        store: Box<dyn HighScoreStore>,
    ) -> Result<Self, ConfigError> {
        config.game.validate()?;
        let high_score = load_high_score(store.as_ref());
        let session = Session::new(&config.game, high_score);
        log::info!(
            "new session: seed={} hazards={} powerups={} high score={high_score}",
            config.seed,
            config.game.hazards.len(),
            config.game.powerups.len(),
        );
        Ok(Self {
            config: config.game,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            session,
            command_queue: VecDeque::new(),
            store,
            quit_requested: false,
        })
    }

    /// Queue a player command for processing at the next step boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one step and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        let dt = DT * self.session.time_multiplier;
        self.session.time.advance(dt);

        match self.session.state {
            GameState::GetReady => self.run_get_ready(dt),
            GameState::Playing => self.run_playing(dt),
            GameState::Paused => {}
            GameState::GameOver => self.run_game_over(dt),
        }

        let events = std::mem::take(&mut self.session.events);
        systems::snapshot::build_snapshot(&self.session, self.config.fade_in_secs, events)
    }

    /// Get the current game state.
    pub fn state(&self) -> GameState {
        self.session.state
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.session.time
    }

    /// Get the current world speed scale.
    pub fn speed_scale(&self) -> f64 {
        self.session.speed.get_scale()
    }

    /// Get the running score.
    pub fn score(&self) -> &ScoreState {
        &self.session.score
    }

    /// Get the game rules in use.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session access for tests that stage situations directly.
    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// True once the player quit to the main menu.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Steer {
                horizontal,
                vertical,
            } => {
                self.session.input.horizontal = horizontal;
                self.session.input.vertical = vertical;
            }
            PlayerCommand::SetFire { primary, secondary } => {
                self.session.input.primary = primary;
                self.session.input.secondary = secondary;
            }
            PlayerCommand::Pause => {
                if self.session.state == GameState::Playing {
                    self.session.time_multiplier = 0.0;
                    self.session.set_state(GameState::Paused);
                }
            }
            PlayerCommand::Resume => {
                if self.session.state == GameState::Paused {
                    self.session.time_multiplier = 1.0;
                    self.session.set_state(GameState::Playing);
                }
            }
            PlayerCommand::Quit => {
                if self.session.state == GameState::Paused {
                    self.session.time_multiplier = 1.0;
                    self.quit_requested = true;
                    log::info!("quit to main menu");
                    self.session.events.push(GameEvent::QuitToMenu);
                }
            }
            PlayerCommand::Restart => {
                if self.session.state == GameState::GameOver {
                    self.restart();
                }
            }
        }
    }

    /// Throw the session away and start over. The high score carries on.
    fn restart(&mut self) {
        let high_score = self
            .session
            .score
            .high_score
            .max(load_high_score(self.store.as_ref()));
        let previous = self.session.state;
        self.session = Session::new(&self.config, high_score);
        self.quit_requested = false;
        log::info!("session restarted");
        self.session.events.push(GameEvent::StateChanged {
            from: previous,
            to: GameState::GetReady,
        });
    }

    /// Fade in, then start play and the wave spawner.
    fn run_get_ready(&mut self, dt: f64) {
        self.session.fade_remaining -= dt;
        if self.session.fade_remaining <= 0.0 {
            self.session.fade_remaining = 0.0;
            self.session.set_state(GameState::Playing);
            let now = self.session.now();
            let scale = self.session.speed.get_scale();
            self.session.spawner.start(now, scale);
        }
    }

    /// One full gameplay step.
    fn run_playing(&mut self, dt: f64) {
        self.run_world(dt);

        // A destroyed player ends the step here: no ramp, no timers.
        if self.session.state != GameState::Playing {
            return;
        }

        let session = &mut self.session;
        let update = session
            .speed
            .update(dt, &session.timers, &mut Movers(&mut session.world));
        if let SpeedUpdate::Restored { scale } = update {
            log::debug!("world speed override expired, back to {scale}");
            session.events.push(GameEvent::WorldSpeedRestored { scale });
        }

        session.timers.tick_all(dt);
    }

    /// After game over the world keeps moving and the spawner finishes
    /// the wave in progress. Shots still in flight keep scoring.
    fn run_game_over(&mut self, dt: f64) {
        self.run_world(dt);
        self.record_high_score();
    }

    /// Spawner, ship, enemies, physics, overlaps and cleanup.
    fn run_world(&mut self, dt: f64) {
        let now = self.session.now();
        let scale = self.session.speed.get_scale();
        let session = &mut self.session;

        systems::wave_spawner::run(
            &mut session.world,
            &mut session.spawner,
            &session.hazard_table,
            &self.config.hazards,
            now,
            session.state,
            scale,
            &mut self.rng,
            &mut session.events,
        );

        if let Some(ship) = session.player {
            systems::player::run(
                &mut session.world,
                ship,
                &session.input,
                &self.config.player,
                now,
                scale,
                &mut self.rng,
                &mut session.events,
            );
        }

        systems::enemy_ai::run(
            &mut session.world,
            &self.config.enemy_shot,
            now,
            dt,
            scale,
            &mut self.rng,
            &mut session.events,
        );

        systems::movement::run(&mut session.world, dt);
        if let Some(ship) = session.player {
            systems::player::confine(&mut session.world, ship, &self.config.player);
        }
        systems::nuke::run(&mut session.world, dt);

        let player_destroyed = systems::overlap::run(session, &self.config, &mut self.rng);

        systems::cleanup::tick_lifetimes(&mut session.world, dt);
        systems::cleanup::run(
            &mut session.world,
            self.config.play_boundary,
            &mut session.despawn_buffer,
        );

        if player_destroyed {
            self.game_over();
        }
    }

    /// Enter `GameOver` and record a beaten high score.
    fn game_over(&mut self) {
        self.session.set_state(GameState::GameOver);
        self.record_high_score();
    }

    /// Raise and save the high score when the current score beats it.
    fn record_high_score(&mut self) {
        let score = self.session.score.score;
        if score <= self.session.score.high_score {
            return;
        }
        self.session.score.high_score = score;
        log::info!("new high score: {score}");
        self.session.events.push(GameEvent::NewHighScore { score });
        if let Err(e) = self.store.save(score) {
            log::warn!("failed to save high score: {e}");
        }
    }
}

/// Stored high score, or 0 when the store is unreadable.
fn load_high_score(store: &dyn HighScoreStore) -> u32 {
    store.load().unwrap_or_else(|e| {
        log::warn!("failed to load high score, starting from 0: {e}");
        0
    })
}
