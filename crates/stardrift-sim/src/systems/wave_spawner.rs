//! Wave spawning system: hazard waves on a resumable schedule.
//!
//! The spawner is a sequential process with suspension points, kept as an
//! explicit step plus the session-clock deadline at which it resumes:
//!
//! 1. wait `pre_wave_delay`,
//! 2. spawn `count` hazards, waiting `per_entity_delay` after each,
//! 3. stop if the game is over, else wait `inter_wave_delay` and repeat.
//!
//! Every wait is divided by the world speed scale at the moment it starts.
//! A resumed spawner runs up to its next suspension and then yields for at
//! least one step. Game over only ends the process between waves, so a
//! wave in progress always finishes.

use hecs::World;
use rand::Rng;

use stardrift_core::config::{EntityTemplate, WaveConfig};
use stardrift_core::enums::GameState;
use stardrift_core::events::GameEvent;
use stardrift_core::types::{scaled_delay, Position};

use crate::weights::WeightTable;
use crate::world_setup;

/// Where the spawner is in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerStep {
    /// `start` not called yet.
    Idle,
    /// Waiting out the pre-wave delay.
    PreWave,
    /// Spawned `spawned` of `count` hazards of the current wave.
    InWave { spawned: u32 },
    /// Waiting out the inter-wave delay.
    BetweenWaves,
    /// Stopped after game over.
    Finished,
}

/// A hazard the spawner wants instantiated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// Index into the hazard templates.
    pub template: usize,
    pub position: Position,
    /// Wave this hazard belongs to (1-based).
    pub wave: u32,
}

#[derive(Debug, Clone)]
pub struct WaveSpawner {
    config: WaveConfig,
    step: SpawnerStep,
    resume_at: f64,
    wave: u32,
}

impl WaveSpawner {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            config,
            step: SpawnerStep::Idle,
            resume_at: 0.0,
            wave: 0,
        }
    }

    pub fn step(&self) -> SpawnerStep {
        self.step
    }

    /// Session clock at which the spawner next resumes.
    pub fn resume_at(&self) -> f64 {
        self.resume_at
    }

    /// Waves started so far.
    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn is_finished(&self) -> bool {
        self.step == SpawnerStep::Finished
    }

    /// Begin the sequence: suspend for the pre-wave delay.
    pub fn start(&mut self, now: f64, speed_scale: f64) {
        if self.step != SpawnerStep::Idle {
            return;
        }
        self.step = SpawnerStep::PreWave;
        self.resume_at = now + scaled_delay(self.config.pre_wave_delay, speed_scale);
    }

    /// Resume if the deadline has passed and run to the next suspension.
    /// Returns the hazard spawned on the way, if any.
    pub fn poll<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        state: GameState,
        speed_scale: f64,
        table: &WeightTable,
        rng: &mut R,
    ) -> Option<SpawnRequest> {
        if matches!(self.step, SpawnerStep::Idle | SpawnerStep::Finished) || now < self.resume_at {
            return None;
        }

        loop {
            match self.step {
                SpawnerStep::PreWave | SpawnerStep::BetweenWaves => {
                    self.wave += 1;
                    self.step = SpawnerStep::InWave { spawned: 0 };
                }
                SpawnerStep::InWave { spawned } if spawned < self.config.count => {
                    let request = SpawnRequest {
                        template: table.select(rng),
                        position: self.spawn_position(rng),
                        wave: self.wave,
                    };
                    self.step = SpawnerStep::InWave {
                        spawned: spawned + 1,
                    };
                    self.suspend(now, self.config.per_entity_delay, speed_scale);
                    return Some(request);
                }
                SpawnerStep::InWave { .. } => {
                    if state == GameState::GameOver {
                        self.step = SpawnerStep::Finished;
                        return None;
                    }
                    self.step = SpawnerStep::BetweenWaves;
                    self.suspend(now, self.config.inter_wave_delay, speed_scale);
                    return None;
                }
                SpawnerStep::Idle | SpawnerStep::Finished => return None,
            }
        }
    }

    fn suspend(&mut self, now: f64, secs: f64, speed_scale: f64) {
        self.resume_at = now + scaled_delay(secs, speed_scale);
    }

    /// x uniform in `[-rx, rx]`; y and z fixed.
    fn spawn_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let [rx, y, z] = self.config.spawn_region;
        let x = if rx > 0.0 { rng.gen_range(-rx..=rx) } else { 0.0 };
        Position::new(x, y, z)
    }
}

/// Poll the spawner and instantiate whatever it asks for.
#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    spawner: &mut WaveSpawner,
    table: &WeightTable,
    hazards: &[EntityTemplate],
    now: f64,
    state: GameState,
    speed_scale: f64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let wave_before = spawner.wave();
    let Some(request) = spawner.poll(now, state, speed_scale, table, rng) else {
        return;
    };

    if request.wave != wave_before {
        log::info!("wave {} started at t={now:.2}", request.wave);
        events.push(GameEvent::WaveStarted { wave: request.wave });
    }

    let Some(template) = hazards.get(request.template) else {
        log::warn!("spawner picked missing hazard template {}", request.template);
        return;
    };
    world_setup::spawn_template(
        world,
        template,
        request.position,
        speed_scale,
        now,
        rng,
    );
    log::debug!("spawned {} at x={:.2}", template.name, request.position.x);
    events.push(GameEvent::Spawned {
        kind: template.kind,
        position: request.position,
    });
}
