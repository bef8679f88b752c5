//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is moved into the thread, which owns it from then on.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for polling and optionally streamed as JSON lines.

use std::io::Write;
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use stardrift_core::commands::PlayerCommand;
use stardrift_core::constants::TICK_RATE;
use stardrift_core::state::GameStateSnapshot;
use stardrift_sim::engine::SimulationEngine;

use crate::state::{GameLoopCommand, SharedSnapshot};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How the loop paces and records itself.
#[derive(Debug, Clone)]
pub struct LoopOptions {
    /// Sleep to hold the tick rate; otherwise run flat out.
    pub realtime: bool,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    /// Write every n-th snapshot to the sink (0 disables).
    pub snapshot_every: u64,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            realtime: true,
            max_ticks: None,
            snapshot_every: 0,
        }
    }
}

/// What the loop reports when it stops.
#[derive(Debug, Clone)]
pub struct LoopSummary {
    pub ticks: u64,
    pub last_snapshot: Option<GameStateSnapshot>,
    pub quit_requested: bool,
}

/// Controller-side handle on a running game loop.
pub struct GameHandle {
    command_tx: mpsc::Sender<GameLoopCommand>,
    latest_snapshot: SharedSnapshot,
    thread: JoinHandle<LoopSummary>,
}

impl GameHandle {
    /// Forward a player command. False once the loop has stopped.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    /// Copy of the most recent snapshot.
    pub fn latest_snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ask the loop to stop and wait for it. `None` if the thread panicked.
    pub fn shutdown(self) -> Option<LoopSummary> {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        match self.thread.join() {
            Ok(summary) => Some(summary),
            Err(_) => {
                log::error!("game loop thread panicked");
                None
            }
        }
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    options: LoopOptions,
    sink: Option<Box<dyn Write + Send>>,
    latest_snapshot: SharedSnapshot,
) -> std::io::Result<GameHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let shared = latest_snapshot.clone();

    let thread = std::thread::Builder::new()
        .name("stardrift-game-loop".into())
        .spawn(move || run_game_loop(engine, options, sink, cmd_rx, &shared))?;

    Ok(GameHandle {
        command_tx: cmd_tx,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until Shutdown, channel disconnect, quit to menu
/// or the tick limit.
fn run_game_loop(
    mut engine: SimulationEngine,
    options: LoopOptions,
    mut sink: Option<Box<dyn Write + Send>>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> LoopSummary {
    let mut next_tick_time = Instant::now();
    let mut ticks: u64 = 0;
    let mut last_snapshot = None;

    log::info!("game loop started (realtime={})", options.realtime);

    'run: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => break 'run,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'run,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        ticks += 1;

        // 3. Stream the snapshot if asked to
        if options.snapshot_every > 0 && ticks % options.snapshot_every == 0 {
            if let Some(out) = sink.as_mut() {
                if let Err(e) = write_snapshot(out.as_mut(), &snapshot) {
                    log::warn!("snapshot output failed, disabling it: {e}");
                    sink = None;
                }
            }
        }

        // 4. Store latest snapshot for polling
        publish(latest_snapshot, &snapshot);
        last_snapshot = Some(snapshot);

        if engine.quit_requested() {
            break;
        }
        if options.max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }

        // 5. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }

    if let Some(out) = sink.as_mut() {
        if let Err(e) = out.flush() {
            log::warn!("failed to flush snapshot output: {e}");
        }
    }
    log::info!("game loop stopped after {ticks} ticks");

    LoopSummary {
        ticks,
        last_snapshot,
        quit_requested: engine.quit_requested(),
    }
}

/// Replace the shared snapshot, recovering a poisoned lock.
fn publish(shared: &Mutex<Option<GameStateSnapshot>>, snapshot: &GameStateSnapshot) {
    let mut lock = shared.lock().unwrap_or_else(|poisoned| {
        log::warn!("snapshot lock poisoned, recovering");
        shared.clear_poison();
        poisoned.into_inner()
    });
    *lock = Some(snapshot.clone());
}

pub(crate) fn write_snapshot(out: &mut dyn Write, snapshot: &GameStateSnapshot) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, snapshot)?;
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardrift_core::enums::GameState;
    use stardrift_sim::engine::SimConfig;
    use std::sync::{Arc, Mutex};

    use crate::state::shared_snapshot;

    /// A `Write` that keeps everything in memory.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn headless(max_ticks: u64) -> LoopOptions {
        LoopOptions {
            realtime: false,
            max_ticks: Some(max_ticks),
            snapshot_every: 0,
        }
    }

    fn wait_for(handle: &GameHandle) {
        while !handle.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Resume))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Resume)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_stops_at_tick_limit() {
        let engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let shared = shared_snapshot();
        let handle = spawn_game_loop(engine, headless(200), None, shared.clone()).unwrap();
        wait_for(&handle);

        let summary = handle.shutdown().unwrap();
        assert_eq!(summary.ticks, 200);
        let last = summary.last_snapshot.unwrap();
        assert_eq!(last.time.tick, summary.ticks);
        assert_eq!(shared.lock().unwrap().as_ref(), Some(&last));
    }

    #[test]
    fn test_loop_runs_to_playing() {
        let engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let handle = spawn_game_loop(engine, headless(300), None, shared_snapshot()).unwrap();

        wait_for(&handle);
        let summary = handle.shutdown().unwrap();
        assert_eq!(summary.ticks, 300);
        assert_eq!(summary.last_snapshot.unwrap().state, GameState::Playing);
    }

    #[test]
    fn test_snapshots_stream_as_json_lines() {
        let engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let capture = Capture::default();
        let options = LoopOptions {
            snapshot_every: 10,
            ..headless(50)
        };
        let handle =
            spawn_game_loop(engine, options, Some(Box::new(capture.clone())), shared_snapshot())
                .unwrap();
        wait_for(&handle);
        handle.shutdown().unwrap();

        let bytes = capture.0.lock().unwrap().clone();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            let snapshot: GameStateSnapshot = serde_json::from_str(line).unwrap();
            assert_eq!(snapshot.time.tick % 10, 0);
        }
    }

    #[test]
    fn test_publish_recovers_poisoned_lock() {
        let shared = shared_snapshot();
        let poisoner = shared.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the snapshot lock");
        })
        .join();
        assert!(shared.is_poisoned());

        let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let snapshot = engine.tick();
        publish(&shared, &snapshot);

        assert!(!shared.is_poisoned());
        assert_eq!(shared.lock().unwrap().as_ref(), Some(&snapshot));
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();

        // Run into the first waves to populate entities
        for _ in 0..600 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.667ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
