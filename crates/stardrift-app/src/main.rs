use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use stardrift_app::autopilot::Pilot;
use stardrift_app::game_loop::{self, LoopOptions, LoopSummary};
use stardrift_app::headless;
use stardrift_app::state::shared_snapshot;
use stardrift_core::config::GameConfig;
use stardrift_sim::highscore::{HighScoreStore, JsonFileHighScore, MemoryHighScore};
use stardrift_sim::{SimConfig, SimulationEngine};

/// Stardrift: a headless space-shooter simulation flown by an autopilot.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Game rules as JSON; defaults are used for anything left out.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// RNG seed. Without --realtime the same seed replays the same game.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many ticks (60 per second of game time).
    #[arg(long, default_value_t = 60 * 120)]
    ticks: u64,

    /// Keep the high score in this JSON file instead of in memory.
    #[arg(long, value_name = "PATH")]
    high_score: Option<PathBuf>,

    /// Run on a paced thread at the real tick rate. The pilot then reacts
    /// to whichever tick it sees, so runs are no longer reproducible.
    #[arg(long)]
    realtime: bool,

    /// Write snapshots as JSON lines to this file ("-" for stdout).
    #[arg(long, value_name = "PATH")]
    snapshots: Option<PathBuf>,

    /// Write every n-th snapshot.
    #[arg(long, default_value_t = 60)]
    snapshot_every: u64,

    /// Games to start over after the first game over.
    #[arg(long, default_value_t = 0)]
    restarts: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let game = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let store: Box<dyn HighScoreStore> = match &cli.high_score {
        Some(path) => Box::new(JsonFileHighScore::new(path)),
        None => Box::new(MemoryHighScore::default()),
    };

    let engine = SimulationEngine::with_store(
        SimConfig {
            seed: cli.seed,
            game,
        },
        store,
    )?;

    let mut sink: Option<Box<dyn Write + Send>> = match &cli.snapshots {
        Some(path) if path.as_os_str() == "-" => Some(Box::new(std::io::stdout())),
        Some(path) => Some(Box::new(BufWriter::new(File::create(path)?))),
        None => None,
    };
    let snapshot_every = if sink.is_some() { cli.snapshot_every } else { 0 };
    let mut pilot = Pilot::new(cli.restarts);

    let summary = if cli.realtime {
        run_realtime(engine, &mut pilot, cli.ticks, snapshot_every, sink)?
    } else {
        headless::run(
            engine,
            &mut pilot,
            cli.ticks,
            snapshot_every,
            sink.as_deref_mut().map(|out| out as &mut dyn Write),
        )?
    };

    if let Some(last) = summary.last_snapshot {
        log::info!(
            "finished after {} ticks: {:?}, score {}, high score {}, waves {}",
            summary.ticks,
            last.state,
            last.score.score,
            last.score.high_score,
            last.score.waves_started,
        );
    }
    Ok(())
}

/// Paced run on the game loop thread, steered by polling its snapshots.
fn run_realtime(
    engine: SimulationEngine,
    pilot: &mut Pilot,
    ticks: u64,
    snapshot_every: u64,
    sink: Option<Box<dyn Write + Send>>,
) -> Result<LoopSummary, Box<dyn std::error::Error>> {
    let options = LoopOptions {
        realtime: true,
        max_ticks: Some(ticks),
        snapshot_every,
    };
    let handle = game_loop::spawn_game_loop(engine, options, sink, shared_snapshot())?;

    let mut last_tick = 0;
    while !handle.is_finished() {
        let Some(snapshot) = handle.latest_snapshot() else {
            std::thread::sleep(Duration::from_millis(1));
            continue;
        };
        if snapshot.time.tick == last_tick {
            std::thread::sleep(Duration::from_millis(1));
            continue;
        }
        last_tick = snapshot.time.tick;

        let Some(commands) = pilot.respond(&snapshot) else {
            break;
        };
        for command in commands {
            handle.send(command);
        }
    }

    Ok(handle
        .shutdown()
        .ok_or("game loop stopped unexpectedly")?)
}
