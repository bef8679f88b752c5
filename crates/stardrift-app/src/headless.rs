//! Lockstep runner: one thread ticks the engine and lets the pilot answer
//! every snapshot before the next tick. Commands always land on the tick
//! after the snapshot they answer, so a seed replays exactly.

use std::io::Write;

use stardrift_sim::engine::SimulationEngine;

use crate::autopilot::Pilot;
use crate::game_loop::{write_snapshot, LoopSummary};

/// Run until the tick limit, a quit, or the pilot is done.
/// `snapshot_every` of 0 writes nothing.
pub fn run(
    mut engine: SimulationEngine,
    pilot: &mut Pilot,
    max_ticks: u64,
    snapshot_every: u64,
    mut sink: Option<&mut dyn Write>,
) -> std::io::Result<LoopSummary> {
    let mut ticks: u64 = 0;
    let mut last_snapshot = None;

    while ticks < max_ticks {
        let snapshot = engine.tick();
        ticks += 1;

        if snapshot_every > 0 && ticks % snapshot_every == 0 {
            if let Some(out) = sink.as_mut() {
                write_snapshot(&mut **out, &snapshot)?;
            }
        }

        let response = pilot.respond(&snapshot);
        last_snapshot = Some(snapshot);
        match response {
            Some(commands) => engine.queue_commands(commands),
            None => break,
        }
        if engine.quit_requested() {
            break;
        }
    }

    if let Some(out) = sink.as_mut() {
        out.flush()?;
    }
    log::info!("headless run stopped after {ticks} ticks");

    Ok(LoopSummary {
        ticks,
        last_snapshot,
        quit_requested: engine.quit_requested(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardrift_core::enums::GameState;
    use stardrift_sim::engine::SimConfig;

    fn record(seed: u64, ticks: u64) -> (Vec<u8>, LoopSummary) {
        let engine = SimulationEngine::new(SimConfig {
            seed,
            ..SimConfig::default()
        })
        .unwrap();
        let mut out = Vec::new();
        let summary = run(engine, &mut Pilot::new(2), ticks, 1, Some(&mut out)).unwrap();
        (out, summary)
    }

    #[test]
    fn test_same_seed_same_output() {
        let (first, first_summary) = record(42, 1500);
        let (second, second_summary) = record(42, 1500);

        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(first_summary.ticks, second_summary.ticks);
        assert_eq!(first_summary.last_snapshot, second_summary.last_snapshot);
    }

    #[test]
    fn test_different_seed_different_output() {
        let (first, _) = record(42, 600);
        let (second, _) = record(43, 600);
        assert_ne!(first, second);
    }

    #[test]
    fn test_writes_every_nth_snapshot() {
        let engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let mut out = Vec::new();
        let summary = run(engine, &mut Pilot::new(0), 300, 100, Some(&mut out)).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), summary.ticks as usize / 100);
        assert_eq!(summary.ticks, 300);
        assert_eq!(summary.last_snapshot.unwrap().state, GameState::Playing);
    }
}
