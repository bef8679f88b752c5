//! Stardrift runner.
//!
//! Drives the headless simulation either in lockstep with the autopilot,
//! which replays exactly for a given seed, or on its own real-time thread
//! steered from the outside through a command channel, the way a frontend
//! would.

pub mod autopilot;
pub mod game_loop;
pub mod headless;
pub mod state;

pub use stardrift_core as core;
