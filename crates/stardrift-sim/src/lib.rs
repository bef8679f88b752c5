//! Simulation engine for Stardrift.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the frontend.

pub mod engine;
pub mod highscore;
pub mod session;
pub mod systems;
pub mod timers;
pub mod weights;
pub mod world_setup;
pub mod world_speed;

pub use stardrift_core as core;
pub use engine::{SimConfig, SimulationEngine};
