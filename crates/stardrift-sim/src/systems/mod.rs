//! ECS systems that operate on the session each step.
//!
//! Systems are plain functions over the world and the session parts they
//! need. Per-entity state lives in components; per-game state lives in the
//! `Session`.

pub mod cleanup;
pub mod enemy_ai;
pub mod movement;
pub mod nuke;
pub mod overlap;
pub mod player;
pub mod snapshot;
pub mod wave_spawner;
