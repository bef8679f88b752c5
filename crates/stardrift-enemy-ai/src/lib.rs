//! Enemy behaviour for STARDRIFT.
//!
//! Implements the evasive-manoeuvre state machine flown by enemy ships
//! and the fixed cadence of their guns.

pub mod fsm;
pub mod weapon;

pub use stardrift_core as core;
