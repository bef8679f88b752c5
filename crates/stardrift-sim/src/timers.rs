//! Named countdown timers.
//!
//! Timers are optional annotations keyed by name: reading an unknown name
//! yields [`UNREGISTERED`] and writing one is a no-op.

use std::collections::HashMap;

/// Returned by [`TimerRegistry::get_remaining`] for names never registered.
pub const UNREGISTERED: f64 = -1.0;

/// A countdown that stops at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    remaining: f64,
}

impl Timer {
    pub fn tick(&mut self, dt: f64) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn add(&mut self, seconds: f64) {
        self.remaining += seconds;
    }

    pub fn set(&mut self, seconds: f64) {
        self.remaining = seconds;
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }
}

/// Timers by name. Lives as long as the session; timers are never removed.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    timers: HashMap<String, Timer>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zeroed timer unless one already exists.
    pub fn register(&mut self, name: &str) {
        if !self.timers.contains_key(name) {
            self.timers.insert(name.to_owned(), Timer::default());
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.timers.contains_key(name)
    }

    /// Remaining seconds, or [`UNREGISTERED`].
    pub fn get_remaining(&self, name: &str) -> f64 {
        self.timers
            .get(name)
            .map_or(UNREGISTERED, Timer::remaining)
    }

    pub fn add_time(&mut self, name: &str, seconds: f64) {
        if let Some(timer) = self.timers.get_mut(name) {
            timer.add(seconds);
        }
    }

    pub fn set_time(&mut self, name: &str, seconds: f64) {
        if let Some(timer) = self.timers.get_mut(name) {
            timer.set(seconds);
        }
    }

    /// Count every timer down by `dt`. Runs once per step, after all
    /// other per-step logic has read the timers.
    pub fn tick_all(&mut self, dt: f64) {
        for timer in self.timers.values_mut() {
            timer.tick(dt);
        }
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
