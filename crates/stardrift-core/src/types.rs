//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D position in play space (world units).
/// x = lateral, y = up (always 0 for gameplay), z = forward (up the screen).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in play space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Session time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulation steps taken, paused or not.
    pub tick: u64,
    /// Unpaused game time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_dvec3(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_dvec3().distance(other.as_dvec3())
    }

    /// Offset this position by a vector.
    pub fn offset(&self, by: [f64; 3]) -> Self {
        Self::from_dvec3(self.as_dvec3() + DVec3::from_array(by))
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_dvec3(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Velocity along the forward (+z) axis.
    pub fn forward(speed: f64) -> Self {
        Self::from_dvec3(DVec3::Z * speed)
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f64 {
        self.as_dvec3().length()
    }

    /// Uniformly scale all components.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_dvec3(self.as_dvec3() * factor)
    }
}

/// A delay in game seconds stretched by the world speed scale.
/// A scale of zero (or less) never elapses.
pub fn scaled_delay(secs: f64, speed_scale: f64) -> f64 {
    if speed_scale > 0.0 {
        secs / speed_scale
    } else {
        f64::INFINITY
    }
}

impl SimTime {
    /// Advance one step; `dt` is zero while paused.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
