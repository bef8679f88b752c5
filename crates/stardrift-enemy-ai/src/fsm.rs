//! Evasive manoeuvre finite state machine.
//!
//! Pure functions that compute phase transitions and velocity adjustments
//! for enemy ships. No ECS dependency; operates on plain data.
//!
//! An enemy waits a random start delay, then alternates between dodging
//! sideways (away from the side of the screen it is on) and flying
//! straight. Every phase duration is stretched by the world speed scale.

use glam::DVec3;
use rand::Rng;

use stardrift_core::config::ManeuverProfile;
use stardrift_core::types::{scaled_delay, Position, Velocity};

/// Manoeuvre phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManeuverPhase {
    /// Initial delay before the first dodge.
    Waiting,
    /// Steering toward a lateral target speed.
    Dodging,
    /// Lateral target speed is zero.
    Resting,
}

/// Per-entity manoeuvre state, stored as a component.
#[derive(Debug, Clone)]
pub struct EvasiveManeuver {
    pub profile: ManeuverProfile,
    pub phase: ManeuverPhase,
    /// Lateral speed the ship steers toward.
    pub target_lateral: f64,
    /// Session clock at which the phase ends.
    pub phase_ends_at: f64,
}

/// Input to the FSM for a single entity.
pub struct ManeuverContext {
    pub position: Position,
    pub velocity: Velocity,
    /// Current forward speed of the ship's mover.
    pub forward_speed: f64,
    /// Session clock.
    pub now: f64,
    pub dt: f64,
    pub speed_scale: f64,
}

/// Output from the FSM.
pub struct ManeuverUpdate {
    pub new_velocity: Velocity,
    /// Position clamped to the manoeuvre boundary.
    pub new_position: Position,
    pub phase_changed: bool,
}

impl EvasiveManeuver {
    /// Start in `Waiting` for a random start delay.
    pub fn new<R: Rng + ?Sized>(
        profile: ManeuverProfile,
        now: f64,
        speed_scale: f64,
        rng: &mut R,
    ) -> Self {
        let wait = uniform(rng, profile.start_wait);
        Self {
            profile,
            phase: ManeuverPhase::Waiting,
            target_lateral: 0.0,
            phase_ends_at: now + scaled_delay(wait, speed_scale),
        }
    }

    /// Advance the FSM one step and compute the new velocity.
    pub fn evaluate<R: Rng + ?Sized>(
        &mut self,
        ctx: &ManeuverContext,
        rng: &mut R,
    ) -> ManeuverUpdate {
        let mut phase_changed = false;

        if ctx.now >= self.phase_ends_at {
            phase_changed = true;
            match self.phase {
                ManeuverPhase::Waiting | ManeuverPhase::Resting => {
                    let away = if ctx.position.x >= 0.0 { -1.0 } else { 1.0 };
                    self.target_lateral = uniform(rng, [1.0, self.profile.dodge]) * away;
                    self.phase = ManeuverPhase::Dodging;
                    let secs = uniform(rng, self.profile.maneuver_time);
                    self.phase_ends_at = ctx.now + scaled_delay(secs, ctx.speed_scale);
                }
                ManeuverPhase::Dodging => {
                    self.target_lateral = 0.0;
                    self.phase = ManeuverPhase::Resting;
                    let secs = uniform(rng, self.profile.maneuver_wait);
                    self.phase_ends_at = ctx.now + scaled_delay(secs, ctx.speed_scale);
                }
            }
        }

        let max_delta = ctx.dt * self.profile.smoothing * ctx.speed_scale;
        let lateral = move_towards(ctx.velocity.x, self.target_lateral, max_delta);

        let [x_min, x_max, z_min, z_max] = self.profile.boundary;
        let clamped = DVec3::new(
            ctx.position.x.clamp(x_min, x_max),
            0.0,
            ctx.position.z.clamp(z_min, z_max),
        );

        ManeuverUpdate {
            new_velocity: Velocity::new(lateral, 0.0, ctx.forward_speed),
            new_position: Position::from_dvec3(clamped),
            phase_changed,
        }
    }
}

/// Move `current` toward `target` by at most `max_delta`.
pub fn move_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Uniform draw from `[min, max)`; a collapsed range yields `min`.
fn uniform<R: Rng + ?Sized>(rng: &mut R, range: [f64; 2]) -> f64 {
    let [min, max] = range;
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}
