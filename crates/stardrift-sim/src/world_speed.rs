//! World speed controller.
//!
//! One global scale multiplies every time-scaled velocity. It ramps up
//! slowly on its own and can be overridden for a while (time warp); when
//! the override timer runs out the pre-override scale comes back and the
//! ramp carries on from there.

use stardrift_core::constants::WORLD_SPEED_TIMER;

use crate::timers::TimerRegistry;

/// Receives velocity rescale notifications.
pub trait SpeedListener {
    /// The scale changed to `scale`: multiply cached speeds by it.
    fn update_velocity(&mut self, scale: f64);
    /// An override is ending while still at `scale`: divide by it.
    fn reset_velocity(&mut self, scale: f64);
}

/// What [`WorldSpeed::update`] did this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedUpdate {
    /// Timer still running; nothing changed.
    Overridden,
    /// Ambient ramp applied.
    Ramped,
    /// Override expired and the backup scale was restored, then ramped.
    Restored { scale: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldSpeed {
    current_scale: f64,
    backup_scale: f64,
    is_backed_up: bool,
    ramp_rate: f64,
    max_scale: f64,
}

impl WorldSpeed {
    /// Starts at scale 1. Registers the override timer.
    pub fn new(ramp_rate: f64, max_scale: f64, timers: &mut TimerRegistry) -> Self {
        timers.register(WORLD_SPEED_TIMER);
        Self {
            current_scale: 1.0,
            backup_scale: 1.0,
            is_backed_up: false,
            ramp_rate,
            max_scale,
        }
    }

    pub fn get_scale(&self) -> f64 {
        self.current_scale
    }

    /// Pre-override scale, while an override is pending.
    pub fn backup_scale(&self) -> Option<f64> {
        self.is_backed_up.then_some(self.backup_scale)
    }

    pub fn is_overridden(&self) -> bool {
        self.is_backed_up
    }

    /// Override the scale for `duration` seconds.
    ///
    /// Only the first override after a reversion records the backup, so
    /// stacked overrides still revert to the scale from before the first.
    pub fn set_scale(
        &mut self,
        new_scale: f64,
        duration: f64,
        timers: &mut TimerRegistry,
        listener: &mut dyn SpeedListener,
    ) {
        if !self.is_backed_up {
            self.backup_scale = self.current_scale;
            self.is_backed_up = true;
        }

        if self.current_scale != new_scale {
            self.current_scale = new_scale;
            listener.update_velocity(new_scale);
        }

        timers.set_time(WORLD_SPEED_TIMER, duration);
    }

    /// Reversion and ramp. Must run before the timers tick this step so
    /// that an override which reached zero last step is seen as zero here.
    pub fn update(
        &mut self,
        dt: f64,
        timers: &TimerRegistry,
        listener: &mut dyn SpeedListener,
    ) -> SpeedUpdate {
        if timers.get_remaining(WORLD_SPEED_TIMER) != 0.0 {
            return SpeedUpdate::Overridden;
        }

        let mut result = SpeedUpdate::Ramped;
        if self.is_backed_up {
            listener.reset_velocity(self.current_scale);
            self.current_scale = self.backup_scale;
            self.is_backed_up = false;
            result = SpeedUpdate::Restored {
                scale: self.backup_scale,
            };
        }

        self.current_scale = (self.current_scale + dt * self.ramp_rate).clamp(0.0, self.max_scale);
        result
    }
}
