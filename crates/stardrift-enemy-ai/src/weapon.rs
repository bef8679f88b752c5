//! Enemy gun cadence: first shot after a delay, then one every `fire_rate`
//! seconds of session clock. Not affected by the world speed scale.

use stardrift_core::config::EnemyWeaponProfile;

#[derive(Debug, Clone, Copy)]
pub struct WeaponCadence {
    pub next_fire_at: f64,
    pub fire_rate: f64,
    pub muzzle: [f64; 3],
}

impl WeaponCadence {
    pub fn new(profile: &EnemyWeaponProfile, now: f64) -> Self {
        Self {
            next_fire_at: now + profile.delay,
            fire_rate: profile.fire_rate,
            muzzle: profile.muzzle,
        }
    }

    /// Number of shots that came due up to `now`.
    pub fn shots_due(&mut self, now: f64) -> u32 {
        let mut shots = 0;
        while now >= self.next_fire_at && self.fire_rate > 0.0 {
            self.next_fire_at += self.fire_rate;
            shots += 1;
        }
        shots
    }
}
