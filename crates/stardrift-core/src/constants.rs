//! Simulation constants and tuning defaults.
//!
//! Every value here is a default for a field of [`crate::config::GameConfig`];
//! the simulation reads the configuration, never these constants directly,
//! except for the tick rate.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Named timers ---

/// Timer armed by the world speed override.
pub const WORLD_SPEED_TIMER: &str = "World Speed";

/// Timer armed by the invincibility powerup.
pub const INVINCIBLE_TIMER: &str = "Invincible";

// --- Game flow ---

/// Duration of the fade-in before play starts (seconds).
pub const FADE_IN_SECS: f64 = 2.0;

/// Screen fade level shown while paused.
pub const PAUSE_SCREEN_FADE: f64 = 0.7;

// --- Waves ---

/// Hazards spawned per wave.
pub const HAZARD_COUNT: u32 = 10;

/// Delay between two hazards of the same wave (seconds).
pub const SPAWN_WAIT: f64 = 0.5;

/// Delay before the first wave (seconds).
pub const START_WAIT: f64 = 2.0;

/// Delay between two waves (seconds).
pub const WAVE_WAIT: f64 = 4.0;

/// Half-width of the spawn line, and its fixed y and z.
pub const SPAWN_REGION: [f64; 3] = [6.0, 0.0, 16.0];

// --- World speed ---

/// Ambient speed-scale increase per second.
pub const SPEEDUP_RATE: f64 = 0.001;

/// Upper clamp for the world speed scale.
pub const MAX_SPEED_SCALE: f64 = 5.0;

// --- Player ---

pub const PLAYER_MAX_HIT_POINTS: f64 = 100.0;
pub const PLAYER_SPEED: f64 = 10.0;
pub const PLAYER_RADIUS: f64 = 0.6;
pub const PLAYER_PRIMARY_FIRE_RATE: f64 = 0.25;
pub const PLAYER_SECONDARY_FIRE_RATE: f64 = 0.5;

/// Player movement area: x_min, x_max, z_min, z_max.
pub const PLAYER_BOUNDARY: [f64; 4] = [-6.0, 6.0, -4.0, 8.0];

/// Offset from the ship to where shots appear.
pub const MUZZLE_OFFSET: [f64; 3] = [0.0, 0.0, 1.25];

// --- Entities ---

/// Default spawn weight of a template.
pub const DEFAULT_WEIGHT: u32 = 100;

pub const PLAYER_SHOT_SPEED: f64 = 20.0;
pub const ENEMY_SHOT_SPEED: f64 = -20.0;
pub const HAZARD_SPEED: f64 = -5.0;
pub const SHOT_RADIUS: f64 = 0.15;
pub const HAZARD_RADIUS: f64 = 0.5;
pub const POWERUP_RADIUS: f64 = 0.5;

/// Default powerup effect duration (seconds).
pub const POWERUP_DURATION: f64 = 10.0;

/// Default time-warp speed scale.
pub const TIME_WARP_SCALE: f64 = 0.5;

// --- Nuke blast ---

pub const NUKE_EXPAND_RATE: f64 = 1.0;
pub const NUKE_FINAL_RADIUS: f64 = 12.0;
pub const NUKE_LIFETIME_SECS: f64 = 2.0;

// --- Play area ---

/// Entities outside this box are despawned: x half-extent, z_min, z_max.
pub const PLAY_BOUNDARY: [f64; 3] = [8.0, -8.0, 22.0];
