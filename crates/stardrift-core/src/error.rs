//! Error types shared by the simulation and the runner.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("hazard list is empty")]
    NoHazards,
    #[error("{list} weights sum to zero")]
    ZeroWeightSum { list: &'static str },
    #[error("template '{name}' has kind {kind} which does not belong in the {list} list")]
    WrongKind {
        name: String,
        kind: String,
        list: &'static str,
    },
    #[error("template '{name}' has drop chance {chance} outside [0, 100]")]
    DropChance { name: String, chance: f64 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} is inverted: min {min} > max {max}")]
    Inverted {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

/// High-score persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("high score record: {0}")]
    Format(#[from] serde_json::Error),
}
