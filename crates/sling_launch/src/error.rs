use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be strictly positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("trajectory preview needs at least one point")]
    NoTrajectoryPoints,

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldError {
    #[error("no hold anchor is configured")]
    NoAnchor,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    #[error("no viewpoint is configured to map pointer positions")]
    NoViewpoint,
}
