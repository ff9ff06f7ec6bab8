//! Crate error type.
//!
//! Only configuration and spawn paths are fallible. Collaborator hiccups during a
//! tick (audio device gone, sprite swap refused) downgrade the feature instead of
//! surfacing here, and stale handles are plain no-ops.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PetError {
    /// A setting is outside the range the simulation is tuned for.
    #[error("setting '{name}' = {value} is outside {range}")]
    InvalidSetting {
        name: &'static str,
        value: f64,
        range: &'static str,
    },

    /// A sprite buffer does not match its declared dimensions, or is empty.
    #[error("invalid sprite: {0}")]
    InvalidSprite(String),

    /// The host could not create a surface for a new pet.
    #[error("failed to spawn pet: {0}")]
    Spawn(String),

    #[error("settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is malformed: {source}")]
    SettingsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias: a `Result` using `PetError` as the error type.
pub type PetResult<T> = Result<T, PetError>;
