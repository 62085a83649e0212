//! # Error Types
//!
//! Errors surface only at the edges: loading configuration and attaching to
//! the host. The capture and render paths never return errors; they degrade
//! to "do nothing this cycle".

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, validating or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("config file {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML document is malformed or has wrongly typed fields.
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field holds a value the overlay cannot use.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Field name as it appears in TOML.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Errors reported by the host when attaching the damage observer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    /// The damage routine does not exist on the controller's runtime type.
    #[error("damage routine not found on `{type_name}`")]
    RoutineNotFound {
        /// Runtime type that was searched.
        type_name: String,
    },

    /// The host refused the observer.
    #[error("host rejected damage observer: {0}")]
    Rejected(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
