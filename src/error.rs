//! Error types for the landmark pose estimation library.
//!
//! The per-frame calculators never fail: malformed frames are skipped. These
//! errors come from the surrounding surfaces (configuration files, landmark
//! recordings and their validation).

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Landmark recording is malformed
    #[error("Recording error: {0}")]
    RecordingError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
