//! Error types for the luach_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for luach_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A date was built from out-of-range fields
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The absolute day falls outside the civil range (before 0001-01-01 or
    /// past chrono's last date)
    #[error("Unsupported date: absolute day {0} is outside the supported range")]
    UnsupportedDate(i64),

    /// A schedule definition is inconsistent (programming error, not bad input)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No schedule is registered under the requested id
    #[error("Unknown schedule: {0}")]
    UnknownSchedule(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
