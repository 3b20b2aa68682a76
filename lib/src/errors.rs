use std::path::PathBuf;

use thiserror::Error;

/// Result type returned from functions that can have our `Error`s.
pub type Result<T, E = BriteError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BriteError {
    #[error("invalid brightness value `{0}`")]
    InvalidValue(String),

    #[error("{0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("no matching backlight device")]
    NoDevice,

    #[error("failed to read {}: {}", file.display(), source)]
    Read {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not contain a brightness value: {}", file.display(), source)]
    Malformed {
        file: PathBuf,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("failed to write {}: {}", file.display(), source)]
    Write {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    DBus(#[from] zbus::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
