// SPDX-License-Identifier: MPL-2.0
//! Error types for configuration loading and persistence.
//!
//! The lightbox engine itself never fails at runtime: every DOM miss,
//! stale handle or degenerate gesture is handled locally with a fallback.
//! Only reading and writing settings can surface an [`Error`].

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Settings file could not be read or written.
    Io(String),
    /// Settings content could not be parsed or serialized.
    Config(String),
    /// Browser storage payload was not a valid key-value object.
    Storage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Storage(e) => write!(f, "Storage Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
