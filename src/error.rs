//! Unified error type for construction and configuration failures.
//!
//! Sink writes report plain `std::io::Error`, the byte-level contract shared with
//! `std::io::Write`. Everything that happens before the first byte is
//! written (opening a log file, loading settings, dialing syslog) reports this type.

use std::path::PathBuf;

/// Error type for rotalog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(std::io::Error),
    /// The directory that should hold a log file does not exist.
    DirNotFound(PathBuf),
    /// The parent of a log file path exists but is not a directory.
    NotADirectory(PathBuf),
    /// TOML settings parsing error.
    ConfigParse(toml::de::Error),
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
    /// Size string like "10M" could not be parsed.
    InvalidSize(String),
    /// Syslog priority outside facility/severity range.
    InvalidPriority(u16),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DirNotFound(p) => write!(f, "directory not found: {}", p.display()),
            Self::NotADirectory(p) => write!(f, "path {}: is not a directory", p.display()),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::InvalidSize(s) => write!(f, "invalid size: '{s}'"),
            Self::InvalidPriority(p) => write!(f, "invalid syslog priority: {p}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
