//! Settings struct definitions.

use crate::fmt::{DEFAULT_TEMPLATE, DEFAULT_TIMESTAMP};
use crate::sink::{DEFAULT_BUFFER_SIZE, DEFAULT_MODE};
use serde::Deserialize;

/// Console destination settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Write to standard error.
    pub enabled: bool,
    /// Minimum level routed to the console.
    pub level: String,
    /// Wrap lines in ANSI colors by level.
    pub color: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
            color: false,
        }
    }
}

/// Rotating file destination settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Write to a rotating file.
    pub enabled: bool,
    /// Minimum level routed to the file.
    pub level: String,
    /// Log file path; empty means `<executable>.log` in the working directory.
    pub location: String,
    /// Rotation trigger (e.g., "10M", "512k").
    pub size_limit: String,
    /// Numbered backups to keep.
    pub backup_count: usize,
    /// Write buffer capacity in bytes; 0 writes through.
    pub buffer_size: usize,
    /// Permission bits for a newly created file.
    pub mode: u32,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            location: String::new(),
            size_limit: "10M".to_string(),
            backup_count: 7,
            buffer_size: DEFAULT_BUFFER_SIZE,
            mode: DEFAULT_MODE,
        }
    }
}

/// Line layout settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Placeholder template for each line.
    pub template: String,
    /// strftime pattern; empty disables timestamps.
    pub timestamp: String,
    /// Stamp lines in UTC instead of local time.
    pub utc: bool,
    /// Call-site recording: off, short or long.
    pub caller: String,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            timestamp: DEFAULT_TIMESTAMP.to_string(),
            utc: false,
            caller: "off".to_string(),
        }
    }
}
