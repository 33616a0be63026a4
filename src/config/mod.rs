//! TOML settings that describe how a logger is assembled.
//!
//! Separated from struct definitions so that the loading logic (file I/O, path
//! resolution, lenient value conversion) stays independent of the serde schema.

mod size;
mod structs;

pub use size::{format_size, parse_size};
pub use structs::{ConsoleSettings, FileSettings, FormatSettings};

use crate::fmt::{Caller, Color, LineFormat};
use crate::internal;
use crate::level::Level;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Used when `size_limit` cannot be parsed.
pub const FALLBACK_SIZE_LIMIT: u64 = 10 * 1024 * 1024;

const SETTINGS_FILE: &str = "log.toml";

/// A completely empty settings file must still produce a working logger;
/// `#[serde(default)]` on every field makes zero-config work out of the box.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Forces both thresholds down to debug.
    pub debug: bool,
    pub console: ConsoleSettings,
    pub file: FileSettings,
    pub format: FormatSettings,
    /// Per-level console color overrides, e.g. `warn = "#ffb86c"`.
    pub colors: HashMap<String, String>,
}

impl Settings {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    /// `Error::ConfigParse` on TOML syntax or type errors.
    pub fn from_toml(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// Loads settings from an explicit path. A missing file yields defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug(
                "CONFIG",
                &format!("{} not found, using defaults", path.display()),
            );
            return Ok(Self::default());
        }

        let settings = Self::from_toml(&fs::read_to_string(path)?)?;
        internal::debug(
            "CONFIG",
            &format!("Settings loaded from {}", path.display()),
        );
        Ok(settings)
    }

    /// Loads `<config dir>/<app>/log.toml`, falling back to defaults when absent.
    ///
    /// # Errors
    /// Fails when the platform has no config directory or the file cannot be parsed.
    pub fn load(app: &str) -> Result<Self, crate::Error> {
        Self::load_from(&Self::config_path(app)?)
    }

    /// Where [`Settings::load`] looks for `app`.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn config_path(app: &str) -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(app).join(SETTINGS_FILE))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Unrecognized level strings mean `Info`; `debug = true` overrides both thresholds.
    #[must_use]
    pub fn console_level(&self) -> Level {
        if self.debug {
            Level::Debug
        } else {
            Level::parse_lenient(&self.console.level)
        }
    }

    #[must_use]
    pub fn file_level(&self) -> Level {
        if self.debug {
            Level::Debug
        } else {
            Level::parse_lenient(&self.file.level)
        }
    }

    /// Rotation trigger in bytes. A bad size string is reported and replaced by 10 MiB
    /// rather than disabling rotation.
    #[must_use]
    pub fn size_limit(&self) -> u64 {
        parse_size(&self.file.size_limit).unwrap_or_else(|e| {
            internal::warn(
                "CONFIG",
                &format!("{e}, using {}", format_size(FALLBACK_SIZE_LIMIT)),
            );
            FALLBACK_SIZE_LIMIT
        })
    }

    /// `~` is expanded; an empty location derives `<executable stem>.log`.
    #[must_use]
    pub fn file_location(&self) -> PathBuf {
        let location = self.file.location.trim();
        if location.is_empty() {
            return PathBuf::from(format!("{}.log", executable_stem()));
        }
        PathBuf::from(shellexpand::tilde(location).as_ref())
    }

    #[must_use]
    pub fn line_format(&self) -> LineFormat {
        LineFormat::new()
            .template(&self.format.template)
            .timestamp(self.format.timestamp.clone())
            .utc(self.format.utc)
            .caller(Caller::parse_lenient(&self.format.caller))
    }

    /// Valid `[colors]` entries; unknown levels and malformed hex codes are reported and skipped.
    #[must_use]
    pub fn color_overrides(&self) -> Vec<(Level, Color)> {
        let mut overrides: Vec<_> = self
            .colors
            .iter()
            .filter_map(|(level, hex)| {
                let parsed = level.parse::<Level>().ok().zip(Color::from_hex(hex));
                if parsed.is_none() {
                    internal::warn(
                        "CONFIG",
                        &format!("Ignoring color entry {level} = \"{hex}\""),
                    );
                }
                parsed
            })
            .collect();
        overrides.sort_by_key(|(level, _)| *level);
        overrides
    }
}

/// File stem of the running executable, `rotalog` when it cannot be determined.
#[must_use]
pub fn executable_stem() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "rotalog".to_string())
}
