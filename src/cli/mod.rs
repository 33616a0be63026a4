//! Command-line front end over the library, using Clap.

pub mod commands;

pub use commands::{cmd_log, cmd_pipe, cmd_rotate};

use crate::config::Settings;
use crate::internal;
use crate::level::Level;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Log level for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Trace,
    Info,
    Warn,
    Error,
    Fatal,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
            LogLevel::Fatal => Self::Fatal,
        }
    }
}

/// rotalog - leveled logging to the console and rotating files.
#[derive(Debug, Parser)]
#[command(
    name = "rotalog",
    version,
    about = "Leveled logging to the console and size-rotated files"
)]
pub struct Cli {
    /// Settings file (default: <config dir>/rotalog/log.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Logger name written into every line
    #[arg(long, default_value = "")]
    pub name: String,
    /// Log to this file (enables the file destination)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Rotation trigger, e.g. "10M"
    #[arg(long, value_name = "SIZE")]
    pub size_limit: Option<String>,
    /// Numbered backups to keep
    #[arg(long, value_name = "N")]
    pub backups: Option<usize>,
    /// Threshold for both destinations
    #[arg(long, value_enum)]
    pub level: Option<LogLevel>,
    /// Do not write to standard error
    #[arg(long)]
    pub no_console: bool,
    /// Color console lines by level
    #[arg(long)]
    pub color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log one message.
    Log {
        #[arg(value_enum)]
        level: LogLevel,
        /// Message words, joined by spaces
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Log standard input line by line.
    Pipe {
        /// Level for every line
        #[arg(long, value_enum, default_value = "info")]
        level: LogLevel,
    },
    /// Rotate a log file now.
    Rotate {
        path: PathBuf,
        /// Backups to keep (default: settings)
        #[arg(long, value_name = "N")]
        backups: Option<usize>,
    },
}

impl Cli {
    /// Settings from `--config` (or the default location), with command-line overrides applied.
    ///
    /// # Errors
    /// An explicit `--config` file that cannot be read or parsed.
    pub fn settings(&self) -> Result<Settings, crate::Error> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::load("rotalog").unwrap_or_else(|e| {
                internal::warn("CLI", &format!("{e}, using defaults"));
                Settings::default()
            }),
        };

        if let Some(path) = &self.file {
            settings.file.enabled = true;
            settings.file.location = path.to_string_lossy().into_owned();
        }
        if let Some(limit) = &self.size_limit {
            settings.file.size_limit.clone_from(limit);
        }
        if let Some(backups) = self.backups {
            settings.file.backup_count = backups;
        }
        if let Some(level) = self.level {
            let level = Level::from(level).as_str().to_string();
            settings.console.level.clone_from(&level);
            settings.file.level = level;
        }
        if self.no_console {
            settings.console.enabled = false;
        }
        if self.color {
            settings.console.color = true;
        }

        Ok(settings)
    }
}
