//! Stepwise construction of a [`Logger`]: pick a console, optionally a rotating
//! file, and the line format.

use super::{LevelRouter, Logger, SinkSet};
use crate::fmt::{Color, LineFormat};
use crate::internal;
use crate::level::Level;
use crate::sink::{ColorConsole, Console, RotatingFile, RotatingFileOptions, SharedSink};
use std::path::PathBuf;
use std::sync::Arc;

enum ConsoleChoice {
    None,
    Stderr(Level),
    Custom(SharedSink, Level),
}

/// Builds a [`Logger`]. Nothing is routed until a console or file is added.
pub struct LoggerBuilder {
    name: String,
    console: ConsoleChoice,
    colors: bool,
    palette: Vec<(Level, Option<Color>)>,
    file: Option<(SharedSink, Level)>,
    format: LineFormat,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            console: ConsoleChoice::None,
            colors: false,
            palette: Vec::new(),
            file: None,
            format: LineFormat::default(),
        }
    }

    /// Written verbatim into every line; include your own separator, e.g. `"net: "`.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Standard error for every level at or above `level`.
    #[must_use]
    pub fn console(mut self, level: Level) -> Self {
        self.console = ConsoleChoice::Stderr(level);
        self
    }

    /// Paints stderr lines by level. Ignored for custom console sinks.
    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    /// Overrides one level's console color; `None` leaves that level unpainted.
    #[must_use]
    pub fn level_color(mut self, level: Level, color: Option<Color>) -> Self {
        self.palette.push((level, color));
        self
    }

    /// Any sink in the console slot, e.g. stdout or a syslog connection.
    #[must_use]
    pub fn console_sink(mut self, sink: SharedSink, level: Level) -> Self {
        self.console = ConsoleChoice::Custom(sink, level);
        self
    }

    /// Rotating log file at `path`; finish with [`FileBuilder::done`].
    #[must_use]
    pub fn file(self, path: impl Into<PathBuf>) -> FileBuilder {
        FileBuilder {
            parent: self,
            path: path.into(),
            level: Level::Info,
            options: RotatingFileOptions::default(),
        }
    }

    /// Any sink in the file slot. The built logger owns it and closes it on `close`.
    #[must_use]
    pub fn file_sink(mut self, sink: SharedSink, level: Level) -> Self {
        self.file = Some((sink, level));
        self
    }

    #[must_use]
    pub fn format(mut self, format: LineFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn build(self) -> Logger {
        let console = match self.console {
            ConsoleChoice::None => None,
            ConsoleChoice::Custom(sink, level) => Some((sink, level)),
            ConsoleChoice::Stderr(level) if self.colors => {
                let painted = self
                    .palette
                    .into_iter()
                    .fold(ColorConsole::stderr(), |console, (painted, color)| {
                        console.level_color(painted, color)
                    });
                let sink: SharedSink = Arc::new(painted);
                Some((sink, level))
            }
            ConsoleChoice::Stderr(level) => {
                let sink: SharedSink = Arc::new(Console::stderr());
                Some((sink, level))
            }
        };

        let owns_file = self.file.is_some();
        let router = LevelRouter::new(console, self.file);
        Logger::from_parts(self.name, SinkSet::new(router, self.format), owns_file)
    }
}

/// Rotating file settings; the file is opened (lazily) by [`FileBuilder::done`].
pub struct FileBuilder {
    parent: LoggerBuilder,
    path: PathBuf,
    level: Level,
    options: RotatingFileOptions,
}

impl FileBuilder {
    /// Lowest level written to the file. Defaults to `Info`.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Rotation trigger in bytes; `0` never rotates.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.options = self.options.limit(limit);
        self
    }

    /// Numbered backups kept; `0` deletes the file on rotation.
    #[must_use]
    pub const fn backups(mut self, backups: usize) -> Self {
        self.options = self.options.backups(backups);
        self
    }

    /// `0` writes straight through to the file.
    #[must_use]
    pub const fn buffer_size(mut self, size: usize) -> Self {
        self.options = self.options.buffer_size(size);
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: u32) -> Self {
        self.options = self.options.mode(mode);
        self
    }

    /// A file that cannot be set up is reported and left out; the logger still works
    /// with whatever console it has.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        match RotatingFile::open_with(&self.path, self.options) {
            Ok(file) => {
                let sink: SharedSink = Arc::new(file);
                self.parent.file = Some((sink, self.level));
            }
            Err(e) => internal::error(
                "LOGGER",
                &format!("Cannot log to {}: {e}", self.path.display()),
            ),
        }
        self.parent
    }
}
