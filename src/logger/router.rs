//! Per-level sink resolution.
//!
//! Every level is compared against the console and file thresholds once, at
//! construction. Dispatch is then a table lookup: an empty slot means the call is
//! filtered out, a slot meeting both thresholds holds a [`FanOut`] over both sinks.

use crate::level::Level;
use crate::sink::{FanOut, SharedSink};
use std::io;
use std::sync::Arc;

/// Which destinations a level reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destinations {
    None,
    Console,
    File,
    Both,
}

impl Destinations {
    #[must_use]
    pub const fn console(self) -> bool {
        matches!(self, Self::Console | Self::Both)
    }

    #[must_use]
    pub const fn file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }
}

/// A sink together with the lowest level it accepts.
#[derive(Clone)]
struct Route {
    sink: SharedSink,
    threshold: Level,
}

impl Route {
    fn accepts(&self, level: Level) -> bool {
        level >= self.threshold
    }
}

/// Resolved console/file sink set shared by a logger and everything derived from it.
#[derive(Clone)]
pub struct LevelRouter {
    console: Option<Route>,
    file: Option<Route>,
    table: [Option<SharedSink>; Level::COUNT],
}

impl LevelRouter {
    #[must_use]
    pub fn new(console: Option<(SharedSink, Level)>, file: Option<(SharedSink, Level)>) -> Self {
        let console = console.map(|(sink, threshold)| Route { sink, threshold });
        let file = file.map(|(sink, threshold)| Route { sink, threshold });

        let table = Level::ALL.map(|level| {
            let to_console = console.as_ref().filter(|r| r.accepts(level));
            let to_file = file.as_ref().filter(|r| r.accepts(level));
            match (to_console, to_file) {
                (Some(c), Some(f)) => {
                    let both: SharedSink =
                        Arc::new(FanOut::new(vec![c.sink.clone(), f.sink.clone()]));
                    Some(both)
                }
                (Some(only), None) | (None, Some(only)) => Some(only.sink.clone()),
                (None, None) => None,
            }
        });

        Self {
            console,
            file,
            table,
        }
    }

    /// Routes nothing; every call is a no-op.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(None, None)
    }

    /// The sink a call at `level` writes to, `None` when filtered out.
    #[must_use]
    pub fn route(&self, level: Level) -> Option<&SharedSink> {
        self.table[level.rank()].as_ref()
    }

    #[must_use]
    pub fn destinations(&self, level: Level) -> Destinations {
        let console = self.console.as_ref().is_some_and(|r| r.accepts(level));
        let file = self.file.as_ref().is_some_and(|r| r.accepts(level));
        match (console, file) {
            (true, true) => Destinations::Both,
            (true, false) => Destinations::Console,
            (false, true) => Destinations::File,
            (false, false) => Destinations::None,
        }
    }

    #[must_use]
    pub fn console(&self) -> Option<&SharedSink> {
        self.console.as_ref().map(|r| &r.sink)
    }

    #[must_use]
    pub fn file(&self) -> Option<&SharedSink> {
        self.file.as_ref().map(|r| &r.sink)
    }

    /// `None` when there is no console sink.
    #[must_use]
    pub fn console_level(&self) -> Option<Level> {
        self.console.as_ref().map(|r| r.threshold)
    }

    /// `None` when there is no file sink.
    #[must_use]
    pub fn file_level(&self) -> Option<Level> {
        self.file.as_ref().map(|r| r.threshold)
    }

    /// Flushes both sinks, reporting the first failure.
    ///
    /// # Errors
    /// I/O errors from either sink.
    pub fn flush(&self) -> io::Result<()> {
        let console = self.console().map_or(Ok(()), |s| s.flush());
        let file = self.file().map_or(Ok(()), |s| s.flush());
        console.and(file)
    }
}
