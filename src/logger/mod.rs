//! Named front end over a resolved sink set.
//!
//! A [`Logger`] holds its name plus a shared handle to a [`SinkSet`]: the level
//! router and the line format. Loggers derived with [`Logger::with_name`] clone the
//! handle, so they write through the very same sinks. Closing and replacing are two
//! explicit operations on the handle: `close` detaches this logger and releases the
//! file it owns, `replace_from` swaps in another logger's sinks wholesale.

mod builder;
mod from_settings;
mod router;
mod writer;

pub use builder::{FileBuilder, LoggerBuilder};
pub use router::{Destinations, LevelRouter};
pub use writer::LevelWriter;

use crate::fmt::LineFormat;
use crate::internal;
use crate::level::Level;
use crate::sink::{Console, SharedSink};
use std::borrow::Cow;
use std::fmt::{self, Display, Write as _};
use std::io;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

/// Everything a logger and its derived loggers share.
pub struct SinkSet {
    router: LevelRouter,
    format: LineFormat,
}

impl SinkSet {
    #[must_use]
    pub const fn new(router: LevelRouter, format: LineFormat) -> Self {
        Self { router, format }
    }

    #[must_use]
    pub const fn router(&self) -> &LevelRouter {
        &self.router
    }

    #[must_use]
    pub const fn format(&self) -> &LineFormat {
        &self.format
    }

    /// Flushes both destinations, then closes the file sink if the caller owns it.
    fn release(&self, owns_file: bool) -> io::Result<()> {
        let flushed = self.router.flush();
        let closed = match self.router.file() {
            Some(file) if owns_file => file.close(),
            _ => Ok(()),
        };
        flushed.and(closed)
    }
}

/// Leveled logger writing to a console sink, a file sink, or both.
///
/// All methods take `&self`; a logger is meant to be shared across threads.
pub struct Logger {
    name: String,
    sinks: RwLock<Option<Arc<SinkSet>>>,
    /// Whether `close` on this logger closes the file sink.
    owns_file: AtomicBool,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) fn from_parts(name: String, sinks: SinkSet, owns_file: bool) -> Self {
        Self {
            name,
            sinks: RwLock::new(Some(Arc::new(sinks))),
            owns_file: AtomicBool::new(owns_file),
        }
    }

    /// Single uncolored stderr sink for every level at or above `level`.
    #[must_use]
    pub fn stderr(name: impl Into<String>, level: Level) -> Self {
        let console: SharedSink = Arc::new(Console::stderr());
        Self::from_parts(
            name.into(),
            SinkSet::new(
                LevelRouter::new(Some((console, level)), None),
                LineFormat::default(),
            ),
            false,
        )
    }

    fn lock(&self) -> RwLockWriteGuard<'_, Option<Arc<SinkSet>>> {
        self.sinks.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current sink set, `None` once closed.
    #[must_use]
    pub fn sinks(&self) -> Option<Arc<SinkSet>> {
        self.sinks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Formats and writes one line at `level`.
    ///
    /// Returns `Ok(false)` when the level is not routed anywhere (or the logger is
    /// closed) and `Ok(true)` once the line was handed to its sink(s). A fatal
    /// line additionally flushes and closes the owned file afterwards.
    ///
    /// # Errors
    /// The first error reported by the sink(s). It is informational: nothing is retried.
    #[track_caller]
    pub fn output(&self, level: Level, args: fmt::Arguments<'_>) -> io::Result<bool> {
        self.output_at(level, Location::caller(), args)
    }

    pub(crate) fn output_at(
        &self,
        level: Level,
        location: &Location<'_>,
        args: fmt::Arguments<'_>,
    ) -> io::Result<bool> {
        let written = self.dispatch(level, location, args);

        if level == Level::Fatal
            && let Some(sinks) = self.sinks()
            && let Err(e) = sinks.release(self.owns_file.load(Ordering::Acquire))
        {
            internal::debug("LOGGER", &format!("Release after fatal failed: {e}"));
        }

        written
    }

    fn dispatch(
        &self,
        level: Level,
        location: &Location<'_>,
        args: fmt::Arguments<'_>,
    ) -> io::Result<bool> {
        let Some(sinks) = self.sinks() else {
            return Ok(false);
        };
        let Some(sink) = sinks.router.route(level) else {
            return Ok(false);
        };

        let body = args
            .as_str()
            .map_or_else(|| Cow::Owned(args.to_string()), Cow::Borrowed);
        let line = sinks.format.render(level, &self.name, location, &body);
        sink.write(line.as_bytes())?;
        Ok(true)
    }

    /// Print style at an explicit level.
    #[track_caller]
    pub fn log(&self, level: Level, msg: impl Display) {
        let _ = self.output(level, format_args!("{msg}"));
    }

    #[track_caller]
    pub fn debug(&self, msg: impl Display) {
        let _ = self.output(Level::Debug, format_args!("{msg}"));
    }

    #[track_caller]
    pub fn trace(&self, msg: impl Display) {
        let _ = self.output(Level::Trace, format_args!("{msg}"));
    }

    #[track_caller]
    pub fn info(&self, msg: impl Display) {
        let _ = self.output(Level::Info, format_args!("{msg}"));
    }

    #[track_caller]
    pub fn warn(&self, msg: impl Display) {
        let _ = self.output(Level::Warn, format_args!("{msg}"));
    }

    #[track_caller]
    pub fn error(&self, msg: impl Display) {
        let _ = self.output(Level::Error, format_args!("{msg}"));
    }

    /// Writes the line, then flushes and closes the owned file sink.
    /// The process keeps running; exiting is up to the caller.
    #[track_caller]
    pub fn fatal(&self, msg: impl Display) {
        let _ = self.output(Level::Fatal, format_args!("{msg}"));
    }

    /// Println style: values separated by single spaces.
    #[track_caller]
    pub fn debugln(&self, values: &[&dyn Display]) {
        let _ = self.output(Level::Debug, format_args!("{}", join(values)));
    }

    #[track_caller]
    pub fn traceln(&self, values: &[&dyn Display]) {
        let _ = self.output(Level::Trace, format_args!("{}", join(values)));
    }

    #[track_caller]
    pub fn infoln(&self, values: &[&dyn Display]) {
        let _ = self.output(Level::Info, format_args!("{}", join(values)));
    }

    #[track_caller]
    pub fn warnln(&self, values: &[&dyn Display]) {
        let _ = self.output(Level::Warn, format_args!("{}", join(values)));
    }

    #[track_caller]
    pub fn errorln(&self, values: &[&dyn Display]) {
        let _ = self.output(Level::Error, format_args!("{}", join(values)));
    }

    #[track_caller]
    pub fn fatalln(&self, values: &[&dyn Display]) {
        let _ = self.output(Level::Fatal, format_args!("{}", join(values)));
    }

    /// Printf style; usually reached through [`debugf!`](crate::debugf).
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        let _ = self.output(Level::Debug, args);
    }

    #[track_caller]
    pub fn tracef(&self, args: fmt::Arguments<'_>) {
        let _ = self.output(Level::Trace, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        let _ = self.output(Level::Info, args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        let _ = self.output(Level::Warn, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        let _ = self.output(Level::Error, args);
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        let _ = self.output(Level::Fatal, args);
    }

    /// A logger writing through the same sinks under a different name.
    ///
    /// The derived logger never owns the file: closing it only detaches it, while
    /// closing `self` leaves it writing to a file that reopens on its next write.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sinks: RwLock::new(self.sinks()),
            owns_file: AtomicBool::new(false),
        }
    }

    /// Flushes the sinks, closes the file sink if this logger owns it, and detaches
    /// this logger so later calls are no-ops. Calling it again does nothing.
    ///
    /// # Errors
    /// Flush or close failures. The logger is detached regardless.
    pub fn close(&self) -> io::Result<()> {
        let previous = self.lock().take();
        let owned = self.owns_file.swap(false, Ordering::AcqRel);
        previous.map_or(Ok(()), |sinks| sinks.release(owned))
    }

    /// Swaps in `other`'s sink set and takes over responsibility for closing its file.
    ///
    /// The name is kept. `other` keeps writing through the same sinks but no longer
    /// closes the file. The sinks this logger used before are flushed, not closed.
    pub fn replace_from(&self, other: &Self) {
        if std::ptr::eq(self, other) {
            return;
        }
        let (previous, _) = self.swap_from(other);
        if let Some(previous) = previous
            && let Err(e) = previous.router.flush()
        {
            internal::debug("LOGGER", &format!("Flush of replaced sinks failed: {e}"));
        }
    }

    /// Like [`Logger::replace_from`], but releases the previous sinks as `close` would.
    pub(crate) fn reset_from(&self, other: &Self) -> io::Result<()> {
        if std::ptr::eq(self, other) {
            return Ok(());
        }
        let (previous, owned) = self.swap_from(other);
        previous.map_or(Ok(()), |sinks| sinks.release(owned))
    }

    fn swap_from(&self, other: &Self) -> (Option<Arc<SinkSet>>, bool) {
        let incoming = other.sinks();
        let owns = other.owns_file.swap(false, Ordering::AcqRel);

        let mut slot = self.lock();
        let previous = std::mem::replace(&mut *slot, incoming);
        let owned = self.owns_file.swap(owns, Ordering::AcqRel);
        drop(slot);

        (previous, owned)
    }

    /// # Errors
    /// I/O errors from either sink.
    pub fn flush(&self) -> io::Result<()> {
        self.sinks().map_or(Ok(()), |sinks| sinks.router.flush())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` without a console sink or once closed.
    #[must_use]
    pub fn console_level(&self) -> Option<Level> {
        self.sinks().and_then(|s| s.router.console_level())
    }

    /// `None` without a file sink or once closed.
    #[must_use]
    pub fn file_level(&self) -> Option<Level> {
        self.sinks().and_then(|s| s.router.file_level())
    }

    #[must_use]
    pub fn destinations(&self, level: Level) -> Destinations {
        self.sinks()
            .map_or(Destinations::None, |s| s.router.destinations(level))
    }

    /// Whether a call at `level` would write anything.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.destinations(level) != Destinations::None
    }

    #[must_use]
    pub fn file_sink(&self) -> Option<SharedSink> {
        self.sinks().and_then(|s| s.router.file().cloned())
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sinks().is_none()
    }

    #[must_use]
    pub fn owns_file(&self) -> bool {
        self.owns_file.load(Ordering::Acquire)
    }

    /// `io::Write` adapter logging every written line at `level`.
    #[must_use]
    #[track_caller]
    pub fn writer(&self, level: Level) -> LevelWriter<'_> {
        LevelWriter::new(self, level, Location::caller())
    }
}

fn join(values: &[&dyn Display]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{value}");
    }
    out
}
