//! Process-wide logger.
//!
//! Exists from first use as an uncolored stderr logger at `info`. Bootstrap code
//! swaps a fully built logger in with [`init`] and tears it down with [`close`];
//! both swaps happen under the logger's own lock, so concurrent callers see either
//! the old sink set or the new one.

use crate::level::Level;
use crate::logger::Logger;
use std::fmt::Display;
use std::io;
use std::sync::LazyLock;

static GLOBAL: LazyLock<Logger> = LazyLock::new(default_logger);

fn default_logger() -> Logger {
    Logger::stderr("", Level::Info)
}

#[must_use]
pub fn logger() -> &'static Logger {
    &GLOBAL
}

/// Routes the global logger through `logger`'s sinks. The global takes over
/// closing `logger`'s file.
pub fn init(logger: &Logger) {
    GLOBAL.replace_from(logger);
}

/// Closes the global's file (if it owns one) and goes back to the stderr default.
///
/// # Errors
/// Flush or close failures of the sinks being released.
pub fn close() -> io::Result<()> {
    GLOBAL.reset_from(&default_logger())
}

#[track_caller]
pub fn debug(msg: impl Display) {
    GLOBAL.debug(msg);
}

#[track_caller]
pub fn trace(msg: impl Display) {
    GLOBAL.trace(msg);
}

#[track_caller]
pub fn info(msg: impl Display) {
    GLOBAL.info(msg);
}

#[track_caller]
pub fn warn(msg: impl Display) {
    GLOBAL.warn(msg);
}

#[track_caller]
pub fn error(msg: impl Display) {
    GLOBAL.error(msg);
}

/// Also closes the global's file; see [`Logger::fatal`].
#[track_caller]
pub fn fatal(msg: impl Display) {
    GLOBAL.fatal(msg);
}
