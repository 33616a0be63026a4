//! Rotalog's own diagnostic logger: file open failures, rotation events, tolerated
//! rename errors.
//!
//! Uses `OnceLock` so the logger is built exactly once, on first use. It only ever
//! writes to standard error, so a diagnostic raised while rotating a file can never
//! feed back into that file.

use crate::level::Level;
use crate::logger::Logger;
use std::sync::OnceLock;

/// Environment variable holding the diagnostic threshold (a level name).
pub const ENV_VAR: &str = "ROTALOG_LOG";

const NAME: &str = "rotalog: ";

static INTERNAL_LOGGER: OnceLock<Logger> = OnceLock::new();

fn logger() -> &'static Logger {
    INTERNAL_LOGGER.get_or_init(|| Logger::stderr(NAME, threshold()))
}

/// `warn` unless `ROTALOG_LOG` says otherwise; unrecognized values mean `info`.
#[must_use]
pub fn threshold() -> Level {
    std::env::var(ENV_VAR).map_or(Level::Warn, |v| Level::parse_lenient(&v))
}

/// Whether diagnostics at `level` are currently printed.
#[must_use]
pub fn enabled(level: Level) -> bool {
    logger().is_enabled(level)
}

fn log(level: Level, scope: &str, msg: &str) {
    let _ = logger().output(level, format_args!("[{scope}] {msg}"));
}

/// Per-write events such as lazy file opens.
pub fn trace(scope: &str, msg: &str) {
    log(Level::Trace, scope, msg);
}

/// Construction details and rotation steps.
pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// Bad settings values that were replaced by defaults.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

/// A destination that could not be set up or a rotation that failed.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
