//! One-shot logging: every shell script needs a way to emit a single line.

use crate::internal;
use crate::level::Level;
use crate::logger::Logger;
use std::process::ExitCode;

/// Logs `words` joined by spaces. A filtered level is not a failure.
#[must_use]
pub fn cmd_log(logger: &Logger, level: Level, words: &[String]) -> ExitCode {
    match logger.output(level, format_args!("{}", words.join(" "))) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            internal::error("CLI", &format!("Write failed: {e}"));
            ExitCode::FAILURE
        }
    }
}
