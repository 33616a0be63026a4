//! Turns another program's output into log lines: `make 2>&1 | rotalog pipe`.

use crate::internal;
use crate::level::Level;
use crate::logger::Logger;
use std::io::{self, Write};
use std::process::ExitCode;

#[must_use]
pub fn cmd_pipe(logger: &Logger, level: Level) -> ExitCode {
    let mut writer = logger.writer(level);
    let copied = io::copy(&mut io::stdin().lock(), &mut writer).and_then(|n| {
        writer.flush()?;
        Ok(n)
    });

    match copied {
        Ok(n) => {
            internal::debug("CLI", &format!("Piped {n} bytes"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            internal::error("CLI", &format!("Pipe failed: {e}"));
            ExitCode::FAILURE
        }
    }
}
