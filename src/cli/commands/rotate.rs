//! Forced rotation, e.g. from a cron job before archiving backups.

use crate::internal;
use crate::sink::RotatingFile;
use std::path::Path;
use std::process::ExitCode;

#[must_use]
pub fn cmd_rotate(path: &Path, backups: usize) -> ExitCode {
    let file = match RotatingFile::open(path) {
        Ok(file) => file,
        Err(e) => {
            internal::error("CLI", &format!("{e}"));
            return ExitCode::FAILURE;
        }
    };

    if !path.exists() {
        internal::warn("CLI", &format!("{} does not exist", path.display()));
        return ExitCode::SUCCESS;
    }

    match file.rotate(backups) {
        Ok(()) => {
            internal::info(
                "CLI",
                &format!("Rotated {} (keeping {backups})", path.display()),
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            internal::error("CLI", &format!("Rotation failed: {e}"));
            ExitCode::FAILURE
        }
    }
}
