//! `rotalog` binary: log a line, pipe stdin into a logger, or rotate a file.
//!
//! Usage:
//!   rotalog [options] log <level> <message>...
//!   rotalog [options] pipe [--level <level>]
//!   rotalog [options] rotate <path> [--backups <n>]

use clap::Parser;
use rotalog::Logger;
use rotalog::cli::{Cli, Command, cmd_log, cmd_pipe, cmd_rotate};
use rotalog::internal;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            internal::error("CLI", &format!("Error loading settings: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let logger = Logger::new(cli.name.as_str(), &settings);

    let code = match &cli.command {
        Command::Log { level, message } => cmd_log(&logger, (*level).into(), message),
        Command::Pipe { level } => cmd_pipe(&logger, (*level).into()),
        Command::Rotate { path, backups } => {
            cmd_rotate(path, backups.unwrap_or(settings.file.backup_count))
        }
    };

    if let Err(e) = logger.close() {
        internal::error("CLI", &format!("Close failed: {e}"));
        return ExitCode::FAILURE;
    }
    code
}
