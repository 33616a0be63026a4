//! `rotalog` - leveled logging with console/file routing and size-rotated log files.
//!
//! - Six ordered levels (debug, trace, info, warn, error, fatal)
//! - Independent console and file thresholds, resolved once per logger
//! - Buffered log file that rotates into numbered backups past a size limit
//! - Derived loggers that share sinks and differ only in name
//! - A process-wide logger with explicit init and teardown
//! - Optional ANSI colors and a Unix syslog sink
//!
//! # Example
//!
//! ```no_run
//! use rotalog::{Level, Logger, infof};
//!
//! let logger = Logger::builder()
//!     .name("app: ")
//!     .console(Level::Warn)
//!         .colors(true)
//!     .file("app.log")
//!         .level(Level::Debug)
//!         .limit(10 * 1024 * 1024)
//!         .backups(7)
//!         .done()
//!     .build();
//!
//! logger.info("started");
//! infof!(logger, "listening on {}", 8080);
//!
//! let net = logger.with_name("net: ");
//! net.warnln(&[&"retrying in", &5, &"seconds"]);
//!
//! logger.close().ok();
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `rotalog` command-line front end

pub mod config;
pub mod fmt;
pub mod global;
pub mod internal;
pub mod level;
pub mod logger;
pub mod sink;

mod error;
mod macros;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::Settings;
pub use error::Error;
pub use fmt::{Caller, Color, LineFormat};
pub use level::{Level, ParseLevelError};
pub use logger::{Destinations, LevelWriter, Logger, LoggerBuilder};
pub use sink::{FanOut, RotatingFile, RotatingFileOptions, SharedSink, Sink};
