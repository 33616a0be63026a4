//! Severity levels that gate which messages reach which sinks.

use std::fmt;
use std::str::FromStr;

/// Ordered by rank so the router can compare a call's level against each sink's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Development diagnostics.
    Debug = 0,
    /// Fine-grained flow tracing, one step above debug.
    Trace = 1,
    /// Normal operational milestones.
    #[default]
    Info = 2,
    /// Non-fatal anomalies that may need attention.
    Warn = 3,
    /// Failures that prevent an operation from completing.
    Error = 4,
    /// Emitted right before the logger releases its file sink on an exit path.
    Fatal = 5,
}

impl Level {
    /// Size of per-level lookup tables.
    pub const COUNT: usize = 6;

    /// Every level in rank order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Debug,
        Self::Trace,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Integer rank used for threshold comparison and table indexing (lower = more verbose).
    #[must_use]
    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Inverse of [`Level::rank`].
    #[must_use]
    pub const fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Self::Debug),
            1 => Some(Self::Trace),
            2 => Some(Self::Info),
            3 => Some(Self::Warn),
            4 => Some(Self::Error),
            5 => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Fixed tag written into every log line.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Debug => "DEBG",
            Self::Trace => "TRAC",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "EROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Lowercase because settings files and CLI args use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Settings never fail on a bad level string; anything unrecognized means `Info`.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Info)
    }

    /// Finds the level whose tag (followed by a space) appears first in a rendered line.
    ///
    /// The tag always precedes the message body, so the earliest match is the line's own
    /// tag even when the message happens to quote another one.
    #[must_use]
    pub fn detect(line: &[u8]) -> Option<Self> {
        Self::ALL
            .iter()
            .filter_map(|level| {
                let tag = level.tag().as_bytes();
                line.windows(tag.len() + 1)
                    .position(|w| w.starts_with(tag) && w[tag.len()] == b' ')
                    .map(|pos| (pos, *level))
            })
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, level)| level)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_matches([' ', '\r', '\n']).to_lowercase().as_str() {
            "debug" | "debg" => Ok(Self::Debug),
            "trace" | "trac" => Ok(Self::Trace),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" | "eror" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
