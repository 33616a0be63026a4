//! Byte-level destinations a logger writes rendered lines into.
//!
//! The rotating file, the console (plain or color-decorated), syslog, and fan-out
//! combinations all satisfy the same `Sink` contract, so any of them can serve as a
//! logger's console or file destination.

mod console;
mod file;
#[cfg(unix)]
pub mod syslog;

pub use console::{ColorConsole, Console, Stream};
pub use file::{DEFAULT_BUFFER_SIZE, DEFAULT_LIMIT, DEFAULT_MODE, RotatingFile, RotatingFileOptions};

use std::io;
use std::sync::Arc;

/// `Send + Sync` so one sink can be shared by every logger derived from the same settings.
pub trait Sink: Send + Sync {
    /// Writes one rendered line (or any byte slice) and returns how many bytes were accepted.
    ///
    /// # Errors
    /// I/O errors from the underlying destination. Nothing is retried.
    fn write(&self, buf: &[u8]) -> io::Result<usize>;

    /// Pushes buffered bytes towards the destination.
    ///
    /// # Errors
    /// I/O errors from the underlying destination.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    /// Releases the destination's handle. Sinks that can reopen lazily stay usable.
    ///
    /// # Errors
    /// I/O errors raised while flushing or closing.
    fn close(&self) -> io::Result<()> {
        self.flush()
    }
}

/// Shared-ownership handle. Parent and derived loggers hold clones of the same sink.
pub type SharedSink = Arc<dyn Sink>;

/// Forwards every write to a fixed list of sinks.
///
/// All members see the slice even when an earlier one fails; the first failure is
/// reported back for status purposes only.
pub struct FanOut {
    sinks: Vec<SharedSink>,
}

impl FanOut {
    #[must_use]
    pub fn new(sinks: Vec<SharedSink>) -> Self {
        Self { sinks }
    }

    /// Number of member sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn each(&self, mut op: impl FnMut(&SharedSink) -> io::Result<()>) -> io::Result<()> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = op(sink) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl Sink for FanOut {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        self.each(|sink| {
            let n = sink.write(buf)?;
            if n < buf.len() {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "short write"));
            }
            Ok(())
        })?;
        Ok(buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        self.each(|sink| sink.flush())
    }

    fn close(&self) -> io::Result<()> {
        self.each(|sink| sink.close())
    }
}

/// Accepts and drops every byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl Sink for Discard {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        data: Mutex<Vec<u8>>,
        fail: bool,
    }

    impl Sink for Recorder {
        fn write(&self, buf: &[u8]) -> io::Result<usize> {
            if self.fail {
                return Err(io::Error::other("boom"));
            }
            self.data.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    struct Short;

    impl Sink for Short {
        fn write(&self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len() / 2)
        }
    }

    #[test]
    fn fan_out_forwards_to_every_member() {
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        let fan = FanOut::new(vec![a.clone(), b.clone()]);

        assert_eq!(fan.write(b"line\n").unwrap(), 5);
        assert_eq!(a.data.lock().unwrap().as_slice(), b"line\n");
        assert_eq!(b.data.lock().unwrap().as_slice(), b"line\n");
    }

    #[test]
    fn fan_out_keeps_going_after_a_failure() {
        let bad = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let good = Arc::new(Recorder::default());
        let fan = FanOut::new(vec![bad, good.clone()]);

        assert!(fan.write(b"x").is_err());
        assert_eq!(good.data.lock().unwrap().as_slice(), b"x");
    }

    #[test]
    fn fan_out_reports_short_writes() {
        let fan = FanOut::new(vec![Arc::new(Short)]);
        let err = fan.write(b"abcd").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    }

    #[test]
    fn discard_accepts_everything() {
        assert_eq!(Discard.write(b"gone").unwrap(), 4);
    }
}
