//! `io::Write` bridge: anything that writes text (a child process's output, a
//! library expecting a writer) becomes one log entry per line.

use super::Logger;
use crate::level::Level;
use std::io::{self, Write};
use std::panic::Location;

/// Buffers partial lines and logs each complete one at a fixed level.
///
/// A trailing partial line is logged on [`Write::flush`] or when the writer is dropped.
pub struct LevelWriter<'a> {
    logger: &'a Logger,
    level: Level,
    location: &'static Location<'static>,
    pending: Vec<u8>,
}

impl<'a> LevelWriter<'a> {
    pub(super) const fn new(
        logger: &'a Logger,
        level: Level,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            logger,
            level,
            location,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    fn emit(&self, line: &[u8]) -> io::Result<()> {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        self.logger
            .output_at(
                self.level,
                self.location,
                format_args!("{}", String::from_utf8_lossy(line)),
            )
            .map(drop)
    }
}

impl Write for LevelWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let Some(last_newline) = self.pending.iter().rposition(|&b| b == b'\n') else {
            return Ok(buf.len());
        };

        let complete: Vec<u8> = self.pending.drain(..=last_newline).collect();
        for line in complete[..last_newline].split(|&b| b == b'\n') {
            self.emit(line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.logger.flush()
    }
}

impl Drop for LevelWriter<'_> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::LineFormat;
    use crate::logger::{LevelRouter, SinkSet};
    use crate::sink::Sink;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Capture(Mutex<Vec<u8>>);

    impl Sink for Capture {
        fn write(&self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    fn logger() -> (Logger, Arc<Capture>) {
        let capture = Arc::new(Capture::default());
        let sinks = SinkSet::new(
            LevelRouter::new(Some((capture.clone(), Level::Debug)), None),
            LineFormat::new().timestamp(""),
        );
        (Logger::from_parts("sub: ".to_string(), sinks, false), capture)
    }

    #[test]
    fn splits_writes_into_lines() {
        let (logger, capture) = logger();
        let mut writer = logger.writer(Level::Warn);

        writer.write_all(b"first\nsec").unwrap();
        writer.write_all(b"ond\r\nthi").unwrap();
        assert_eq!(
            capture.0.lock().unwrap().as_slice(),
            b"WARN sub: first\nWARN sub: second\n"
        );

        drop(writer);
        assert!(capture.0.lock().unwrap().ends_with(b"WARN sub: thi\n"));
    }

    #[test]
    fn blank_lines_are_kept() {
        let (logger, capture) = logger();
        let mut writer = logger.writer(Level::Info);

        writer.write_all(b"a\n\nb\n").unwrap();

        assert_eq!(
            capture.0.lock().unwrap().as_slice(),
            b"INFO sub: a\nINFO sub: \nINFO sub: b\n"
        );
    }
}
