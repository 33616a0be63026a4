//! Terminal destinations: plain stderr/stdout, and a decorator that paints each line
//! in its level's color.

use super::{SharedSink, Sink};
use crate::fmt::Color;
use crate::level::Level;
use std::io::{self, Write};
use std::sync::Arc;

/// Which standard stream a [`Console`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stream {
    #[default]
    Stderr,
    Stdout,
}

/// Process-wide standard stream. Each write takes the stream lock, so lines from
/// concurrent loggers never interleave.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    stream: Stream,
}

impl Console {
    #[must_use]
    pub const fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    #[must_use]
    pub const fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    #[must_use]
    pub const fn stream(&self) -> Stream {
        self.stream
    }
}

impl Sink for Console {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        match self.stream {
            Stream::Stderr => io::stderr().lock().write_all(buf)?,
            Stream::Stdout => io::stdout().lock().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        match self.stream {
            Stream::Stderr => io::stderr().flush(),
            Stream::Stdout => io::stdout().flush(),
        }
    }

    /// The standard streams outlive any logger.
    fn close(&self) -> io::Result<()> {
        self.flush()
    }
}

/// Wraps another sink and colors each line by the level tag found in it.
///
/// Lines without a recognizable tag, and levels without a palette entry, pass
/// through untouched.
pub struct ColorConsole {
    inner: SharedSink,
    palette: [Option<Color>; Level::COUNT],
}

impl ColorConsole {
    #[must_use]
    pub fn new(inner: SharedSink) -> Self {
        Self {
            inner,
            palette: Level::ALL.map(Color::for_level),
        }
    }

    /// Colored standard error, the usual console destination.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Arc::new(Console::stderr()))
    }

    /// Overrides (or with `None`, removes) one level's color.
    #[must_use]
    pub const fn level_color(mut self, level: Level, color: Option<Color>) -> Self {
        self.palette[level.rank()] = color;
        self
    }

    fn paint(&self, buf: &[u8]) -> Option<Vec<u8>> {
        let color = Level::detect(buf).and_then(|level| self.palette[level.rank()])?;
        let body = buf.trim_ascii_end();
        let fg = color.fg_ansi();

        let mut painted = Vec::with_capacity(fg.len() + body.len() + Color::RESET.len() + 1);
        painted.extend_from_slice(fg.as_bytes());
        painted.extend_from_slice(body);
        painted.extend_from_slice(Color::RESET.as_bytes());
        painted.push(b'\n');
        Some(painted)
    }
}

impl Sink for ColorConsole {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        match self.paint(buf) {
            Some(painted) => self.inner.write(&painted).map(|_| buf.len()),
            None => self.inner.write(buf),
        }
    }

    fn flush(&self) -> io::Result<()> {
        self.inner.flush()
    }

    fn close(&self) -> io::Result<()> {
        self.inner.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture(Mutex<Vec<u8>>);

    impl Sink for Capture {
        fn write(&self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    #[test]
    fn warn_lines_are_wrapped_in_yellow() {
        let capture = Arc::new(Capture::default());
        let console = ColorConsole::new(capture.clone());

        let n = console.write(b"2024/01/01 10:00:00 WARN disk low\n").unwrap();

        let expected = format!(
            "{}2024/01/01 10:00:00 WARN disk low{}\n",
            Color::yellow().fg_ansi(),
            Color::RESET
        );
        assert_eq!(n, 34);
        assert_eq!(capture.0.lock().unwrap().as_slice(), expected.as_bytes());
    }

    #[test]
    fn info_lines_pass_through() {
        let capture = Arc::new(Capture::default());
        let console = ColorConsole::new(capture.clone());

        console.write(b"INFO ready\n").unwrap();

        assert_eq!(capture.0.lock().unwrap().as_slice(), b"INFO ready\n");
    }

    #[test]
    fn palette_override_applies() {
        let capture = Arc::new(Capture::default());
        let console = ColorConsole::new(capture.clone()).level_color(Level::Warn, None);

        console.write(b"WARN plain\n").unwrap();

        assert_eq!(capture.0.lock().unwrap().as_slice(), b"WARN plain\n");
    }
}
