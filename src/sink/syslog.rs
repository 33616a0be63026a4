//! Minimal syslog client: priority-tagged lines over a Unix socket, UDP or TCP.
//!
//! Each write makes one attempt on the current connection; when that fails the
//! connection is re-established once and the line is sent again. Nothing else is
//! retried.

use super::Sink;
use crate::Error;
use crate::level::Level;
use chrono::{Local, SecondsFormat};
use std::fs;
use std::io::{self, Write};
use std::net::{TcpStream, ToSocketAddrs, UdpSocket};
use std::os::unix::net::{UnixDatagram, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Sockets a local syslog daemon usually listens on.
const LOCAL_SOCKETS: &[&str] = &["/dev/log", "/var/run/syslog", "/var/run/log"];

const SEVERITY_MASK: u16 = 0x07;
const FACILITY_MASK: u16 = 0xf8;

/// Message severity, the low three bits of a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum Severity {
    Emerg = 0,
    Alert = 1,
    Crit = 2,
    Err = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

/// Message source, the high bits of a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Facility {
    Kern = 0,
    User = 1 << 3,
    Mail = 2 << 3,
    Daemon = 3 << 3,
    Auth = 4 << 3,
    Syslog = 5 << 3,
    Lpr = 6 << 3,
    News = 7 << 3,
    Uucp = 8 << 3,
    Cron = 9 << 3,
    Authpriv = 10 << 3,
    Ftp = 11 << 3,
    Local0 = 16 << 3,
    Local1 = 17 << 3,
    Local2 = 18 << 3,
    Local3 = 19 << 3,
    Local4 = 20 << 3,
    Local5 = 21 << 3,
    Local6 = 22 << 3,
    Local7 = 23 << 3,
}

/// Facility combined with severity, as written between the angle brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Priority(u16);

impl Priority {
    #[must_use]
    pub const fn new(facility: Facility, severity: Severity) -> Self {
        Self(facility as u16 | severity as u16)
    }

    /// # Errors
    /// `Error::InvalidPriority` above `Local7 | Debug`.
    pub fn from_raw(raw: u16) -> Result<Self, Error> {
        if raw > Facility::Local7 as u16 | Severity::Debug as u16 {
            return Err(Error::InvalidPriority(raw));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Same facility, different severity.
    #[must_use]
    pub const fn with_severity(self, severity: Severity) -> Self {
        Self((self.0 & FACILITY_MASK) | (severity as u16 & SEVERITY_MASK))
    }
}

impl Level {
    /// Severity for a per-level syslog sink. Fatal maps to `Crit`.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Debug | Self::Trace => Severity::Debug,
            Self::Info => Severity::Info,
            Self::Warn => Severity::Warning,
            Self::Error => Severity::Err,
            Self::Fatal => Severity::Crit,
        }
    }
}

/// Where [`Syslog::dial`] connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// `host:port`.
    Udp(String),
    /// `host:port`.
    Tcp(String),
    /// Datagram socket first, stream socket as fallback.
    Unix(PathBuf),
}

#[derive(Debug, Clone)]
enum Target {
    Local,
    Remote(Transport),
}

#[derive(Debug)]
enum Conn {
    Datagram(UnixDatagram),
    Stream(UnixStream),
    Udp(UdpSocket),
    Tcp(TcpStream),
}

impl Conn {
    fn unix(path: &Path) -> io::Result<Self> {
        let datagram = UnixDatagram::unbound().and_then(|sock| sock.connect(path).map(|()| sock));
        match datagram {
            Ok(sock) => Ok(Self::Datagram(sock)),
            Err(_) => UnixStream::connect(path).map(Self::Stream),
        }
    }

    fn udp(addr: &str) -> io::Result<Self> {
        let remote = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no address"))?;
        let bind = if remote.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let sock = UdpSocket::bind(bind)?;
        sock.connect(remote)?;
        Ok(Self::Udp(sock))
    }

    /// Unix sockets get the short local format without a hostname.
    const fn is_local(&self) -> bool {
        matches!(self, Self::Datagram(_) | Self::Stream(_))
    }

    fn send(&mut self, data: &[u8]) -> io::Result<()> {
        match self {
            Self::Datagram(sock) => sock.send(data).map(drop),
            Self::Udp(sock) => sock.send(data).map(drop),
            Self::Stream(sock) => sock.write_all(data),
            Self::Tcp(sock) => sock.write_all(data),
        }
    }

    fn local_addr(&self) -> Option<String> {
        match self {
            Self::Udp(sock) => sock.local_addr().ok().map(|a| a.to_string()),
            Self::Tcp(sock) => sock.local_addr().ok().map(|a| a.to_string()),
            Self::Datagram(_) | Self::Stream(_) => None,
        }
    }
}

/// Connection to a syslog daemon, usable as a logger destination.
#[derive(Debug)]
pub struct Syslog {
    priority: Priority,
    tag: String,
    hostname: String,
    target: Target,
    conn: Mutex<Option<Conn>>,
}

impl Syslog {
    /// Connects to the local daemon through the first socket that accepts.
    ///
    /// An empty `tag` means the executable name.
    ///
    /// # Errors
    /// `Error::Io` when no local syslog socket is reachable.
    pub fn local(priority: Priority, tag: &str) -> Result<Self, Error> {
        Self::connect(Target::Local, priority, tag)
    }

    /// Connects to a daemon over the given transport.
    ///
    /// # Errors
    /// `Error::Io` when the address cannot be resolved or connected.
    pub fn dial(transport: Transport, priority: Priority, tag: &str) -> Result<Self, Error> {
        Self::connect(Target::Remote(transport), priority, tag)
    }

    fn connect(target: Target, priority: Priority, tag: &str) -> Result<Self, Error> {
        let conn = open(&target)?;
        let hostname = if conn.is_local() {
            "localhost".to_string()
        } else {
            hostname().or_else(|| conn.local_addr()).unwrap_or_default()
        };
        let tag = if tag.is_empty() {
            crate::config::executable_stem()
        } else {
            tag.to_string()
        };

        Ok(Self {
            priority,
            tag,
            hostname,
            target,
            conn: Mutex::new(Some(conn)),
        })
    }

    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Sends one message, reconnecting once if the current connection fails.
    ///
    /// Returns the length of `buf`, not the number of bytes on the wire.
    ///
    /// # Errors
    /// The reconnect or the retried send failed.
    pub fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let mut conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(current) = conn.as_mut() {
            let framed = self.frame(current.is_local(), &msg);
            if current.send(&framed).is_ok() {
                return Ok(buf.len());
            }
        }

        *conn = None;
        let fresh = conn.insert(open(&self.target)?);
        let framed = self.frame(fresh.is_local(), &msg);
        fresh.send(&framed)?;
        Ok(buf.len())
    }

    /// `<PRI>Mmm dd hh:mm:ss TAG[PID]: MSG` locally, with an RFC 3339 stamp and the
    /// hostname over the network.
    fn frame(&self, local: bool, msg: &str) -> Vec<u8> {
        let nl = if msg.ends_with('\n') { "" } else { "\n" };
        let pid = std::process::id();
        let pri = self.priority.raw();
        let now = Local::now();

        let framed = if local {
            format!(
                "<{pri}>{} {}[{pid}]: {msg}{nl}",
                now.format("%b %e %H:%M:%S"),
                self.tag
            )
        } else {
            format!(
                "<{pri}>{} {} {}[{pid}]: {msg}{nl}",
                now.to_rfc3339_opts(SecondsFormat::Secs, true),
                self.hostname,
                self.tag
            )
        };
        framed.into_bytes()
    }

    /// Drops the connection. The next write reconnects.
    pub fn close(&self) {
        self.conn
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

fn open(target: &Target) -> io::Result<Conn> {
    match target {
        Target::Local => LOCAL_SOCKETS
            .iter()
            .find_map(|path| Conn::unix(Path::new(path)).ok())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no local syslog socket")),
        Target::Remote(Transport::Unix(path)) => Conn::unix(path),
        Target::Remote(Transport::Udp(addr)) => Conn::udp(addr),
        Target::Remote(Transport::Tcp(addr)) => TcpStream::connect(addr).map(Conn::Tcp),
    }
}

fn hostname() -> Option<String> {
    ["/proc/sys/kernel/hostname", "/etc/hostname"]
        .iter()
        .find_map(|path| fs::read_to_string(path).ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

impl Sink for Syslog {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        Self::write(self, buf)
    }

    fn close(&self) -> io::Result<()> {
        Self::close(self);
        Ok(())
    }
}
