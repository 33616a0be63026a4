//! Tests for the syslog sink against sockets bound by the test itself.
#![cfg(unix)]

use rotalog::sink::syslog::{Facility, Priority, Severity, Syslog, Transport};
use rotalog::{Level, LineFormat, Logger};
use std::net::UdpSocket;
use std::os::unix::net::UnixDatagram;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

fn recv_unix(sock: &UnixDatagram) -> String {
    let mut buf = [0u8; 2048];
    let n = sock.recv(&mut buf).unwrap();
    String::from_utf8_lossy(&buf[..n]).into_owned()
}

#[test]
fn unix_socket_gets_local_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.sock");
    let server = UnixDatagram::bind(&path).unwrap();
    server
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    let priority = Priority::new(Facility::User, Severity::Info);
    let syslog = Syslog::dial(Transport::Unix(path), priority, "myapp").unwrap();

    assert_eq!(syslog.write(b"hello").unwrap(), 5);
    let msg = recv_unix(&server);

    assert!(msg.starts_with("<14>"), "{msg:?}");
    assert!(
        msg.ends_with(&format!(" myapp[{}]: hello\n", std::process::id())),
        "{msg:?}"
    );
    // "<14>Mmm dd hh:mm:ss " has no hostname field
    assert_eq!(msg.split(' ').filter(|s| !s.is_empty()).count(), 5);
}

#[test]
fn write_after_close_reconnects() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.sock");
    let server = UnixDatagram::bind(&path).unwrap();
    server
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    let priority = Priority::new(Facility::Local0, Severity::Err);
    let syslog = Syslog::dial(Transport::Unix(path), priority, "t").unwrap();
    syslog.close();

    syslog.write(b"again\n").unwrap();
    let msg = recv_unix(&server);
    assert!(msg.starts_with("<131>"), "{msg:?}");
    assert!(msg.ends_with("]: again\n"), "{msg:?}");
}

#[test]
fn udp_gets_network_format() {
    let server = UdpSocket::bind("127.0.0.1:0").unwrap();
    server
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    let addr = server.local_addr().unwrap().to_string();

    let priority = Priority::new(Facility::Daemon, Severity::Warning);
    let syslog = Syslog::dial(Transport::Udp(addr), priority, "netapp").unwrap();
    syslog.write(b"over the wire").unwrap();

    let mut buf = [0u8; 2048];
    let n = server.recv(&mut buf).unwrap();
    let msg = String::from_utf8_lossy(&buf[..n]);

    assert!(msg.starts_with("<28>"), "{msg:?}");
    let fields: Vec<_> = msg.splitn(4, ' ').collect();
    // <PRI>RFC3339 HOST TAG[PID]: MSG
    assert!(fields[0].contains('T'), "{msg:?}");
    assert!(!fields[1].is_empty());
    assert!(fields[2].starts_with("netapp["));
    assert_eq!(fields[3], "over the wire\n");
}

#[test]
fn dial_fails_without_listener() {
    let dir = tempdir().unwrap();
    let priority = Priority::new(Facility::User, Severity::Info);
    let result = Syslog::dial(Transport::Unix(dir.path().join("nobody")), priority, "x");
    assert!(matches!(result, Err(rotalog::Error::Io(_))));
}

#[test]
fn syslog_as_logger_destination() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.sock");
    let server = UnixDatagram::bind(&path).unwrap();
    server
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    let priority = Priority::new(Facility::User, Level::Error.severity());
    let syslog = Arc::new(Syslog::dial(Transport::Unix(path), priority, "svc").unwrap());
    let logger = Logger::builder()
        .console_sink(syslog, Level::Error)
        .format(LineFormat::new().timestamp(""))
        .build();

    logger.error("disk full");
    let msg = recv_unix(&server);
    assert!(msg.starts_with("<11>"), "{msg:?}");
    assert!(msg.ends_with("]: EROR disk full\n"), "{msg:?}");
}
