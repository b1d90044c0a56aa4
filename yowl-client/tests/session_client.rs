mod support;

use std::os::unix::net::UnixListener;
use std::time::Duration;

use support::FakeDaemon;
use tempfile::TempDir;
use yowl_client::{Client, ClientError, Command, PollDelta, Session};

#[test]
fn ping_is_true_only_for_exact_pong() {
    let daemon = FakeDaemon::spawn(&["PONG\n", "PONG extra\n", "\n"]);
    let client = Client::new(daemon.socket());

    assert!(client.ping().expect("ping"));
    assert!(!client.ping().expect("ping with trailing text"));
    assert!(!client.ping().expect("empty ping reply"));
    assert_eq!(daemon.requests(), vec!["PING", "PING", "PING"]);
}

#[test]
fn start_and_stop_return_literal_status() {
    let daemon = FakeDaemon::spawn(&["OK\n", "ERROR not recording\n"]);
    let client = Client::new(daemon.socket());

    assert_eq!(client.start().expect("start"), "OK");
    assert_eq!(client.stop().expect("stop"), "ERROR not recording");
    assert_eq!(daemon.requests(), vec!["START", "STOP"]);
}

#[test]
fn poll_decodes_recording_and_idle() {
    let daemon = FakeDaemon::spawn(&["RECORDING:2:at 10:30\n", "IDLE:\n", "garbage\n"]);
    let client = Client::new(daemon.socket());

    assert_eq!(
        client.poll().expect("poll"),
        PollDelta::recording(2, "at 10:30")
    );
    assert_eq!(client.poll().expect("poll"), PollDelta::idle());
    assert_eq!(client.poll().expect("poll"), PollDelta::idle());
}

#[test]
fn reply_cut_short_by_hangup_is_returned_as_is() {
    let daemon = FakeDaemon::spawn(&["PON", ""]);
    let client = Client::new(daemon.socket());

    assert!(!client.ping().expect("partial reply"));
    assert_eq!(client.start().expect("empty reply"), "");
}

#[test]
fn missing_socket_is_unavailable() {
    let dir = TempDir::new().expect("dir");
    let client = Client::new(dir.path().join("absent.sock"));

    match client.ping() {
        Err(ClientError::SocketUnavailable { socket }) => {
            assert!(socket.ends_with("absent.sock"));
        }
        other => panic!("expected SocketUnavailable, got {other:?}"),
    }
}

#[test]
fn stale_socket_is_rejected() {
    let dir = TempDir::new().expect("dir");
    let path = dir.path().join("stale.sock");
    // Binding then dropping leaves the socket file with nobody listening.
    drop(UnixListener::bind(&path).expect("bind"));
    assert!(path.exists());

    let client = Client::new(&path);
    match client.start() {
        Err(ClientError::ConnectionRejected { .. }) => {}
        other => panic!("expected ConnectionRejected, got {other:?}"),
    }
}

#[test]
fn silent_daemon_times_out_as_transport_failure() {
    let dir = TempDir::new().expect("dir");
    let path = dir.path().join("mute.sock");
    // Connections queue in the backlog but are never answered.
    let _listener = UnixListener::bind(&path).expect("bind");

    let client = Client::new(&path).with_timeout(Duration::from_millis(50));
    match client.poll() {
        Err(err @ ClientError::TransportFailure { .. }) => assert_eq!(err.socket(), path),
        other => panic!("expected TransportFailure, got {other:?}"),
    }
}

#[test]
fn session_close_is_idempotent_and_blocks_further_use() {
    let daemon = FakeDaemon::spawn(&["PONG\n"]);
    let mut session = Session::open(daemon.socket(), None).expect("open");

    assert_eq!(
        session.send_and_receive(Command::Ping).expect("ping"),
        "PONG"
    );
    assert!(session.is_open());

    session.close();
    session.close();
    assert!(!session.is_open());

    match session.send_and_receive(Command::Ping) {
        Err(ClientError::TransportFailure { source, .. }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::NotConnected);
        }
        other => panic!("expected TransportFailure, got {other:?}"),
    }
}

#[test]
fn non_utf8_ping_reply_is_transport_failure() {
    let replies: [&[u8]; 1] = [b"PO\xffNG\n"];
    let daemon = FakeDaemon::spawn_raw(&replies);
    let client = Client::new(daemon.socket());

    match client.ping() {
        Err(ClientError::TransportFailure { source, .. }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
        }
        other => panic!("expected TransportFailure, got {other:?}"),
    }
}
