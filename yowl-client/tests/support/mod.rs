#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tempfile::TempDir;

/// Daemon stand-in that answers one scripted reply per connection, recording
/// each request line. Replies are written verbatim, so a script entry without
/// `\n` exercises a peer that hangs up mid-line.
pub struct FakeDaemon {
    _dir: TempDir,
    socket: PathBuf,
    requests: Arc<Mutex<Vec<String>>>,
    handle: Option<JoinHandle<()>>,
}

impl FakeDaemon {
    pub fn spawn(replies: &[&str]) -> Self {
        let replies: Vec<&[u8]> = replies.iter().map(|r| r.as_bytes()).collect();
        Self::spawn_raw(&replies)
    }

    /// Like [`FakeDaemon::spawn`], for replies that are not valid UTF-8.
    pub fn spawn_raw(replies: &[&[u8]]) -> Self {
        let dir = TempDir::new().expect("socket dir");
        let socket = dir.path().join("yowl.sock");
        let listener = UnixListener::bind(&socket).expect("bind fake daemon");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let replies: Vec<Vec<u8>> = replies.iter().map(|r| r.to_vec()).collect();
        let seen = requests.clone();
        let handle = std::thread::spawn(move || {
            for reply in replies {
                let (stream, _) = listener.accept().expect("accept");
                let mut reader = BufReader::new(stream);
                let mut line = String::new();
                reader.read_line(&mut line).expect("read request");
                seen.lock().unwrap().push(line.trim_end().to_string());

                let mut stream = reader.into_inner();
                stream.write_all(&reply).expect("write reply");
            }
        });

        Self {
            _dir: dir,
            socket,
            requests,
            handle: Some(handle),
        }
    }

    pub fn socket(&self) -> &Path {
        &self.socket
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Wait for the script to finish and remove the socket, so later
    /// connects find nothing.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("fake daemon thread");
        }
        let _ = std::fs::remove_file(&self.socket);
    }
}
