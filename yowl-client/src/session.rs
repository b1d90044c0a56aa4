use std::io::{ErrorKind, Read, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{transport_err, ClientError};
use crate::protocol::{decode_line, Command};

const READ_CHUNK: usize = 1024;

/// One connection to the daemon, used for a single request/response exchange
/// at a time. The stream is released on `close` or drop, whichever comes
/// first.
#[derive(Debug)]
pub struct Session {
    socket: PathBuf,
    stream: Option<UnixStream>,
}

impl Session {
    pub fn open(socket: &Path, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let stream = UnixStream::connect(socket).map_err(|err| classify_connect(socket, err))?;
        stream
            .set_read_timeout(timeout)
            .and_then(|()| stream.set_write_timeout(timeout))
            .map_err(|err| transport_err(socket, err))?;

        tracing::trace!(socket = %socket.display(), "connected to daemon");
        Ok(Self {
            socket: socket.to_path_buf(),
            stream: Some(stream),
        })
    }

    /// Send one command and read its reply line.
    ///
    /// Reads until a newline or until the daemon hangs up; in the latter case
    /// whatever arrived (possibly nothing) is the reply.
    pub fn send_and_receive(&mut self, command: Command) -> Result<String, ClientError> {
        let socket = &self.socket;
        let stream = self.stream.as_mut().ok_or_else(|| {
            transport_err(
                socket,
                std::io::Error::new(ErrorKind::NotConnected, "session is closed"),
            )
        })?;

        stream
            .write_all(&command.encode())
            .and_then(|()| stream.flush())
            .map_err(|err| transport_err(socket, err))?;

        let mut response = Vec::new();
        let mut chunk = [0u8; READ_CHUNK];
        while !response.contains(&b'\n') {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => response.extend_from_slice(&chunk[..read]),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(transport_err(socket, err)),
            }
        }

        let line = decode_line(&response).map_err(|err| transport_err(socket, err))?;
        tracing::debug!(command = %command, response = %line, "daemon exchange");
        Ok(line)
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Release the connection. Safe to call any number of times.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            // The peer may already be gone; the descriptor is freed on drop.
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

fn classify_connect(socket: &Path, err: std::io::Error) -> ClientError {
    match err.kind() {
        ErrorKind::NotFound => ClientError::SocketUnavailable {
            socket: socket.to_path_buf(),
        },
        ErrorKind::ConnectionRefused if !socket.exists() => ClientError::SocketUnavailable {
            socket: socket.to_path_buf(),
        },
        ErrorKind::ConnectionRefused => ClientError::ConnectionRejected {
            socket: socket.to_path_buf(),
            source: err,
        },
        _ => transport_err(socket, err),
    }
}
