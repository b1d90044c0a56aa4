use std::path::PathBuf;

use thiserror::Error;

/// Error surface for talking to the dictation daemon.
///
/// Malformed poll replies are not errors; they decode as idle.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Nothing exists at the socket path; the daemon was never started.
    #[error("daemon socket not found at {socket}")]
    SocketUnavailable { socket: PathBuf },

    /// The path exists but nothing accepts connections on it (stale socket).
    #[error("daemon not responding at {socket}: {source}")]
    ConnectionRejected {
        socket: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O fault while connecting or mid-exchange.
    #[error("transport failure on {socket}: {source}")]
    TransportFailure {
        socket: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    pub fn socket(&self) -> &std::path::Path {
        match self {
            ClientError::SocketUnavailable { socket }
            | ClientError::ConnectionRejected { socket, .. }
            | ClientError::TransportFailure { socket, .. } => socket,
        }
    }
}

pub(crate) fn transport_err(socket: impl Into<PathBuf>, source: std::io::Error) -> ClientError {
    ClientError::TransportFailure {
        socket: socket.into(),
        source,
    }
}
