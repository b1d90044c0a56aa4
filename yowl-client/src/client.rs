use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ClientError;
use crate::paths::socket_path;
use crate::protocol::{decode_ping, decode_poll, Command, PollDelta};
use crate::session::Session;

/// High-level verbs against the daemon.
///
/// Every call opens its own [`Session`], performs exactly one exchange and
/// closes it again. There is no pooling and no retry.
#[derive(Debug, Clone)]
pub struct Client {
    socket: PathBuf,
    timeout: Option<Duration>,
}

impl Client {
    pub fn new(socket: impl Into<PathBuf>) -> Self {
        Self {
            socket: socket.into(),
            timeout: None,
        }
    }

    /// Client for the socket named by the environment (see [`socket_path`]).
    pub fn from_env() -> Self {
        Self::new(socket_path())
    }

    /// Bound every read and write of an exchange. A timeout surfaces as
    /// [`ClientError::TransportFailure`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn socket(&self) -> &Path {
        &self.socket
    }

    pub fn ping(&self) -> Result<bool, ClientError> {
        let line = self.exchange(Command::Ping)?;
        Ok(decode_ping(&line))
    }

    /// Ask the daemon to begin recording. Returns its literal status;
    /// anything other than [`STATUS_OK`](crate::protocol::STATUS_OK) is a
    /// refusal.
    pub fn start(&self) -> Result<String, ClientError> {
        self.exchange(Command::Start)
    }

    pub fn stop(&self) -> Result<String, ClientError> {
        self.exchange(Command::Stop)
    }

    pub fn poll(&self) -> Result<PollDelta, ClientError> {
        let line = self.exchange(Command::Poll)?;
        Ok(decode_poll(&line))
    }

    fn exchange(&self, command: Command) -> Result<String, ClientError> {
        let mut session = Session::open(&self.socket, self.timeout)?;
        let line = session.send_and_receive(command)?;
        session.close();
        Ok(line)
    }
}
