//! Line protocol spoken with the daemon.
//!
//! Requests are a bare verb followed by `\n`. Replies are a single
//! newline-terminated UTF-8 line:
//!
//! ```text
//! PING  -> PONG
//! START -> OK | <failure text>
//! STOP  -> OK | <failure text>
//! POLL  -> IDLE: | RECORDING:<backspaces>:<text>
//! ```

use std::fmt;
use std::io;

use serde::Serialize;

/// Status the daemon answers to an accepted `START` or `STOP`.
pub const STATUS_OK: &str = "OK";

const PONG: &str = "PONG";
const IDLE_PREFIX: &str = "IDLE:";
const RECORDING_PREFIX: &str = "RECORDING:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Start,
    Stop,
    Poll,
}

impl Command {
    pub fn verb(self) -> &'static str {
        match self {
            Command::Ping => "PING",
            Command::Start => "START",
            Command::Stop => "STOP",
            Command::Poll => "POLL",
        }
    }

    /// Wire form of the request, terminator included.
    pub fn encode(self) -> Vec<u8> {
        format!("{}\n", self.verb()).into_bytes()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    Idle,
    Recording,
}

/// One drained transcription delta.
///
/// The consumer erases `backspace_count` previously emitted characters and
/// then appends `text`. An idle delta always has a zero count and empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollDelta {
    is_recording: bool,
    backspace_count: usize,
    text: String,
}

impl PollDelta {
    pub fn idle() -> Self {
        Self {
            is_recording: false,
            backspace_count: 0,
            text: String::new(),
        }
    }

    pub fn recording(backspace_count: usize, text: impl Into<String>) -> Self {
        Self {
            is_recording: true,
            backspace_count,
            text: text.into(),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn backspace_count(&self) -> usize {
        self.backspace_count
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> RecordingState {
        if self.is_recording {
            RecordingState::Recording
        } else {
            RecordingState::Idle
        }
    }

    /// True when applying this delta would not change the sink.
    pub fn is_empty(&self) -> bool {
        self.backspace_count == 0 && self.text.is_empty()
    }
}

/// Turn raw reply bytes into a line: everything up to the first `\n`, with a
/// trailing `\r` dropped. Bytes that are not UTF-8 are an I/O fault.
pub fn decode_line(bytes: &[u8]) -> io::Result<String> {
    let line = match bytes.iter().position(|&b| b == b'\n') {
        Some(end) => &bytes[..end],
        None => bytes,
    };
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8(line.to_vec()).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

pub fn decode_ping(line: &str) -> bool {
    line == PONG
}

/// Decode a `POLL` reply.
///
/// Anything that is not a well-formed `RECORDING:<digits>:<text>` reads as
/// idle, so unknown data stops dictation instead of reaching the sink.
pub fn decode_poll(line: &str) -> PollDelta {
    if line.starts_with(IDLE_PREFIX) {
        return PollDelta::idle();
    }

    let Some(rest) = line.strip_prefix(RECORDING_PREFIX) else {
        return PollDelta::idle();
    };
    let Some((count, text)) = rest.split_once(':') else {
        return PollDelta::idle();
    };
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return PollDelta::idle();
    }
    match count.parse::<usize>() {
        Ok(backspace_count) => PollDelta::recording(backspace_count, text),
        Err(_) => PollDelta::idle(),
    }
}
