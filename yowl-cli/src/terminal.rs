use std::io::{Stdout, Write};

use yowl_client::Sink;

/// Backspace, blank, backspace: visually removes one cell.
const ERASE_CELL: &[u8] = b"\x08 \x08";

/// Writes dictated text straight to a terminal stream.
///
/// The first write error (closed pipe, vanished tty) detaches the sink, which
/// ends the dictation loop on its next tick.
#[derive(Debug)]
pub struct TerminalSink<W: Write = Stdout> {
    out: W,
    attached: bool,
}

impl TerminalSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            attached: true,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, bytes: &[u8]) {
        if !self.attached || bytes.is_empty() {
            return;
        }
        if let Err(err) = self.out.write_all(bytes).and_then(|()| self.out.flush()) {
            tracing::debug!(error = %err, "terminal write failed, detaching sink");
            self.attached = false;
        }
    }
}

impl<W: Write> Sink for TerminalSink<W> {
    fn erase(&mut self, count: usize) {
        self.write(&ERASE_CELL.repeat(count));
    }

    fn insert(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}
