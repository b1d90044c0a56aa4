/// Target that dictated text is written into.
///
/// Both mutations are synchronous and must tolerate empty input.
pub trait Sink {
    /// Remove the last `count` characters previously inserted.
    fn erase(&mut self, count: usize);

    /// Append `text` after the current content.
    fn insert(&mut self, text: &str);

    /// False once the target has gone away (closed window, broken pipe).
    fn is_attached(&self) -> bool {
        true
    }
}

/// In-memory sink. Useful for hosts that render the text themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSink {
    text: String,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Sink for BufferSink {
    fn erase(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let keep = self.text.chars().count().saturating_sub(count);
        let cut = self
            .text
            .char_indices()
            .nth(keep)
            .map_or(self.text.len(), |(idx, _)| idx);
        self.text.truncate(cut);
    }

    fn insert(&mut self, text: &str) {
        self.text.push_str(text);
    }
}
