//! Output text sources
//!
//! [`TextSource`] is the seam between the scanner and whatever holds the
//! terminal output: an editor buffer, a scrollback store, or the in-memory
//! [`OutputBuffer`] below. A source exposes two markers:
//!
//! - the **start cursor**: where the most recent output chunk began
//! - the **end cursor**: the live write position of the child process
//!
//! Text after the end cursor (pending user input, for example) is never
//! read or edited by the scanner.

use std::borrow::Cow;
use std::ops::Range;

/// Incremental text source with a movable read cursor
///
/// Offsets are byte offsets and must fall on UTF-8 character boundaries.
pub trait TextSource {
    /// Total length of the text in bytes
    fn len(&self) -> usize;

    /// Returns true if the source holds no text
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start of the most recent output chunk
    ///
    /// `None` when the host has no valid marker for the current output stream.
    fn start_cursor(&self) -> Option<usize>;

    /// Current end of live output
    fn end_cursor(&self) -> usize;

    /// Returns true if `offset` lies on a character boundary within the text
    fn is_boundary(&self, offset: usize) -> bool;

    /// Read the text in `range`
    fn read_span(&self, range: Range<usize>) -> Cow<'_, str>;

    /// Replace the text in `range` with `text` as a single edit
    ///
    /// Implementations keep their own markers consistent with the edit.
    fn replace_span(&mut self, range: Range<usize>, text: &str);
}

/// In-memory output buffer with comint-style markers
///
/// Output from the child process is inserted at the process mark; anything
/// typed by the user sits after it until submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
    /// Start of the last chunk written by [`OutputBuffer::append_output`]
    chunk_start: Option<usize>,
    /// Where the next output chunk is inserted
    process_mark: usize,
}

impl OutputBuffer {
    /// Create an empty buffer with no chunk marker
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer whose whole content is one freshly arrived output chunk
    pub fn from_output(output: &str) -> Self {
        let mut buffer = Self::new();
        buffer.append_output(output);
        buffer
    }

    /// Insert a chunk of process output at the process mark
    ///
    /// The chunk start marker moves to where the chunk begins and the
    /// process mark moves past it.
    pub fn append_output(&mut self, chunk: &str) {
        let at = self.process_mark;
        self.text.insert_str(at, chunk);
        self.chunk_start = Some(at);
        self.process_mark = at + chunk.len();
    }

    /// Append user input after the process mark
    pub fn push_input(&mut self, input: &str) {
        self.text.push_str(input);
    }

    /// Override the chunk start marker (`None` marks it invalid)
    pub fn set_start_cursor(&mut self, cursor: Option<usize>) {
        self.chunk_start = cursor;
    }

    /// Full buffer text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Process output only (text before the process mark)
    pub fn output(&self) -> &str {
        &self.text[..self.process_mark]
    }

    /// Text after the process mark
    pub fn pending_input(&self) -> &str {
        &self.text[self.process_mark..]
    }

    /// Consume the buffer, returning its text
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Move a marker across an edit that replaced `range` with `inserted` bytes
///
/// Markers inside the replaced range collapse to its start.
fn shift_marker(marker: usize, range: &Range<usize>, inserted: usize) -> usize {
    if marker >= range.end {
        marker - range.len() + inserted
    } else if marker > range.start {
        range.start
    } else {
        marker
    }
}

impl TextSource for OutputBuffer {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn start_cursor(&self) -> Option<usize> {
        self.chunk_start
    }

    fn end_cursor(&self) -> usize {
        self.process_mark
    }

    fn is_boundary(&self, offset: usize) -> bool {
        self.text.is_char_boundary(offset)
    }

    fn read_span(&self, range: Range<usize>) -> Cow<'_, str> {
        Cow::Borrowed(&self.text[range])
    }

    fn replace_span(&mut self, range: Range<usize>, text: &str) {
        self.text.replace_range(range.clone(), text);
        self.process_mark = shift_marker(self.process_mark, &range, text.len());
        self.chunk_start = self
            .chunk_start
            .map(|marker| shift_marker(marker, &range, text.len()));
    }
}
