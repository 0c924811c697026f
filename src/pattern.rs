//! OSC 8 hyperlink sequence grammar
//!
//! Recognizes exactly one shape of control sequence:
//!
//! ```text
//! ESC ] 8 ; ; <url> (BEL | ESC [\]) <display text> ESC ] 8 ; ; (BEL | ESC [\])
//! ```
//!
//! `<url>` may not contain BEL or ESC. `<display text>` may not contain ESC
//! (BEL is allowed). Link parameters such as `id=` are not part of the grammar;
//! a sequence carrying them is not matched. No other ANSI sequence is parsed.
//!
//! Reference: <https://gist.github.com/egmontkob/eb114294efbcd5adb1944c9f3cb5feda>

use std::ops::Range;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};

/// Regex source for a complete OSC 8 hyperlink
///
/// Group 1 is the URL, group 2 is the display text.
pub const OSC8_PATTERN: &str =
    r"\x1b\]8;;([^\x07\x1b]*)(?:\x07|\x1b\\?)([^\x1b]*)\x1b\]8;;(?:\x07|\x1b\\?)";

static OSC8_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(OSC8_PATTERN).expect("OSC 8 pattern is a valid regex"));

/// One located hyperlink sequence
///
/// All ranges are byte offsets into the text that was scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlinkMatch {
    /// The whole sequence, opening escape through closing terminator
    pub range: Range<usize>,
    /// The raw (still percent-encoded) URL
    pub url: Range<usize>,
    /// The display text between the two escapes
    pub text: Range<usize>,
}

impl HyperlinkMatch {
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let whole = caps.get(0)?;
        let url = caps.get(1)?;
        let text = caps.get(2)?;
        Some(Self {
            range: whole.range(),
            url: url.range(),
            text: text.range(),
        })
    }

    /// Raw URL as it appeared in the sequence
    pub fn raw_url<'h>(&self, haystack: &'h str) -> &'h str {
        &haystack[self.url.clone()]
    }

    /// Display text enclosed by the sequence
    pub fn display_text<'h>(&self, haystack: &'h str) -> &'h str {
        &haystack[self.text.clone()]
    }

    /// Percent-decoded URL
    pub fn decoded_url(&self, haystack: &str) -> String {
        decode_url(self.raw_url(haystack))
    }
}

/// Iterate over all non-overlapping hyperlink sequences, left to right
pub fn find_iter(haystack: &str) -> impl Iterator<Item = HyperlinkMatch> + '_ {
    OSC8_REGEX
        .captures_iter(haystack)
        .filter_map(|caps| HyperlinkMatch::from_captures(&caps))
}

/// Reverse standard URL escaping (`%20` -> space)
///
/// Invalid UTF-8 produced by decoding is replaced with U+FFFD.
pub fn decode_url(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
