//! Hyperlink scanner
//!
//! Runs one scan-and-replace pass over the output that arrived since the last
//! pass. The span is bounded by the source's start cursor (start of the most
//! recent chunk) and end cursor (live output end). Each complete OSC 8
//! sequence in the span is replaced by its display text; in linkify mode the
//! replaced text also gets a [`HyperlinkAnnotation`].
//!
//! Sequences that are incomplete when a pass runs are left verbatim. They are
//! picked up by a later pass if they still lie at or after the start cursor
//! once their terminator has arrived.

use crate::action::ActionKind;
use crate::annotation::HyperlinkAnnotation;
use crate::buffer::{OutputBuffer, TextSource};
use crate::config::FilterConfig;
use crate::mode::HyperlinkMode;
use crate::pattern;

/// Result of a scan pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Number of sequences replaced
    pub replaced: usize,
    /// Annotations created, in buffer order (empty unless linkifying)
    pub annotations: Vec<HyperlinkAnnotation>,
}

impl ScanReport {
    /// Returns true if the pass edited the source
    pub fn is_empty(&self) -> bool {
        self.replaced == 0
    }
}

/// Scan-and-replace filter for OSC 8 hyperlinks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HyperlinkScanner {
    mode: HyperlinkMode,
    action: ActionKind,
}

impl HyperlinkScanner {
    /// Create a scanner with an explicit mode and activation action
    pub fn new(mode: HyperlinkMode, action: ActionKind) -> Self {
        Self { mode, action }
    }

    /// Create a scanner from configuration
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.mode, config.action.clone())
    }

    /// Configured mode
    pub fn mode(&self) -> HyperlinkMode {
        self.mode
    }

    /// Set the mode used by subsequent passes
    pub fn set_mode(&mut self, mode: HyperlinkMode) {
        self.mode = mode;
    }

    /// Action attached to new annotations
    pub fn action(&self) -> &ActionKind {
        &self.action
    }

    /// Set the action attached to new annotations
    pub fn set_action(&mut self, action: ActionKind) {
        self.action = action;
    }

    /// Process output produced since the last pass using the configured mode
    pub fn process_output<S: TextSource + ?Sized>(&self, source: &mut S) -> ScanReport {
        self.process_output_with_mode(source, self.mode)
    }

    /// Process output produced since the last pass, overriding the mode
    pub fn process_output_with_mode<S: TextSource + ?Sized>(
        &self,
        source: &mut S,
        mode: HyperlinkMode,
    ) -> ScanReport {
        let mut report = ScanReport::default();
        if mode.is_disabled() {
            return report;
        }

        let len = source.len();
        let start = match source.start_cursor() {
            Some(cursor) if cursor <= len && source.is_boundary(cursor) => cursor,
            stale => {
                tracing::debug!(?stale, len, "start cursor unusable, scanning from buffer start");
                0
            }
        };
        // An end cursor inside a character is rounded down to the boundary before it.
        let mut end = source.end_cursor().min(len);
        while end > start && !source.is_boundary(end) {
            end -= 1;
        }
        if end <= start {
            tracing::trace!(start, end, "no new output to scan");
            return report;
        }

        // The span is read once; `removed` tracks how far each later match has
        // shifted left because of the replacements before it.
        let span = source.read_span(start..end).into_owned();
        let mut removed = 0;
        for found in pattern::find_iter(&span) {
            let at = start + found.range.start - removed;
            let display = found.display_text(&span);
            source.replace_span(at..at + found.range.len(), display);
            removed += found.range.len() - display.len();
            report.replaced += 1;

            if mode.annotates() {
                let url = found.decoded_url(&span);
                tracing::trace!(%url, at, "linkified hyperlink");
                report.annotations.push(HyperlinkAnnotation::new(
                    at..at + display.len(),
                    url,
                    self.action.clone(),
                ));
            }
        }

        if report.replaced > 0 {
            tracing::debug!(
                mode = %mode,
                replaced = report.replaced,
                annotated = report.annotations.len(),
                "processed hyperlink sequences"
            );
        }
        report
    }
}

/// Filter a standalone chunk of text
///
/// The whole text is treated as new output. Returns the filtered text and any
/// annotations, whose ranges index into the returned text.
pub fn filter_text(
    text: &str,
    mode: HyperlinkMode,
    action: ActionKind,
) -> (String, Vec<HyperlinkAnnotation>) {
    let mut buffer = OutputBuffer::from_output(text);
    let report = HyperlinkScanner::new(mode, action).process_output(&mut buffer);
    (buffer.into_string(), report.annotations)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "\x1b]8;;file:///tmp/my%20file.txt\x07my file.txt\x1b]8;;\x07";

    fn scanner(mode: HyperlinkMode) -> HyperlinkScanner {
        HyperlinkScanner::new(mode, ActionKind::FindFile)
    }

    #[test]
    fn test_strip() {
        let mut buffer = OutputBuffer::from_output(&format!("{}\n", LINK));
        let report = scanner(HyperlinkMode::Strip).process_output(&mut buffer);

        assert_eq!(buffer.as_str(), "my file.txt\n");
        assert_eq!(report.replaced, 1);
        assert!(report.annotations.is_empty());
    }

    #[test]
    fn test_linkify() {
        let mut buffer = OutputBuffer::from_output(&format!("> {}\n", LINK));
        let report = scanner(HyperlinkMode::Linkify).process_output(&mut buffer);

        assert_eq!(buffer.as_str(), "> my file.txt\n");
        assert_eq!(report.annotations.len(), 1);
        let ann = &report.annotations[0];
        assert_eq!(&buffer.as_str()[ann.range.clone()], "my file.txt");
        assert_eq!(ann.url, "file:///tmp/my file.txt");
        assert_eq!(ann.tooltip, "Visit file:///tmp/my file.txt");
        assert_eq!(ann.action, ActionKind::FindFile);
    }

    #[test]
    fn test_disabled_leaves_buffer_untouched() {
        let mut buffer = OutputBuffer::from_output(LINK);
        let before = buffer.clone();
        let report = scanner(HyperlinkMode::Disabled).process_output(&mut buffer);
        assert!(report.is_empty());
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_mode_override() {
        let mut buffer = OutputBuffer::from_output(LINK);
        let report = scanner(HyperlinkMode::Disabled)
            .process_output_with_mode(&mut buffer, HyperlinkMode::Strip);
        assert_eq!(report.replaced, 1);
        assert_eq!(buffer.as_str(), "my file.txt");
    }

    #[test]
    fn test_multiple_matches_ranges_track_edits() {
        let text = "\x1b]8;;a\x07first\x1b]8;;\x07 and \x1b]8;;b\x1b\\second\x1b]8;;\x1b\\!";
        let mut buffer = OutputBuffer::from_output(text);
        let report = scanner(HyperlinkMode::Linkify).process_output(&mut buffer);

        assert_eq!(buffer.as_str(), "first and second!");
        let spans: Vec<_> = report
            .annotations
            .iter()
            .map(|a| (&buffer.as_str()[a.range.clone()], a.url.as_str()))
            .collect();
        assert_eq!(spans, vec![("first", "a"), ("second", "b")]);
    }

    #[test]
    fn test_text_before_start_cursor_untouched() {
        let mut buffer = OutputBuffer::from_output(&format!("old {}\n", LINK));
        buffer.append_output(&format!("new {}\n", LINK));

        scanner(HyperlinkMode::Strip).process_output(&mut buffer);
        assert_eq!(
            buffer.as_str(),
            format!("old {}\nnew my file.txt\n", LINK)
        );
    }

    #[test]
    fn test_stale_start_cursor_falls_back_to_buffer_start() {
        let mut buffer = OutputBuffer::from_output(&format!("{} {}", LINK, LINK));
        buffer.set_start_cursor(Some(10_000));
        scanner(HyperlinkMode::Strip).process_output(&mut buffer);
        assert_eq!(buffer.as_str(), "my file.txt my file.txt");

        let mut buffer = OutputBuffer::from_output(LINK);
        buffer.set_start_cursor(None);
        scanner(HyperlinkMode::Strip).process_output(&mut buffer);
        assert_eq!(buffer.as_str(), "my file.txt");
    }

    #[test]
    fn test_start_cursor_inside_character_falls_back_to_buffer_start() {
        let mut buffer = OutputBuffer::from_output("é \x1b]8;;u\x07t\x1b]8;;\x07");
        buffer.set_start_cursor(Some(1));
        let report = scanner(HyperlinkMode::Strip).process_output(&mut buffer);
        assert_eq!(report.replaced, 1);
        assert_eq!(buffer.as_str(), "é t");
    }

    /// Source whose markers are set directly, without `OutputBuffer` bookkeeping
    struct FixedSource {
        text: String,
        start: Option<usize>,
        end: usize,
    }

    impl TextSource for FixedSource {
        fn len(&self) -> usize {
            self.text.len()
        }

        fn start_cursor(&self) -> Option<usize> {
            self.start
        }

        fn end_cursor(&self) -> usize {
            self.end
        }

        fn is_boundary(&self, offset: usize) -> bool {
            self.text.is_char_boundary(offset)
        }

        fn read_span(&self, range: std::ops::Range<usize>) -> std::borrow::Cow<'_, str> {
            std::borrow::Cow::Borrowed(&self.text[range])
        }

        fn replace_span(&mut self, range: std::ops::Range<usize>, text: &str) {
            self.end = self.end - range.len() + text.len();
            self.text.replace_range(range, text);
        }
    }

    #[test]
    fn test_end_cursor_past_text_is_clamped() {
        let mut source = FixedSource {
            text: format!("{}!", LINK),
            start: Some(0),
            end: 10_000,
        };
        let report = scanner(HyperlinkMode::Linkify).process_output(&mut source);
        assert_eq!(report.replaced, 1);
        assert_eq!(source.text, "my file.txt!");
        assert_eq!(report.annotations[0].range, 0..11);
    }

    #[test]
    fn test_end_cursor_inside_character_rounds_down() {
        let text = "\x1b]8;;u\x07t\x1b]8;;\x07é";
        let mut source = FixedSource {
            text: text.to_string(),
            start: Some(0),
            end: text.len() - 1,
        };
        let report = scanner(HyperlinkMode::Strip).process_output(&mut source);
        assert_eq!(report.replaced, 1);
        assert_eq!(source.text, "té");
    }

    #[test]
    fn test_pending_input_after_end_cursor_untouched() {
        let mut buffer = OutputBuffer::from_output("$ ");
        buffer.push_input(LINK);
        buffer.append_output(LINK);

        scanner(HyperlinkMode::Strip).process_output(&mut buffer);
        assert_eq!(buffer.output(), "$ my file.txt");
        assert_eq!(buffer.pending_input(), LINK);
    }

    #[test]
    fn test_empty_span_is_noop() {
        let mut buffer = OutputBuffer::from_output(LINK);
        buffer.set_start_cursor(Some(buffer.end_cursor()));
        let report = scanner(HyperlinkMode::Strip).process_output(&mut buffer);
        assert!(report.is_empty());
        assert_eq!(buffer.as_str(), LINK);
    }

    #[test]
    fn test_incomplete_sequence_left_verbatim() {
        let partial = "\x1b]8;;file:///tmp/a\x07a";
        let mut buffer = OutputBuffer::from_output(partial);
        let report = scanner(HyperlinkMode::Linkify).process_output(&mut buffer);
        assert!(report.is_empty());
        assert_eq!(buffer.as_str(), partial);
    }

    #[test]
    fn test_incomplete_sequence_completed_by_later_pass() {
        let mut buffer = OutputBuffer::from_output("\x1b]8;;file:///tmp/a\x07a");
        let scanner = scanner(HyperlinkMode::Linkify);
        scanner.process_output(&mut buffer);

        // The host keeps the chunk marker at the start of the unfinished line.
        buffer.append_output("\x1b]8;;\x07\n");
        buffer.set_start_cursor(Some(0));
        let report = scanner.process_output(&mut buffer);

        assert_eq!(buffer.as_str(), "a\n");
        assert_eq!(report.annotations[0].url, "file:///tmp/a");
    }

    #[test]
    fn test_sequence_split_before_chunk_start_not_matched() {
        let opening = "\x1b]8;;file:///tmp/a\x07a";
        let mut buffer = OutputBuffer::from_output(opening);
        buffer.append_output("\x1b]8;;\x07\n");
        let report = scanner(HyperlinkMode::Strip).process_output(&mut buffer);
        assert!(report.is_empty());
        assert_eq!(buffer.as_str(), format!("{}\x1b]8;;\x07\n", opening));
    }

    #[test]
    fn test_second_pass_is_noop() {
        let mut buffer = OutputBuffer::from_output(&format!("{}\n{}", LINK, LINK));
        let scanner = scanner(HyperlinkMode::Linkify);
        scanner.process_output(&mut buffer);
        let once = buffer.clone();

        buffer.set_start_cursor(Some(0));
        let report = scanner.process_output(&mut buffer);
        assert!(report.is_empty());
        assert_eq!(buffer, once);
    }

    #[test]
    fn test_filter_text() {
        let (text, annotations) = filter_text(
            &format!("see {}", LINK),
            HyperlinkMode::Linkify,
            ActionKind::BrowseUrl,
        );
        assert_eq!(text, "see my file.txt");
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].range, 4..15);
        assert_eq!(annotations[0].action, ActionKind::BrowseUrl);
    }

    #[test]
    fn test_from_config() {
        let config = FilterConfig {
            mode: HyperlinkMode::Strip,
            action: ActionKind::BrowseUrl,
            editor: None,
        };
        let mut scanner = HyperlinkScanner::from_config(&config);
        assert_eq!(scanner.mode(), HyperlinkMode::Strip);
        assert_eq!(scanner.action(), &ActionKind::BrowseUrl);

        scanner.set_mode(HyperlinkMode::Linkify);
        scanner.set_action(ActionKind::FindFile);
        assert_eq!(scanner, HyperlinkScanner::default());
    }
}
