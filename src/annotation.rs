//! Hyperlink annotations produced by a linkify pass
//!
//! An annotation is plain data: the byte range of the display text left in
//! the buffer, the decoded URL, a tooltip, and the action to run. Attaching it
//! to a real UI element (a button, an underline, a clickable region) is left
//! to the host.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, ActionRegistry, ActionTarget};
use crate::error::Result;

/// Clickable hyperlink attached to a range of output text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperlinkAnnotation {
    /// Byte range of the display text in the buffer
    pub range: Range<usize>,
    /// Percent-decoded URL
    pub url: String,
    /// Help text shown on hover
    pub tooltip: String,
    /// Action invoked on activation
    pub action: ActionKind,
}

impl HyperlinkAnnotation {
    /// Create an annotation for `url` covering `range`
    pub fn new(range: Range<usize>, url: impl Into<String>, action: ActionKind) -> Self {
        let url = url.into();
        Self {
            range,
            tooltip: tooltip_for(&url),
            url,
            action,
        }
    }

    /// Check if a buffer offset falls inside the annotated text
    pub fn contains(&self, offset: usize) -> bool {
        self.range.contains(&offset)
    }

    /// Where the built-in action would send this link
    ///
    /// Custom actions receive the URL as is; this reports what
    /// [`crate::action::browse_url_action`] would open for them.
    pub fn target(&self) -> ActionTarget {
        match self.action {
            ActionKind::FindFile => ActionTarget::for_find_file(&self.url),
            ActionKind::BrowseUrl | ActionKind::Custom(_) => ActionTarget::for_browse(&self.url),
        }
    }

    /// Run the configured action with the decoded URL
    pub fn activate(&self, actions: &ActionRegistry) -> Result<()> {
        tracing::debug!(url = %self.url, action = %self.action, "activating hyperlink");
        actions.invoke(&self.action, &self.url)
    }
}

/// Tooltip shown for a link to `url`
pub fn tooltip_for(url: &str) -> String {
    format!("Visit {}", url)
}
