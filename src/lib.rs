//! OSC 8 hyperlink filter for terminal output
//!
//! Tools such as `ls --hyperlink` wrap file names in OSC 8 escape sequences:
//!
//! ```text
//! ESC ] 8 ; ; <url> BEL <display text> ESC ] 8 ; ; BEL
//! ```
//!
//! Hosts that do not render those sequences natively (editor shell buffers,
//! log viewers, simple scrollback panes) show the raw bytes. This crate runs as
//! a post-processing hook over such an output buffer and replaces every
//! complete sequence with either:
//!
//! - its display text only ([`HyperlinkMode::Strip`]), or
//! - its display text plus a [`HyperlinkAnnotation`] carrying the decoded URL,
//!   a tooltip and the action to run when clicked ([`HyperlinkMode::Linkify`])
//!
//! ## Features
//! - Fixed OSC 8 grammar with BEL, ST and bare ESC terminators
//! - Incremental scanning bounded by the host's start/end output cursors
//! - Percent-decoding of link URLs
//! - Built-in `find_file` / `browse_url` actions and user-registered actions
//! - YAML/JSON configuration
//!
//! ## Example
//!
//! ```
//! use par_term_osc8_filter::{ActionKind, HyperlinkMode, HyperlinkScanner, OutputBuffer};
//!
//! let mut buffer = OutputBuffer::new();
//! buffer.append_output("\x1b]8;;file://host/tmp/a%20b.txt\x07a b.txt\x1b]8;;\x07\n");
//!
//! let scanner = HyperlinkScanner::new(HyperlinkMode::Linkify, ActionKind::FindFile);
//! let report = scanner.process_output(&mut buffer);
//!
//! assert_eq!(buffer.as_str(), "a b.txt\n");
//! assert_eq!(report.annotations[0].url, "file://host/tmp/a b.txt");
//! assert_eq!(report.annotations[0].tooltip, "Visit file://host/tmp/a b.txt");
//! ```

pub mod action;
pub mod annotation;
pub mod buffer;
pub mod config;
pub mod error;
pub mod hooks;
pub mod mode;
pub mod pattern;
pub mod scanner;

pub use action::{
    browse_url_action, find_file_action, ActionKind, ActionRegistry, ActionTarget, Opener,
    SystemOpener,
};
pub use annotation::HyperlinkAnnotation;
pub use buffer::{OutputBuffer, TextSource};
pub use config::FilterConfig;
pub use error::{FilterError, Result};
pub use hooks::{HookId, OutputHook, OutputHooks};
pub use mode::HyperlinkMode;
pub use scanner::{filter_text, HyperlinkScanner, ScanReport};
