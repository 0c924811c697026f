//! Hyperlink processing mode
//!
//! Selects what happens to an OSC 8 sequence found in new output:
//! - **disabled**: output is left exactly as received
//! - **strip**: escape bytes are removed, the display text stays as plain text
//! - **linkify**: escape bytes are removed and the display text is annotated as a link
//!
//! # Example
//!
//! ```
//! use par_term_osc8_filter::mode::HyperlinkMode;
//!
//! let mode: HyperlinkMode = "strip".parse().unwrap();
//! assert_eq!(mode, HyperlinkMode::Strip);
//! assert_eq!(HyperlinkMode::default(), HyperlinkMode::Linkify);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// How OSC 8 hyperlink sequences in terminal output are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HyperlinkMode {
    /// No processing, output is untouched
    Disabled,
    /// Remove the escape sequence, keep the display text
    Strip,
    /// Remove the escape sequence and attach a clickable annotation (default)
    #[default]
    Linkify,
}

impl HyperlinkMode {
    /// Returns true if processing is turned off
    #[inline]
    pub fn is_disabled(&self) -> bool {
        matches!(self, HyperlinkMode::Disabled)
    }

    /// Returns true if matches should produce annotations
    #[inline]
    pub fn annotates(&self) -> bool {
        matches!(self, HyperlinkMode::Linkify)
    }

    /// Configuration name of the mode
    pub fn name(&self) -> &'static str {
        match self {
            HyperlinkMode::Disabled => "disabled",
            HyperlinkMode::Strip => "strip",
            HyperlinkMode::Linkify => "linkify",
        }
    }
}

impl fmt::Display for HyperlinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HyperlinkMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" | "none" | "off" => Ok(HyperlinkMode::Disabled),
            "strip" => Ok(HyperlinkMode::Strip),
            "linkify" => Ok(HyperlinkMode::Linkify),
            _ => Err(FilterError::InvalidMode(s.to_string())),
        }
    }
}
