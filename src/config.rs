//! Filter configuration
//!
//! Recognized keys:
//!
//! ```yaml
//! mode: linkify        # disabled | strip | linkify
//! action: find_file    # find_file | browse_url | <custom action name>
//! editor: "code -g {file}"   # optional, used by SystemOpener for local files
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, ActionRegistry, SystemOpener};
use crate::error::{FilterError, Result};
use crate::mode::HyperlinkMode;

/// Configuration for the hyperlink filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// What to do with hyperlink sequences
    pub mode: HyperlinkMode,
    /// Action invoked when a linkified hyperlink is activated
    pub action: ActionKind,
    /// Editor command template for opening local files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl FilterConfig {
    /// Parse configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !matches!(ext.as_str(), "yaml" | "yml" | "json") {
            return Err(FilterError::UnsupportedConfigFormat(
                path.display().to_string(),
            ));
        }

        let contents = std::fs::read_to_string(path)?;
        let config = if ext == "json" {
            Self::from_json_str(&contents)?
        } else {
            Self::from_yaml_str(&contents)?
        };
        tracing::debug!(path = %path.display(), mode = %config.mode, action = %config.action, "loaded hyperlink filter config");
        Ok(config)
    }

    /// Serialize configuration as YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Opener honoring the configured editor
    pub fn opener(&self) -> SystemOpener {
        match &self.editor {
            Some(editor) => SystemOpener::with_editor(editor.clone()),
            None => SystemOpener::new(),
        }
    }

    /// Check the configuration against the actions available to the host
    pub fn validate(&self, actions: &ActionRegistry) -> Result<()> {
        if !actions.contains(&self.action) {
            return Err(FilterError::UnknownAction(self.action.name().to_string()));
        }
        if let Some(editor) = &self.editor {
            if editor.trim().is_empty() {
                return Err(FilterError::EmptyEditorCommand);
            }
        }
        Ok(())
    }
}
