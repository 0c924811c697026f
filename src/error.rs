//! Error types for the hyperlink filter

use std::fmt;

/// Errors that can occur while configuring the filter or activating a link
///
/// Scanning itself never fails: a sequence that does not match is simply left
/// in the output for a later pass.
#[derive(Debug)]
pub enum FilterError {
    /// IO error (reading a configuration file)
    IoError(std::io::Error),

    /// YAML configuration could not be parsed or written
    YamlError(serde_yaml::Error),

    /// JSON configuration could not be parsed or written
    JsonError(serde_json::Error),

    /// Configuration file extension is not one of yaml/yml/json
    UnsupportedConfigFormat(String),

    /// Unknown hyperlink mode name
    InvalidMode(String),

    /// Custom action name not present in the action registry
    UnknownAction(String),

    /// Editor command template is empty
    EmptyEditorCommand,

    /// Editor command template could not be split into words
    InvalidEditorCommand(String),

    /// The host facility failed to open a file or URL
    OpenFailed { target: String, reason: String },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::IoError(err) => write!(f, "IO error: {}", err),
            FilterError::YamlError(err) => write!(f, "YAML error: {}", err),
            FilterError::JsonError(err) => write!(f, "JSON error: {}", err),
            FilterError::UnsupportedConfigFormat(ext) => {
                write!(f, "Unsupported configuration format: {}", ext)
            }
            FilterError::InvalidMode(name) => write!(f, "Invalid hyperlink mode: {}", name),
            FilterError::UnknownAction(name) => write!(f, "Unknown hyperlink action: {}", name),
            FilterError::EmptyEditorCommand => write!(f, "Editor command is empty"),
            FilterError::InvalidEditorCommand(msg) => {
                write!(f, "Failed to parse editor command: {}", msg)
            }
            FilterError::OpenFailed { target, reason } => {
                write!(f, "Failed to open {}: {}", target, reason)
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FilterError::IoError(err) => Some(err),
            FilterError::YamlError(err) => Some(err),
            FilterError::JsonError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FilterError {
    fn from(err: std::io::Error) -> Self {
        FilterError::IoError(err)
    }
}

impl From<serde_yaml::Error> for FilterError {
    fn from(err: serde_yaml::Error) -> Self {
        FilterError::YamlError(err)
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::JsonError(err)
    }
}

/// Result type for filter operations
pub type Result<T> = std::result::Result<T, FilterError>;
