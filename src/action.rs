//! Hyperlink activation actions
//!
//! Two built-in actions handle a decoded link URL:
//!
//! - [`find_file_action`] opens `file://` URLs as local paths and hands every
//!   other URL to [`browse_url_action`]
//! - [`browse_url_action`] drops the host part of `file://` URLs and hands the
//!   URL to the external opener
//!
//! The host supplies the actual file and URL facilities through [`Opener`].
//! Any `Fn(&str)` can be registered in an [`ActionRegistry`] as a custom action.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

const FILE_SCHEME: &str = "file://";

/// Host capability for opening link targets
pub trait Opener: Send + Sync {
    /// Open a local file in the host's file-editing facility
    fn open_file(&self, path: &Path) -> Result<()>;

    /// Hand a URL to the host's external opener
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Which action runs when an annotation is activated
///
/// Serialized as a plain string: `find_file`, `browse_url`, or the name of a
/// custom action registered in an [`ActionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    /// Open `file://` links as local files, browse everything else
    #[default]
    FindFile,
    /// Hand every link to the external opener
    BrowseUrl,
    /// User-registered action
    Custom(String),
}

impl ActionKind {
    /// Configuration name of the action
    pub fn name(&self) -> &str {
        match self {
            ActionKind::FindFile => "find_file",
            ActionKind::BrowseUrl => "browse_url",
            ActionKind::Custom(name) => name,
        }
    }
}

impl From<String> for ActionKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "find_file" | "find_file_action" => ActionKind::FindFile,
            "browse_url" | "browse_url_action" => ActionKind::BrowseUrl,
            _ => ActionKind::Custom(name),
        }
    }
}

impl From<&str> for ActionKind {
    fn from(name: &str) -> Self {
        ActionKind::from(name.to_string())
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Custom(name) => name,
            other => other.name().to_string(),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved destination of a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    /// Absolute local path
    File(PathBuf),
    /// URL for the external opener
    Url(String),
}

impl ActionTarget {
    /// Target used by [`find_file_action`]
    pub fn for_find_file(url: &str) -> Self {
        match split_file_url(url) {
            Some((_, "")) => ActionTarget::File(PathBuf::from("/")),
            Some((_, path)) => ActionTarget::File(PathBuf::from(path)),
            None => ActionTarget::for_browse(url),
        }
    }

    /// Target used by [`browse_url_action`]
    pub fn for_browse(url: &str) -> Self {
        match split_file_url(url) {
            Some((_, "")) => ActionTarget::Url(format!("{}/", FILE_SCHEME)),
            Some((_, path)) => ActionTarget::Url(format!("{}{}", FILE_SCHEME, path)),
            None => ActionTarget::Url(url.to_string()),
        }
    }

    /// Dispatch the target to the matching opener facility
    pub fn open(&self, opener: &dyn Opener) -> Result<()> {
        match self {
            ActionTarget::File(path) => opener.open_file(path),
            ActionTarget::Url(url) => opener.open_url(url),
        }
    }
}

/// Split a `file://<authority><path>` URL into authority and path
///
/// The scheme is matched case-insensitively. The authority runs up to the
/// first `/` after the scheme and may be empty.
fn split_file_url(url: &str) -> Option<(&str, &str)> {
    let prefix = url.get(..FILE_SCHEME.len())?;
    if !prefix.eq_ignore_ascii_case(FILE_SCHEME) {
        return None;
    }
    let rest = &url[FILE_SCHEME.len()..];
    let slash = rest.find('/').unwrap_or(rest.len());
    Some((&rest[..slash], &rest[slash..]))
}

/// Open a `file://` link as a local file, otherwise browse it
///
/// `file://host/tmp/foo.txt` and `file:///tmp/foo.txt` both open `/tmp/foo.txt`.
pub fn find_file_action(url: &str, opener: &dyn Opener) -> Result<()> {
    let target = ActionTarget::for_find_file(url);
    tracing::debug!(url, ?target, "find_file_action");
    target.open(opener)
}

/// Hand a link to the external opener
///
/// `file://` URLs lose their host part (`file://host/tmp/x` becomes
/// `file:///tmp/x`); other URLs pass through unchanged.
pub fn browse_url_action(url: &str, opener: &dyn Opener) -> Result<()> {
    let target = ActionTarget::for_browse(url);
    tracing::debug!(url, ?target, "browse_url_action");
    target.open(opener)
}

/// A user-supplied action taking the decoded link URL
pub type CustomAction = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;

/// Resolves an [`ActionKind`] to the code that runs it
pub struct ActionRegistry {
    opener: Arc<dyn Opener>,
    custom: HashMap<String, CustomAction>,
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.custom.keys().collect();
        names.sort();
        f.debug_struct("ActionRegistry")
            .field("custom_actions", &names)
            .finish()
    }
}

impl ActionRegistry {
    /// Create a registry dispatching built-in actions to `opener`
    pub fn new(opener: Arc<dyn Opener>) -> Self {
        Self {
            opener,
            custom: HashMap::new(),
        }
    }

    /// Register a custom action, returning the one it replaced
    pub fn register<F>(&mut self, name: impl Into<String>, action: F) -> Option<CustomAction>
    where
        F: Fn(&str) -> Result<()> + Send + Sync + 'static,
    {
        self.custom.insert(name.into(), Box::new(action))
    }

    /// Remove a custom action
    pub fn unregister(&mut self, name: &str) -> bool {
        self.custom.remove(name).is_some()
    }

    /// Check whether `kind` can be invoked
    pub fn contains(&self, kind: &ActionKind) -> bool {
        match kind {
            ActionKind::Custom(name) => self.custom.contains_key(name),
            _ => true,
        }
    }

    /// Opener used by the built-in actions
    pub fn opener(&self) -> &dyn Opener {
        self.opener.as_ref()
    }

    /// Run the action selected by `kind` with `url` as its sole argument
    pub fn invoke(&self, kind: &ActionKind, url: &str) -> Result<()> {
        match kind {
            ActionKind::FindFile => find_file_action(url, self.opener()),
            ActionKind::BrowseUrl => browse_url_action(url, self.opener()),
            ActionKind::Custom(name) => match self.custom.get(name) {
                Some(action) => action(url),
                None => {
                    tracing::warn!(action = %name, "hyperlink action not registered");
                    Err(FilterError::UnknownAction(name.clone()))
                }
            },
        }
    }
}

/// Opener backed by the operating system
///
/// URLs and files go to the system default handler. When an editor command is
/// configured, files are opened with it instead; `{file}` in the command is
/// replaced with the path, or the path is appended when no placeholder exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemOpener {
    editor: Option<String>,
}

impl SystemOpener {
    /// Opener using the system default handler for everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Opener sending files to `editor`
    pub fn with_editor(editor: impl Into<String>) -> Self {
        Self {
            editor: Some(editor.into()),
        }
    }

    /// Configured editor command template
    pub fn editor(&self) -> Option<&str> {
        self.editor.as_deref()
    }
}

/// Split an editor command template into program and arguments for `path`
///
/// The template is split into words before substitution so the path always
/// stays a single argument.
pub fn expand_editor_command(template: &str, path: &Path) -> Result<Vec<String>> {
    let tokens = shell_words::split(template)
        .map_err(|e| FilterError::InvalidEditorCommand(e.to_string()))?;
    if tokens.is_empty() {
        return Err(FilterError::EmptyEditorCommand);
    }

    let file = path.to_string_lossy();
    let has_placeholder = tokens.iter().any(|token| token.contains("{file}"));
    let mut argv: Vec<String> = tokens
        .into_iter()
        .map(|token| token.replace("{file}", &file))
        .collect();
    if !has_placeholder {
        argv.push(file.into_owned());
    }
    Ok(argv)
}

impl Opener for SystemOpener {
    fn open_file(&self, path: &Path) -> Result<()> {
        let Some(editor) = self.editor.as_deref() else {
            return open::that(path).map_err(|e| FilterError::OpenFailed {
                target: path.display().to_string(),
                reason: e.to_string(),
            });
        };

        let argv = expand_editor_command(editor, path)?;
        tracing::debug!(?argv, "opening file in editor");
        Command::new(&argv[0])
            .args(&argv[1..])
            .spawn()
            .map(|_| ())
            .map_err(|e| FilterError::OpenFailed {
                target: path.display().to_string(),
                reason: format!("failed to run editor '{}': {}", argv[0], e),
            })
    }

    fn open_url(&self, url: &str) -> Result<()> {
        open::that(url).map_err(|e| FilterError::OpenFailed {
            target: url.to_string(),
            reason: e.to_string(),
        })
    }
}
