//! Output hooks
//!
//! The host calls [`OutputHooks::run`] each time the child process has written
//! new output. Hooks run synchronously, in registration order, and each runs to
//! completion before the next starts. [`HyperlinkScanner`] is the hook this
//! crate provides.

use std::fmt;
use std::sync::Arc;

use crate::annotation::HyperlinkAnnotation;
use crate::buffer::TextSource;
use crate::scanner::HyperlinkScanner;

/// Unique identifier for a registered hook
pub type HookId = u64;

/// Callback invoked after new output has been appended to a text source
pub trait OutputHook {
    /// Process the new output, returning any annotations for the host to attach
    fn on_output(&self, source: &mut dyn TextSource) -> Vec<HyperlinkAnnotation>;
}

impl OutputHook for HyperlinkScanner {
    fn on_output(&self, source: &mut dyn TextSource) -> Vec<HyperlinkAnnotation> {
        self.process_output(source).annotations
    }
}

struct HookEntry {
    id: HookId,
    hook: Arc<dyn OutputHook>,
}

/// Ordered list of hooks for the "output produced" notification
pub struct OutputHooks {
    hooks: Vec<HookEntry>,
    next_id: HookId,
}

impl fmt::Debug for OutputHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputHooks")
            .field("hook_count", &self.hooks.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl Default for OutputHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputHooks {
    /// Create an empty hook list
    pub fn new() -> Self {
        Self {
            hooks: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a hook, returning its ID
    pub fn add(&mut self, hook: Arc<dyn OutputHook>) -> HookId {
        let id = self.next_id;
        self.next_id += 1;
        self.hooks.push(HookEntry { id, hook });
        id
    }

    /// Remove a hook by ID
    pub fn remove(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|entry| entry.id != id);
        self.hooks.len() != before
    }

    /// Number of registered hooks
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hooks are registered
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook over the source, collecting their annotations
    pub fn run(&self, source: &mut dyn TextSource) -> Vec<HyperlinkAnnotation> {
        let mut annotations = Vec::new();
        for entry in &self.hooks {
            let produced = entry.hook.on_output(source);
            tracing::trace!(hook = entry.id, annotations = produced.len(), "output hook ran");
            annotations.extend(produced);
        }
        annotations
    }
}
