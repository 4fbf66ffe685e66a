//! Context action model
//!
//! Secondary actions are plain data. The owning lens interprets the
//! [`ActionKind`] when the action is run, so nothing captures UI state.

use super::Entry;

/// What a context action does when run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Run a shell command detached (`sh -c <command>`)
    Command(String),
    /// Copy text to the system clipboard
    Copy(String),
    /// Open a path or URL with the platform opener
    Open(String),
    /// Recompute the lens's background data
    Refresh,
}

/// A secondary, entry-scoped command offered by a lens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextAction {
    /// Label shown in the context menu
    pub label: String,
    /// Entry the action was generated for
    pub target: Entry,
    /// Behavior, dispatched by the lens
    pub kind: ActionKind,
}

impl ContextAction {
    /// Create a new context action
    pub fn new(label: impl Into<String>, target: Entry, kind: ActionKind) -> Self {
        Self {
            label: label.into(),
            target,
            kind,
        }
    }
}
