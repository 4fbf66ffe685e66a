//! Entry model
//!
//! One selectable search result produced by a lens.

/// A search result shown in the result list
///
/// `id` identifies the entry within one lens's result set only.
/// Entries are rebuilt on every search, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    /// Lens-scoped identity (full path, URL, app name, ...)
    pub id: String,
    /// Display title
    pub title: String,
    /// Icon glyph shown before the title
    pub icon: String,
    /// Longer text shown in the description box
    pub description: String,
}

impl Entry {
    /// Create a new entry
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        icon: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: icon.into(),
            description: description.into(),
        }
    }
}
