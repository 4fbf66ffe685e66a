//! Color theme definitions
//!
//! Centralized color constants for consistent UI appearance.

use ratatui::style::Color;

/// Lens tab strip
pub mod tabs {
    use super::*;

    /// Active lens name
    pub const ACTIVE: Color = Color::Cyan;
    /// Other lens names
    pub const INACTIVE: Color = Color::DarkGray;
}

/// Result list and context menu
pub mod list {
    use super::*;

    /// Cursor marker and selected title
    pub const SELECTED_FG: Color = Color::Yellow;
    /// Selected row background
    pub const SELECTED_BG: Color = Color::DarkGray;
    /// Entry icon
    pub const ICON: Color = Color::Blue;
    /// Context menu box border
    pub const CONTEXT_BORDER: Color = Color::Magenta;
}

/// Description and search boxes
pub mod panels {
    use super::*;

    /// Description text
    pub const DESCRIPTION: Color = Color::Gray;
    /// Query placeholder
    pub const PLACEHOLDER: Color = Color::DarkGray;
}
