//! Built-in lenses

pub mod applications;
pub mod files;
pub mod glyphs;
pub mod power;
pub mod websearch;

pub use applications::ApplicationsLens;
pub use files::FilesLens;
pub use glyphs::GlyphsLens;
pub use power::PowerLens;
pub use websearch::WebSearchLens;

use crate::lens::{Lens, LensRegistry};

/// Every built-in lens in tab order, built from the user's configuration
///
/// Lenses with background data start their refresh here.
pub fn default_lenses() -> Vec<Box<dyn Lens>> {
    vec![
        Box::new(ApplicationsLens::from_config()),
        Box::new(FilesLens::from_config()),
        Box::new(GlyphsLens::from_config()),
        Box::new(PowerLens::new()),
        Box::new(WebSearchLens::from_config()),
    ]
}

/// Registry over [`default_lenses`]
pub fn default_registry() -> LensRegistry {
    LensRegistry::new(default_lenses())
}
