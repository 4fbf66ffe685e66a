//! Ordered lens collection with one active index
//!
//! Built once at startup; order is tab/cycle order.

use super::Lens;

/// Lenses in display order plus the active one
pub struct LensRegistry {
    lenses: Vec<Box<dyn Lens>>,
    active: usize,
}

impl std::fmt::Debug for LensRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LensRegistry")
            .field("lenses", &self.names())
            .field("active", &self.active)
            .finish()
    }
}

impl LensRegistry {
    /// Create a registry; the first lens starts active
    pub fn new(lenses: Vec<Box<dyn Lens>>) -> Self {
        Self { lenses, active: 0 }
    }

    /// Number of registered lenses
    pub fn len(&self) -> usize {
        self.lenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lenses.is_empty()
    }

    /// Index of the active lens
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active lens (None only for an empty registry)
    pub fn active(&self) -> Option<&dyn Lens> {
        self.get(self.active)
    }

    /// Lens at `index`
    pub fn get(&self, index: usize) -> Option<&dyn Lens> {
        self.lenses.get(index).map(|lens| lens.as_ref())
    }

    /// Display names in order
    pub fn names(&self) -> Vec<&str> {
        self.lenses.iter().map(|lens| lens.name()).collect()
    }

    /// Activate the next lens, wrapping around
    pub fn select_next(&mut self) -> usize {
        if !self.lenses.is_empty() {
            self.active = (self.active + 1) % self.lenses.len();
        }
        self.active
    }

    /// Activate the previous lens, wrapping around
    pub fn select_prev(&mut self) -> usize {
        if !self.lenses.is_empty() {
            self.active = (self.active + self.lenses.len() - 1) % self.lenses.len();
        }
        self.active
    }
}
