//! Data models for Lantern
//!
//! Value types exchanged between lenses and the interaction loop.

mod action;
mod entry;

pub use action::{ActionKind, ContextAction};
pub use entry::Entry;
