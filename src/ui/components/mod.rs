//! Reusable UI components

pub mod blocks;
pub mod empty_state;

pub use blocks::*;
pub use empty_state::*;
