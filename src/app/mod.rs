//! Application module
//!
//! The interaction state machine, split into:
//! - `state`: App struct, lens routing, cursor and mode transitions
//! - `input`: Key event handling
//! - `render`: UI rendering

mod input;
mod render;
mod state;

pub use state::{App, ContextMenu, Mode};
