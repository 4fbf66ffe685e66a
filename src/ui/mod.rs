//! UI layer
//!
//! Layout helpers, widgets, and theme definitions. The screen itself is
//! drawn by [`App::render`](crate::app::App::render).

pub mod components;
pub mod navigation;
pub mod theme;
pub mod widgets;
