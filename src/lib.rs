//! Lantern - a terminal launcher
//!
//! One search box over several lenses (applications, files, glyphs,
//! power actions, web search).
//!
//! This library provides:
//! - [`app`]: Interaction state machine and rendering
//! - [`cache`]: Snapshots, background refresh, debounced remote search
//! - [`config`]: Configuration files and per-user locations
//! - [`keys`]: Key binding definitions
//! - [`lens`]: The lens contract and registry
//! - [`lenses`]: Built-in lenses
//! - [`logging`]: Tracing setup
//! - [`model`]: Entry and action values
//! - [`ui`]: User interface components

pub mod app;
pub mod cache;
pub mod config;
pub mod keys;
pub mod lens;
pub mod lenses;
pub mod logging;
pub mod model;
pub mod ui;
