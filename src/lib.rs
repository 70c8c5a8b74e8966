//! sketch-keys - OS-aware keyboard shortcuts
//!
//! This crate provides a keybinding registry that knows which shortcuts
//! belong to Mac and which to other platforms, rejects conflicting
//! registrations, dispatches key presses and renders a usage listing with
//! the platform's modifier symbols. A small sketch pad demo drives it.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod overlay;
pub mod platform;
pub mod sketch;
pub mod tracing;

// Re-export commonly used types
pub use config::SketchConfig;
pub use keymap::{
    BindingConflictError, KeyCallback, KeyCombo, KeyEvent, KeyHandler, Keybinding, Modifiers,
};
pub use platform::{OsClass, Platform};
