//! Keyboard shortcut registry with OS-aware bindings
//!
//! This module provides:
//! - Key combinations tagged Mac, non-Mac or any platform
//! - Registration-time conflict detection across platform variants
//! - First-registered-wins dispatch of key presses
//! - A usage listing rendered with platform modifier symbols
//!
//! # Architecture
//!
//! ```text
//! winit::KeyEvent → KeyEvent → KeyHandler::dispatch() → Keybinding → KeyCallback::invoke()
//! ```
//!
//! # Registering bindings
//!
//! ```ignore
//! let mut handler = KeyHandler::new(Platform::detect());
//! handler.register(Keybinding::from_fn(
//!     [KeyCombo::char('s').meta().mac(), KeyCombo::char('s').ctrl().non_mac()],
//!     "Save",
//!     || save(),
//! ))?;
//! ```

mod binding;
mod combo;
mod defaults;
mod error;
mod handler;
mod types;
mod winit_adapter;

pub use binding::{FnCallback, KeyCallback, Keybinding};
pub use combo::KeyCombo;
pub use defaults::sketch_bindings;
pub use error::BindingConflictError;
pub use handler::KeyHandler;
pub use types::{keys, KeyEvent, Modifiers};
pub use winit_adapter::{key_event_from_keys, key_event_from_winit, modifiers_from_winit};
