//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use sketch_keys::keymap::{KeyCallback, KeyHandler, Keybinding, KeyCombo};
use sketch_keys::platform::Platform;

/// Records every invocation by usage name
#[derive(Clone, Default)]
pub struct Recorder {
    fired: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that logs `usage` each time it fires
    pub fn callback(&self, usage: &str) -> RecordingCallback {
        RecordingCallback {
            usage: usage.to_string(),
            fired: Rc::clone(&self.fired),
        }
    }

    /// A binding over `combos` whose callback logs `usage`
    pub fn binding(&self, combos: impl IntoIterator<Item = KeyCombo>, usage: &str) -> Keybinding {
        Keybinding::new(combos, self.callback(usage))
    }

    pub fn fired(&self) -> Vec<String> {
        self.fired.borrow().clone()
    }

    pub fn clear(&self) {
        self.fired.borrow_mut().clear();
    }
}

pub struct RecordingCallback {
    usage: String,
    fired: Rc<RefCell<Vec<String>>>,
}

impl KeyCallback for RecordingCallback {
    fn invoke(&mut self) {
        self.fired.borrow_mut().push(self.usage.clone());
    }

    fn usage_text(&self) -> String {
        self.usage.clone()
    }
}

/// Handlers for both platform classes
pub fn both_platforms() -> [KeyHandler; 2] {
    [
        KeyHandler::new(Platform::mac()),
        KeyHandler::new(Platform::non_mac()),
    ]
}
