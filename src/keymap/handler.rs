//! KeyHandler: registration, conflict detection, dispatch and usage text

use std::collections::HashMap;

use super::binding::Keybinding;
use super::combo::KeyCombo;
use super::error::BindingConflictError;
use super::types::{KeyEvent, Modifiers};
use crate::platform::{OsClass, Platform};

type ClaimKey = (u32, bool, Modifiers);

fn claim_key(combo: &KeyCombo) -> ClaimKey {
    (combo.key_code(), combo.is_char_based(), combo.modifiers())
}

/// The registry of every keybinding in a session
#[derive(Debug)]
pub struct KeyHandler {
    /// All registered bindings, in registration order
    bindings: Vec<Keybinding>,
    /// Platforms already claimed per (key code, matched by character, modifiers)
    claimed: HashMap<ClaimKey, Vec<OsClass>>,
    platform: Platform,
}

impl KeyHandler {
    /// Create an empty handler using the given platform classifier
    pub fn new(platform: Platform) -> Self {
        Self {
            bindings: Vec::new(),
            claimed: HashMap::new(),
            platform,
        }
    }

    /// The platform used for every OS query
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Force the handler to behave as Mac or non-Mac; `None` restores the probe
    pub fn set_platform_override(&mut self, os: Option<OsClass>) {
        self.platform.set_override(os);
    }

    /// Combos of `binding` that collide with already registered ones
    pub fn find_conflicts(&self, binding: &Keybinding) -> Vec<KeyCombo> {
        let mut conflicts: Vec<KeyCombo> = Vec::new();
        for combo in binding.key_combos() {
            let Some(claimed) = self.claimed.get(&claim_key(combo)) else {
                continue;
            };
            let collides = claimed.iter().any(|&os| !combo.os().is_exclusive_with(os));
            if collides && !conflicts.contains(combo) {
                conflicts.push(*combo);
            }
        }
        conflicts
    }

    /// Register a binding.
    ///
    /// Fails without changing the registry if any of its combos conflict with
    /// a combo of an already registered binding.
    pub fn register(&mut self, binding: Keybinding) -> Result<(), BindingConflictError> {
        let conflicts = self.find_conflicts(&binding);
        if !conflicts.is_empty() {
            let err = BindingConflictError::new(
                binding.usage_text(),
                conflicts.iter().map(|c| c.display_string()).collect(),
            );
            tracing::warn!("{}", err);
            return Err(err);
        }

        if binding.key_combos().is_empty() {
            tracing::warn!(usage = %binding.usage_text(), "registered binding without key combos");
        }

        for combo in binding.key_combos() {
            self.claimed
                .entry(claim_key(combo))
                .or_default()
                .push(combo.os());
        }

        tracing::debug!(
            usage = %binding.usage_text(),
            combos = ?binding.key_combos(),
            "registered keybinding"
        );
        self.bindings.push(binding);
        Ok(())
    }

    /// Register bindings in order, stopping at the first conflict
    pub fn register_all(
        &mut self,
        bindings: impl IntoIterator<Item = Keybinding>,
    ) -> Result<(), BindingConflictError> {
        for binding in bindings {
            self.register(binding)?;
        }
        Ok(())
    }

    /// Hand a key press to the first matching binding.
    ///
    /// Returns whether a binding fired.
    pub fn dispatch(&mut self, event: &KeyEvent) -> bool {
        let platform = &self.platform;
        let Some(binding) = self
            .bindings
            .iter_mut()
            .find(|b| b.matches(event, platform))
        else {
            tracing::trace!(?event, "no binding for key press");
            return false;
        };

        tracing::debug!(?event, usage = %binding.usage_text(), "dispatching key press");
        binding.invoke();
        true
    }

    /// One line per active combo of every active binding, in registration order.
    ///
    /// A binding that renders the same line twice lists it once.
    pub fn usage_lines(&self) -> Vec<String> {
        let platform = &self.platform;
        let mut lines: Vec<String> = Vec::new();
        for binding in self.bindings.iter().filter(|b| b.is_valid_for(platform)) {
            let first = lines.len();
            for combo in binding.active_combos(platform) {
                let line = format!("{} {}", combo.display_string(), binding.usage_text());
                if !lines[first..].contains(&line) {
                    lines.push(line);
                }
            }
        }
        lines
    }

    /// The usage listing, one line per binding combo
    pub fn usage_text(&self) -> String {
        self.usage_text_with_separator("\n")
    }

    /// The usage listing joined with a host-chosen separator
    pub fn usage_text_with_separator(&self, separator: &str) -> String {
        self.usage_lines().join(separator)
    }

    /// Get all bindings
    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyHandler {
    fn default() -> Self {
        Self::new(Platform::detect())
    }
}
