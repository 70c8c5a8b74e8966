//! Keybinding: host behavior plus the combos that trigger it

use std::fmt;

use super::combo::KeyCombo;
use super::types::KeyEvent;
use crate::platform::Platform;

/// Behavior the host attaches to a binding
pub trait KeyCallback {
    /// Run the feature. Called once per matching key press.
    fn invoke(&mut self);

    /// Human-readable description shown in the usage listing
    fn usage_text(&self) -> String;
}

/// Adapts a closure and a fixed description into a [`KeyCallback`]
pub struct FnCallback<F> {
    usage: String,
    action: F,
}

impl<F: FnMut()> FnCallback<F> {
    pub fn new(usage: impl Into<String>, action: F) -> Self {
        Self {
            usage: usage.into(),
            action,
        }
    }
}

impl<F: FnMut()> KeyCallback for FnCallback<F> {
    fn invoke(&mut self) {
        (self.action)()
    }

    fn usage_text(&self) -> String {
        self.usage.clone()
    }
}

/// A callback together with every key combo it responds to
pub struct Keybinding {
    combos: Vec<KeyCombo>,
    callback: Box<dyn KeyCallback>,
}

impl Keybinding {
    /// Bind a callback to an explicit list of combos
    pub fn new(
        combos: impl IntoIterator<Item = KeyCombo>,
        callback: impl KeyCallback + 'static,
    ) -> Self {
        Self {
            combos: combos.into_iter().collect(),
            callback: Box::new(callback),
        }
    }

    /// Bind a callback to one combo
    pub fn for_combo(combo: KeyCombo, callback: impl KeyCallback + 'static) -> Self {
        Self::new([combo], callback)
    }

    /// Bind a callback to a single unmodified character
    pub fn for_char(c: char, callback: impl KeyCallback + 'static) -> Self {
        Self::for_combo(KeyCombo::char(c), callback)
    }

    /// Bind a callback to each character of `chars`, unmodified, any platform
    pub fn for_chars(chars: &str, callback: impl KeyCallback + 'static) -> Self {
        Self::new(chars.chars().map(KeyCombo::char), callback)
    }

    /// Shorthand for binding a closure
    pub fn from_fn<F>(
        combos: impl IntoIterator<Item = KeyCombo>,
        usage: impl Into<String>,
        action: F,
    ) -> Self
    where
        F: FnMut() + 'static,
    {
        Self::new(combos, FnCallback::new(usage, action))
    }

    /// All combos, in declaration order
    pub fn key_combos(&self) -> &[KeyCombo] {
        &self.combos
    }

    /// Combos active on the given platform
    pub fn active_combos<'a>(
        &'a self,
        platform: &'a Platform,
    ) -> impl Iterator<Item = &'a KeyCombo> + 'a {
        self.combos.iter().filter(move |c| c.is_valid_for(platform))
    }

    /// Check if any combo matches the key press
    pub fn matches(&self, event: &KeyEvent, platform: &Platform) -> bool {
        self.combos.iter().any(|c| c.matches(event, platform))
    }

    /// A binding stays active as long as one of its combos applies
    pub fn is_valid_for(&self, platform: &Platform) -> bool {
        self.combos.iter().any(|c| c.is_valid_for(platform))
    }

    /// Run the callback
    pub fn invoke(&mut self) {
        self.callback.invoke();
    }

    /// The callback's description
    pub fn usage_text(&self) -> String {
        self.callback.usage_text()
    }

    /// Get display string for this keybinding's active combos
    pub fn display_string(&self, platform: &Platform) -> String {
        self.active_combos(platform)
            .map(|c| c.display_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for Keybinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keybinding")
            .field("combos", &self.combos)
            .field("usage", &self.callback.usage_text())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::Modifiers;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        hits: Rc<Cell<u32>>,
    }

    impl KeyCallback for Counter {
        fn invoke(&mut self) {
            self.hits.set(self.hits.get() + 1);
        }

        fn usage_text(&self) -> String {
            "count".to_string()
        }
    }

    #[test]
    fn test_for_chars_builds_one_combo_per_char() {
        let binding = Keybinding::from_fn(Vec::new(), "", || {});
        assert!(binding.key_combos().is_empty());

        let binding = Keybinding::for_chars("123", FnCallback::new("digits", || {}));
        assert_eq!(
            binding.key_combos(),
            &[KeyCombo::char('1'), KeyCombo::char('2'), KeyCombo::char('3')]
        );
    }

    #[test]
    fn test_matches_any_combo() {
        let platform = Platform::non_mac();
        let binding = Keybinding::for_chars("xy", FnCallback::new("xy", || {}));

        assert!(binding.matches(&KeyEvent::char('x'), &platform));
        assert!(binding.matches(&KeyEvent::char('y'), &platform));
        assert!(!binding.matches(&KeyEvent::char('z'), &platform));
    }

    #[test]
    fn test_valid_when_one_combo_applies() {
        let binding = Keybinding::from_fn(
            [KeyCombo::char('q').meta().mac(), KeyCombo::char('q').ctrl().non_mac()],
            "Quit",
            || {},
        );
        assert!(binding.is_valid_for(&Platform::mac()));
        assert!(binding.is_valid_for(&Platform::non_mac()));

        let mac_only = Keybinding::from_fn([KeyCombo::char('q').meta().mac()], "Quit", || {});
        assert!(!mac_only.is_valid_for(&Platform::non_mac()));
    }

    #[test]
    fn test_invoke_runs_callback() {
        let hits = Rc::new(Cell::new(0));
        let mut binding = Keybinding::for_char('a', Counter { hits: hits.clone() });

        binding.invoke();
        binding.invoke();
        assert_eq!(hits.get(), 2);
        assert_eq!(binding.usage_text(), "count");
    }

    #[test]
    fn test_display_string_only_active_combos() {
        let binding = Keybinding::from_fn(
            [KeyCombo::char('z').meta().mac(), KeyCombo::char('z').ctrl().non_mac()],
            "Undo",
            || {},
        );
        assert_eq!(binding.display_string(&Platform::mac()), "⌘Z");
        assert_eq!(binding.display_string(&Platform::non_mac()), "^Z");
    }

    #[test]
    fn test_duplicate_combos_allowed() {
        let binding = Keybinding::from_fn(
            [KeyCombo::char('a'), KeyCombo::char('a')],
            "twice",
            || {},
        );
        assert_eq!(binding.key_combos().len(), 2);
        assert!(binding.matches(
            &KeyEvent::char_with_mods('a', Modifiers::NONE),
            &Platform::non_mac()
        ));
    }
}
