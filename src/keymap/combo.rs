//! A single key combination: key code, modifier mask and platform

use std::fmt;

use super::types::{keys, KeyEvent, Modifiers};
use crate::platform::{OsClass, Platform};

/// One (key code, modifiers, platform) triple a binding answers to.
///
/// Combos built from a printable character, and raw codes that are ASCII
/// letters, match against the event's character (case-sensitive); every
/// other code matches against the event's raw key code. Character and code
/// combos live in separate key spaces, so `char('%')` is never the Left arrow.
/// Modifiers must match exactly, except that Shift is part of the character
/// for non-letter characters, so `char('?')` fires on Shift+/.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    key_code: u32,
    by_char: bool,
    modifiers: Modifiers,
    os: OsClass,
}

const fn is_ascii_letter(code: u32) -> bool {
    matches!(code, 0x41..=0x5A | 0x61..=0x7A)
}

/// Printable, non-blank characters
const fn is_char_key(c: char) -> bool {
    c > ' ' && c != '\u{7f}' && !(c >= '\u{80}' && c <= '\u{a0}')
}

impl KeyCombo {
    /// A combo for a raw key code, no modifiers, any platform
    pub const fn new(key_code: u32) -> Self {
        Self {
            key_code,
            by_char: is_ascii_letter(key_code),
            modifiers: Modifiers::NONE,
            os: OsClass::Any,
        }
    }

    /// A combo for a character, no modifiers, any platform.
    ///
    /// Blank and control characters fall back to their raw code, so
    /// `char(' ')` is the space bar.
    pub const fn char(c: char) -> Self {
        let mut combo = Self::new(c as u32);
        combo.by_char = is_char_key(c);
        combo
    }

    /// Set the modifier mask (builder pattern)
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = if self.shift_in_char() {
            modifiers.without(Modifiers::SHIFT)
        } else {
            modifiers
        };
        self
    }

    /// Set the platform (builder pattern)
    pub const fn with_os(mut self, os: OsClass) -> Self {
        self.os = os;
        self
    }

    pub const fn ctrl(self) -> Self {
        self.with_modifiers(self.modifiers.union(Modifiers::CTRL))
    }

    pub const fn shift(self) -> Self {
        self.with_modifiers(self.modifiers.union(Modifiers::SHIFT))
    }

    pub const fn alt(self) -> Self {
        self.with_modifiers(self.modifiers.union(Modifiers::ALT))
    }

    pub const fn meta(self) -> Self {
        self.with_modifiers(self.modifiers.union(Modifiers::META))
    }

    /// Restrict to Mac
    pub const fn mac(self) -> Self {
        self.with_os(OsClass::Mac)
    }

    /// Restrict to everything but Mac
    pub const fn non_mac(self) -> Self {
        self.with_os(OsClass::NonMac)
    }

    #[inline]
    pub const fn key_code(&self) -> u32 {
        self.key_code
    }

    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    #[inline]
    pub const fn os(&self) -> OsClass {
        self.os
    }

    /// Whether this combo matches by character rather than raw key code
    #[inline]
    pub const fn is_char_based(&self) -> bool {
        self.by_char
    }

    /// Non-letter characters carry Shift in the character itself
    const fn shift_in_char(&self) -> bool {
        self.by_char && !is_ascii_letter(self.key_code)
    }

    /// The character this combo matches by, if it is character-based
    fn match_char(&self) -> Option<char> {
        if self.by_char {
            char::from_u32(self.key_code)
        } else {
            None
        }
    }

    /// Check whether a key press triggers this combo on the given platform
    pub fn matches(&self, event: &KeyEvent, platform: &Platform) -> bool {
        let key_matches = match self.match_char() {
            Some(c) => event.key == Some(c),
            None => event.code == self.key_code,
        };
        let modifiers = if self.shift_in_char() {
            event.modifiers.without(Modifiers::SHIFT)
        } else {
            event.modifiers
        };
        key_matches && modifiers == self.modifiers && self.is_valid_for(platform)
    }

    /// Whether this combo is active on the given platform
    pub fn is_valid_for(&self, platform: &Platform) -> bool {
        self.os == OsClass::Any || self.os == platform.os_class()
    }

    /// Two combos conflict when they share key and modifiers and could both
    /// be active on one platform
    pub fn conflicts_with(&self, other: &KeyCombo) -> bool {
        self.key_code == other.key_code
            && self.by_char == other.by_char
            && self.modifiers == other.modifiers
            && !self.os.is_exclusive_with(other.os)
    }

    /// Label for the key itself, without modifiers
    pub fn key_label(&self) -> String {
        if let Some(c) = self.match_char() {
            return c.to_ascii_uppercase().to_string();
        }

        let named = match self.key_code {
            keys::BACKSPACE => Some("Backspace"),
            keys::TAB => Some("Tab"),
            keys::ENTER => Some("Enter"),
            keys::ESCAPE => Some("Esc"),
            keys::SPACE => Some("Space"),
            keys::PAGE_UP => Some("PageUp"),
            keys::PAGE_DOWN => Some("PageDown"),
            keys::END => Some("End"),
            keys::HOME => Some("Home"),
            keys::LEFT => Some("←"),
            keys::UP => Some("↑"),
            keys::RIGHT => Some("→"),
            keys::DOWN => Some("↓"),
            keys::DELETE => Some("Delete"),
            keys::BACK_QUOTE => Some("`"),
            keys::QUOTE => Some("'"),
            _ => None,
        };
        if let Some(name) = named {
            return name.to_string();
        }

        if (keys::F1..=keys::F12).contains(&self.key_code) {
            return format!("F{}", self.key_code - keys::F1 + 1);
        }

        match char::from_u32(self.key_code) {
            Some(c) if c.is_ascii_graphic() => c.to_string(),
            _ => format!("#{}", self.key_code),
        }
    }

    /// Display the combo using modifier symbols, e.g. `^⇧S`
    pub fn display_string(&self) -> String {
        format!("{}{}", self.modifiers.symbols(), self.key_label())
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_string())
    }
}

impl From<char> for KeyCombo {
    fn from(c: char) -> Self {
        KeyCombo::char(c)
    }
}
