//! Core types for the keymap system: Modifiers, KeyEvent and key codes

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    const ALL_BITS: u8 = 0b1111;

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    /// Create modifiers from a raw mask, dropping unknown bits
    pub const fn from_bits(bits: u8) -> Self {
        Modifiers(bits & Self::ALL_BITS)
    }

    /// The raw mask
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if ctrl is held
    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    /// Check if shift is held
    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    /// Check if alt/option is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    /// Check if meta (cmd/win) is held
    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Remove the modifiers in other
    #[inline]
    pub const fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Platform-conventional symbols, ctrl/alt/shift/meta order
    pub fn symbols(self) -> String {
        let mut out = String::new();
        if self.ctrl() {
            out.push('^');
        }
        if self.alt() {
            out.push('⌥');
        }
        if self.shift() {
            out.push('⇧');
        }
        if self.meta() {
            out.push('⌘');
        }
        out
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbols())
    }
}

/// Key codes for keys that do not produce a letter.
///
/// Letters use their own character value as code. Codes below the letter
/// range follow the AWT virtual-key table; function keys live above the
/// printable range so they can never be mistaken for a character.
pub mod keys {
    pub const BACKSPACE: u32 = 8;
    pub const TAB: u32 = 9;
    pub const ENTER: u32 = 10;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const PAGE_UP: u32 = 33;
    pub const PAGE_DOWN: u32 = 34;
    pub const END: u32 = 35;
    pub const HOME: u32 = 36;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const COMMA: u32 = 44;
    pub const MINUS: u32 = 45;
    pub const PERIOD: u32 = 46;
    pub const SLASH: u32 = 47;
    pub const DIGIT_0: u32 = 48;
    pub const DIGIT_9: u32 = 57;
    pub const SEMICOLON: u32 = 59;
    pub const EQUALS: u32 = 61;
    pub const OPEN_BRACKET: u32 = 91;
    pub const BACKSLASH: u32 = 92;
    pub const CLOSE_BRACKET: u32 = 93;
    pub const DELETE: u32 = 127;
    pub const BACK_QUOTE: u32 = 192;
    pub const QUOTE: u32 = 222;

    pub const F1: u32 = 0xF001;
    pub const F12: u32 = 0xF00C;

    /// Code for function key `n` (1-based), if it is one we know
    pub const fn function(n: u8) -> Option<u32> {
        if n >= 1 && n <= 12 {
            Some(F1 + n as u32 - 1)
        } else {
            None
        }
    }

    /// Code for a digit key
    pub const fn digit(d: u8) -> Option<u32> {
        if d <= 9 {
            Some(DIGIT_0 + d as u32)
        } else {
            None
        }
    }
}

/// A key press as delivered by the host event loop
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Raw key code (see [`keys`])
    pub code: u32,
    /// Resolved character, if the key produced one
    pub key: Option<char>,
    /// Modifiers held at the time of the press
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new event
    pub const fn new(code: u32, key: Option<char>, modifiers: Modifiers) -> Self {
        Self {
            code,
            key,
            modifiers,
        }
    }

    /// A character key press, with the code derived the way a keyboard would
    /// report it (letters by their uppercase value)
    pub fn char(c: char) -> Self {
        Self::char_with_mods(c, Modifiers::NONE)
    }

    /// A character key press with modifiers
    pub fn char_with_mods(c: char, modifiers: Modifiers) -> Self {
        let code = if c.is_ascii_alphabetic() {
            c.to_ascii_uppercase() as u32
        } else {
            c as u32
        };
        Self {
            code,
            key: Some(c),
            modifiers,
        }
    }

    /// A non-character key press (arrows, function keys, ...)
    pub const fn coded(code: u32, modifiers: Modifiers) -> Self {
        Self {
            code,
            key: None,
            modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        let mods = Modifiers::NONE;
        assert!(mods.is_empty());
        assert!(!mods.ctrl());
        assert!(!mods.shift());
        assert!(!mods.alt());
        assert!(!mods.meta());
    }

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.ctrl());
        assert!(mods.shift());
        assert!(!mods.alt());
        assert!(!mods.meta());
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!Modifiers::CTRL.contains(mods));
    }

    #[test]
    fn test_modifiers_new() {
        let mods = Modifiers::new(true, false, true, false);
        assert_eq!(mods, Modifiers::CTRL | Modifiers::ALT);
    }

    #[test]
    fn test_from_bits_masks_unknown() {
        assert_eq!(Modifiers::from_bits(0xFF).bits(), 0b1111);
        assert_eq!(Modifiers::from_bits(0b0100), Modifiers::ALT);
    }

    #[test]
    fn test_symbol_order_is_stable() {
        let all = Modifiers::META | Modifiers::SHIFT | Modifiers::ALT | Modifiers::CTRL;
        assert_eq!(all.symbols(), "^⌥⇧⌘");
        assert_eq!(Modifiers::META.to_string(), "⌘");
        assert_eq!(Modifiers::NONE.to_string(), "");
    }

    #[test]
    fn test_function_and_digit_codes() {
        assert_eq!(keys::function(1), Some(keys::F1));
        assert_eq!(keys::function(12), Some(keys::F12));
        assert_eq!(keys::function(13), None);
        assert_eq!(keys::digit(0), Some(keys::DIGIT_0));
        assert_eq!(keys::digit(9), Some(keys::DIGIT_9));
        assert_eq!(keys::digit(10), None);
    }

    #[test]
    fn test_char_event_code() {
        let event = KeyEvent::char('a');
        assert_eq!(event.code, 'A' as u32);
        assert_eq!(event.key, Some('a'));

        let event = KeyEvent::char('7');
        assert_eq!(event.code, keys::DIGIT_0 + 7);
    }
}
