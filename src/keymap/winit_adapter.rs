//! Adapter to convert winit key events to our KeyEvent type

use winit::event::{ElementState, KeyEvent as WinitKeyEvent};
use winit::keyboard::{Key, KeyCode as WinitKeyCode, ModifiersState, NamedKey, PhysicalKey};

use super::types::{keys, KeyEvent, Modifiers};

/// Convert winit modifier state to our Modifiers (super/logo = meta)
pub fn modifiers_from_winit(state: ModifiersState) -> Modifiers {
    Modifiers::new(
        state.control_key(),
        state.shift_key(),
        state.alt_key(),
        state.super_key(),
    )
}

/// Convert a winit key press to our KeyEvent
///
/// Key releases are ignored.
pub fn key_event_from_winit(event: &WinitKeyEvent, modifiers: ModifiersState) -> Option<KeyEvent> {
    if event.state != ElementState::Pressed {
        return None;
    }
    key_event_from_keys(&event.logical_key, event.physical_key, modifiers)
}

/// Convert winit logical/physical key data to our KeyEvent
///
/// Returns None if the key has neither a known code nor a character.
pub fn key_event_from_keys(
    logical_key: &Key,
    physical_key: PhysicalKey,
    modifiers: ModifiersState,
) -> Option<KeyEvent> {
    let mods = modifiers_from_winit(modifiers);
    let physical_letter = physical_letter(physical_key);

    let key = match logical_key {
        Key::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
                // Option/AltGr turn letters into other glyphs; fall back to the key cap
                (Some(c), None) => physical_letter
                    .map(|l| {
                        if mods.shift() {
                            l.to_ascii_uppercase()
                        } else {
                            l
                        }
                    })
                    .or(Some(c)),
                _ => None,
            }
        }
        Key::Named(NamedKey::Space) => Some(' '),
        _ => None,
    };

    let code = code_from_physical(physical_key).or_else(|| code_from_named(logical_key));

    match (code, key) {
        (Some(code), key) => Some(KeyEvent::new(code, key, mods)),
        (None, Some(c)) => Some(KeyEvent::new(c as u32, Some(c), mods)),
        (None, None) => None,
    }
}

/// Lowercase letter printed on a physical key (US layout)
fn physical_letter(physical_key: PhysicalKey) -> Option<char> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };
    let letter = match code {
        WinitKeyCode::KeyA => 'a',
        WinitKeyCode::KeyB => 'b',
        WinitKeyCode::KeyC => 'c',
        WinitKeyCode::KeyD => 'd',
        WinitKeyCode::KeyE => 'e',
        WinitKeyCode::KeyF => 'f',
        WinitKeyCode::KeyG => 'g',
        WinitKeyCode::KeyH => 'h',
        WinitKeyCode::KeyI => 'i',
        WinitKeyCode::KeyJ => 'j',
        WinitKeyCode::KeyK => 'k',
        WinitKeyCode::KeyL => 'l',
        WinitKeyCode::KeyM => 'm',
        WinitKeyCode::KeyN => 'n',
        WinitKeyCode::KeyO => 'o',
        WinitKeyCode::KeyP => 'p',
        WinitKeyCode::KeyQ => 'q',
        WinitKeyCode::KeyR => 'r',
        WinitKeyCode::KeyS => 's',
        WinitKeyCode::KeyT => 't',
        WinitKeyCode::KeyU => 'u',
        WinitKeyCode::KeyV => 'v',
        WinitKeyCode::KeyW => 'w',
        WinitKeyCode::KeyX => 'x',
        WinitKeyCode::KeyY => 'y',
        WinitKeyCode::KeyZ => 'z',
        _ => return None,
    };
    Some(letter)
}

/// Raw key code for a physical key
fn code_from_physical(physical_key: PhysicalKey) -> Option<u32> {
    if let Some(letter) = physical_letter(physical_key) {
        return Some(letter.to_ascii_uppercase() as u32);
    }

    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };
    let mapped = match code {
        WinitKeyCode::Digit0 | WinitKeyCode::Numpad0 => keys::DIGIT_0,
        WinitKeyCode::Digit1 | WinitKeyCode::Numpad1 => keys::DIGIT_0 + 1,
        WinitKeyCode::Digit2 | WinitKeyCode::Numpad2 => keys::DIGIT_0 + 2,
        WinitKeyCode::Digit3 | WinitKeyCode::Numpad3 => keys::DIGIT_0 + 3,
        WinitKeyCode::Digit4 | WinitKeyCode::Numpad4 => keys::DIGIT_0 + 4,
        WinitKeyCode::Digit5 | WinitKeyCode::Numpad5 => keys::DIGIT_0 + 5,
        WinitKeyCode::Digit6 | WinitKeyCode::Numpad6 => keys::DIGIT_0 + 6,
        WinitKeyCode::Digit7 | WinitKeyCode::Numpad7 => keys::DIGIT_0 + 7,
        WinitKeyCode::Digit8 | WinitKeyCode::Numpad8 => keys::DIGIT_0 + 8,
        WinitKeyCode::Digit9 | WinitKeyCode::Numpad9 => keys::DIGIT_0 + 9,

        WinitKeyCode::Minus => keys::MINUS,
        WinitKeyCode::Equal => keys::EQUALS,
        WinitKeyCode::BracketLeft => keys::OPEN_BRACKET,
        WinitKeyCode::BracketRight => keys::CLOSE_BRACKET,
        WinitKeyCode::Backslash => keys::BACKSLASH,
        WinitKeyCode::Semicolon => keys::SEMICOLON,
        WinitKeyCode::Quote => keys::QUOTE,
        WinitKeyCode::Backquote => keys::BACK_QUOTE,
        WinitKeyCode::Comma => keys::COMMA,
        WinitKeyCode::Period => keys::PERIOD,
        WinitKeyCode::Slash => keys::SLASH,

        WinitKeyCode::Space => keys::SPACE,
        WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => keys::ENTER,
        WinitKeyCode::Tab => keys::TAB,
        WinitKeyCode::Backspace => keys::BACKSPACE,
        WinitKeyCode::Delete => keys::DELETE,
        WinitKeyCode::Escape => keys::ESCAPE,

        WinitKeyCode::ArrowUp => keys::UP,
        WinitKeyCode::ArrowDown => keys::DOWN,
        WinitKeyCode::ArrowLeft => keys::LEFT,
        WinitKeyCode::ArrowRight => keys::RIGHT,
        WinitKeyCode::Home => keys::HOME,
        WinitKeyCode::End => keys::END,
        WinitKeyCode::PageUp => keys::PAGE_UP,
        WinitKeyCode::PageDown => keys::PAGE_DOWN,

        WinitKeyCode::F1 => keys::F1,
        WinitKeyCode::F2 => keys::F1 + 1,
        WinitKeyCode::F3 => keys::F1 + 2,
        WinitKeyCode::F4 => keys::F1 + 3,
        WinitKeyCode::F5 => keys::F1 + 4,
        WinitKeyCode::F6 => keys::F1 + 5,
        WinitKeyCode::F7 => keys::F1 + 6,
        WinitKeyCode::F8 => keys::F1 + 7,
        WinitKeyCode::F9 => keys::F1 + 8,
        WinitKeyCode::F10 => keys::F1 + 9,
        WinitKeyCode::F11 => keys::F1 + 10,
        WinitKeyCode::F12 => keys::F12,

        _ => return None,
    };
    Some(mapped)
}

/// Raw key code for a named logical key, used when the physical key is unknown
fn code_from_named(logical_key: &Key) -> Option<u32> {
    let Key::Named(named) = logical_key else {
        return None;
    };
    let mapped = match named {
        NamedKey::Enter => keys::ENTER,
        NamedKey::Escape => keys::ESCAPE,
        NamedKey::Tab => keys::TAB,
        NamedKey::Backspace => keys::BACKSPACE,
        NamedKey::Delete => keys::DELETE,
        NamedKey::Space => keys::SPACE,
        NamedKey::ArrowUp => keys::UP,
        NamedKey::ArrowDown => keys::DOWN,
        NamedKey::ArrowLeft => keys::LEFT,
        NamedKey::ArrowRight => keys::RIGHT,
        NamedKey::Home => keys::HOME,
        NamedKey::End => keys::END,
        NamedKey::PageUp => keys::PAGE_UP,
        NamedKey::PageDown => keys::PAGE_DOWN,
        _ => return None,
    };
    Some(mapped)
}
