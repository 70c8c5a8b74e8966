//! Integration tests for registration, conflicts, dispatch and usage text

mod common;

use std::sync::mpsc;

use common::{both_platforms, Recorder};
use sketch_keys::keymap::{
    keys, sketch_bindings, KeyCombo, KeyEvent, KeyHandler, Keybinding, Modifiers,
};
use sketch_keys::platform::{OsClass, Platform};
use sketch_keys::sketch::SketchMsg;

// ========================================================================
// Conflict detection
// ========================================================================

#[test]
fn test_mac_and_non_mac_share_a_combo() {
    let rec = Recorder::new();
    for mut handler in both_platforms() {
        handler
            .register(rec.binding([KeyCombo::char('s').ctrl().mac()], "Mac save"))
            .unwrap();
        handler
            .register(rec.binding([KeyCombo::char('s').ctrl().non_mac()], "Other save"))
            .unwrap();
        assert_eq!(handler.len(), 2);
    }
}

#[test]
fn test_any_conflicts_with_each_specific_class() {
    for os in [OsClass::Mac, OsClass::NonMac] {
        let rec = Recorder::new();
        let mut handler = KeyHandler::new(Platform::non_mac());
        handler
            .register(rec.binding([KeyCombo::char('s').ctrl()], "Any save"))
            .unwrap();

        let err = handler
            .register(rec.binding([KeyCombo::char('s').ctrl().with_os(os)], "Specific save"))
            .unwrap_err();
        assert_eq!(err.usage(), "Specific save");
        assert_eq!(err.combos(), &["^S"]);
    }
}

#[test]
fn test_conflict_is_independent_of_running_platform() {
    // A clash between two Mac-only combos is rejected on a non-Mac too
    let rec = Recorder::new();
    let mut handler = KeyHandler::new(Platform::non_mac());
    handler
        .register(rec.binding([KeyCombo::char('w').meta().mac()], "Close"))
        .unwrap();
    assert!(handler
        .register(rec.binding([KeyCombo::char('w').meta().mac()], "Close again"))
        .is_err());
}

#[test]
fn test_different_modifiers_do_not_conflict() {
    let rec = Recorder::new();
    let mut handler = KeyHandler::new(Platform::mac());
    handler
        .register_all([
            rec.binding([KeyCombo::char('k')], "plain"),
            rec.binding([KeyCombo::char('k').shift()], "shift"),
            rec.binding([KeyCombo::char('k').ctrl().shift()], "ctrl shift"),
            rec.binding([KeyCombo::char('K')], "upper"),
        ])
        .unwrap();
    assert_eq!(handler.len(), 4);
}

#[test]
fn test_overlapping_combos_within_one_binding_are_allowed() {
    let rec = Recorder::new();
    let mut handler = KeyHandler::new(Platform::mac());
    handler
        .register(rec.binding(
            [KeyCombo::char('d').ctrl(), KeyCombo::char('d').ctrl().mac()],
            "twice",
        ))
        .unwrap();

    // Both copies are now claimed
    assert!(handler
        .register(rec.binding([KeyCombo::char('d').ctrl().non_mac()], "other"))
        .is_err());
}

#[test]
fn test_find_conflicts_does_not_register() {
    let rec = Recorder::new();
    let mut handler = KeyHandler::new(Platform::mac());
    handler
        .register(rec.binding([KeyCombo::new(keys::F1)], "help"))
        .unwrap();

    let candidate = rec.binding([KeyCombo::new(keys::F1), KeyCombo::new(keys::F12)], "other");
    let conflicts = handler.find_conflicts(&candidate);
    assert_eq!(conflicts, vec![KeyCombo::new(keys::F1)]);
    assert_eq!(handler.len(), 1);
}

// ========================================================================
// Dispatch
// ========================================================================

#[test]
fn test_dispatch_picks_platform_variant() {
    let rec = Recorder::new();
    let [mut mac, mut other] = both_platforms();
    for handler in [&mut mac, &mut other] {
        handler
            .register(rec.binding(
                [KeyCombo::char('z').meta().mac(), KeyCombo::char('z').ctrl().non_mac()],
                "Undo",
            ))
            .unwrap();
    }

    let cmd_z = KeyEvent::char_with_mods('z', Modifiers::META);
    let ctrl_z = KeyEvent::char_with_mods('z', Modifiers::CTRL);

    assert!(mac.dispatch(&cmd_z));
    assert!(!mac.dispatch(&ctrl_z));
    assert!(other.dispatch(&ctrl_z));
    assert!(!other.dispatch(&cmd_z));
    assert_eq!(rec.fired(), vec!["Undo", "Undo"]);
}

#[test]
fn test_unbound_key_is_not_handled() {
    let rec = Recorder::new();
    let mut handler = KeyHandler::new(Platform::mac());
    handler.register(rec.binding([KeyCombo::char('a')], "a")).unwrap();

    assert!(!handler.dispatch(&KeyEvent::char('b')));
    assert!(!handler.dispatch(&KeyEvent::char_with_mods('a', Modifiers::SHIFT)));
    assert!(rec.fired().is_empty());
}

#[test]
fn test_letters_match_by_character_case() {
    let rec = Recorder::new();
    let mut handler = KeyHandler::new(Platform::non_mac());
    handler
        .register_all([
            rec.binding([KeyCombo::char('g')], "lower"),
            rec.binding([KeyCombo::char('G')], "upper"),
        ])
        .unwrap();

    // Both share the G key code; the produced character decides
    assert!(handler.dispatch(&KeyEvent::char('g')));
    assert!(handler.dispatch(&KeyEvent::new(u32::from(b'G'), Some('G'), Modifiers::NONE)));
    assert_eq!(rec.fired(), vec!["lower", "upper"]);
}

#[test]
fn test_punctuation_does_not_fire_on_arrow_keys() {
    let rec = Recorder::new();
    let mut handler = KeyHandler::new(Platform::non_mac());
    handler
        .register(Keybinding::for_chars("%&", rec.callback("Percent or amp")))
        .unwrap();

    // '%' and '&' share their codes with Left and Up
    assert!(!handler.dispatch(&KeyEvent::coded(keys::LEFT, Modifiers::NONE)));
    assert!(!handler.dispatch(&KeyEvent::coded(keys::UP, Modifiers::NONE)));
    assert!(rec.fired().is_empty());

    assert!(handler.dispatch(&KeyEvent::new(u32::from(b'5'), Some('%'), Modifiers::SHIFT)));
    assert_eq!(rec.fired(), vec!["Percent or amp"]);
    assert_eq!(handler.usage_lines(), vec!["% Percent or amp", "& Percent or amp"]);
}

#[test]
fn test_override_switches_dispatch() {
    let rec = Recorder::new();
    let mut handler = KeyHandler::new(Platform::non_mac());
    handler
        .register(rec.binding([KeyCombo::char('o').meta().mac()], "Open"))
        .unwrap();

    let cmd_o = KeyEvent::char_with_mods('o', Modifiers::META);
    assert!(!handler.dispatch(&cmd_o));

    handler.set_platform_override(Some(OsClass::Mac));
    assert!(handler.dispatch(&cmd_o));
    assert_eq!(rec.fired(), vec!["Open"]);
}

// ========================================================================
// Usage text
// ========================================================================

#[test]
fn test_usage_separator() {
    let rec = Recorder::new();
    let mut handler = KeyHandler::new(Platform::non_mac());
    handler
        .register_all([
            rec.binding([KeyCombo::char('a')], "Alpha"),
            rec.binding([KeyCombo::new(keys::UP).shift()], "Beta"),
        ])
        .unwrap();

    assert_eq!(handler.usage_text_with_separator(" | "), "A Alpha | ⇧↑ Beta");
}

#[test]
fn test_usage_modifier_order() {
    let rec = Recorder::new();
    let mut handler = KeyHandler::new(Platform::mac());
    handler
        .register(rec.binding(
            [KeyCombo::char('p').meta().shift().alt().ctrl()],
            "Everything",
        ))
        .unwrap();
    assert_eq!(handler.usage_text(), "^⌥⇧⌘P Everything");
}

#[test]
fn test_empty_handler_has_empty_usage() {
    let handler = KeyHandler::new(Platform::mac());
    assert_eq!(handler.usage_text(), "");
}

// ========================================================================
// Demo bindings
// ========================================================================

#[test]
fn test_sketch_usage_lists_only_active_platform() {
    let (tx, _rx) = mpsc::channel::<SketchMsg>();

    let mut mac = KeyHandler::new(Platform::mac());
    mac.register_all(sketch_bindings(&tx)).unwrap();
    let usage = mac.usage_text();
    assert!(usage.contains("⌘Z Undo last dot"));
    assert!(!usage.contains("^Z"));
    assert!(usage.contains("⌥C Next colour"));

    let mut other = KeyHandler::new(Platform::non_mac());
    other.register_all(sketch_bindings(&tx)).unwrap();
    let usage = other.usage_text();
    assert!(usage.contains("^Z Undo last dot"));
    assert!(!usage.contains("⌘"));
    assert!(usage.lines().next().unwrap().ends_with("Toggle this help"));
}
