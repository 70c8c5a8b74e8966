//! Default keybindings for the demo sketch
//!
//! Every callback just sends a [`SketchMsg`] to the event loop.

use std::sync::mpsc::Sender;

use super::binding::Keybinding;
use super::combo::KeyCombo;
use super::types::keys;
use crate::sketch::{Direction, SketchMsg};

/// Bind `combos` to sending `msg`
fn send(
    tx: &Sender<SketchMsg>,
    combos: impl IntoIterator<Item = KeyCombo>,
    usage: &str,
    msg: SketchMsg,
) -> Keybinding {
    let tx = tx.clone();
    Keybinding::from_fn(combos, usage, move || {
        if tx.send(msg).is_err() {
            tracing::warn!(?msg, "sketch event loop is gone, dropping message");
        }
    })
}

/// The sketch's bindings, in registration order
pub fn sketch_bindings(tx: &Sender<SketchMsg>) -> Vec<Keybinding> {
    vec![
        send(
            tx,
            [KeyCombo::char('h'), KeyCombo::new(keys::F1)],
            "Toggle this help",
            SketchMsg::ToggleHelp,
        ),
        send(
            tx,
            [KeyCombo::new(keys::UP)],
            "Move brush up",
            SketchMsg::Move(Direction::Up),
        ),
        send(
            tx,
            [KeyCombo::new(keys::DOWN)],
            "Move brush down",
            SketchMsg::Move(Direction::Down),
        ),
        send(
            tx,
            [KeyCombo::new(keys::LEFT)],
            "Move brush left",
            SketchMsg::Move(Direction::Left),
        ),
        send(
            tx,
            [KeyCombo::new(keys::RIGHT)],
            "Move brush right",
            SketchMsg::Move(Direction::Right),
        ),
        send(
            tx,
            "]=".chars().map(KeyCombo::char),
            "Larger brush",
            SketchMsg::GrowBrush,
        ),
        send(
            tx,
            "[-".chars().map(KeyCombo::char),
            "Smaller brush",
            SketchMsg::ShrinkBrush,
        ),
        send(
            tx,
            [KeyCombo::new(keys::SPACE)],
            "Lift or lower the pen",
            SketchMsg::TogglePen,
        ),
        send(tx, [KeyCombo::char('c')], "Clear canvas", SketchMsg::Clear),
        send(
            tx,
            [KeyCombo::char('c').alt()],
            "Next colour",
            SketchMsg::CycleColor,
        ),
        send(
            tx,
            [
                KeyCombo::char('z').meta().mac(),
                KeyCombo::char('z').ctrl().non_mac(),
            ],
            "Undo last dot",
            SketchMsg::Undo,
        ),
        send(
            tx,
            [
                KeyCombo::char('q').meta().mac(),
                KeyCombo::char('q').ctrl().non_mac(),
                KeyCombo::new(keys::ESCAPE),
            ],
            "Quit",
            SketchMsg::Quit,
        ),
    ]
}
