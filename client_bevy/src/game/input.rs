use bevy::prelude::*;
use starfield_shared::input::Key;

use super::{FixedSet, StarWorld, UpdateSet};

pub struct InputPlugin;

/// Key edges seen since the last world tick, oldest first.
#[derive(Resource, Default)]
pub(crate) struct KeyQueue {
    pub(crate) events: Vec<(Key, bool)>,
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, collect_keys.in_set(UpdateSet::Input))
            .add_systems(FixedUpdate, apply_queued_keys.in_set(FixedSet::Input));
    }
}

fn collect_keys(mut queue: ResMut<KeyQueue>, keys: Res<ButtonInput<KeyCode>>) {
    for code in keys.get_just_pressed() {
        if let Some(key) = key_from_code(*code) {
            queue.events.push((key, true));
        }
    }
    for code in keys.get_just_released() {
        if let Some(key) = key_from_code(*code) {
            queue.events.push((key, false));
        }
    }
}

/// Deliver queued keys to the world between ticks, never during one.
fn apply_queued_keys(mut queue: ResMut<KeyQueue>, mut stars: ResMut<StarWorld>) {
    if queue.events.is_empty() {
        return;
    }
    for (key, pressed) in queue.events.drain(..) {
        let handled = stars.world.on_key(key, pressed);
        debug!("key {:?} pressed={} handled={}", key, pressed, handled);
    }
}

const LETTERS: [(KeyCode, char); 26] = [
    (KeyCode::KeyA, 'a'),
    (KeyCode::KeyB, 'b'),
    (KeyCode::KeyC, 'c'),
    (KeyCode::KeyD, 'd'),
    (KeyCode::KeyE, 'e'),
    (KeyCode::KeyF, 'f'),
    (KeyCode::KeyG, 'g'),
    (KeyCode::KeyH, 'h'),
    (KeyCode::KeyI, 'i'),
    (KeyCode::KeyJ, 'j'),
    (KeyCode::KeyK, 'k'),
    (KeyCode::KeyL, 'l'),
    (KeyCode::KeyM, 'm'),
    (KeyCode::KeyN, 'n'),
    (KeyCode::KeyO, 'o'),
    (KeyCode::KeyP, 'p'),
    (KeyCode::KeyQ, 'q'),
    (KeyCode::KeyR, 'r'),
    (KeyCode::KeyS, 's'),
    (KeyCode::KeyT, 't'),
    (KeyCode::KeyU, 'u'),
    (KeyCode::KeyV, 'v'),
    (KeyCode::KeyW, 'w'),
    (KeyCode::KeyX, 'x'),
    (KeyCode::KeyY, 'y'),
    (KeyCode::KeyZ, 'z'),
];

const DIGITS: [(KeyCode, char); 10] = [
    (KeyCode::Digit0, '0'),
    (KeyCode::Digit1, '1'),
    (KeyCode::Digit2, '2'),
    (KeyCode::Digit3, '3'),
    (KeyCode::Digit4, '4'),
    (KeyCode::Digit5, '5'),
    (KeyCode::Digit6, '6'),
    (KeyCode::Digit7, '7'),
    (KeyCode::Digit8, '8'),
    (KeyCode::Digit9, '9'),
];

/// Map a physical key to the world's key type. Keys the world can never
/// react to map to `None`.
pub(crate) fn key_from_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,
        _ => {
            let (_, c) = LETTERS
                .iter()
                .chain(DIGITS.iter())
                .find(|(candidate, _)| *candidate == code)?;
            Key::Char(*c)
        }
    };
    Some(key)
}
