use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Per-frame input deltas.
///
/// `InputState` holds what is currently down; `InputFrame` holds what changed since
/// the previous frame. The runtime clears it after every `on_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys that went down this frame. OS key-repeats are not included.
    pub keys_pressed: HashSet<Key>,

    /// Keys the OS auto-repeated this frame while held.
    pub keys_repeated: HashSet<Key>,

    /// Keys released this frame.
    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_repeated.clear();
        self.keys_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    #[inline]
    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    #[inline]
    pub fn repeated(&self, key: Key) -> bool {
        self.keys_repeated.contains(&key)
    }

    /// Press events this frame in arrival order, paired with their OS-repeat flag.
    pub fn presses_in_order(&self) -> impl Iterator<Item = (Key, bool)> + '_ {
        self.events.iter().filter_map(|ev| match ev {
            InputEvent::Key { key, state: KeyState::Pressed, repeat } => Some((*key, *repeat)),
            _ => None,
        })
    }
}
