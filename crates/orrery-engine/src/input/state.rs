use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current keyboard state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Release everything on focus loss to avoid stuck keys.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => {
                    if *repeat {
                        frame.keys_repeated.insert(*key);
                    } else if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, repeat }
    }

    #[test]
    fn press_and_release_are_recorded() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::C, KeyState::Pressed, false));
        assert!(state.key_down(Key::C));
        assert!(frame.pressed(Key::C));

        frame.clear();
        state.apply_event(&mut frame, key(Key::C, KeyState::Released, false));
        assert!(!state.key_down(Key::C));
        assert!(frame.keys_released.contains(&Key::C));
        assert!(!frame.pressed(Key::C));
    }

    #[test]
    fn held_key_is_not_pressed_again() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::ArrowUp, KeyState::Pressed, false));
        frame.clear();

        state.apply_event(&mut frame, key(Key::ArrowUp, KeyState::Pressed, false));
        assert!(!frame.pressed(Key::ArrowUp));
        assert!(!frame.repeated(Key::ArrowUp));
    }

    #[test]
    fn os_repeat_is_reported_apart_from_presses() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::C, KeyState::Pressed, false));
        frame.clear();

        state.apply_event(&mut frame, key(Key::C, KeyState::Pressed, true));
        assert!(!frame.pressed(Key::C));
        assert!(frame.repeated(Key::C));
        assert!(state.key_down(Key::C));

        let presses: Vec<(Key, bool)> = frame.presses_in_order().collect();
        assert_eq!(presses, vec![(Key::C, true)]);
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed, false));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.keys_down.is_empty());
        assert!(!state.focused);
    }

    #[test]
    fn presses_keep_arrival_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::Digit2, KeyState::Pressed, false));
        state.apply_event(&mut frame, key(Key::ArrowUp, KeyState::Pressed, false));
        state.apply_event(&mut frame, key(Key::Digit2, KeyState::Released, false));

        let order: Vec<(Key, bool)> = frame.presses_in_order().collect();
        assert_eq!(order, vec![(Key::Digit2, false), (Key::ArrowUp, false)]);
    }
}
