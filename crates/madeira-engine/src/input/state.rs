use std::collections::HashSet;

use super::source::InputSource;
use super::types::{ButtonState, InputEvent, Key, Modifiers, MouseButton};
use crate::math::Vec2;

/// Live input state accumulated from platform events.
///
/// This is the polled side of the input backend: events are applied as they
/// arrive, and the host samples it once per tick into an
/// [`InputSnapshot`](super::InputSnapshot).
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    pub focused: bool,

    /// Last known pointer position; `None` once the pointer leaves the window.
    pub pointer_pos: Option<Vec2>,

    pub keys_down: HashSet<Key>,

    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered to unfocused windows.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(pos) => self.pointer_pos = Some(*pos),

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, .. } => match state {
                ButtonState::Pressed => {
                    self.keys_down.insert(*key);
                }
                ButtonState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    self.buttons_down.insert(*button);
                }
                ButtonState::Released => {
                    self.buttons_down.remove(button);
                }
            },
        }
    }
}

impl InputSource for InputState {
    fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    fn held_keys(&self) -> Vec<Key> {
        self.keys_down.iter().copied().collect()
    }

    fn held_buttons(&self) -> Vec<MouseButton> {
        self.buttons_down.iter().copied().collect()
    }

    fn pointer_position(&self) -> Option<Vec2> {
        self.pointer_pos
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: ButtonState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn press_and_release_track_held_keys() {
        let mut input = InputState::default();
        input.apply_event(&key(Key::A, ButtonState::Pressed));
        input.apply_event(&key(Key::B, ButtonState::Pressed));
        input.apply_event(&key(Key::A, ButtonState::Released));

        assert!(!input.key_down(Key::A));
        assert!(input.key_down(Key::B));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut input = InputState::default();
        input.apply_event(&key(Key::Space, ButtonState::Pressed));
        input.apply_event(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: ButtonState::Pressed,
        });
        input.apply_event(&InputEvent::Focused(false));

        assert!(input.held_keys().is_empty());
        assert!(input.held_buttons().is_empty());
    }

    #[test]
    fn pointer_leave_clears_position() {
        let mut input = InputState::default();
        input.apply_event(&InputEvent::PointerMoved(Vec2::new(3.0, 4.0)));
        assert_eq!(input.pointer_position(), Some(Vec2::new(3.0, 4.0)));
        input.apply_event(&InputEvent::PointerLeft);
        assert_eq!(input.pointer_position(), None);
    }
}
