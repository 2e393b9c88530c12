use std::collections::HashSet;

use super::source::InputSource;
use super::types::{Key, Modifiers, MouseButton};
use crate::math::Vec2;

/// Input as seen by states during one tick.
///
/// Captured by the host exactly once per tick, before the update hook; it
/// does not change again until the next tick's capture. The previous tick's
/// values are kept so states can query edges and pointer velocity.
#[derive(Debug, Default, Clone)]
pub struct InputSnapshot {
    keys: HashSet<Key>,
    previous_keys: HashSet<Key>,

    buttons: HashSet<MouseButton>,
    previous_buttons: HashSet<MouseButton>,

    pointer: Vec2,
    previous_pointer: Vec2,
    pointer_inside: bool,

    modifiers: Modifiers,
    captures: u64,
}

impl InputSnapshot {
    /// Rolls the current values into "previous" and samples `source`.
    pub fn capture(&mut self, source: &dyn InputSource) {
        self.previous_keys = std::mem::take(&mut self.keys);
        self.previous_buttons = std::mem::take(&mut self.buttons);
        self.previous_pointer = self.pointer;

        self.keys.extend(source.held_keys());
        self.buttons.extend(source.held_buttons());

        match source.pointer_position() {
            Some(pos) => {
                // Entering the window is not movement.
                if !self.pointer_inside {
                    self.previous_pointer = pos;
                }
                self.pointer = pos;
                self.pointer_inside = true;
            }
            None => self.pointer_inside = false,
        }

        self.modifiers = source.modifiers();
        self.captures += 1;
    }

    /// Number of captures so far; equals the tick being updated.
    pub fn captures(&self) -> u64 {
        self.captures
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Held this tick but not the previous one.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key) && !self.previous_keys.contains(&key)
    }

    /// Held the previous tick but not this one.
    pub fn key_released(&self, key: Key) -> bool {
        !self.keys.contains(&key) && self.previous_keys.contains(&key)
    }

    pub fn keys_down(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().copied()
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button) && !self.previous_buttons.contains(&button)
    }

    pub fn button_released(&self, button: MouseButton) -> bool {
        !self.buttons.contains(&button) && self.previous_buttons.contains(&button)
    }

    /// Last known pointer position in logical pixels.
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    pub fn previous_pointer_position(&self) -> Vec2 {
        self.previous_pointer
    }

    /// Pointer movement since the previous tick.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer - self.previous_pointer
    }

    /// Whether the pointer was over the window at capture time.
    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonState, InputEvent, InputState};

    fn press(input: &mut InputState, key: Key) {
        input.apply_event(&InputEvent::Key { key, state: ButtonState::Pressed, repeat: false });
    }

    fn release(input: &mut InputState, key: Key) {
        input.apply_event(&InputEvent::Key { key, state: ButtonState::Released, repeat: false });
    }

    #[test]
    fn snapshot_is_frozen_between_captures() {
        let mut live = InputState::default();
        let mut snap = InputSnapshot::default();

        press(&mut live, Key::W);
        snap.capture(&live);

        // Events after the capture belong to the next tick.
        release(&mut live, Key::W);
        press(&mut live, Key::S);
        assert!(snap.key_down(Key::W));
        assert!(!snap.key_down(Key::S));

        snap.capture(&live);
        assert!(!snap.key_down(Key::W));
        assert!(snap.key_down(Key::S));
    }

    #[test]
    fn edges_compare_against_previous_capture() {
        let mut live = InputState::default();
        let mut snap = InputSnapshot::default();

        press(&mut live, Key::Space);
        snap.capture(&live);
        assert!(snap.key_pressed(Key::Space));

        snap.capture(&live);
        assert!(snap.key_down(Key::Space));
        assert!(!snap.key_pressed(Key::Space));

        release(&mut live, Key::Space);
        snap.capture(&live);
        assert!(snap.key_released(Key::Space));
    }

    #[test]
    fn pointer_delta_tracks_movement() {
        let mut live = InputState::default();
        let mut snap = InputSnapshot::default();

        live.apply_event(&InputEvent::PointerMoved(Vec2::new(10.0, 10.0)));
        snap.capture(&live);
        assert_eq!(snap.pointer_delta(), Vec2::default());

        live.apply_event(&InputEvent::PointerMoved(Vec2::new(13.0, 6.0)));
        snap.capture(&live);
        assert_eq!(snap.pointer_delta(), Vec2::new(3.0, -4.0));
        assert_eq!(snap.previous_pointer_position(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn pointer_arriving_after_empty_capture_has_no_delta() {
        let mut live = InputState::default();
        let mut snap = InputSnapshot::default();

        snap.capture(&live);
        assert!(!snap.pointer_inside());

        live.apply_event(&InputEvent::PointerMoved(Vec2::new(400.0, 300.0)));
        snap.capture(&live);
        assert!(snap.pointer_inside());
        assert_eq!(snap.pointer_delta(), Vec2::default());
    }

    #[test]
    fn reentering_window_is_not_a_jump() {
        let mut live = InputState::default();
        let mut snap = InputSnapshot::default();

        live.apply_event(&InputEvent::PointerMoved(Vec2::new(5.0, 5.0)));
        snap.capture(&live);
        live.apply_event(&InputEvent::PointerLeft);
        snap.capture(&live);

        live.apply_event(&InputEvent::PointerMoved(Vec2::new(470.0, 20.0)));
        snap.capture(&live);
        assert_eq!(snap.pointer_delta(), Vec2::default());

        live.apply_event(&InputEvent::PointerMoved(Vec2::new(460.0, 22.0)));
        snap.capture(&live);
        assert_eq!(snap.pointer_delta(), Vec2::new(-10.0, 2.0));
    }

    #[test]
    fn pointer_leaving_keeps_last_position() {
        let mut live = InputState::default();
        let mut snap = InputSnapshot::default();

        live.apply_event(&InputEvent::PointerMoved(Vec2::new(5.0, 5.0)));
        snap.capture(&live);
        live.apply_event(&InputEvent::PointerLeft);
        snap.capture(&live);

        assert!(!snap.pointer_inside());
        assert_eq!(snap.pointer_position(), Vec2::new(5.0, 5.0));
        assert_eq!(snap.pointer_delta(), Vec2::default());
    }
}
