use super::types::{Key, Modifiers, MouseButton};
use crate::math::Vec2;

/// Input backend contract polled once per tick.
pub trait InputSource {
    /// Whether `key` is currently held.
    fn key_down(&self, key: Key) -> bool;

    /// Whether `button` is currently held.
    fn button_down(&self, button: MouseButton) -> bool;

    /// Every key currently held.
    fn held_keys(&self) -> Vec<Key>;

    /// Every pointer button currently held.
    fn held_buttons(&self) -> Vec<MouseButton>;

    /// Current pointer coordinates, if the pointer is over the window.
    fn pointer_position(&self) -> Option<Vec2>;

    fn modifiers(&self) -> Modifiers {
        Modifiers::default()
    }
}
