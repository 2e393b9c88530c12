//! Input subsystem.
//!
//! Public API is platform-agnostic. The window backend translates platform
//! events into [`InputEvent`]s that feed an [`InputState`]; the host samples
//! that state into an [`InputSnapshot`] once per tick.

mod snapshot;
mod source;
mod state;
mod types;

pub(crate) mod platform;

pub use snapshot::InputSnapshot;
pub use source::InputSource;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, Modifiers, MouseButton};
