//! Window backend.
//!
//! Owns the `winit` event loop and window and wires them to the GPU layer.

mod backend;

pub use backend::{RenderFrame, WindowBackend};
