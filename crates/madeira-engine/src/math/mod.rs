//! Small value types shared by input, config and the render backend.

mod color;
mod vec2;

pub use color::Color;
pub use vec2::Vec2;
