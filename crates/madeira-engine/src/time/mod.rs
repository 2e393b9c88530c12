//! Tick timing.
//!
//! - `FrameClock` produces delta time per tick
//! - `TickPacer` turns a target tick rate into deadlines for the event pump

mod frame_clock;
mod pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::TickPacer;
