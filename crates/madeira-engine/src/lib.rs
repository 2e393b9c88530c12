//! Madeira engine crate.
//!
//! A small application framework: a typed resource [`Library`] with
//! per-type caching loaders, an [`ApplicationHost`] that drives one current
//! [`State`] through a fixed-rate loop, and per-tick [`InputSnapshot`]s.
//! [`WindowBackend`] runs it on winit + wgpu.

mod config;
mod error;

pub mod device;
pub mod host;
pub mod input;
pub mod logging;
pub mod math;
pub mod resource;
pub mod state;
pub mod time;
pub mod window;

pub use config::HostConfig;
pub use error::{BoxError, Error};
pub use host::{ApplicationHost, Backend, StopHandle, TickStatus};
pub use input::InputSnapshot;
pub use resource::Library;
pub use state::{State, StateCtx};
pub use window::WindowBackend;
