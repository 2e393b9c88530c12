//! Run loop and its platform seam.
//!
//! [`ApplicationHost`] drives the current [`State`](crate::state::State)
//! through a [`Backend`], which supplies events, input and frames.
//! [`WindowBackend`](crate::window::WindowBackend) is the winit + wgpu one.

mod application;
mod backend;

#[cfg(test)]
pub(crate) mod scripted;

pub use application::{ApplicationHost, StopHandle, TickStatus};
pub use backend::{Backend, BackendStatus, Frame};
