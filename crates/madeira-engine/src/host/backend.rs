use std::time::Instant;

use anyhow::Result;

use crate::input::InputSource;
use crate::math::Color;

/// Outcome of pumping platform events.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BackendStatus {
    Continue,
    /// The window was closed.
    Closed,
}

/// Platform collaborator driven by the host: events, input and frames.
pub trait Backend: 'static {
    type Frame<'a>: Frame
    where
        Self: 'a;

    /// Processes pending platform events, waiting until `deadline` if given.
    fn pump_events(&mut self, deadline: Option<Instant>) -> Result<BackendStatus>;

    /// Current input state fed by pumped events.
    fn input(&self) -> &dyn InputSource;

    /// Acquires a frame cleared to `color`.
    ///
    /// `Ok(None)` means no frame is available this tick (for example the
    /// surface was just reconfigured) and rendering should be skipped.
    fn clear_frame(&mut self, color: Color) -> Result<Option<Self::Frame<'_>>>;
}

/// A frame acquired from a [`Backend`].
pub trait Frame {
    /// Submits recorded work and shows the frame.
    fn present(self) -> Result<()>;
}
