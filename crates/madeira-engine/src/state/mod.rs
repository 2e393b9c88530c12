//! Application states.
//!
//! Exactly one [`State`] is current at a time. The host calls its hooks with
//! a [`StateCtx`], through which a state reads input, loads resources and
//! requests a transition or a stop.

mod ctx;

pub use ctx::StateCtx;
pub(crate) use ctx::Commands;

use anyhow::Result;

use crate::host::Backend;

/// A unit of application behavior driven by the host.
///
/// All hooks default to doing nothing.
pub trait State<B: Backend>: 'static {
    /// Name used in logs and errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called once when the state becomes current.
    fn enter(&mut self, _ctx: &mut StateCtx<'_, B>) -> Result<()> {
        Ok(())
    }

    /// Called once per tick, after input has been captured.
    fn update(&mut self, _ctx: &mut StateCtx<'_, B>) -> Result<()> {
        Ok(())
    }

    /// Called once per tick into a cleared frame. Not called when the backend
    /// has no frame to give.
    fn render(&mut self, _ctx: &mut StateCtx<'_, B>, _frame: &mut B::Frame<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once before the state is replaced.
    fn exit(&mut self, _ctx: &mut StateCtx<'_, B>) -> Result<()> {
        Ok(())
    }
}
