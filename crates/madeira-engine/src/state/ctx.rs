use std::collections::VecDeque;

use crate::host::Backend;
use crate::input::InputSnapshot;
use crate::resource::Library;
use crate::time::FrameTime;

use super::State;

/// Requests recorded while a hook runs.
///
/// The host applies them after the hook returns.
pub(crate) struct Commands<B: Backend> {
    pub(crate) transitions: VecDeque<Box<dyn State<B>>>,
    pub(crate) stop: bool,
}

impl<B: Backend> Default for Commands<B> {
    fn default() -> Self {
        Self {
            transitions: VecDeque::new(),
            stop: false,
        }
    }
}

/// Handle into the host passed to every state hook.
pub struct StateCtx<'a, B: Backend> {
    pub(crate) input: &'a InputSnapshot,
    pub(crate) library: &'a mut Library,
    pub(crate) ticks: u64,
    pub(crate) time: FrameTime,
    pub(crate) commands: &'a mut Commands<B>,
}

impl<B: Backend> StateCtx<'_, B> {
    /// Input as captured at the start of this tick.
    pub fn input(&self) -> &InputSnapshot {
        self.input
    }

    pub fn library(&mut self) -> &mut Library {
        self.library
    }

    /// Number of completed updates.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// Requests a switch to `next`.
    ///
    /// The switch happens as soon as the running hook returns: the current
    /// state's `exit` runs, then `next` becomes current and its `enter` runs.
    /// Several requests are applied in order.
    pub fn change_state(&mut self, next: impl State<B>) {
        self.commands.transitions.push_back(Box::new(next));
    }

    /// Requests the run loop to stop at the end of the current tick.
    pub fn stop(&mut self) {
        self.commands.stop = true;
    }
}
