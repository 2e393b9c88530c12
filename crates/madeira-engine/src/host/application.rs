use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::HostConfig;
use crate::error::Error;
use crate::input::InputSnapshot;
use crate::resource::Library;
use crate::state::{Commands, State, StateCtx};
use crate::time::{FrameClock, FrameTime, TickPacer};

use super::backend::{Backend, BackendStatus, Frame};

/// Longest chain of transitions applied in one step before giving up.
const MAX_TRANSITION_CHAIN: usize = 64;

/// Result of a single [`ApplicationHost::tick`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickStatus {
    Continue,
    /// A stop was requested.
    Stopped,
    /// The backend's window was closed.
    Closed,
}

/// Thread-safe handle that asks a running host to stop.
///
/// The flag is checked at tick boundaries.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Owns the run loop, the current state and everything states reach through
/// their [`StateCtx`].
///
/// One tick, in order:
/// 1. pump backend events until the pacing deadline
/// 2. capture the input snapshot
/// 3. update the current state, then count the tick
/// 4. apply requested transitions
/// 5. clear a frame, render the current state into it and present it
/// 6. apply transitions and stop requests made while rendering
pub struct ApplicationHost<B: Backend> {
    config: HostConfig,
    backend: B,
    library: Library,
    input: InputSnapshot,
    state: Option<Box<dyn State<B>>>,
    commands: Commands<B>,

    ticks: u64,
    time: FrameTime,
    clock: FrameClock,
    pacer: TickPacer,
    stop: StopHandle,
}

impl<B: Backend> ApplicationHost<B> {
    /// Creates a host with the default resource loaders.
    pub fn new(config: HostConfig, backend: B) -> Self {
        let library = Library::new(config.search.clone());
        Self::with_library(config, backend, library)
    }

    pub fn with_library(config: HostConfig, backend: B, library: Library) -> Self {
        let pacer = TickPacer::new(config.target_fps);
        Self {
            config,
            backend,
            library,
            input: InputSnapshot::default(),
            state: None,
            commands: Commands::default(),
            ticks: 0,
            time: FrameTime::start(),
            clock: FrameClock::new(),
            pacer,
            stop: StopHandle::default(),
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    /// Number of completed updates.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn current_state_name(&self) -> Option<&str> {
        self.state.as_deref().map(|state| state.name())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Makes `next` the current state.
    ///
    /// The current state (if any) exits first; `next` enters once it is
    /// current. Transitions requested by `enter` are applied before this
    /// returns.
    pub fn change_state(&mut self, next: impl State<B>) -> Result<()> {
        self.commands.transitions.push_back(Box::new(next));
        self.apply_commands()
    }

    /// Asks the run loop to stop at the next tick boundary.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Runs ticks until a stop is requested or the window closes.
    pub fn run(&mut self) -> Result<()> {
        match self.pacer.interval() {
            Some(interval) => log::info!(
                "running at {} ticks per second ({interval:?} per tick)",
                self.config.target_fps
            ),
            None => log::info!("running uncapped"),
        }

        loop {
            match self.tick()? {
                TickStatus::Continue => {}
                TickStatus::Stopped => {
                    log::info!("stopped after {} ticks", self.ticks);
                    return Ok(());
                }
                TickStatus::Closed => {
                    log::info!("window closed after {} ticks", self.ticks);
                    return Ok(());
                }
            }
        }
    }

    /// Runs exactly one iteration of the loop.
    pub fn tick(&mut self) -> Result<TickStatus> {
        if self.stop.is_stopped() {
            return Ok(TickStatus::Stopped);
        }

        let deadline = self.pacer.next_deadline();
        if self.backend.pump_events(deadline)? == BackendStatus::Closed {
            return Ok(TickStatus::Closed);
        }

        self.input.capture(self.backend.input());
        self.time = self.clock.tick();

        if let Some(state) = self.state.as_mut() {
            let mut ctx = StateCtx {
                input: &self.input,
                library: &mut self.library,
                ticks: self.ticks,
                time: self.time,
                commands: &mut self.commands,
            };
            state
                .update(&mut ctx)
                .with_context(|| format!("state `{}` failed during update", state.name()))?;
        }
        self.ticks += 1;
        self.apply_commands()?;

        if let Some(mut frame) = self.backend.clear_frame(self.config.clear_color)? {
            if let Some(state) = self.state.as_mut() {
                let mut ctx = StateCtx {
                    input: &self.input,
                    library: &mut self.library,
                    ticks: self.ticks,
                    time: self.time,
                    commands: &mut self.commands,
                };
                state
                    .render(&mut ctx, &mut frame)
                    .with_context(|| format!("state `{}` failed during render", state.name()))?;
            }
            frame.present()?;
        }
        self.apply_commands()?;

        if self.stop.is_stopped() {
            Ok(TickStatus::Stopped)
        } else {
            Ok(TickStatus::Continue)
        }
    }

    fn apply_commands(&mut self) -> Result<()> {
        let result = self.apply_transitions();
        if result.is_err() {
            self.commands.transitions.clear();
        }

        if std::mem::take(&mut self.commands.stop) {
            log::info!("stop requested");
            self.stop.stop();
        }

        result
    }

    fn apply_transitions(&mut self) -> Result<()> {
        let mut applied = 0;

        while let Some(next) = self.commands.transitions.pop_front() {
            if applied == MAX_TRANSITION_CHAIN {
                return Err(Error::InvalidStateTransition {
                    from: self.current_state_name().unwrap_or("<none>").to_string(),
                    to: next.name().to_string(),
                    reason: format!("more than {MAX_TRANSITION_CHAIN} transitions chained"),
                }
                .into());
            }
            applied += 1;

            self.switch_to(next)?;
        }

        Ok(())
    }

    fn switch_to(&mut self, next: Box<dyn State<B>>) -> Result<()> {
        if let Some(current) = self.state.as_mut() {
            let mut ctx = StateCtx {
                input: &self.input,
                library: &mut self.library,
                ticks: self.ticks,
                time: self.time,
                commands: &mut self.commands,
            };
            current
                .exit(&mut ctx)
                .with_context(|| format!("state `{}` failed during exit", current.name()))?;
        }

        let previous = self.state.replace(next);
        log::info!(
            "state change: {} -> {}",
            previous.as_deref().map_or("<none>", |state| state.name()),
            self.current_state_name().unwrap_or("<none>"),
        );
        drop(previous);

        if let Some(current) = self.state.as_mut() {
            let mut ctx = StateCtx {
                input: &self.input,
                library: &mut self.library,
                ticks: self.ticks,
                time: self.time,
                commands: &mut self.commands,
            };
            current
                .enter(&mut ctx)
                .with_context(|| format!("state `{}` failed during enter", current.name()))?;
        }

        Ok(())
    }
}
