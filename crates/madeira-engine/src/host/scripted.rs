//! Deterministic backend for driving the host in tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;

use crate::input::{InputEvent, InputSource, InputState};
use crate::math::Color;

use super::backend::{Backend, BackendStatus, Frame};

/// Shared, ordered record of what happened during a test.
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub(crate) fn record(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Backend feeding one scripted batch of input events per pump.
pub(crate) struct ScriptedBackend {
    journal: Journal,
    input: InputState,
    script: VecDeque<Vec<InputEvent>>,
    deadlines: Vec<Option<Instant>>,
    drawn: Vec<String>,
    close_after: Option<usize>,
    withhold_frames: bool,
}

impl ScriptedBackend {
    pub(crate) fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            input: InputState::default(),
            script: VecDeque::new(),
            deadlines: Vec::new(),
            drawn: Vec::new(),
            close_after: None,
            withhold_frames: false,
        }
    }

    /// Queues the events delivered by the next unscripted pump.
    pub(crate) fn script(&mut self, events: Vec<InputEvent>) {
        self.script.push_back(events);
    }

    /// Reports the window closed on every pump after the first `pumps`.
    pub(crate) fn close_after(&mut self, pumps: usize) {
        self.close_after = Some(pumps);
    }

    pub(crate) fn withhold_frames(&mut self, withhold: bool) {
        self.withhold_frames = withhold;
    }

    pub(crate) fn deadlines(&self) -> &[Option<Instant>] {
        &self.deadlines
    }

    pub(crate) fn drawn(&self) -> &[String] {
        &self.drawn
    }
}

impl Backend for ScriptedBackend {
    type Frame<'a> = ScriptedFrame<'a>;

    fn pump_events(&mut self, deadline: Option<Instant>) -> Result<BackendStatus> {
        if self.close_after.is_some_and(|n| self.deadlines.len() >= n) {
            return Ok(BackendStatus::Closed);
        }
        self.deadlines.push(deadline);
        self.journal.record("pump");

        for event in self.script.pop_front().unwrap_or_default() {
            self.input.apply_event(&event);
        }
        Ok(BackendStatus::Continue)
    }

    fn input(&self) -> &dyn InputSource {
        &self.input
    }

    fn clear_frame(&mut self, _color: Color) -> Result<Option<ScriptedFrame<'_>>> {
        if self.withhold_frames {
            self.journal.record("skip");
            return Ok(None);
        }
        self.journal.record("clear");
        Ok(Some(ScriptedFrame { backend: self }))
    }
}

pub(crate) struct ScriptedFrame<'a> {
    backend: &'a mut ScriptedBackend,
}

impl ScriptedFrame<'_> {
    pub(crate) fn draw(&mut self, what: &str) {
        self.backend.drawn.push(what.to_string());
    }
}

impl Frame for ScriptedFrame<'_> {
    fn present(self) -> Result<()> {
        self.backend.journal.record("present");
        Ok(())
    }
}
