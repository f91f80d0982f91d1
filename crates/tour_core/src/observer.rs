//! Progress reporting for the solvers.
//!
//! Solvers call [`StepObserver::on_step`] once per edge they commit to.
//! The event is a copy; observers never see solver-internal state.

use crate::{Edge, Weight};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StepEvent {
    pub edge: Edge,
    /// Length of the partial solution `edge` was added to, `edge` included.
    pub cumulative_length: Weight,
}

pub trait StepObserver {
    fn on_step(&mut self, event: StepEvent);
}

impl<F> StepObserver for F
where
    F: FnMut(StepEvent),
{
    fn on_step(&mut self, event: StepEvent) {
        self(event)
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _event: StepEvent) {}
}

/// Writes every event to the `trace` log level.
#[derive(Clone, Copy, Debug)]
pub struct LoggingObserver {
    label: &'static str,
}

impl LoggingObserver {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl StepObserver for LoggingObserver {
    fn on_step(&mut self, event: StepEvent) {
        log::trace!(
            "{}: step edge={} cumulative={}",
            self.label,
            event.edge,
            event.cumulative_length
        );
    }
}

/// Keeps every event in order, for replaying a solve after the fact.
#[derive(Clone, Debug, Default)]
pub struct StepRecorder {
    events: Vec<StepEvent>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl StepObserver for StepRecorder {
    fn on_step(&mut self, event: StepEvent) {
        self.events.push(event);
    }
}

/// Tracks the running total so each solver does not have to.
pub(crate) struct StepEmitter<'a> {
    observer: &'a mut dyn StepObserver,
    cumulative: Weight,
}

impl<'a> StepEmitter<'a> {
    pub(crate) fn new(observer: &'a mut dyn StepObserver) -> Self {
        Self {
            observer,
            cumulative: 0,
        }
    }

    pub(crate) fn emit(&mut self, edge: Edge) {
        self.cumulative += edge.weight;
        self.observer.on_step(StepEvent {
            edge,
            cumulative_length: self.cumulative,
        });
    }
}
