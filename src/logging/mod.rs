//! Logging statistics from experiment runs
mod cli;

pub use cli::CliLogger;

use enum_map::Enum;

/// Experiment run events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Event {
    Step,
    Episode,
    Epoch,
}

/// Log scalar statistics from an experiment run.
pub trait Logger {
    /// Record a value for the current instance of an event.
    fn log(&mut self, event: Event, name: &'static str, value: f64);

    /// Mark the end of an event instance.
    fn done(&mut self, event: Event);
}

/// Logger that does nothing.
impl Logger for () {
    fn log(&mut self, _: Event, _: &'static str, _: f64) {}
    fn done(&mut self, _: Event) {}
}
