//! Logger that writes summaries to stderr
use super::{Event, Logger};
use crate::utils::stats::OnlineStats;
use enum_map::EnumMap;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Logger that periodically writes per-event summaries to stderr.
///
/// Values logged under the same event and name are aggregated between
/// displays.
pub struct CliLogger {
    events: EnumMap<Event, EventLog>,
    display_period: Duration,
    last_display_time: Instant,
}

#[derive(Default)]
struct EventLog {
    /// Global index for this event.
    index: u64,
    /// An aggregator for each log entry.
    aggregators: BTreeMap<&'static str, OnlineStats>,
}

impl CliLogger {
    pub fn new(display_period: Duration) -> Self {
        Self {
            events: EnumMap::default(),
            display_period,
            last_display_time: Instant::now(),
        }
    }

    /// Write the accumulated summaries and clear them.
    pub fn display(&mut self) {
        for (event, event_log) in &mut self.events {
            if event_log.aggregators.values().all(|stats| stats.count() == 0) {
                continue;
            }
            eprintln!("==== {:?} {} ====", event, event_log.index);
            for (name, stats) in &mut event_log.aggregators {
                eprintln!("{name}: {stats}");
                *stats = OnlineStats::new();
            }
        }
        self.last_display_time = Instant::now();
    }
}

impl Logger for CliLogger {
    fn log(&mut self, event: Event, name: &'static str, value: f64) {
        self.events[event]
            .aggregators
            .entry(name)
            .or_default()
            .push(value);
    }

    fn done(&mut self, event: Event) {
        self.events[event].index += 1;
        if self.last_display_time.elapsed() < self.display_period {
            return;
        }
        // Don't output after steps - prefer complete episodes or epochs.
        if let Event::Step = event {
            return;
        }
        self.display();
    }
}

impl Drop for CliLogger {
    fn drop(&mut self) {
        // Ensure everything is flushed.
        self.display();
    }
}
