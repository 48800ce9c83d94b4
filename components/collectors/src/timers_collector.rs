//! Benchmark timers on the timeline

use std::sync::Arc;
use toolbar_types::TimelineEntry;

use crate::timer::Timer;
use crate::Collector;

/// Exposes a shared [`Timer`]'s spans as timeline entries
#[derive(Debug, Clone)]
pub struct TimersCollector {
    timer: Arc<Timer>,
}

impl TimersCollector {
    pub fn new(timer: Arc<Timer>) -> Self {
        Self { timer }
    }
}

impl Collector for TimersCollector {
    fn title(&self) -> &str {
        "Timers"
    }

    fn is_empty(&self) -> bool {
        self.timer.timers().is_empty()
    }

    fn has_timeline_data(&self) -> bool {
        true
    }

    fn timeline_data(&self) -> Vec<TimelineEntry> {
        let now = Timer::now();
        self.timer
            .timers()
            .into_iter()
            .map(|(name, span)| TimelineEntry::new(name, "Timer", span.start, span.duration_at(now)))
            .collect()
    }
}
