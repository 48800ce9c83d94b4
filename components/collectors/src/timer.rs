//! Benchmark timer
//!
//! Records named spans during a request. Times are seconds since the UNIX
//! epoch so they share a clock with the request start time stored in the
//! snapshot.

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// One named span
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimerSpan {
    pub start: f64,
    /// `None` while the timer is still running
    pub end: Option<f64>,
}

impl TimerSpan {
    /// Duration in seconds; a running span is measured up to `now`
    pub fn duration_at(&self, now: f64) -> f64 {
        (self.end.unwrap_or(now) - self.start).max(0.0)
    }
}

/// Thread-safe set of named benchmark spans
#[derive(Debug, Default)]
pub struct Timer {
    spans: RwLock<IndexMap<String, TimerSpan>>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in seconds since the UNIX epoch
    pub fn now() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Start (or restart) the timer `name`
    pub fn start(&self, name: &str) {
        self.start_at(name, Self::now());
    }

    /// Start the timer `name` at an explicit time
    pub fn start_at(&self, name: &str, at: f64) {
        debug!("Timer started: {}", name);
        self.spans
            .write()
            .insert(name.to_string(), TimerSpan { start: at, end: None });
    }

    /// Stop the timer `name`; returns false if it was never started
    pub fn stop(&self, name: &str) -> bool {
        self.stop_at(name, Self::now())
    }

    /// Stop the timer `name` at an explicit time
    pub fn stop_at(&self, name: &str, at: f64) -> bool {
        match self.spans.write().get_mut(name) {
            Some(span) => {
                span.end = Some(at);
                true
            }
            None => {
                warn!("Cannot stop timer '{}': it was never started", name);
                false
            }
        }
    }

    /// Record a completed span in one call
    pub fn record(&self, name: &str, start: f64, end: f64) {
        self.spans.write().insert(
            name.to_string(),
            TimerSpan {
                start,
                end: Some(end),
            },
        );
    }

    /// Elapsed seconds for `name`, if it exists
    pub fn elapsed(&self, name: &str) -> Option<f64> {
        let now = Self::now();
        self.spans.read().get(name).map(|span| span.duration_at(now))
    }

    pub fn has(&self, name: &str) -> bool {
        self.spans.read().contains_key(name)
    }

    /// Snapshot of all spans, in the order they were first started
    pub fn timers(&self) -> Vec<(String, TimerSpan)> {
        self.spans
            .read()
            .iter()
            .map(|(name, span)| (name.clone(), *span))
            .collect()
    }

    pub fn clear(&self) {
        self.spans.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_elapsed() {
        let timer = Timer::new();
        timer.record("boot", 10.0, 10.25);
        assert!(timer.has("boot"));
        assert_eq!(timer.elapsed("boot"), Some(0.25));
        assert_eq!(timer.elapsed("missing"), None);
    }

    #[test]
    fn test_start_stop_at() {
        let timer = Timer::new();
        timer.start_at("routing", 1.0);
        assert!(timer.stop_at("routing", 1.5));
        assert_eq!(timer.timers()[0].1.end, Some(1.5));
    }

    #[test]
    fn test_stop_unknown_timer() {
        let timer = Timer::new();
        assert!(!timer.stop("ghost"));
    }

    #[test]
    fn test_running_span_measured_to_now() {
        let span = TimerSpan { start: 2.0, end: None };
        assert_eq!(span.duration_at(2.5), 0.5);
    }

    #[test]
    fn test_order_is_insertion_order() {
        let timer = Timer::new();
        timer.record("b", 2.0, 3.0);
        timer.record("a", 1.0, 2.0);
        let names: Vec<String> = timer.timers().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_clear() {
        let timer = Timer::new();
        timer.start("x");
        timer.clear();
        assert!(timer.timers().is_empty());
    }
}
