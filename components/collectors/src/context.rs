//! Per-request collector context

use std::sync::Arc;

use crate::timer::Timer;

/// State owned by one profiled request
///
/// Each toolbar owns one context, and factories receive it when the
/// request's collectors are created. Nothing in it outlives the request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    timer: Arc<Timer>,
}

impl RequestContext {
    /// Context with a fresh, empty timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Context around a timer the host already started for this request
    pub fn with_timer(timer: Arc<Timer>) -> Self {
        Self { timer }
    }

    /// Benchmark timer for this request
    pub fn timer(&self) -> &Arc<Timer> {
        &self.timer
    }
}
