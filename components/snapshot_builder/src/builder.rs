//! Snapshot assembly

use collectors::Collector;
use serde_json::Value;
use toolbar_types::{CollectorSummary, Snapshot};
use tracing::debug;

use crate::harvest::{harvest_vars, RequestFacade, ResponseFacade};
use crate::memory;

/// Nominal number of ruler segments before rounding
pub const NOMINAL_SEGMENTS: f64 = 7.0;

/// Segment widths are rounded up to a multiple of `1 / SEGMENT_INCREMENT` ms
pub const SEGMENT_INCREMENT: f64 = 5.0;

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Per-request measurements handed to the builder
#[derive(Debug, Clone, PartialEq)]
pub struct BuildInput {
    /// Request start, seconds since the UNIX epoch
    pub start_time: f64,
    /// Request duration in seconds
    pub total_elapsed: f64,
    /// Memory in use when the request started, in bytes
    pub start_memory: u64,
    /// Peak memory observed by the end of the request, in bytes
    pub peak_memory: u64,
    pub framework_version: String,
    /// Value from the configuration-display collaborator
    pub config: Value,
}

impl BuildInput {
    /// Measurements for a request; peak memory is probed now
    pub fn new(start_time: f64, total_elapsed: f64) -> Self {
        Self {
            start_time,
            total_elapsed,
            start_memory: 0,
            peak_memory: memory::peak_memory_bytes(),
            framework_version: env!("CARGO_PKG_VERSION").to_string(),
            config: Value::Null,
        }
    }

    pub fn with_memory(mut self, start_memory: u64, peak_memory: u64) -> Self {
        self.start_memory = start_memory;
        self.peak_memory = peak_memory;
        self
    }

    pub fn with_framework_version(mut self, version: impl Into<String>) -> Self {
        self.framework_version = version.into();
        self
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }
}

/// Round `value` up to the nearest multiple of `1 / increments`
pub fn round_to(value: f64, increments: f64) -> f64 {
    (value * increments).ceil() / increments
}

/// Segment width (ms) and segment count for a request of `total_ms`
///
/// The rounded width times the count always covers `total_ms`.
pub fn segment_layout(total_ms: f64) -> (f64, u32) {
    if total_ms <= 0.0 {
        return (0.0, 0);
    }
    let duration = round_to(total_ms / NOMINAL_SEGMENTS, SEGMENT_INCREMENT);
    let count = (total_ms / duration).ceil() as u32;
    (duration, count)
}

/// Peak memory growth in MiB with three decimals
pub fn format_memory_delta(start_memory: u64, peak_memory: u64) -> String {
    let delta = peak_memory.saturating_sub(start_memory) as f64;
    format!("{:.3}", delta / BYTES_PER_MB)
}

/// Query every capability of `collector` once
///
/// Timeline entries without a component are attributed to the collector.
pub fn summarize(collector: &dyn Collector) -> CollectorSummary {
    let title = collector.get_title(false);
    let timeline_data = collector
        .timeline_data()
        .into_iter()
        .map(|mut entry| {
            if entry.component.is_empty() {
                entry.component = title.clone();
            }
            entry
        })
        .collect();

    CollectorSummary {
        title_safe: collector.get_title(true),
        title_details: collector.title_details(),
        display: collector.display(),
        badge_value: collector.badge_value(),
        is_empty: collector.is_empty(),
        has_tab_content: collector.has_tab_content(),
        has_label: collector.has_label(),
        icon: collector.icon(),
        has_timeline_data: collector.has_timeline_data(),
        timeline_data,
        title,
    }
}

/// Builds one immutable [`Snapshot`] per request
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotBuilder;

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Assemble the snapshot for one request
    ///
    /// Collector order is preserved. A collector that panics while being
    /// queried is not isolated; the panic reaches the caller.
    pub fn build(
        &self,
        input: BuildInput,
        request: &dyn RequestFacade,
        response: &dyn ResponseFacade,
        collectors: &[Box<dyn Collector>],
    ) -> Snapshot {
        let total_duration_ms = input.total_elapsed * 1000.0;
        let (segment_duration_ms, segment_count) = segment_layout(total_duration_ms);

        let summaries: Vec<CollectorSummary> =
            collectors.iter().map(|c| summarize(c.as_ref())).collect();
        let vars = harvest_vars(collectors, request, response);

        debug!(
            "Built snapshot: {} collectors, {:.3} ms over {} segments of {} ms",
            summaries.len(),
            total_duration_ms,
            segment_count,
            segment_duration_ms
        );

        Snapshot {
            request_start_time: input.start_time,
            total_duration_ms,
            peak_memory_delta_mb: format_memory_delta(input.start_memory, input.peak_memory),
            segment_duration_ms,
            segment_count,
            framework_version: input.framework_version,
            collectors: summaries,
            vars,
            config: input.config,
        }
    }

    /// Build and encode to the persisted JSON form
    pub fn build_json(
        &self,
        input: BuildInput,
        request: &dyn RequestFacade,
        response: &dyn ResponseFacade,
        collectors: &[Box<dyn Collector>],
    ) -> serde_json::Result<Vec<u8>> {
        self.build(input, request, response, collectors).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_round_to() {
        assert!(close(round_to(1.0, 5.0), 1.0));
        assert!(close(round_to(1.01, 5.0), 1.2));
        assert!(close(round_to(17.6285714, 5.0), 17.8));
    }

    #[test]
    fn test_segment_layout_examples() {
        for total in [7.0_f64, 35.0, 123.4, 1000.0] {
            let (duration, count) = segment_layout(total);
            let expected = ((total / 7.0) * 5.0).ceil() / 5.0;
            assert!(close(duration, expected), "duration for {}", total);
            assert_eq!(count, (total / expected).ceil() as u32, "count for {}", total);
            assert!(f64::from(count) * duration >= total);
        }

        assert_eq!(segment_layout(7.0), (1.0, 7));
        assert_eq!(segment_layout(35.0), (5.0, 7));
        let (d, c) = segment_layout(123.4);
        assert!(close(d, 17.8));
        assert_eq!(c, 7);
        let (d, c) = segment_layout(1000.0);
        assert!(close(d, 143.0));
        assert_eq!(c, 7);
    }

    #[test]
    fn test_segment_layout_zero() {
        assert_eq!(segment_layout(0.0), (0.0, 0));
    }

    #[test]
    fn test_memory_delta() {
        assert_eq!(format_memory_delta(0, 1_048_576), "1.000");
        assert_eq!(format_memory_delta(1_048_576, 2_621_440), "1.500");
        assert_eq!(format_memory_delta(10, 5), "0.000");
    }

    #[test]
    fn test_build_input_builders() {
        let input = BuildInput::new(1.0, 0.5)
            .with_memory(10, 20)
            .with_framework_version("9.9.9")
            .with_config(serde_json::json!({"a": 1}));
        assert_eq!(input.start_memory, 10);
        assert_eq!(input.peak_memory, 20);
        assert_eq!(input.framework_version, "9.9.9");
        assert_eq!(input.config["a"], 1);
    }
}
