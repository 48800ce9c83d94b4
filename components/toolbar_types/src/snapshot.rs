//! Snapshot data model
//!
//! A [`Snapshot`] is the complete diagnostic record for one profiled request.
//! Its serde form (camelCase JSON) is the only at-rest encoding the toolbar
//! defines; the store writes it verbatim and the `json` format serves it back
//! unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Escaped key/value pairs of one variable group (e.g. `get`, `headers`)
pub type VarGroup = IndexMap<String, String>;

/// Variable groups keyed by heading, in harvest order
pub type VarGroups = IndexMap<String, VarGroup>;

/// One named, timed span attributed to a component
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    /// Span name (e.g. a benchmark timer name)
    pub name: String,
    /// Owning component, usually the collector that produced the span
    pub component: String,
    /// Start time in seconds, on the same clock as the request start time
    pub start: f64,
    /// Duration in seconds
    pub duration: f64,
}

impl TimelineEntry {
    /// Create an entry; a negative duration is clamped to zero
    pub fn new(
        name: impl Into<String>,
        component: impl Into<String>,
        start: f64,
        duration: f64,
    ) -> Self {
        Self {
            name: name.into(),
            component: component.into(),
            start,
            duration: duration.max(0.0),
        }
    }

    /// End of the span in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Serialization-ready projection of one collector at build time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectorSummary {
    pub title: String,
    pub title_safe: String,
    pub title_details: String,
    /// Rendered tab body (markup)
    pub display: String,
    pub badge_value: Option<u64>,
    pub is_empty: bool,
    pub has_tab_content: bool,
    pub has_label: bool,
    pub icon: String,
    pub has_timeline_data: bool,
    pub timeline_data: Vec<TimelineEntry>,
}

/// Status line of the profiled response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSummary {
    pub status_code: u16,
    /// Reason phrase, HTML-escaped
    pub reason: String,
}

/// Harvested request/response variables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SnapshotVars {
    /// Collector headings first, then session, get, post, headers, cookies
    pub groups: VarGroups,
    /// Transport and protocol, e.g. `HTTPS/2.0`
    pub request: String,
    pub response: ResponseSummary,
}

/// Immutable diagnostic record for one profiled request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Request start, seconds since the UNIX epoch
    pub request_start_time: f64,
    pub total_duration_ms: f64,
    /// Peak memory growth in MiB, formatted with three decimals
    pub peak_memory_delta_mb: String,
    pub segment_duration_ms: f64,
    pub segment_count: u32,
    pub framework_version: String,
    pub collectors: Vec<CollectorSummary>,
    pub vars: SnapshotVars,
    /// Opaque value from the configuration-display collaborator
    pub config: Value,
}

impl Snapshot {
    /// Width of the rendered timeline ruler in milliseconds
    pub fn display_window_ms(&self) -> f64 {
        f64::from(self.segment_count) * self.segment_duration_ms
    }

    /// Encode to the persisted JSON form
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decode from the persisted JSON form
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
