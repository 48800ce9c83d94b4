use serde::{Deserialize, Serialize};
use toolbar_types::{make_safe, CollectorSummary, TimelineEntry};

use crate::merge::{merge_timelines, TimelineOrder};

/// Position of one entry on the ruler, in percent of the display window
///
/// Not clamped: spans that start before the request or run past the window
/// produce values outside `0..=100` and are clipped by the view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBar {
    pub offset_percent: f64,
    pub length_percent: f64,
}

/// Place `entry` on a ruler of `segment_count` cells of `segment_duration_ms`
///
/// A zero-width window places everything at zero.
pub fn project(
    entry: &TimelineEntry,
    request_start: f64,
    segment_count: u32,
    segment_duration_ms: f64,
) -> TimelineBar {
    let window_ms = f64::from(segment_count) * segment_duration_ms;
    if window_ms <= 0.0 {
        return TimelineBar {
            offset_percent: 0.0,
            length_percent: 0.0,
        };
    }

    TimelineBar {
        offset_percent: ((entry.start - request_start) * 1000.0 / window_ms) * 100.0,
        length_percent: (entry.duration * 1000.0 / window_ms) * 100.0,
    }
}

/// Render the merged timeline as table rows
///
/// Each row shows name, component, and duration, followed by one cell
/// spanning the whole ruler that holds the positioned bar.
pub fn render_timeline(
    summaries: &[CollectorSummary],
    request_start: f64,
    segment_count: u32,
    segment_duration_ms: f64,
    order: TimelineOrder,
) -> String {
    let mut output = String::new();

    for entry in merge_timelines(summaries, order) {
        let bar = project(&entry, request_start, segment_count, segment_duration_ms);

        output.push_str("<tr>");
        output.push_str(&format!("<td>{}</td>", make_safe(&entry.name)));
        output.push_str(&format!("<td>{}</td>", make_safe(&entry.component)));
        output.push_str(&format!(
            "<td style='text-align: right'>{:.2} ms</td>",
            entry.duration * 1000.0
        ));
        output.push_str(&format!(
            "<td colspan='{}' style='overflow: hidden'>",
            segment_count
        ));
        output.push_str(&format!(
            "<span class='timer' style='left: {:.4}%; width: {:.4}%;' title='{:.2}%'></span>",
            bar.offset_percent, bar.length_percent, bar.length_percent
        ));
        output.push_str("</td>");
        output.push_str("</tr>");
    }

    output
}
