//! Merging and rendering timelines from several collectors

use timeline::{merge_timelines, project, render_timeline, TimelineOrder};
use toolbar_types::{CollectorSummary, TimelineEntry};

fn summary(title: &str, has_timeline_data: bool, entries: Vec<TimelineEntry>) -> CollectorSummary {
    CollectorSummary {
        title: title.to_string(),
        title_safe: title.to_lowercase(),
        title_details: String::new(),
        display: String::new(),
        badge_value: None,
        is_empty: entries.is_empty(),
        has_tab_content: false,
        has_label: false,
        icon: String::new(),
        has_timeline_data,
        timeline_data: entries,
    }
}

fn summaries() -> Vec<CollectorSummary> {
    vec![
        summary(
            "Timers",
            true,
            vec![
                TimelineEntry::new("controller", "Timer", 50.010, 0.020),
                TimelineEntry::new("bootstrap", "Timer", 50.000, 0.010),
            ],
        ),
        summary("Files", false, vec![TimelineEntry::new("hidden", "Files", 50.0, 1.0)]),
        summary("Events", true, vec![]),
        summary("Database", true, vec![TimelineEntry::new("query <1>", "Database", 50.010, 0.005)]),
    ]
}

fn names(entries: &[TimelineEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn test_declaration_order_across_collectors() {
    let merged = merge_timelines(&summaries(), TimelineOrder::Declaration);
    assert_eq!(names(&merged), vec!["controller", "bootstrap", "query <1>"]);
}

#[test]
fn test_chronological_order_is_stable() {
    let merged = merge_timelines(&summaries(), TimelineOrder::Chronological);
    assert_eq!(names(&merged), vec!["bootstrap", "controller", "query <1>"]);
}

#[test]
fn test_rows_for_every_merged_entry() {
    let html = render_timeline(&summaries(), 50.0, 7, 5.0, TimelineOrder::Chronological);
    assert_eq!(html.matches("<tr>").count(), 3);
    assert!(html.starts_with("<tr><td>bootstrap</td><td>Timer</td>"));
    assert!(html.contains("<td>query &lt;1&gt;</td>"));
    assert!(html.contains("<td colspan='7' style='overflow: hidden'>"));
    assert!(!html.contains("<td>hidden</td>"));
}

#[test]
fn test_entry_before_request_start_is_not_clamped() {
    let entry = TimelineEntry::new("early", "Timer", 49.9965, 0.001);
    let bar = project(&entry, 50.0, 7, 5.0);
    assert!((bar.offset_percent + 10.0).abs() < 1e-6);
    assert!((bar.length_percent - 2.857142857).abs() < 1e-6);
}
