use serde::{Deserialize, Serialize};
use toolbar_types::{CollectorSummary, TimelineEntry};
use tracing::debug;

/// Order in which merged entries are presented
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimelineOrder {
    /// Collectors in summary order, each collector's entries in its own order
    #[default]
    Declaration,
    /// Stable sort by start time; ties keep declaration order
    Chronological,
}

/// Merge the timeline entries of every summary that declares timeline data
///
/// Entries are concatenated, never deduplicated. A summary whose flag is set
/// but whose entry list is empty contributes nothing.
pub fn merge_timelines(summaries: &[CollectorSummary], order: TimelineOrder) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = summaries
        .iter()
        .filter(|summary| summary.has_timeline_data)
        .flat_map(|summary| summary.timeline_data.iter().cloned())
        .collect();

    if order == TimelineOrder::Chronological {
        // sort_by is stable
        entries.sort_by(|a, b| a.start.total_cmp(&b.start));
    }

    debug!("Merged {} timeline entries ({:?})", entries.len(), order);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(title: &str, has_timeline: bool, entries: Vec<TimelineEntry>) -> CollectorSummary {
        CollectorSummary {
            title: title.to_string(),
            title_safe: title.to_lowercase(),
            title_details: String::new(),
            display: String::new(),
            badge_value: None,
            is_empty: false,
            has_tab_content: false,
            has_label: false,
            icon: String::new(),
            has_timeline_data: has_timeline,
            timeline_data: entries,
        }
    }

    fn names(entries: &[TimelineEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_concatenates_in_summary_order() {
        let a = summary(
            "A",
            true,
            vec![
                TimelineEntry::new("x", "A", 0.5, 0.1),
                TimelineEntry::new("y", "A", 0.1, 0.1),
            ],
        );
        let b = summary("B", true, vec![TimelineEntry::new("z", "B", 0.0, 0.1)]);

        let merged = merge_timelines(&[a, b], TimelineOrder::Declaration);
        assert_eq!(names(&merged), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_skips_collectors_without_flag() {
        let a = summary("A", false, vec![TimelineEntry::new("hidden", "A", 0.0, 0.1)]);
        let b = summary("B", true, vec![TimelineEntry::new("shown", "B", 0.0, 0.1)]);

        let merged = merge_timelines(&[a, b], TimelineOrder::Declaration);
        assert_eq!(names(&merged), vec!["shown"]);
    }

    #[test]
    fn test_flag_with_empty_entries_contributes_nothing() {
        let a = summary("A", true, vec![]);
        let merged = merge_timelines(&[a], TimelineOrder::Declaration);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_no_deduplication() {
        let entry = TimelineEntry::new("same", "A", 0.0, 0.1);
        let a = summary("A", true, vec![entry.clone(), entry]);
        assert_eq!(merge_timelines(&[a], TimelineOrder::Declaration).len(), 2);
    }

    #[test]
    fn test_chronological_is_stable() {
        let a = summary(
            "A",
            true,
            vec![
                TimelineEntry::new("late", "A", 0.3, 0.1),
                TimelineEntry::new("tie-first", "A", 0.1, 0.1),
            ],
        );
        let b = summary(
            "B",
            true,
            vec![
                TimelineEntry::new("tie-second", "B", 0.1, 0.2),
                TimelineEntry::new("early", "B", 0.0, 0.1),
            ],
        );

        let merged = merge_timelines(&[a, b], TimelineOrder::Chronological);
        assert_eq!(names(&merged), vec!["early", "tie-first", "tie-second", "late"]);
    }

    #[test]
    fn test_order_serde() {
        let order: TimelineOrder = serde_json::from_str("\"chronological\"").unwrap();
        assert_eq!(order, TimelineOrder::Chronological);
        assert_eq!(TimelineOrder::default(), TimelineOrder::Declaration);
    }
}
