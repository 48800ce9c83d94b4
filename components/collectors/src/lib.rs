//! Collector contract, registry, and stock collectors
//!
//! A collector is a pluggable data source contributing one tab's worth of
//! diagnostic data to a snapshot. The toolbar instantiates its collectors
//! once per request through a [`CollectorRegistry`], handing each factory
//! that request's [`RequestContext`], and queries each collector exactly
//! once while building the snapshot.
//!
//! # Features
//!
//! - **Collector**: the capability trait every data source implements
//! - **CollectorRegistry**: identifier → factory map used to build a request's collectors
//! - **RequestContext**: per-request state (the benchmark timer) passed to factories
//! - **Timer** / **TimersCollector**: named benchmark spans shown on the timeline
//! - **ConfigCollector**: the configuration-display collaborator
//! - **VarsCollector**: host-supplied variable groups for the Vars tab

mod config_collector;
mod context;
mod registry;
mod timer;
mod timers_collector;
mod vars_collector;

pub use config_collector::{ConfigCollector, ConfigDisplay};
pub use context::RequestContext;
pub use registry::{CollectorFactory, CollectorRegistry};
pub use timer::{Timer, TimerSpan};
pub use timers_collector::TimersCollector;
pub use vars_collector::VarsCollector;

use indexmap::IndexMap;
use serde_json::Value;
use toolbar_types::TimelineEntry;

/// Raw (not yet escaped) variables of one heading
pub type RawVarGroup = IndexMap<String, Value>;

/// Raw variable groups keyed by heading
pub type RawVarGroups = IndexMap<String, RawVarGroup>;

/// Trait that all collectors must implement
///
/// Only [`Collector::title`] is required; every other query has the neutral
/// default a plain collector would report. Queries must be deterministic and
/// must not affect other collectors.
pub trait Collector: Send + Sync {
    /// Human-readable tab title (e.g. "Timers")
    fn title(&self) -> &str;

    /// Title, or its escaping-safe slug when `safe` is true
    fn get_title(&self, safe: bool) -> String {
        if safe {
            safe_title(self.title())
        } else {
            self.title().to_string()
        }
    }

    /// Extra text shown next to the title (e.g. "(12 queries)")
    fn title_details(&self) -> String {
        String::new()
    }

    /// Rendered tab body
    fn display(&self) -> String {
        String::new()
    }

    /// Number shown in the badge, if any
    fn badge_value(&self) -> Option<u64> {
        None
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn has_tab_content(&self) -> bool {
        false
    }

    fn has_label(&self) -> bool {
        false
    }

    /// Icon reference (data URI or URL)
    fn icon(&self) -> String {
        String::new()
    }

    fn has_timeline_data(&self) -> bool {
        false
    }

    /// Timing spans for the timeline; may be empty even when
    /// [`Collector::has_timeline_data`] is true
    fn timeline_data(&self) -> Vec<TimelineEntry> {
        Vec::new()
    }

    fn has_var_data(&self) -> bool {
        false
    }

    /// Variable groups for the Vars tab, keyed by heading
    fn var_data(&self) -> RawVarGroups {
        RawVarGroups::new()
    }
}

/// Turn a title into a slug usable as an element id
///
/// Lowercases, replaces spaces with `-`, and drops anything that is not
/// alphanumeric, `-`, or `_`.
pub fn safe_title(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Collector for Plain {
        fn title(&self) -> &str {
            "Request <Info>"
        }
    }

    #[test]
    fn test_defaults() {
        let c = Plain;
        assert_eq!(c.get_title(false), "Request <Info>");
        assert_eq!(c.title_details(), "");
        assert_eq!(c.badge_value(), None);
        assert!(!c.is_empty());
        assert!(!c.has_timeline_data());
        assert!(c.timeline_data().is_empty());
        assert!(!c.has_var_data());
        assert!(c.var_data().is_empty());
    }

    #[test]
    fn test_safe_title() {
        assert_eq!(Plain.get_title(true), "request-info");
        assert_eq!(safe_title("  Database Queries "), "database-queries");
        assert_eq!(safe_title("a\"onclick=x"), "aonclickx");
    }
}
