//! Collector contract and registry behaviour across collectors

use collectors::{
    Collector, CollectorRegistry, ConfigCollector, ConfigDisplay, RequestContext, Timer,
    TimersCollector, VarsCollector,
};
use serde_json::json;
use std::sync::Arc;

/// Collector implementing only the required query
struct Bare;

impl Collector for Bare {
    fn title(&self) -> &str {
        "Bare <Tab>"
    }
}

// =========================================
// Defaults
// =========================================

mod defaults {
    use super::*;

    #[test]
    fn test_neutral_defaults() {
        let bare = Bare;
        assert_eq!(bare.get_title(false), "Bare <Tab>");
        assert_eq!(bare.get_title(true), "bare-tab");
        assert_eq!(bare.title_details(), "");
        assert_eq!(bare.display(), "");
        assert_eq!(bare.badge_value(), None);
        assert!(!bare.has_tab_content());
        assert!(!bare.has_label());
        assert!(!bare.has_timeline_data());
        assert!(bare.timeline_data().is_empty());
        assert!(!bare.has_var_data());
        assert!(bare.var_data().is_empty());
    }
}

// =========================================
// Registry
// =========================================

mod registry {
    use super::*;

    fn registry() -> CollectorRegistry {
        let registry = CollectorRegistry::new();
        registry.register("bare", |_| Ok(Box::new(Bare)));
        registry.register("vars", |_| {
            Ok(Box::new(VarsCollector::new().with_var("app", "name", json!("shop"))))
        });
        registry.register("broken", |_| Err(anyhow::anyhow!("database unavailable")));
        registry
    }

    #[test]
    fn test_instantiate_in_configured_order() {
        let collectors = registry().instantiate(&["vars", "bare"], &RequestContext::new());
        let titles: Vec<&str> = collectors.iter().map(|c| c.title()).collect();
        assert_eq!(titles, vec!["Vars", "Bare <Tab>"]);
    }

    #[test]
    fn test_unknown_and_failing_ids_skipped() {
        let collectors = registry().instantiate(&["missing", "broken", "bare"], &RequestContext::new());
        assert_eq!(collectors.len(), 1);
        assert_eq!(collectors[0].title(), "Bare <Tab>");
    }

    #[test]
    fn test_try_instantiate_reports_cause() {
        let err = registry().try_instantiate("broken", &RequestContext::new()).err().unwrap();
        assert!(err.to_string().contains("database unavailable"));
    }

    #[test]
    fn test_each_request_gets_its_own_timer() {
        let registry = CollectorRegistry::new();
        registry.register("timers", |ctx| {
            Ok(Box::new(TimersCollector::new(ctx.timer().clone())))
        });

        let earlier = RequestContext::new();
        earlier.timer().record("earlier-request", 1.0, 1.1);
        let later = RequestContext::new();
        later.timer().record("later-request", 2.0, 2.1);

        let names: Vec<String> = registry
            .instantiate(&["timers"], &later)
            .iter()
            .flat_map(|c| c.timeline_data())
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, vec!["later-request"]);
    }

    #[test]
    fn test_shared_between_threads() {
        let registry = registry();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    registry.instantiate(&["bare", "vars"], &RequestContext::new()).len()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
    }
}

// =========================================
// Stock collectors
// =========================================

mod stock {
    use super::*;

    #[test]
    fn test_timers_follow_shared_timer() {
        let timer = Arc::new(Timer::new());
        let collector = TimersCollector::new(timer.clone());
        assert!(collector.is_empty());

        timer.record("render", 5.0, 5.25);
        let entries = collector.timeline_data();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "render");
        assert_eq!(entries[0].component, "Timer");
        assert!((entries[0].duration - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_config_display_is_opaque_json() {
        let config = ConfigCollector::new("1.0.0", "production")
            .with_collectors(vec!["timers".to_string(), "vars".to_string()]);
        let value = ConfigDisplay::display(&config);
        assert_eq!(value["environment"], "production");
        assert_eq!(value["collectors"], json!(["timers", "vars"]));
    }
}
