//! Debug toolbar entry point
//!
//! Ties collectors, the snapshot builder, the store, and the formatter
//! together. At the end of a profiled request [`Toolbar::prepare`] saves the
//! snapshot and injects the loader; the loader's follow-up requests are
//! answered by [`Toolbar::handle_request`].
//!
//! # Example
//!
//! ```
//! use toolbar_component::{stock_registry, Toolbar, ToolbarAction, ToolbarConfig};
//! use snapshot_store::MemorySnapshotStore;
//!
//! # tokio_test::block_on(async {
//! let config = ToolbarConfig::default();
//! let registry = stock_registry(&config);
//! let toolbar = Toolbar::new(config, &registry).unwrap();
//!
//! let request = http::Request::builder().uri("/home").body(()).unwrap();
//! let store = MemorySnapshotStore::new();
//! let action = toolbar.handle_request(&store, &request).await.unwrap();
//! assert!(matches!(action, ToolbarAction::Continue));
//! # });
//! ```

mod config;
mod loader;
mod negotiate;
mod toolbar;

pub use config::{ToolbarConfig, ToolbarConfigBuilder};
pub use loader::{inject_before_body_end, loader_tag, LOADER_SCRIPT};
pub use negotiate::{negotiate, parse_accept, MediaRange};
pub use toolbar::{not_found_body, Toolbar, ToolbarAction, DEBUGBAR_TIME_HEADER};

use collectors::{CollectorRegistry, TimersCollector};

/// Registry with the stock collectors under `timers` and `config`
///
/// `timers` reads each request's own timer. `config` is also the source of
/// the config value embedded in snapshots.
pub fn stock_registry(config: &ToolbarConfig) -> CollectorRegistry {
    let registry = CollectorRegistry::new();

    registry.register("timers", |ctx| {
        Ok(Box::new(TimersCollector::new(ctx.timer().clone())))
    });
    registry.register_config("config", config.config_collector());

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapshot_builder::{BuildInput, HttpRequestContext};
    use snapshot_store::{MemorySnapshotStore, SnapshotStore};
    use toolbar_types::Snapshot;

    #[test]
    fn test_stock_registry() {
        let config = ToolbarConfig::default();
        let registry = stock_registry(&config);
        assert_eq!(registry.ids(), vec!["config", "timers"]);
        assert!(registry.config_display().is_some());

        let toolbar = Toolbar::new(config, &registry).unwrap();
        let titles: Vec<&str> = toolbar.collectors().iter().map(|c| c.title()).collect();
        assert_eq!(titles, vec!["Timers", "Config"]);
    }

    #[tokio::test]
    async fn test_stock_requests_are_isolated() {
        let config = ToolbarConfig::default();
        let registry = stock_registry(&config);
        let store = MemorySnapshotStore::new();

        let mut timelines = Vec::new();
        for (start, span) in [(100.0, "request-one-span"), (200.0, "request-two-span")] {
            let toolbar = Toolbar::new(config.clone(), &registry).unwrap();
            toolbar.timer().record(span, start, start + 0.002);

            let mut response = http::Response::builder()
                .header("content-type", "text/html")
                .body(b"<body></body>".to_vec())
                .unwrap();
            let id = toolbar
                .prepare(
                    &store,
                    BuildInput::new(start, 0.01),
                    &HttpRequestContext::default(),
                    &mut response,
                )
                .await
                .unwrap();

            let snapshot = Snapshot::from_json(&store.load(&id).await.unwrap()).unwrap();
            let names: Vec<String> = snapshot
                .collectors
                .iter()
                .flat_map(|c| c.timeline_data.iter().map(|e| e.name.clone()))
                .collect();
            timelines.push(names);
        }

        assert_eq!(
            timelines,
            vec![vec!["request-one-span"], vec!["request-two-span"]]
        );
    }
}
