//! Request-profiling debug toolbar
//!
//! Collectors report what happened during a request. At the end of the
//! request a snapshot is built and stored, and a small loader script is
//! injected into HTML pages. The loader then fetches the stored snapshot,
//! rendered as HTML, JSON, or XML depending on the `Accept` header.
//!
//! # Example
//!
//! ```
//! use debug_toolbar::{stock_registry, BuildInput, HttpRequestContext, MemorySnapshotStore,
//!     Timer, Toolbar, ToolbarConfig};
//!
//! # tokio_test::block_on(async {
//! let config = ToolbarConfig::default();
//! let toolbar = Toolbar::new(config.clone(), &stock_registry(&config)).unwrap();
//!
//! let start = Timer::now();
//! toolbar.timer().start("controller");
//! toolbar.timer().stop("controller");
//!
//! let request = http::Request::builder().uri("/?page=1").body(Vec::<u8>::new()).unwrap();
//! let mut response = http::Response::builder()
//!     .header("content-type", "text/html")
//!     .body(b"<body></body>".to_vec())
//!     .unwrap();
//!
//! let store = MemorySnapshotStore::new();
//! let input = BuildInput::new(start, Timer::now() - start);
//! let id = toolbar
//!     .prepare(&store, input, &HttpRequestContext::from_request(&request), &mut response)
//!     .await
//!     .unwrap();
//! assert!(response.headers().contains_key("debugbar-time"));
//! assert!(!id.is_empty());
//! # });
//! ```

pub use collectors::{
    Collector, CollectorFactory, CollectorRegistry, ConfigCollector, ConfigDisplay,
    RequestContext, Timer, TimersCollector, VarsCollector,
};
pub use formatter::{to_xml, HandlebarsRenderer, SnapshotFormatter, TemplateRenderer};
pub use snapshot_builder::{
    harvest_vars, segment_layout, BuildInput, HttpRequestContext, RequestFacade, ResponseFacade,
    SnapshotBuilder,
};
pub use snapshot_store::{FileSnapshotStore, MemorySnapshotStore, SnapshotId, SnapshotStore};
pub use timeline::{merge_timelines, render_timeline, TimelineOrder};
pub use toolbar_component::{
    negotiate, stock_registry, Toolbar, ToolbarAction, ToolbarConfig, ToolbarConfigBuilder,
    LOADER_SCRIPT,
};
pub use toolbar_types::{
    make_safe, CollectorSummary, ResponseFormat, Result, Snapshot, TimelineEntry, ToolbarError,
};
