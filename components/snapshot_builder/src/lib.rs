//! Snapshot assembly for one profiled request
//!
//! Queries every collector, harvests request/response variables through
//! explicit facades, lays out the timeline ruler, and returns one immutable
//! [`Snapshot`](toolbar_types::Snapshot).
//!
//! # Example
//!
//! ```
//! use collectors::{Collector, Timer, TimersCollector};
//! use snapshot_builder::{BuildInput, HttpRequestContext, SnapshotBuilder};
//! use std::sync::Arc;
//!
//! let timer = Arc::new(Timer::new());
//! timer.record("controller", 100.0, 100.02);
//! let collectors: Vec<Box<dyn Collector>> = vec![Box::new(TimersCollector::new(timer))];
//!
//! let request = http::Request::builder().uri("/?page=2").body(Vec::<u8>::new()).unwrap();
//! let response = http::Response::builder().status(200).body(()).unwrap();
//!
//! let snapshot = SnapshotBuilder::new().build(
//!     BuildInput::new(100.0, 0.035),
//!     &HttpRequestContext::from_request(&request),
//!     &response,
//!     &collectors,
//! );
//! assert_eq!(snapshot.segment_count, 7);
//! assert_eq!(snapshot.vars.groups["get"]["page"], "2");
//! ```

mod builder;
mod harvest;
mod http_context;
pub mod memory;

pub use builder::{
    format_memory_delta, round_to, segment_layout, summarize, BuildInput, SnapshotBuilder,
    NOMINAL_SEGMENTS, SEGMENT_INCREMENT,
};
pub use harvest::{groups, harvest_vars, request_line, RequestFacade, ResponseFacade};
pub use http_context::{parse_params, HttpRequestContext};
