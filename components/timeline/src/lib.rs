//! Timeline merging and ruler placement
//!
//! Collectors report timing spans independently. This crate merges them into
//! one sequence and projects each span onto the toolbar's ruler, which is
//! `segment_count` cells of `segment_duration_ms` each.

mod merge;
mod render;

pub use merge::{merge_timelines, TimelineOrder};
pub use render::{project, render_timeline, TimelineBar};
