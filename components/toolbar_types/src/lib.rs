// Debug toolbar data model, output formats, and error definitions
//
// Shared by every toolbar component; has no dependency on the others.

pub mod errors;
pub mod escape;
pub mod format;
pub mod snapshot;

// Re-export commonly used types
pub use errors::{Result, ToolbarError};
pub use escape::{make_safe, make_value_safe};
pub use format::ResponseFormat;
pub use snapshot::{
    CollectorSummary, ResponseSummary, Snapshot, SnapshotVars, TimelineEntry, VarGroup, VarGroups,
};
