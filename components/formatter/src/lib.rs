//! Snapshot formatting
//!
//! A stored snapshot is served back in one of three formats. JSON is the
//! stored bytes unchanged, XML is a generic transform of the decoded JSON,
//! and HTML is the toolbar view rendered through a [`TemplateRenderer`].

mod dispatch;
mod template;
mod xml;

pub use dispatch::SnapshotFormatter;
pub use template::{HandlebarsRenderer, TemplateRenderer, TOOLBAR_TEMPLATE};
pub use xml::{element_name, to_xml};
