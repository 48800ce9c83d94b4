//! Format dispatch

use serde_json::{json, Value};
use std::sync::Arc;
use timeline::{render_timeline, TimelineOrder};
use toolbar_types::{ResponseFormat, Result, Snapshot};
use tracing::debug;

use crate::template::{HandlebarsRenderer, TemplateRenderer, TOOLBAR_TEMPLATE};
use crate::xml::to_xml;

/// Turns stored snapshot bytes into a response body
#[derive(Clone)]
pub struct SnapshotFormatter {
    renderer: Arc<dyn TemplateRenderer>,
    timeline_order: TimelineOrder,
}

impl SnapshotFormatter {
    pub fn new(renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self {
            renderer,
            timeline_order: TimelineOrder::default(),
        }
    }

    /// Formatter using the embedded handlebars toolbar view
    pub fn with_default_templates() -> Result<Self> {
        Ok(Self::new(Arc::new(HandlebarsRenderer::new()?)))
    }

    pub fn with_timeline_order(mut self, order: TimelineOrder) -> Self {
        self.timeline_order = order;
        self
    }

    pub fn timeline_order(&self) -> TimelineOrder {
        self.timeline_order
    }

    /// Render stored snapshot `data` as `format`
    ///
    /// JSON returns `data` untouched. HTML and XML decode it first, so
    /// undecodable data fails for those two only.
    pub fn format(&self, data: &[u8], format: ResponseFormat) -> Result<Vec<u8>> {
        debug!("Formatting {} byte snapshot as {}", data.len(), format);
        match format {
            ResponseFormat::Json => Ok(data.to_vec()),
            ResponseFormat::Xml => {
                let value: Value = serde_json::from_slice(data)?;
                Ok(to_xml(&value).into_bytes())
            }
            ResponseFormat::Html => {
                let snapshot = Snapshot::from_json(data)?;
                let view_data = self.view_data(&snapshot)?;
                Ok(self
                    .renderer
                    .render(TOOLBAR_TEMPLATE, &view_data)?
                    .into_bytes())
            }
        }
    }

    /// Render stored snapshot `data` for a MIME type
    pub fn format_mime(&self, data: &[u8], mime: &str) -> Result<Vec<u8>> {
        self.format(data, ResponseFormat::from_mime(mime)?)
    }

    /// Snapshot fields plus the values the toolbar view derives from them
    fn view_data(&self, snapshot: &Snapshot) -> Result<Value> {
        let mut data = serde_json::to_value(snapshot)?;

        let timeline_rows = render_timeline(
            &snapshot.collectors,
            snapshot.request_start_time,
            snapshot.segment_count,
            snapshot.segment_duration_ms,
            self.timeline_order,
        );
        let segments: Vec<String> = (0..snapshot.segment_count)
            .map(|i| segment_label(i, snapshot.segment_duration_ms))
            .collect();
        let with_tabs: Vec<_> = snapshot
            .collectors
            .iter()
            .filter(|c| c.has_tab_content)
            .collect();

        if let Value::Object(map) = &mut data {
            map.insert("timelineRows".to_string(), json!(timeline_rows));
            map.insert("segments".to_string(), json!(segments));
            map.insert(
                "collectorsWithTabs".to_string(),
                serde_json::to_value(with_tabs)?,
            );
            map.insert(
                "totalDuration".to_string(),
                json!(format!("{:.2}", snapshot.total_duration_ms)),
            );
        }
        Ok(data)
    }
}

/// Ruler label for segment `index`, e.g. `53.4 ms`
///
/// Rounded to the microsecond so float products print without noise.
fn segment_label(index: u32, segment_duration_ms: f64) -> String {
    let ms = (f64::from(index) * segment_duration_ms * 1000.0).round() / 1000.0;
    format!("{} ms", ms)
}

impl std::fmt::Debug for SnapshotFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotFormatter")
            .field("timeline_order", &self.timeline_order)
            .finish_non_exhaustive()
    }
}
