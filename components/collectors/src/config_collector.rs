//! Configuration display
//!
//! The snapshot embeds whatever [`ConfigDisplay::display`] returns without
//! interpreting it. [`ConfigCollector`] is the stock implementation; it also
//! renders the same values as a tab.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use toolbar_types::make_safe;

use crate::Collector;

/// Source of the opaque configuration value embedded in every snapshot
pub trait ConfigDisplay: Send + Sync {
    fn display(&self) -> Value;
}

/// Key/value view of the host's configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCollector {
    pub framework_version: String,
    pub environment: String,
    pub storage_path: String,
    pub collectors: Vec<String>,
    /// Additional host-specific settings
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, Value>,
}

impl ConfigCollector {
    pub fn new(framework_version: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            framework_version: framework_version.into(),
            environment: environment.into(),
            ..Default::default()
        }
    }

    pub fn with_storage_path(mut self, path: impl Into<String>) -> Self {
        self.storage_path = path.into();
        self
    }

    pub fn with_collectors(mut self, ids: Vec<String>) -> Self {
        self.collectors = ids;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl ConfigDisplay for ConfigCollector {
    fn display(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Collector for ConfigCollector {
    fn title(&self) -> &str {
        "Config"
    }

    fn has_tab_content(&self) -> bool {
        true
    }

    fn display(&self) -> String {
        let mut rows = vec![
            ("Version", self.framework_version.clone()),
            ("Environment", self.environment.clone()),
            ("Storage path", self.storage_path.clone()),
            ("Collectors", self.collectors.join(", ")),
        ];
        for (key, value) in &self.extra {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            rows.push((key.as_str(), text));
        }

        let mut out = String::from("<table><tbody>");
        for (key, value) in rows {
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                make_safe(key),
                make_safe(&value)
            ));
        }
        out.push_str("</tbody></table>");
        out
    }
}
