//! Host-supplied variables for the Vars tab

use serde_json::Value;

use crate::{Collector, RawVarGroup, RawVarGroups};

/// Contributes fixed variable groups collected by the host application
#[derive(Debug, Clone, Default)]
pub struct VarsCollector {
    groups: RawVarGroups,
}

impl VarsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key = value` under `heading`; an existing key is replaced
    pub fn with_var(mut self, heading: &str, key: impl Into<String>, value: Value) -> Self {
        self.groups
            .entry(heading.to_string())
            .or_insert_with(RawVarGroup::new)
            .insert(key.into(), value);
        self
    }

    pub fn with_group(mut self, heading: impl Into<String>, group: RawVarGroup) -> Self {
        self.groups.insert(heading.into(), group);
        self
    }
}

impl Collector for VarsCollector {
    fn title(&self) -> &str {
        "Vars"
    }

    fn is_empty(&self) -> bool {
        self.groups.values().all(|group| group.is_empty())
    }

    fn has_var_data(&self) -> bool {
        !self.is_empty()
    }

    fn var_data(&self) -> RawVarGroups {
        self.groups.clone()
    }
}
