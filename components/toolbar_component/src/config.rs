//! Configuration for the debug toolbar

use collectors::ConfigCollector;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use timeline::TimelineOrder;

/// Configuration for the debug toolbar
///
/// Holds which collectors to instantiate, where snapshots are written, and
/// the query markers the toolbar answers to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolbarConfig {
    /// Collector ids, resolved through a collector registry in this order
    collectors: Vec<String>,

    /// Directory that holds stored snapshots
    storage_path: PathBuf,

    /// Directory with view overrides (e.g. `toolbar.hbs`)
    view_path: Option<PathBuf>,

    /// Environment name reported by the config collector
    environment: String,

    /// Version string embedded in every snapshot
    framework_version: String,

    timeline_order: TimelineOrder,

    /// Query parameter that requests the loader script
    loader_marker: String,

    /// Query parameter that carries a snapshot id
    time_marker: String,

    /// URL the injected loader script tag points at
    loader_url: String,
}

impl ToolbarConfig {
    /// Create a new builder for ToolbarConfig
    ///
    /// # Example
    ///
    /// ```
    /// use toolbar_component::ToolbarConfig;
    ///
    /// let config = ToolbarConfig::builder()
    ///     .collector("timers")
    ///     .storage_path("/tmp/debugbar")
    ///     .build();
    /// assert_eq!(config.collectors(), &["timers"]);
    /// ```
    pub fn builder() -> ToolbarConfigBuilder {
        ToolbarConfigBuilder::default()
    }

    pub fn collectors(&self) -> &[String] {
        &self.collectors
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn view_path(&self) -> Option<&Path> {
        self.view_path.as_deref()
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn framework_version(&self) -> &str {
        &self.framework_version
    }

    pub fn timeline_order(&self) -> TimelineOrder {
        self.timeline_order
    }

    pub fn loader_marker(&self) -> &str {
        &self.loader_marker
    }

    pub fn time_marker(&self) -> &str {
        &self.time_marker
    }

    pub fn loader_url(&self) -> &str {
        &self.loader_url
    }

    /// Stock configuration display for these settings
    pub fn config_collector(&self) -> ConfigCollector {
        ConfigCollector::new(&self.framework_version, &self.environment)
            .with_storage_path(self.storage_path.display().to_string())
            .with_collectors(self.collectors.clone())
    }
}

impl Default for ToolbarConfig {
    /// Default values:
    /// - collectors: ["timers", "config"]
    /// - storage_path: "writable/debugbar"
    /// - environment: "development"
    /// - markers: "debugbar" and "debugbar_time"
    /// - loader_url: "/"
    fn default() -> Self {
        Self {
            collectors: vec!["timers".to_string(), "config".to_string()],
            storage_path: PathBuf::from("writable/debugbar"),
            view_path: None,
            environment: "development".to_string(),
            framework_version: env!("CARGO_PKG_VERSION").to_string(),
            timeline_order: TimelineOrder::default(),
            loader_marker: "debugbar".to_string(),
            time_marker: "debugbar_time".to_string(),
            loader_url: "/".to_string(),
        }
    }
}

/// Builder for ToolbarConfig
///
/// Options left unset fall back to [`ToolbarConfig::default`].
#[derive(Debug, Clone, Default)]
pub struct ToolbarConfigBuilder {
    collectors: Vec<String>,
    storage_path: Option<PathBuf>,
    view_path: Option<PathBuf>,
    environment: Option<String>,
    framework_version: Option<String>,
    timeline_order: Option<TimelineOrder>,
    loader_marker: Option<String>,
    time_marker: Option<String>,
    loader_url: Option<String>,
}

impl ToolbarConfigBuilder {
    /// Add a collector id; the first call replaces the default list
    pub fn collector(mut self, id: impl Into<String>) -> Self {
        self.collectors.push(id.into());
        self
    }

    pub fn storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn view_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.view_path = Some(path.into());
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn framework_version(mut self, version: impl Into<String>) -> Self {
        self.framework_version = Some(version.into());
        self
    }

    pub fn timeline_order(mut self, order: TimelineOrder) -> Self {
        self.timeline_order = Some(order);
        self
    }

    pub fn loader_marker(mut self, name: impl Into<String>) -> Self {
        self.loader_marker = Some(name.into());
        self
    }

    pub fn time_marker(mut self, name: impl Into<String>) -> Self {
        self.time_marker = Some(name.into());
        self
    }

    pub fn loader_url(mut self, url: impl Into<String>) -> Self {
        self.loader_url = Some(url.into());
        self
    }

    /// Build the ToolbarConfig
    pub fn build(self) -> ToolbarConfig {
        let default = ToolbarConfig::default();

        let mut collectors = default.collectors;
        if !self.collectors.is_empty() {
            collectors = self.collectors;
        }

        ToolbarConfig {
            collectors,
            storage_path: self.storage_path.unwrap_or(default.storage_path),
            view_path: self.view_path.or(default.view_path),
            environment: self.environment.unwrap_or(default.environment),
            framework_version: self.framework_version.unwrap_or(default.framework_version),
            timeline_order: self.timeline_order.unwrap_or(default.timeline_order),
            loader_marker: self.loader_marker.unwrap_or(default.loader_marker),
            time_marker: self.time_marker.unwrap_or(default.time_marker),
            loader_url: self.loader_url.unwrap_or(default.loader_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ToolbarConfig::default();

        assert_eq!(config.collectors(), &["timers", "config"]);
        assert_eq!(config.storage_path(), Path::new("writable/debugbar"));
        assert!(config.view_path().is_none());
        assert_eq!(config.loader_marker(), "debugbar");
        assert_eq!(config.time_marker(), "debugbar_time");
        assert_eq!(config.timeline_order(), TimelineOrder::Declaration);
    }

    #[test]
    fn test_builder_all_options() {
        let config = ToolbarConfig::builder()
            .collector("vars")
            .collector("timers")
            .storage_path("/var/debugbar")
            .view_path("/srv/views")
            .environment("testing")
            .framework_version("2.0.0")
            .timeline_order(TimelineOrder::Chronological)
            .loader_marker("tb")
            .time_marker("tb_time")
            .loader_url("/app/")
            .build();

        assert_eq!(config.collectors(), &["vars", "timers"]);
        assert_eq!(config.storage_path(), Path::new("/var/debugbar"));
        assert_eq!(config.view_path(), Some(Path::new("/srv/views")));
        assert_eq!(config.environment(), "testing");
        assert_eq!(config.framework_version(), "2.0.0");
        assert_eq!(config.timeline_order(), TimelineOrder::Chronological);
        assert_eq!(config.loader_marker(), "tb");
        assert_eq!(config.time_marker(), "tb_time");
        assert_eq!(config.loader_url(), "/app/");
    }

    #[test]
    fn test_builder_defaults() {
        assert_eq!(ToolbarConfig::builder().build(), ToolbarConfig::default());
    }

    #[test]
    fn test_config_collector() {
        let collector = ToolbarConfig::builder()
            .collector("vars")
            .environment("production")
            .build()
            .config_collector();
        assert_eq!(collector.environment, "production");
        assert_eq!(collector.collectors, vec!["vars"]);
        assert_eq!(collector.storage_path, "writable/debugbar");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ToolbarConfig =
            serde_json::from_str(r#"{"collectors": ["vars"], "timeline_order": "chronological"}"#)
                .unwrap();
        assert_eq!(config.collectors(), &["vars"]);
        assert_eq!(config.timeline_order(), TimelineOrder::Chronological);
        assert_eq!(config.time_marker(), "debugbar_time");
    }
}
