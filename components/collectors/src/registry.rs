//! Collector registry
//!
//! Maps configuration identifiers to factories. The toolbar resolves its
//! configured identifier list against the registry once per request; an
//! identifier that cannot be resolved is skipped, never fatal.

use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use toolbar_types::ToolbarError;
use tracing::{debug, warn};

use crate::config_collector::{ConfigCollector, ConfigDisplay};
use crate::context::RequestContext;
use crate::Collector;

/// Factory producing a fresh collector for one request
pub type CollectorFactory =
    Arc<dyn Fn(&RequestContext) -> anyhow::Result<Box<dyn Collector>> + Send + Sync>;

/// Registry of collector factories, keyed by identifier
#[derive(Clone, Default)]
pub struct CollectorRegistry {
    factories: Arc<DashMap<String, CollectorFactory>>,
    config_display: Arc<RwLock<Option<Arc<dyn ConfigDisplay>>>>,
}

impl CollectorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `id`, replacing any previous one
    ///
    /// # Example
    /// ```
    /// use collectors::{CollectorRegistry, TimersCollector};
    ///
    /// let registry = CollectorRegistry::new();
    /// registry.register("timers", |ctx| Ok(Box::new(TimersCollector::new(ctx.timer().clone()))));
    /// assert!(registry.contains("timers"));
    /// ```
    pub fn register<F>(&self, id: impl Into<String>, factory: F)
    where
        F: Fn(&RequestContext) -> anyhow::Result<Box<dyn Collector>> + Send + Sync + 'static,
    {
        let id = id.into();
        debug!("Registering collector factory: {}", id);
        self.factories.insert(id, Arc::new(factory));
    }

    /// Register `collector` under `id` and as the configuration display
    ///
    /// The Config tab and the config value embedded in each snapshot then
    /// come from the same values.
    pub fn register_config(&self, id: impl Into<String>, collector: ConfigCollector) {
        let collector = Arc::new(collector);
        self.set_config_display(collector.clone());
        self.register(id, move |_| Ok(Box::new(ConfigCollector::clone(&collector))));
    }

    /// Set the source of the config value embedded in snapshots
    pub fn set_config_display(&self, display: Arc<dyn ConfigDisplay>) {
        *self.config_display.write() = Some(display);
    }

    pub fn config_display(&self) -> Option<Arc<dyn ConfigDisplay>> {
        self.config_display.read().clone()
    }

    /// Remove the factory registered under `id`
    pub fn unregister(&self, id: &str) -> Option<CollectorFactory> {
        debug!("Unregistering collector factory: {}", id);
        self.factories.remove(id).map(|(_, factory)| factory)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered identifiers, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.factories.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Construct the collector registered under `id` for one request
    pub fn try_instantiate(
        &self,
        id: &str,
        context: &RequestContext,
    ) -> Result<Box<dyn Collector>, ToolbarError> {
        // Clone the factory out so no map guard is held while it runs.
        let factory = self
            .factories
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ToolbarError::CollectorResolution(format!("unknown collector '{}'", id)))?;

        factory(context).map_err(|e| ToolbarError::CollectorResolution(format!("{}: {}", id, e)))
    }

    /// Construct collectors for `ids`, in order, skipping any that fail
    pub fn instantiate<S: AsRef<str>>(
        &self,
        ids: &[S],
        context: &RequestContext,
    ) -> Vec<Box<dyn Collector>> {
        ids.iter()
            .filter_map(|id| match self.try_instantiate(id.as_ref(), context) {
                Ok(collector) => Some(collector),
                Err(e) => {
                    warn!("Skipping collector: {}", e);
                    None
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for CollectorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorRegistry")
            .field("ids", &self.ids())
            .field("config_display", &self.config_display.read().is_some())
            .finish()
    }
}
