//! Toolbar orchestration

use collectors::{Collector, CollectorRegistry, ConfigDisplay, RequestContext, Timer};
use formatter::{HandlebarsRenderer, SnapshotFormatter};
use http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderValue, Request, Response, StatusCode};
use snapshot_builder::{BuildInput, RequestFacade, ResponseFacade, SnapshotBuilder};
use snapshot_store::{FileSnapshotStore, SnapshotId, SnapshotStore};
use std::sync::Arc;
use toolbar_types::{ResponseFormat, Result, ToolbarError};
use tracing::{debug, info, warn};

use crate::loader::{inject_before_body_end, loader_tag, LOADER_SCRIPT};
use crate::negotiate::negotiate;
use crate::ToolbarConfig;

/// Response header carrying the id of the snapshot saved for a request
pub const DEBUGBAR_TIME_HEADER: &str = "debugbar-time";

/// Outcome of [`Toolbar::handle_request`]
#[derive(Debug)]
pub enum ToolbarAction {
    /// End the request now with this response
    Respond(Response<Vec<u8>>),
    /// Not a toolbar request; the host handles it as usual
    Continue,
}

impl ToolbarAction {
    pub fn is_respond(&self) -> bool {
        matches!(self, ToolbarAction::Respond(_))
    }

    pub fn into_response(self) -> Option<Response<Vec<u8>>> {
        match self {
            ToolbarAction::Respond(response) => Some(response),
            ToolbarAction::Continue => None,
        }
    }
}

/// Debug toolbar for one profiled request
///
/// Create one per request. It holds that request's collectors and timer,
/// builds the snapshot at the end of it, and answers the loader and
/// snapshot requests the toolbar's client script makes afterwards.
///
/// # Example
///
/// ```
/// use collectors::{CollectorRegistry, TimersCollector};
/// use toolbar_component::{Toolbar, ToolbarConfig};
///
/// let registry = CollectorRegistry::new();
/// registry.register("timers", |ctx| Ok(Box::new(TimersCollector::new(ctx.timer().clone()))));
///
/// let config = ToolbarConfig::builder().collector("timers").build();
/// let toolbar = Toolbar::new(config, &registry).unwrap();
/// toolbar.timer().record("controller", 10.0, 10.02);
/// assert_eq!(toolbar.collectors()[0].timeline_data().len(), 1);
/// ```
pub struct Toolbar {
    config: ToolbarConfig,
    context: RequestContext,
    collectors: Vec<Box<dyn Collector>>,
    builder: SnapshotBuilder,
    formatter: SnapshotFormatter,
    config_display: Arc<dyn ConfigDisplay>,
}

impl Toolbar {
    /// Create a toolbar for a new request with a fresh timer
    ///
    /// Collector ids the registry cannot resolve are skipped with a warning.
    /// Fails only when the toolbar view cannot be loaded.
    pub fn new(config: ToolbarConfig, registry: &CollectorRegistry) -> Result<Self> {
        Self::with_context(config, registry, RequestContext::new())
    }

    /// Create a toolbar around an existing request context
    ///
    /// The config value embedded in snapshots comes from the registry's
    /// config display, or from `config` when none is registered.
    pub fn with_context(
        config: ToolbarConfig,
        registry: &CollectorRegistry,
        context: RequestContext,
    ) -> Result<Self> {
        let collectors = registry.instantiate(config.collectors(), &context);
        info!(
            "Debug toolbar ready with {} of {} configured collectors",
            collectors.len(),
            config.collectors().len()
        );

        let renderer = match config.view_path() {
            Some(path) => HandlebarsRenderer::with_view_path(path)?,
            None => HandlebarsRenderer::new()?,
        };
        let formatter =
            SnapshotFormatter::new(Arc::new(renderer)).with_timeline_order(config.timeline_order());

        let config_display: Arc<dyn ConfigDisplay> = match registry.config_display() {
            Some(display) => display,
            None => Arc::new(config.config_collector()),
        };

        Ok(Self {
            config,
            context,
            collectors,
            builder: SnapshotBuilder::new(),
            formatter,
            config_display,
        })
    }

    /// Replace the formatter used for snapshot responses
    pub fn with_formatter(mut self, formatter: SnapshotFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Replace the source of the configuration value embedded in snapshots
    pub fn with_config_display(mut self, display: Arc<dyn ConfigDisplay>) -> Self {
        self.config_display = display;
        self
    }

    pub fn config(&self) -> &ToolbarConfig {
        &self.config
    }

    pub fn collectors(&self) -> &[Box<dyn Collector>] {
        &self.collectors
    }

    /// Benchmark timer for this request
    pub fn timer(&self) -> &Arc<Timer> {
        self.context.timer()
    }

    /// File store rooted at the configured storage path
    pub fn file_store(&self) -> FileSnapshotStore {
        FileSnapshotStore::new(self.config.storage_path())
    }

    /// Build the encoded snapshot for a finished request
    ///
    /// `start_time` is seconds since the UNIX epoch, `total_elapsed` is
    /// seconds, and `start_memory` is bytes in use when the request began.
    pub fn run(
        &self,
        start_time: f64,
        total_elapsed: f64,
        start_memory: u64,
        request: &dyn RequestFacade,
        response: &dyn ResponseFacade,
    ) -> Result<Vec<u8>> {
        let input = BuildInput::new(start_time, total_elapsed);
        let peak_memory = input.peak_memory;
        self.run_with(input.with_memory(start_memory, peak_memory), request, response)
    }

    /// Build the encoded snapshot from explicit measurements
    pub fn run_with(
        &self,
        input: BuildInput,
        request: &dyn RequestFacade,
        response: &dyn ResponseFacade,
    ) -> Result<Vec<u8>> {
        let input = input
            .with_framework_version(self.config.framework_version())
            .with_config(self.config_display.display());
        Ok(self
            .builder
            .build_json(input, request, response, &self.collectors)?)
    }

    /// Save the snapshot for a finished request and point the response at it
    ///
    /// Sets the `Debugbar-Time` header and, for HTML responses, injects the
    /// loader script tag before `</body>`. Returns the id the snapshot was
    /// saved under.
    pub async fn prepare(
        &self,
        store: &dyn SnapshotStore,
        input: BuildInput,
        request: &dyn RequestFacade,
        response: &mut Response<Vec<u8>>,
    ) -> Result<SnapshotId> {
        let id = SnapshotId::from_start_time(input.start_time);
        let body = self.run_with(input, request, &*response)?;
        store.save(&id, &body).await?;
        debug!("Saved toolbar snapshot {} ({} bytes)", id, body.len());

        let header = HeaderValue::from_str(id.as_str())
            .map_err(|e| ToolbarError::Other(anyhow::anyhow!("Invalid snapshot id {}: {}", id, e)))?;
        response.headers_mut().insert(DEBUGBAR_TIME_HEADER, header);

        if is_html(response) {
            let tag = loader_tag(
                self.config.loader_url(),
                self.config.loader_marker(),
                self.config.time_marker(),
                id.as_str(),
            );
            let injected = inject_before_body_end(response.body(), &tag);
            if response.headers().contains_key(CONTENT_LENGTH) {
                response
                    .headers_mut()
                    .insert(CONTENT_LENGTH, HeaderValue::from(injected.len()));
            }
            *response.body_mut() = injected;
        }

        Ok(id)
    }

    /// Answer toolbar requests; anything else yields [`ToolbarAction::Continue`]
    ///
    /// A request naming the loader marker gets the loader script. A request
    /// with a non-empty time marker gets the stored snapshot in the
    /// negotiated format, or a format-appropriate not-found body. Store
    /// failures other than not-found are returned as errors.
    pub async fn handle_request<B>(
        &self,
        store: &dyn SnapshotStore,
        request: &Request<B>,
    ) -> Result<ToolbarAction> {
        let query = request.uri().query().unwrap_or("");
        let mut wants_loader = false;
        let mut time = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key == self.config.loader_marker() {
                wants_loader = true;
            } else if key == self.config.time_marker() && !value.is_empty() {
                time = Some(value.into_owned());
            }
        }

        if wants_loader {
            debug!("Serving toolbar loader script");
            return Ok(ToolbarAction::Respond(respond(
                StatusCode::OK,
                "application/javascript",
                LOADER_SCRIPT.as_bytes().to_vec(),
            )?));
        }

        let Some(time) = time else {
            return Ok(ToolbarAction::Continue);
        };

        let accept = request
            .headers()
            .get_all(ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join(",");
        let format = negotiate(Some(&accept), &ResponseFormat::ALL);
        let id = SnapshotId::new(&time);

        match store.load(&id).await {
            Ok(data) => {
                let body = self.formatter.format(&data, format)?;
                debug!("Serving toolbar snapshot {} as {}", id, format);
                Ok(ToolbarAction::Respond(respond(StatusCode::OK, format.mime(), body)?))
            }
            Err(ToolbarError::SnapshotNotFound(file)) => {
                warn!("Toolbar snapshot {} not found", file);
                Ok(ToolbarAction::Respond(respond(
                    StatusCode::OK,
                    format.mime(),
                    not_found_body(&file, format).into_bytes(),
                )?))
            }
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for Toolbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolbar")
            .field("config", &self.config)
            .field("collectors", &self.collectors.len())
            .finish_non_exhaustive()
    }
}

/// Body explaining that snapshot file `file` does not exist
pub fn not_found_body(file: &str, format: ResponseFormat) -> String {
    let message = format!("Debug toolbar: File \"{}\" not found.", file);
    match format {
        ResponseFormat::Json => {
            serde_json::to_string(&message).unwrap_or_else(|_| format!("\"{}\"", file))
        }
        ResponseFormat::Xml => format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><error>{}</error>",
            toolbar_types::make_safe(&message)
        ),
        ResponseFormat::Html => format!(
            "<script id=\"toolbar_js\">console.log('{}')</script>",
            message.replace('\\', "\\\\").replace('\'', "\\'")
        ),
    }
}

fn is_html(response: &Response<Vec<u8>>) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("text/html"))
        .unwrap_or(false)
}

fn respond(status: StatusCode, content_type: &str, body: Vec<u8>) -> Result<Response<Vec<u8>>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(body)
        .map_err(|e| ToolbarError::Other(e.into()))
}
