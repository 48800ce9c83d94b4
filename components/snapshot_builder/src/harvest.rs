//! Request/response facades and variable harvesting
//!
//! The builder never touches ambient request state; everything it reports
//! comes through [`RequestFacade`] and [`ResponseFacade`]. Harvested keys and
//! values are escaped on the way in with [`make_safe`].

use collectors::Collector;
use serde_json::Value;
use toolbar_types::{make_safe, make_value_safe, ResponseSummary, SnapshotVars, VarGroup, VarGroups};
use tracing::debug;

/// Read-only view of the profiled request
pub trait RequestFacade {
    /// Query-string parameters, in request order
    fn query(&self) -> Vec<(String, Value)>;

    /// Form-body parameters, in request order
    fn post(&self) -> Vec<(String, Value)>;

    /// Header names with every value sent for them
    fn headers(&self) -> Vec<(String, Vec<String>)>;

    fn cookies(&self) -> Vec<(String, String)>;

    /// Session data, or `None` when the request has no session
    fn session(&self) -> Option<Vec<(String, Value)>>;

    /// Whether the request arrived over TLS
    fn is_secure(&self) -> bool;

    /// Protocol version without prefix, e.g. `1.1`
    fn protocol_version(&self) -> String;
}

/// Read-only view of the profiled response
pub trait ResponseFacade {
    fn status_code(&self) -> u16;

    /// Reason phrase, e.g. `Not Found`
    fn reason(&self) -> String;
}

/// Fixed group names for request data
pub mod groups {
    pub const SESSION: &str = "session";
    pub const GET: &str = "get";
    pub const POST: &str = "post";
    pub const HEADERS: &str = "headers";
    pub const COOKIES: &str = "cookies";
}

/// Harvest all variable groups plus the request/response lines
///
/// Sources are merged in a fixed order: collector headings, session, get,
/// post, headers, cookies. A group name used twice keeps the union of both
/// key sets and an existing key is never replaced.
pub fn harvest_vars(
    collectors: &[Box<dyn Collector>],
    request: &dyn RequestFacade,
    response: &dyn ResponseFacade,
) -> SnapshotVars {
    let mut out = VarGroups::new();

    for collector in collectors.iter().filter(|c| c.has_var_data()) {
        for (heading, items) in collector.var_data() {
            let entries = items
                .iter()
                .map(|(key, value)| (make_safe(key), make_value_safe(value)));
            merge_group(&mut out, &make_safe(&heading), entries);
        }
    }

    if let Some(session) = request.session().filter(|s| !s.is_empty()) {
        merge_group(&mut out, groups::SESSION, escape_pairs(session));
    }

    merge_group(&mut out, groups::GET, escape_pairs(request.query()));
    merge_group(&mut out, groups::POST, escape_pairs(request.post()));

    let headers = request
        .headers()
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(name, values)| {
            let line = values
                .iter()
                .map(|v| make_safe(v))
                .collect::<Vec<_>>()
                .join(", ");
            (make_safe(&name), line)
        });
    merge_group(&mut out, groups::HEADERS, headers);

    let cookies = request
        .cookies()
        .into_iter()
        .map(|(name, value)| (make_safe(&name), make_safe(&value)));
    merge_group(&mut out, groups::COOKIES, cookies);

    debug!("Harvested {} variable groups", out.len());

    SnapshotVars {
        groups: out,
        request: request_line(request),
        response: ResponseSummary {
            status_code: response.status_code(),
            reason: make_safe(&response.reason()),
        },
    }
}

/// `HTTP/1.1`, `HTTPS/2.0`, ...
pub fn request_line(request: &dyn RequestFacade) -> String {
    let scheme = if request.is_secure() { "HTTPS" } else { "HTTP" };
    format!("{}/{}", scheme, request.protocol_version())
}

fn escape_pairs(pairs: Vec<(String, Value)>) -> impl Iterator<Item = (String, String)> {
    pairs
        .into_iter()
        .map(|(key, value)| (make_safe(&key), make_value_safe(&value)))
}

/// Add `entries` under `name`; empty groups are not created
fn merge_group(
    groups: &mut VarGroups,
    name: &str,
    entries: impl IntoIterator<Item = (String, String)>,
) {
    let mut entries = entries.into_iter().peekable();
    if entries.peek().is_none() {
        return;
    }

    let group = groups.entry(name.to_string()).or_insert_with(VarGroup::new);
    for (key, value) in entries {
        group.entry(key).or_insert(value);
    }
}
