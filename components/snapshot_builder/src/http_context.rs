//! Facades over `http` crate types

use http::header::{CONTENT_TYPE, COOKIE};
use http::{Request, Response, Version};
use indexmap::IndexMap;
use serde_json::Value;

use crate::harvest::{RequestFacade, ResponseFacade};

/// Request data captured from an [`http::Request`]
///
/// Query and urlencoded form parameters are decoded; `key[]` parameters are
/// collected into arrays and a repeated plain key keeps its last value.
#[derive(Debug, Clone, Default)]
pub struct HttpRequestContext {
    query: Vec<(String, Value)>,
    post: Vec<(String, Value)>,
    headers: Vec<(String, Vec<String>)>,
    cookies: Vec<(String, String)>,
    session: Option<Vec<(String, Value)>>,
    secure: bool,
    version: String,
}

impl HttpRequestContext {
    /// Capture everything the toolbar reports from `request`
    pub fn from_request<B: AsRef<[u8]>>(request: &Request<B>) -> Self {
        let query = request.uri().query().map(parse_params).unwrap_or_default();

        let is_form = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_start().starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);
        let post = if is_form {
            parse_params(&String::from_utf8_lossy(request.body().as_ref()))
        } else {
            Vec::new()
        };

        let headers = request
            .headers()
            .keys()
            .map(|name| {
                let values = request
                    .headers()
                    .get_all(name)
                    .iter()
                    .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                    .collect();
                (name.as_str().to_string(), values)
            })
            .collect();

        let cookies = request
            .headers()
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|line| line.split(';'))
            .filter_map(|pair| pair.split_once('='))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .filter(|(name, _)| !name.is_empty())
            .collect();

        let forwarded_https = request
            .headers()
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.eq_ignore_ascii_case("https"))
            .unwrap_or(false);
        let secure = request.uri().scheme_str() == Some("https") || forwarded_https;

        Self {
            query,
            post,
            headers,
            cookies,
            session: None,
            secure,
            version: version_string(request.version()).to_string(),
        }
    }

    /// Attach the host's session data
    pub fn with_session(mut self, session: Vec<(String, Value)>) -> Self {
        self.session = Some(session);
        self
    }
}

impl RequestFacade for HttpRequestContext {
    fn query(&self) -> Vec<(String, Value)> {
        self.query.clone()
    }

    fn post(&self) -> Vec<(String, Value)> {
        self.post.clone()
    }

    fn headers(&self) -> Vec<(String, Vec<String>)> {
        self.headers.clone()
    }

    fn cookies(&self) -> Vec<(String, String)> {
        self.cookies.clone()
    }

    fn session(&self) -> Option<Vec<(String, Value)>> {
        self.session.clone()
    }

    fn is_secure(&self) -> bool {
        self.secure
    }

    fn protocol_version(&self) -> String {
        self.version.clone()
    }
}

impl<B> ResponseFacade for Response<B> {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    fn reason(&self) -> String {
        self.status().canonical_reason().unwrap_or("").to_string()
    }
}

/// Decode `a=1&b[]=2&b[]=3` into ordered parameters
pub fn parse_params(input: &str) -> Vec<(String, Value)> {
    let mut params: IndexMap<String, Value> = IndexMap::new();

    for (key, value) in url::form_urlencoded::parse(input.as_bytes()) {
        let value = Value::String(value.into_owned());
        if key.ends_with("[]") {
            let base = key[..key.len() - 2].to_string();
            let slot = params
                .entry(base)
                .or_insert_with(|| Value::Array(Vec::new()));
            match slot {
                Value::Array(items) => items.push(value),
                other => *other = Value::Array(vec![value]),
            }
        } else {
            params.insert(key.into_owned(), value);
        }
    }

    params.into_iter().collect()
}

fn version_string(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_11 => "1.1",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
}
