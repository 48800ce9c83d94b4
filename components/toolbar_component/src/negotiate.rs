//! `Accept` header negotiation

use toolbar_types::ResponseFormat;
use tracing::debug;

/// One media range from an `Accept` header
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
    pub main: String,
    pub sub: String,
    pub quality: f32,
}

impl MediaRange {
    /// Parse `type/subtype;q=0.8`; returns `None` for malformed ranges
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split(';');
        let (main, sub) = parts.next()?.trim().split_once('/')?;
        let (main, sub) = (main.trim(), sub.trim());
        if main.is_empty() || sub.is_empty() {
            return None;
        }

        let mut quality = 1.0;
        for param in parts {
            if let Some((name, value)) = param.split_once('=') {
                if name.trim().eq_ignore_ascii_case("q") {
                    quality = value.trim().parse::<f32>().ok()?.clamp(0.0, 1.0);
                }
            }
        }

        Some(Self {
            main: main.to_ascii_lowercase(),
            sub: sub.to_ascii_lowercase(),
            quality,
        })
    }

    /// How closely this range matches `mime`: 2 exact, 1 `type/*`, 0 `*/*`
    fn specificity(&self, mime: &str) -> Option<u8> {
        let (main, sub) = mime.split_once('/')?;
        match (self.main.as_str(), self.sub.as_str()) {
            ("*", "*") => Some(0),
            (m, "*") if m == main => Some(1),
            (m, s) if m == main && s == sub => Some(2),
            _ => None,
        }
    }
}

/// Parse every well-formed range in an `Accept` header value
pub fn parse_accept(header: &str) -> Vec<MediaRange> {
    header.split(',').filter_map(MediaRange::parse).collect()
}

/// Pick the format the client prefers among `supported`
///
/// Each supported type takes the quality of its most specific matching
/// range. The highest quality wins and ties go to the earlier entry in
/// `supported`. With no `Accept` header, or nothing acceptable, the first
/// supported format is chosen.
pub fn negotiate(accept: Option<&str>, supported: &[ResponseFormat]) -> ResponseFormat {
    let fallback = supported.first().copied().unwrap_or(ResponseFormat::Html);
    let ranges = match accept {
        Some(header) if !header.trim().is_empty() => parse_accept(header),
        _ => return fallback,
    };

    let mut best: Option<(ResponseFormat, f32)> = None;
    for &format in supported {
        let quality = ranges
            .iter()
            .filter_map(|range| range.specificity(format.mime()).map(|s| (s, range.quality)))
            .max_by_key(|(specificity, _)| *specificity)
            .map(|(_, quality)| quality)
            .unwrap_or(0.0);

        if quality > 0.0 && best.map_or(true, |(_, q)| quality > q) {
            best = Some((format, quality));
        }
    }

    let chosen = best.map(|(format, _)| format).unwrap_or(fallback);
    debug!("Negotiated {} from Accept {:?}", chosen, accept);
    chosen
}
