//! Output formats a stored snapshot can be rendered into

use crate::errors::ToolbarError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format selected by content negotiation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Html,
    Json,
    Xml,
}

impl ResponseFormat {
    /// Every supported format, in server preference order
    pub const ALL: [ResponseFormat; 3] =
        [ResponseFormat::Html, ResponseFormat::Json, ResponseFormat::Xml];

    /// MIME type sent as `Content-Type` for this format
    pub fn mime(self) -> &'static str {
        match self {
            ResponseFormat::Html => "text/html",
            ResponseFormat::Json => "application/json",
            ResponseFormat::Xml => "application/xml",
        }
    }

    /// Short name (the MIME subtype)
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseFormat::Html => "html",
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
        }
    }

    /// Map a MIME type to a format
    ///
    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Result<Self, ToolbarError> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.mime() == essence)
            .ok_or_else(|| ToolbarError::UnsupportedFormat(mime.to_string()))
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = ToolbarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(ResponseFormat::Html),
            "json" => Ok(ResponseFormat::Json),
            "xml" => Ok(ResponseFormat::Xml),
            other => Err(ToolbarError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_mapping() {
        assert_eq!(ResponseFormat::Html.mime(), "text/html");
        assert_eq!(ResponseFormat::Json.mime(), "application/json");
        assert_eq!(ResponseFormat::Xml.mime(), "application/xml");
    }

    #[test]
    fn test_from_mime_ignores_params() {
        let format = ResponseFormat::from_mime("application/json; charset=utf-8").unwrap();
        assert_eq!(format, ResponseFormat::Json);
    }

    #[test]
    fn test_from_mime_rejects_unknown() {
        let err = ResponseFormat::from_mime("text/plain").unwrap_err();
        assert!(matches!(err, ToolbarError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("XML".parse::<ResponseFormat>().unwrap(), ResponseFormat::Xml);
        assert!("yaml".parse::<ResponseFormat>().is_err());
    }
}
