//! Immutable per-helper settings.

use crate::error::RequestError;
use crate::types::ResponseFormat;

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// Headers attached to every request, the decoding used for successes and
/// the base that relative URLs resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig {
    pub headers: Vec<(String, String)>,
    pub format: ResponseFormat,
    pub base_url: Option<String>,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
            format: ResponseFormat::Json,
            base_url: None,
        }
    }
}

impl HelperConfig {
    /// Set `name` to `value`, replacing any header with the same name
    /// (compared case-insensitively).
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// Absolute URLs are returned unchanged; relative ones are joined onto
    /// `base_url` as a directory, so `"data.txt"`, `"./data.txt"` and
    /// `"/data.txt"` all name `{base}/data.txt`.
    pub fn resolve_url(&self, url: &str) -> Result<String, RequestError> {
        if is_absolute(url) {
            return Ok(url.to_string());
        }
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| RequestError::InvalidUrl(url.to_string()))?;
        let path = url.strip_prefix("./").unwrap_or(url).trim_start_matches('/');
        Ok(format!("{base}/{path}"))
    }
}

/// `scheme://...` where the scheme is ASCII letters, digits, `+`, `-`, `.`
/// and starts with a letter.
fn is_absolute(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
