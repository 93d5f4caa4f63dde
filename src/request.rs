//! Per-call request options.
//!
//! The facade recognizes an explicit, closed set of per-call overrides:
//! query params, one body, header overrides, and a timeout override. There
//! is no open-ended passthrough bag — anything else belongs on the engine
//! response the caller already owns.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::HttpError;

/// Request body. One variant per wire shape; a request carries at most one
/// body, so `data` vs `json` exclusivity holds by construction.
#[derive(Debug, Clone)]
pub enum Body {
    /// Raw bytes, sent as-is.
    Raw(Bytes),
    /// UTF-8 text, sent as-is.
    Text(String),
    /// JSON value; the engine serializes it and sets `Content-Type`.
    Json(serde_json::Value),
}

/// Per-call overrides merged with the facade's stored defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query string pairs appended to the resolved URL.
    pub params: Vec<(String, String)>,
    /// Headers merged over the facade defaults; per-call wins key-by-key.
    pub headers: HashMap<String, String>,
    /// Optional request body.
    pub body: Option<Body>,
    /// Per-call deadline overriding the facade default.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append query parameters from an iterator of pairs.
    pub fn params<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set one header override.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set header overrides from an iterator of pairs.
    pub fn headers<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set a raw byte body. Replaces any previously set body.
    pub fn data(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(Body::Raw(body.into()));
        self
    }

    /// Set a text body. Replaces any previously set body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Body::Text(body.into()));
        self
    }

    /// Set a JSON body. Replaces any previously set body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    /// Override the facade's default timeout for this call only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Resolve a call path against the configured base URL.
///
/// Prefix-join only: no canonicalization, no redirect logic. Absolute URLs
/// bypass the base; without a base the path goes to the engine verbatim and
/// the engine rejects it if it is not a full URL.
pub(crate) fn join_url(base: Option<&str>, path: &str) -> String {
    // Prefix check only: a relative path may carry a URL in its query
    // string and must still be joined against the base.
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    match base {
        Some(base) => {
            let base = base.trim_end_matches('/');
            if path.is_empty() {
                base.to_string()
            } else {
                format!("{}/{}", base, path.trim_start_matches('/'))
            }
        }
        None => path.to_string(),
    }
}

/// Merge per-call headers over defaults, per-call winning key-by-key, and
/// convert into the engine's header map.
pub(crate) fn merge_headers(
    defaults: &HashMap<String, String>,
    overrides: &HashMap<String, String>,
) -> Result<HeaderMap, HttpError> {
    let mut map = HeaderMap::with_capacity(defaults.len() + overrides.len());
    for (name, value) in defaults.iter().chain(overrides.iter()) {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| HttpError::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| HttpError::InvalidHeader(format!("{}: {}", name, value)))?;
        // insert() replaces, so overrides shadow defaults of the same name.
        map.insert(name, value);
    }
    Ok(map)
}
