//! Request descriptors: the canonical, immutable description of one HTTP request.
//!
//! A descriptor's URL is fixed at construction. Everything else can be replaced,
//! but only by deriving a new descriptor (see `reference::update_request`).

mod options;

pub use options::{OptionValue, TransportOptions};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request header mapping (name → value).
pub type Headers = HashMap<String, String>;

/// Method used when a descriptor carries none.
pub const DEFAULT_METHOD: &str = "GET";

/// One HTTP request: method, URL, headers, body and transport options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    method: Option<String>,
    url: String,
    #[serde(default)]
    headers: Headers,
    #[serde(default)]
    body: Vec<u8>,
    #[serde(default)]
    options: TransportOptions,
}

impl RequestDescriptor {
    /// Bare descriptor for `url`: no method, no headers, empty body, no options.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            method: None,
            url: url.into(),
            headers: Headers::new(),
            body: Vec::new(),
            options: TransportOptions::new(),
        }
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// The method to put on the wire; `GET` when none was requested.
    pub fn method_or_default(&self) -> &str {
        self.method.as_deref().unwrap_or(DEFAULT_METHOD)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Replaces the body outright.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Merges `headers` into the existing headers, last write wins per name.
    pub fn with_headers(mut self, headers: &Headers) -> Self {
        for (k, v) in headers {
            self.headers.insert(k.clone(), v.clone());
        }
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Merges `options` into the existing options, last write wins per key.
    pub fn with_options(mut self, options: &TransportOptions) -> Self {
        self.options = self.options.merge(options);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_descriptor_is_bare() {
        let d = RequestDescriptor::new("https://example.com/data.csv");
        assert_eq!(d.method(), None);
        assert_eq!(d.method_or_default(), "GET");
        assert_eq!(d.url(), "https://example.com/data.csv");
        assert!(d.headers().is_empty());
        assert!(d.body().is_empty());
        assert!(d.options().is_empty());
    }

    #[test]
    fn header_merge_is_last_write_wins() {
        let mut h = Headers::new();
        h.insert("Accept".to_string(), "text/csv".to_string());
        let d = RequestDescriptor::new("http://a")
            .with_header("Accept", "*/*")
            .with_header("X-Trace", "1")
            .with_headers(&h);
        assert_eq!(d.headers().get("Accept").unwrap(), "text/csv");
        assert_eq!(d.headers().get("X-Trace").unwrap(), "1");
    }

    #[test]
    fn json_roundtrip_keeps_all_fields() {
        let d = RequestDescriptor::new("http://a")
            .with_method("POST")
            .with_header("Content-Type", "application/json")
            .with_body(b"{}".to_vec())
            .with_options(&TransportOptions::new().with("timeout", 5u64));
        let json = serde_json::to_string(&d).unwrap();
        let back: RequestDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
