//! References: what callers hand in to be resolved, and what resources carry back out.
//!
//! A reference is either a fresh URL string or a resolved pair produced by a
//! previous fetch (the request that was sent plus the response headers seen).

mod codec;
mod overrides;
mod snapshot;

pub use codec::{alike, to_request, update_request, NOT_AN_HTTP_REFERENCE};
pub use overrides::{FetchOptions, Override};
pub use snapshot::HeaderSnapshot;

use crate::request::RequestDescriptor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reference {
    /// Raw URL, not yet fetched.
    Url { url: String },
    /// Request that produced a resource, and the response headers observed.
    Resolved {
        request: RequestDescriptor,
        headers: HeaderSnapshot,
    },
}

impl Reference {
    pub fn url(url: impl Into<String>) -> Self {
        Reference::Url { url: url.into() }
    }

    pub fn resolved(request: RequestDescriptor, headers: HeaderSnapshot) -> Self {
        Reference::Resolved { request, headers }
    }

    /// The URL this reference points at.
    pub fn uri(&self) -> &str {
        match self {
            Reference::Url { url } => url,
            Reference::Resolved { request, .. } => request.url(),
        }
    }

    /// Response headers seen when this reference was resolved; `None` for a fresh URL.
    pub fn response_headers(&self) -> Option<&HeaderSnapshot> {
        match self {
            Reference::Url { .. } => None,
            Reference::Resolved { headers, .. } => Some(headers),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Reference::Resolved { .. })
    }
}

impl From<&str> for Reference {
    fn from(url: &str) -> Self {
        Reference::url(url)
    }
}

impl From<String> for Reference {
    fn from(url: String) -> Self {
        Reference::url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_of_both_shapes() {
        assert_eq!(Reference::from("http://a/x").uri(), "http://a/x");
        let r = Reference::resolved(RequestDescriptor::new("http://b/y"), HeaderSnapshot::new());
        assert_eq!(r.uri(), "http://b/y");
        assert!(r.is_resolved());
    }

    #[test]
    fn resolved_reference_json_roundtrip() {
        let headers: HeaderSnapshot = [("Content-Type", "text/csv")].into_iter().collect();
        let r = Reference::resolved(
            RequestDescriptor::new("https://example.com/data.csv").with_header("Accept", "text/csv"),
            headers,
        );
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains(r#""kind":"resolved""#));
        let back: Reference = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn url_reference_json_shape() {
        let json = serde_json::to_string(&Reference::from("http://a")).unwrap();
        assert_eq!(json, r#"{"kind":"url","url":"http://a"}"#);
    }
}
