//! Reference codec: references plus overrides become request descriptors.

use super::{HeaderSnapshot, Override, Reference};
use crate::error::FetchError;
use crate::request::RequestDescriptor;
use url::Url;

pub const NOT_AN_HTTP_REFERENCE: &str = "not an HTTP reference";

/// Builds the request for `reference` with `overrides` applied.
///
/// A fresh URL starts from a bare descriptor with an empty header snapshot; a
/// resolved reference starts from its stored request and passes its snapshot
/// through unchanged. No method is defaulted here.
pub fn to_request(
    reference: &Reference,
    overrides: &[Override],
) -> Result<(RequestDescriptor, HeaderSnapshot), FetchError> {
    match reference {
        Reference::Url { url } => {
            ensure_http(url)?;
            let fresh = RequestDescriptor::new(url.clone());
            Ok((update_request(&fresh, overrides), HeaderSnapshot::new()))
        }
        Reference::Resolved { request, headers } => {
            ensure_http(request.url())?;
            Ok((update_request(request, overrides), headers.clone()))
        }
    }
}

/// Applies `overrides` left to right and returns the new descriptor.
///
/// `Method` and `Body` replace; `Headers` and `Options` merge with last write
/// winning per key (`None` merges nothing). The URL never changes.
pub fn update_request(request: &RequestDescriptor, overrides: &[Override]) -> RequestDescriptor {
    overrides
        .iter()
        .fold(request.clone(), |acc, o| match o {
            Override::Method(m) => acc.with_method(m.clone()),
            Override::Body(b) => acc.with_body(b.clone()),
            Override::Headers(Some(h)) => acc.with_headers(h),
            Override::Options(Some(opts)) => acc.with_options(opts),
            Override::Headers(None) | Override::Options(None) | Override::Timestamp(_) => acc,
        })
}

/// True when both references build the same request with no overrides.
/// Header snapshots are not compared. Unparseable references are never alike.
pub fn alike(a: &Reference, b: &Reference) -> bool {
    match (to_request(a, &[]), to_request(b, &[])) {
        (Ok((ra, _)), Ok((rb, _))) => ra == rb,
        _ => false,
    }
}

/// The string is sent verbatim, so input that `Url::parse` would trim
/// (surrounding whitespace or C0 controls) is rejected rather than normalised.
fn ensure_http(raw: &str) -> Result<(), FetchError> {
    let trimmed = raw.trim_matches(|c: char| c == ' ' || c.is_ascii_control());
    if trimmed.len() != raw.len() {
        return Err(FetchError::InvalidReference(NOT_AN_HTTP_REFERENCE.to_string()));
    }
    match Url::parse(raw) {
        Ok(u) if matches!(u.scheme(), "http" | "https") && u.has_host() => Ok(()),
        _ => Err(FetchError::InvalidReference(NOT_AN_HTTP_REFERENCE.to_string())),
    }
}
