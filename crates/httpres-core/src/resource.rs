//! Resources and the response mapper that produces them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FetchError, InternalError};
use crate::reference::Reference;
use crate::request::RequestDescriptor;
use crate::timestamp::{resolve_timestamp_at, TimestampMode};
use crate::transport::{HttpResponse, TransportError};

/// Media type used when the response has no `Content-Type`.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Action named in transport failure messages.
const RETRIEVE_ACTION: &str = "retrieve content";

/// Typed content of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Provenance of a resource. `checksum` is always `None` for HTTP resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integrity {
    pub timestamp: DateTime<Utc>,
    pub checksum: Option<String>,
}

/// Content fetched for a reference, plus the resolved reference that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub reference: Reference,
    pub content: Content,
    pub integrity: Integrity,
}

/// Maps the response to `sent` into a resource. Only 2xx succeeds.
///
/// The resulting reference is always resolved: the request actually sent plus
/// the full response headers. The timestamp is fixed here and never recomputed.
pub fn to_resource(
    sent: RequestDescriptor,
    response: HttpResponse,
    mode: TimestampMode,
) -> Result<Resource, FetchError> {
    to_resource_at(sent, response, mode, Utc::now())
}

pub(crate) fn to_resource_at(
    sent: RequestDescriptor,
    response: HttpResponse,
    mode: TimestampMode,
    now: DateTime<Utc>,
) -> Result<Resource, FetchError> {
    if !response.is_success() {
        return Err(InternalError::Status(response).into());
    }

    let HttpResponse { headers, body, .. } = response;
    let media_type = headers
        .get("content-type")
        .unwrap_or(DEFAULT_MEDIA_TYPE)
        .to_string();
    let timestamp = resolve_timestamp_at(&headers, mode, now);

    Ok(Resource {
        reference: Reference::resolved(sent, headers),
        content: Content {
            media_type,
            data: body,
        },
        integrity: Integrity {
            timestamp,
            checksum: None,
        },
    })
}

/// Classifies a transport failure while retrieving content.
pub fn transport_failure(err: TransportError) -> FetchError {
    InternalError::Transport {
        action: RETRIEVE_ACTION.to_string(),
        message: err.message,
    }
    .into()
}
