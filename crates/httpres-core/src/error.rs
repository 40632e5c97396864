//! Error classification for reference resolution.

use crate::transport::HttpResponse;
use thiserror::Error;

/// Coarse kind of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not an HTTP reference. Never retried.
    InvalidReference,
    /// The access gate rejected the request; nothing was sent.
    RestrictedRequest,
    /// Non-2xx response or transport failure.
    Internal,
}

/// Error returned by every public adapter operation.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("restricted request: {url}")]
    RestrictedRequest { url: String },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// The two causes behind [`ErrorKind::Internal`].
#[derive(Debug, Error)]
pub enum InternalError {
    /// The server answered with a status outside 200..300. The response is kept for inspection.
    #[error("HTTP {}", .0.status)]
    Status(HttpResponse),

    /// The transport call itself failed.
    #[error("failed to {action} due to: {message}")]
    Transport { action: String, message: String },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidReference(_) => ErrorKind::InvalidReference,
            FetchError::RestrictedRequest { .. } => ErrorKind::RestrictedRequest,
            FetchError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The raw response, when the failure was a non-2xx status.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            FetchError::Internal(InternalError::Status(r)) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::HeaderSnapshot;

    #[test]
    fn transport_failure_message_names_action() {
        let e = FetchError::from(InternalError::Transport {
            action: "retrieve content".to_string(),
            message: "Couldn't connect to server".to_string(),
        });
        assert_eq!(e.kind(), ErrorKind::Internal);
        assert_eq!(
            e.to_string(),
            "failed to retrieve content due to: Couldn't connect to server"
        );
        assert!(e.response().is_none());
    }

    #[test]
    fn status_failure_keeps_response() {
        let e = FetchError::from(InternalError::Status(HttpResponse {
            status: 404,
            headers: HeaderSnapshot::new(),
            body: b"not found".to_vec(),
        }));
        assert_eq!(e.kind(), ErrorKind::Internal);
        assert_eq!(e.to_string(), "HTTP 404");
        assert_eq!(e.response().map(|r| r.status), Some(404));
    }

    #[test]
    fn restricted_is_its_own_kind() {
        let e = FetchError::RestrictedRequest {
            url: "http://blocked.example".to_string(),
        };
        assert_eq!(e.kind(), ErrorKind::RestrictedRequest);
    }
}
