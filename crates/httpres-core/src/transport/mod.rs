//! Transport invoker: the single seam through which requests leave the process.
//!
//! The adapter only depends on the [`Transport`] trait. [`CurlTransport`] is the
//! libcurl-backed implementation; tests substitute their own.

mod libcurl;
mod parse;

pub use libcurl::{CurlSettings, CurlTransport};
pub use parse::parse_headers;

use crate::reference::HeaderSnapshot;
use crate::request::RequestDescriptor;
use std::sync::Arc;
use thiserror::Error;

/// Raw HTTP response as returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub headers: HeaderSnapshot,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure (DNS, connect, TLS, timeout, bad option...).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sends one request and returns the response. No retries, no redirect logic of its own.
pub trait Transport {
    fn send(&self, request: &RequestDescriptor) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &RequestDescriptor) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &RequestDescriptor) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}
