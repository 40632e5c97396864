//! The HTTP adapter: resolves references into resources.
//!
//! `open` runs the reference codec, the access gate, the transport and the
//! response mapper in that order. The other operations inspect references
//! without any I/O.

use crate::access::{authorize, AccessPolicy};
use crate::error::FetchError;
use crate::reference::{self, FetchOptions, HeaderSnapshot, Reference};
use crate::request::RequestDescriptor;
use crate::resource::{to_resource, transport_failure, Resource};
use crate::timestamp::TimestampMode;
use crate::transport::Transport;

/// Process-wide settings, fixed when the adapter is built.
#[derive(Debug, Clone, Default)]
pub struct AdapterConfig {
    /// Authorization callback; `None` allows every request.
    pub access: Option<AccessPolicy>,
    /// Timestamp mode used when a call does not pick one.
    pub timestamp: TimestampMode,
}

/// Resolves HTTP references through a transport `T`.
///
/// Holds no per-request state: every call is independent and the adapter can be
/// shared across threads when `T` can.
#[derive(Debug, Clone)]
pub struct HttpAdapter<T> {
    transport: T,
    config: AdapterConfig,
}

impl<T: Transport> HttpAdapter<T> {
    pub fn new(transport: T, config: AdapterConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Fetches `reference` with `options` applied and maps the response into a resource.
    pub fn open(&self, reference: &Reference, options: &FetchOptions) -> Result<Resource, FetchError> {
        let (request, _) = reference::to_request(reference, options.overrides())?;
        let request = authorize(self.config.access.as_ref(), request)?;
        let mode = options.timestamp_mode().unwrap_or(self.config.timestamp);

        tracing::debug!(
            "retrieving {} {} (timestamp: {})",
            request.method_or_default(),
            request.url(),
            mode
        );
        let response = self.transport.send(&request).map_err(transport_failure)?;
        to_resource(request, response, mode)
    }

    /// See [`reference::alike`].
    pub fn alike(&self, a: &Reference, b: &Reference) -> bool {
        reference::alike(a, b)
    }

    /// The URL a reference points at.
    pub fn uri<'r>(&self, reference: &'r Reference) -> &'r str {
        reference.uri()
    }

    /// Response headers recorded on the reference; empty for a fresh URL.
    pub fn attributes(&self, reference: &Reference) -> HeaderSnapshot {
        reference.response_headers().cloned().unwrap_or_default()
    }

    /// The request `reference` re-resolves to when opened with no overrides.
    pub fn source(&self, reference: &Reference) -> Result<RequestDescriptor, FetchError> {
        reference::to_request(reference, &[]).map(|(request, _)| request)
    }
}
