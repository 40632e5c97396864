//! httpres: turn HTTP references into resources carrying content and provenance.
//!
//! A [`Reference`] (a URL, or a resolved request/response-header pair from an
//! earlier fetch) is built into a [`RequestDescriptor`], checked by the access
//! gate, sent through a [`Transport`], and mapped into a [`Resource`].

pub mod config;
pub mod logging;

pub mod access;
pub mod adapter;
pub mod error;
pub mod reference;
pub mod request;
pub mod resource;
pub mod timestamp;
pub mod transport;

pub use access::AccessPolicy;
pub use adapter::{AdapterConfig, HttpAdapter};
pub use error::{ErrorKind, FetchError, InternalError};
pub use reference::{alike, FetchOptions, HeaderSnapshot, Override, Reference};
pub use request::{Headers, OptionValue, RequestDescriptor, TransportOptions};
pub use resource::{Content, Integrity, Resource};
pub use timestamp::TimestampMode;
pub use transport::{CurlSettings, CurlTransport, HttpResponse, Transport, TransportError};
