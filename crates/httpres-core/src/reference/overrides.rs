//! Per-call overrides applied on top of a reference's request.

use crate::request::{Headers, OptionValue, TransportOptions};
use crate::timestamp::TimestampMode;

/// One override, applied left to right by `update_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    /// Replaces the method.
    Method(String),
    /// Merged into the headers; `None` is a no-op.
    Headers(Option<Headers>),
    /// Replaces the body.
    Body(Vec<u8>),
    /// Merged into the transport options; `None` is a no-op.
    Options(Option<TransportOptions>),
    /// Read by the adapter only. The codec ignores it.
    Timestamp(TimestampMode),
}

/// Builder for the ordered override list passed to `HttpAdapter::open`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    overrides: Vec<Override>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.overrides.push(Override::Method(method.into()));
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.overrides.push(Override::Headers(Some(headers)));
        self
    }

    pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut h = Headers::new();
        h.insert(name.into(), value.into());
        self.headers(h)
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.overrides.push(Override::Body(body.into()));
        self
    }

    pub fn options(mut self, options: TransportOptions) -> Self {
        self.overrides.push(Override::Options(Some(options)));
        self
    }

    pub fn option(self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options(TransportOptions::new().with(key, value))
    }

    pub fn timestamp(mut self, mode: TimestampMode) -> Self {
        self.overrides.push(Override::Timestamp(mode));
        self
    }

    /// Appends a raw override.
    pub fn push(mut self, o: Override) -> Self {
        self.overrides.push(o);
        self
    }

    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    /// The last timestamp override, if any.
    pub fn timestamp_mode(&self) -> Option<TimestampMode> {
        self.overrides.iter().rev().find_map(|o| match o {
            Override::Timestamp(m) => Some(*m),
            _ => None,
        })
    }
}
