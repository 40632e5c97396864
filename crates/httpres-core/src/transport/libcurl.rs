//! libcurl-backed transport (the `curl` crate, easy interface).
//!
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

use std::time::Duration;

use curl::easy::{Easy, List};

use super::parse::parse_headers;
use super::{HttpResponse, Transport, TransportError};
use crate::request::{OptionValue, RequestDescriptor, TransportOptions};

/// Defaults applied to every request before the request's own options.
#[derive(Debug, Clone)]
pub struct CurlSettings {
    pub connect_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for CurlSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            user_agent: Some(format!("httpres/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

/// Transport performing one blocking libcurl transfer per request.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    settings: CurlSettings,
}

impl CurlTransport {
    pub fn new(settings: CurlSettings) -> Self {
        Self { settings }
    }
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        TransportError::new(e.to_string())
    }
}

impl Transport for CurlTransport {
    fn send(&self, request: &RequestDescriptor) -> Result<HttpResponse, TransportError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = Easy::new();
        easy.url(request.url())?;
        apply_method(&mut easy, request.method_or_default(), request.body())?;

        easy.connect_timeout(self.settings.connect_timeout)?;
        if let Some(ua) = &self.settings.user_agent {
            easy.useragent(ua)?;
        }
        apply_options(&mut easy, request.options())?;

        let mut list = List::new();
        for (k, v) in request.headers() {
            list.append(&header_line(k, v))?;
        }
        if !request.headers().is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                // obs-text (e.g. Latin-1 filenames) is kept, not dropped.
                header_lines.push(String::from_utf8_lossy(data).trim_end().to_string());
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(
            "{} {} -> HTTP {} ({} bytes)",
            request.method_or_default(),
            request.url(),
            status,
            body.len()
        );

        Ok(HttpResponse {
            status,
            headers: parse_headers(&header_lines),
            body,
        })
    }
}

/// Request header in curl list syntax. `Name;` sends a header with an empty
/// value; `Name:` would tell libcurl to remove the header instead.
fn header_line(name: &str, value: &str) -> String {
    let (name, value) = (name.trim(), value.trim());
    if value.is_empty() {
        format!("{};", name)
    } else {
        format!("{}: {}", name, value)
    }
}

/// Sets the method and body. A `HEAD` request never carries a body.
fn apply_method(easy: &mut Easy, method: &str, body: &[u8]) -> Result<(), curl::Error> {
    if method == "HEAD" {
        if !body.is_empty() {
            tracing::warn!("ignoring {} byte body on HEAD request", body.len());
        }
        return easy.nobody(true);
    }
    if !body.is_empty() {
        easy.post_fields_copy(body)?;
    }
    match method {
        "GET" if body.is_empty() => easy.get(true),
        "POST" => {
            if body.is_empty() {
                easy.post(true)?;
                easy.post_field_size(0)?;
            }
            Ok(())
        }
        other => easy.custom_request(other),
    }
}

/// Applies transport options in order. Unknown keys are skipped with a warning.
fn apply_options(easy: &mut Easy, options: &TransportOptions) -> Result<(), TransportError> {
    for (key, value) in options.iter() {
        match key {
            "follow_location" => easy.follow_location(as_bool(key, value)?)?,
            "max_redirections" => easy.max_redirections(as_u32(key, value)?)?,
            "connect_timeout" => easy.connect_timeout(as_secs(key, value)?)?,
            "timeout" => easy.timeout(as_secs(key, value)?)?,
            "low_speed_limit" => easy.low_speed_limit(as_u32(key, value)?)?,
            "low_speed_time" => easy.low_speed_time(as_secs(key, value)?)?,
            "max_recv_speed" => easy.max_recv_speed(as_u64(key, value)?)?,
            "buffer_size" => easy.buffer_size(as_u64(key, value)? as usize)?,
            "user_agent" => easy.useragent(as_str(key, value)?)?,
            other => tracing::warn!("ignoring unknown transport option {:?}", other),
        }
    }
    Ok(())
}

fn type_error(key: &str, expected: &str, value: &OptionValue) -> TransportError {
    TransportError::new(format!(
        "transport option {:?} expects {}, got {:?}",
        key, expected, value
    ))
}

fn as_bool(key: &str, value: &OptionValue) -> Result<bool, TransportError> {
    match value {
        OptionValue::Bool(b) => Ok(*b),
        other => Err(type_error(key, "a boolean", other)),
    }
}

fn as_u64(key: &str, value: &OptionValue) -> Result<u64, TransportError> {
    match value {
        OptionValue::Int(n) => Ok(*n),
        other => Err(type_error(key, "an integer", other)),
    }
}

fn as_u32(key: &str, value: &OptionValue) -> Result<u32, TransportError> {
    let n = as_u64(key, value)?;
    u32::try_from(n).map_err(|_| type_error(key, "an integer below 2^32", value))
}

fn as_secs(key: &str, value: &OptionValue) -> Result<Duration, TransportError> {
    as_u64(key, value).map(Duration::from_secs)
}

fn as_str<'a>(key: &str, value: &'a OptionValue) -> Result<&'a str, TransportError> {
    match value {
        OptionValue::Str(s) => Ok(s),
        other => Err(type_error(key, "a string", other)),
    }
}
