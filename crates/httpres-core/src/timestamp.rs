//! Resource timestamps: from response headers ("server") or the fetch clock ("client").

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::reference::HeaderSnapshot;

/// Where a resource's timestamp comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampMode {
    /// `Last-Modified`, else `Date`, else the current time.
    #[default]
    Server,
    /// Always the current time.
    Client,
}

impl fmt::Display for TimestampMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampMode::Server => write!(f, "server"),
            TimestampMode::Client => write!(f, "client"),
        }
    }
}

impl FromStr for TimestampMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches(':').to_ascii_lowercase().as_str() {
            "server" => Ok(TimestampMode::Server),
            "client" => Ok(TimestampMode::Client),
            other => Err(format!(
                "unknown timestamp mode {:?} (expected \"server\" or \"client\")",
                other
            )),
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid HTTP-date: {0:?}")]
pub struct TimestampError(pub String);

/// IMF-fixdate, RFC 850 and asctime, in order of preference.
const HTTP_DATE_FORMATS: [&str; 3] = [
    "%a, %d %b %Y %H:%M:%S GMT",
    "%A, %d-%b-%y %H:%M:%S GMT",
    "%a %b %d %H:%M:%S %Y",
];

/// Parses an HTTP-date (RFC 9110 §5.6.7). All forms are UTC.
pub fn parse_http_date(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    // asctime pads single-digit days with a space; collapse runs of whitespace.
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    HTTP_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| TimestampError(raw.to_string()))
}

/// Resolves the timestamp for a response with `headers`, using the current time as "now".
pub fn resolve_timestamp(headers: &HeaderSnapshot, mode: TimestampMode) -> DateTime<Utc> {
    resolve_timestamp_at(headers, mode, Utc::now())
}

/// Like [`resolve_timestamp`] with an explicit wall-clock time.
pub fn resolve_timestamp_at(
    headers: &HeaderSnapshot,
    mode: TimestampMode,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    if mode == TimestampMode::Client {
        return now;
    }
    let raw = match headers.get("last-modified").or_else(|| headers.get("date")) {
        Some(raw) => raw,
        None => return now,
    };
    match parse_http_date(raw) {
        Ok(ts) => ts,
        Err(e) => {
            tracing::warn!("{}; using current time", e);
            now
        }
    }
}
