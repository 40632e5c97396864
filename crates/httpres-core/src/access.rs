//! Access gate: the one interception point between building a request and sending it.
//!
//! A policy sees the fully built request and either returns the request to send
//! (possibly rewritten) or `None` to reject it.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::config::AccessConfig;
use crate::error::FetchError;
use crate::request::{RequestDescriptor, TransportOptions};

type AccessFn = dyn Fn(RequestDescriptor) -> Option<RequestDescriptor> + Send + Sync;

/// Authorization callback applied to every outgoing request.
#[derive(Clone)]
pub struct AccessPolicy(Arc<AccessFn>);

impl AccessPolicy {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(RequestDescriptor) -> Option<RequestDescriptor> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Rejects every request.
    pub fn deny_all() -> Self {
        Self::new(|_| None)
    }

    /// Host allow-list plus forced transport options, from the `[access]` config section.
    ///
    /// A host is allowed when it equals an entry or is a sub-domain of one. An
    /// empty allow-list allows every host.
    pub fn from_config(cfg: &AccessConfig) -> Self {
        let allowed: Vec<String> = cfg
            .allowed_hosts
            .iter()
            .map(|h| h.trim().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        let forced = cfg.forced_options();
        Self::new(move |request| {
            if !allowed.is_empty() && !host_allowed(request.url(), &allowed) {
                return None;
            }
            Some(request.with_options(&forced))
        })
    }

    pub fn check(&self, request: RequestDescriptor) -> Option<RequestDescriptor> {
        (self.0)(request)
    }
}

impl fmt::Debug for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessPolicy(..)")
    }
}

/// Runs `request` through `policy`. No policy allows everything unchanged.
pub fn authorize(
    policy: Option<&AccessPolicy>,
    request: RequestDescriptor,
) -> Result<RequestDescriptor, FetchError> {
    let policy = match policy {
        Some(p) => p,
        None => return Ok(request),
    };
    let url = request.url().to_string();
    match policy.check(request) {
        Some(allowed) => Ok(allowed),
        None => {
            tracing::info!("access policy rejected request to {}", url);
            Err(FetchError::RestrictedRequest { url })
        }
    }
}

fn host_allowed(raw_url: &str, allowed: &[String]) -> bool {
    let host = match Url::parse(raw_url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(h) => h.to_ascii_lowercase(),
        None => return false,
    };
    allowed
        .iter()
        .any(|a| host == *a || host.ends_with(&format!(".{}", a)))
}

impl AccessConfig {
    /// Transport options this config forces onto every request.
    pub fn forced_options(&self) -> TransportOptions {
        let mut opts = TransportOptions::new();
        if let Some(follow) = self.follow_redirects {
            opts.set("follow_location", follow);
        }
        if let Some(max) = self.max_redirections {
            opts.set("max_redirections", max);
        }
        if let Some(secs) = self.timeout_secs {
            opts.set("timeout", secs);
        }
        opts
    }
}
