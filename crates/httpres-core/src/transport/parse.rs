//! Parse raw response header lines into a HeaderSnapshot.

use crate::reference::HeaderSnapshot;

/// Parse collected header lines into a snapshot of the final response's headers.
///
/// Every status line (`HTTP/...`) starts a new block, so after followed redirects
/// only the last response's headers remain.
pub fn parse_headers(lines: &[String]) -> HeaderSnapshot {
    let mut snapshot = HeaderSnapshot::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            snapshot = HeaderSnapshot::new();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            snapshot.append(name.trim(), value.trim());
        }
    }

    snapshot
}
