//! Response header snapshot kept alongside a resolved reference.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response headers keyed by lower-cased name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderSnapshot(BTreeMap<String, String>);

impl HeaderSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any earlier value.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Adds `value` for `name`; a repeated header is joined with `", "`.
    pub fn append(&mut self, name: &str, value: &str) {
        self.0
            .entry(name.to_ascii_lowercase())
            .and_modify(|v| {
                v.push_str(", ");
                v.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for HeaderSnapshot {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut snapshot = HeaderSnapshot::new();
        for (k, v) in iter {
            snapshot.insert(k, v);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let h: HeaderSnapshot = [("Content-Type", "text/csv")].into_iter().collect();
        assert_eq!(h.get("content-type"), Some("text/csv"));
        assert_eq!(h.get("CONTENT-TYPE"), Some("text/csv"));
        assert_eq!(h.iter().next(), Some(("content-type", "text/csv")));
    }

    #[test]
    fn insert_replaces_append_joins() {
        let mut h = HeaderSnapshot::new();
        h.insert("ETag", "a");
        h.insert("etag", "b");
        assert_eq!(h.get("ETag"), Some("b"));
        h.append("Set-Cookie", "x=1");
        h.append("set-cookie", "y=2");
        assert_eq!(h.get("set-cookie"), Some("x=1, y=2"));
    }
}
