//! Ordered transport option overrides (redirect following, timeouts, ...).
//!
//! Keys are unique; insertion order is preserved because the transport applies
//! options in the order given.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a single transport option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(u64),
    Str(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Int(n) => write!(f, "{}", n),
            OptionValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<u64> for OptionValue {
    fn from(n: u64) -> Self {
        OptionValue::Int(n)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

/// Insertion-ordered association list of transport options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportOptions(Vec<(String, OptionValue)>);

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, overwriting in place if present, appending otherwise.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Last-write-wins union: keys from `other` overwrite, keys only in `self` are kept.
    pub fn merge(&self, other: &TransportOptions) -> TransportOptions {
        let mut merged = self.clone();
        for (k, v) in &other.0 {
            merged.set(k.clone(), v.clone());
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for TransportOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut opts = TransportOptions::new();
        for (k, v) in iter {
            opts.set(k, v);
        }
        opts
    }
}
