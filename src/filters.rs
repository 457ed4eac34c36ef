//! Report filters and their sanitization.
//!
//! Callers hand in arbitrary `key=value` pairs. Only the keys a report
//! declares survive [`FilterMap::sanitize`]; everything else is dropped
//! silently so that a stray query parameter never blocks the base report.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Suffix marking a filter key as a numeric identifier.
pub const ID_SUFFIX: &str = "_id";

/// Largest integer a double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A scalar filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FilterValue {
    /// Parse text the way a lenient numeric cast would: surrounding
    /// whitespace is ignored, integers stay integral, anything non-finite
    /// is rejected.
    pub fn parse_number(text: &str) -> Option<FilterValue> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(FilterValue::Int(n));
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(|f| FilterValue::Float(f).into_number())
    }

    /// Coerce this value to a number, or `None` if it has no numeric reading.
    pub fn into_number(self) -> Option<FilterValue> {
        match self {
            FilterValue::Int(n) => Some(FilterValue::Int(n)),
            FilterValue::Float(f) if !f.is_finite() => None,
            FilterValue::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
                Some(FilterValue::Int(f as i64))
            }
            FilterValue::Float(f) => Some(FilterValue::Float(f)),
            FilterValue::Text(s) => FilterValue::parse_number(&s),
        }
    }

    /// Empty text carries no filter.
    pub fn is_blank(&self) -> bool {
        matches!(self, FilterValue::Text(s) if s.trim().is_empty())
    }

    /// Normalize a value for `key`: blank values vanish, `*_id` keys must be
    /// numeric and are dropped when they are not.
    pub fn normalize_for(&self, key: &str) -> Option<FilterValue> {
        if self.is_blank() {
            return None;
        }
        if key.ends_with(ID_SUFFIX) {
            self.clone().into_number()
        } else {
            Some(self.clone())
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Int(n) => write!(f, "{}", n),
            FilterValue::Float(x) => write!(f, "{}", x),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Int(n)
    }
}

impl From<f64> for FilterValue {
    fn from(f: f64) -> Self {
        FilterValue::Float(f)
    }
}

/// Ordered filter key to value mapping.
///
/// Insertion order is kept so that sanitized maps follow the order in
/// which a report declares its filter keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterMap {
    entries: Vec<(String, FilterValue)>,
}

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only `permitted` keys, in `permitted` order, with each value
    /// normalized by [`FilterValue::normalize_for`].
    ///
    /// Unknown keys and values that fail normalization are dropped, never
    /// reported. Sanitizing an already sanitized map is a no-op.
    pub fn sanitize<S: AsRef<str>>(&self, permitted: &[S]) -> FilterMap {
        let mut out = FilterMap::new();
        for key in permitted {
            let key = key.as_ref();
            if let Some(value) = self.get(key).and_then(|v| v.normalize_for(key)) {
                out.insert(key, value);
            }
        }
        out
    }
}

impl<K, V> FromIterator<(K, V)> for FilterMap
where
    K: Into<String>,
    V: Into<FilterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FilterMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for FilterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
