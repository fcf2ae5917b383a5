//! The string-keyed metrics record attached to every search result.

use std::collections::BTreeMap;

use derive_more::Display;
use serde::Serialize;

/// Well-known metric names.
pub mod keys {
    pub const ALGORITHM: &str = "algorithm";
    pub const NODES_EXPANDED: &str = "nodes_expanded";
    pub const PATH_COST: &str = "path_cost";
    pub const SOLUTION_DEPTH: &str = "solution_depth";
    pub const RUNTIME_SEC: &str = "runtime_sec";
    pub const PEAK_MEMORY_BYTES: &str = "peak_memory_bytes";
    pub const FRONTIER_PEAK_SIZE: &str = "frontier_peak_size";
    pub const MAX_DEPTH_REACHED: &str = "max_depth_reached";
}

#[derive(Clone, Debug, Display, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    #[display("{_0}")]
    Int(i64),
    #[display("{_0}")]
    Float(f64),
    #[display("{_0}")]
    Text(String),
}

impl MetricValue {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }
    /// Numeric value, widening integers.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(_) => None,
        }
    }
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for MetricValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}
impl From<f64> for MetricValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}
impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Metrics of one search run.
///
/// Algorithms fill in their domain metrics (`nodes_expanded`, `path_cost`,
/// `solution_depth`, ...) and the instrumentation adds system metrics with
/// [`Metrics::set_if_absent`], so an algorithm's own value always wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metrics {
    values: BTreeMap<String, MetricValue>,
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<MetricValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Inserts `value` only when `key` has no value yet.
    ///
    /// Returns whether the value was inserted.
    pub fn set_if_absent(&mut self, key: &str, value: impl Into<MetricValue>) -> bool {
        if self.values.contains_key(key) {
            return false;
        }
        self.insert(key, value);
        true
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.values.get(key)
    }
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(MetricValue::as_int)
    }
    #[must_use]
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(MetricValue::as_float)
    }
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetricValue::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // Typed accessors for the well-known keys.

    #[must_use]
    pub fn algorithm(&self) -> Option<&str> {
        self.get_text(keys::ALGORITHM)
    }
    #[must_use]
    pub fn nodes_expanded(&self) -> Option<i64> {
        self.get_int(keys::NODES_EXPANDED)
    }
    #[must_use]
    pub fn path_cost(&self) -> Option<f64> {
        self.get_float(keys::PATH_COST)
    }
    #[must_use]
    pub fn solution_depth(&self) -> Option<i64> {
        self.get_int(keys::SOLUTION_DEPTH)
    }
    #[must_use]
    pub fn runtime_sec(&self) -> Option<f64> {
        self.get_float(keys::RUNTIME_SEC)
    }
    #[must_use]
    pub fn peak_memory_bytes(&self) -> Option<i64> {
        self.get_int(keys::PEAK_MEMORY_BYTES)
    }
    #[must_use]
    pub fn frontier_peak_size(&self) -> Option<i64> {
        self.get_int(keys::FRONTIER_PEAK_SIZE)
    }
    #[must_use]
    pub fn max_depth_reached(&self) -> Option<i64> {
        self.get_int(keys::MAX_DEPTH_REACHED)
    }
}

impl std::fmt::Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_if_absent_keeps_existing_values() {
        let mut m = Metrics::new();
        m.insert(keys::RUNTIME_SEC, 1.5);
        assert!(!m.set_if_absent(keys::RUNTIME_SEC, 9.0));
        assert!(m.set_if_absent(keys::PEAK_MEMORY_BYTES, 1024i64));
        assert_eq!(m.runtime_sec(), Some(1.5));
        assert_eq!(m.peak_memory_bytes(), Some(1024));
    }

    #[test]
    fn typed_accessors() {
        let mut m = Metrics::new();
        m.insert(keys::ALGORITHM, "A*");
        m.insert(keys::SOLUTION_DEPTH, -1i64);
        m.insert(keys::PATH_COST, 0.0);

        assert_eq!(m.algorithm(), Some("A*"));
        assert_eq!(m.solution_depth(), Some(-1));
        assert_eq!(m.path_cost(), Some(0.0));
        // Integers widen, text does not.
        assert_eq!(m.get_float(keys::SOLUTION_DEPTH), Some(-1.0));
        assert_eq!(m.get_float(keys::ALGORITHM), None);
        assert_eq!(m.max_depth_reached(), None);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn display_and_json() {
        let mut m = Metrics::new();
        m.insert(keys::ALGORITHM, "BFS");
        m.insert(keys::NODES_EXPANDED, 3i64);
        assert_eq!(m.to_string(), "{algorithm: BFS, nodes_expanded: 3}");
        assert_eq!(
            serde_json::to_string(&m).unwrap(),
            r#"{"algorithm":"BFS","nodes_expanded":3}"#
        );
    }
}
