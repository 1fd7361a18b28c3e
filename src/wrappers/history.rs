//! Per-epoch training history.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Index;

/// Values recorded at the end of every epoch, keyed by loss/metric name.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use neuroreg::wrappers::History;
///
/// let mut history = History::new();
/// history.record(&BTreeMap::from([("loss".to_string(), 0.5)]));
/// history.record(&BTreeMap::from([("loss".to_string(), 0.25)]));
/// assert_eq!(history.get("loss"), Some(&[0.5, 0.25][..]));
/// assert_eq!(history.last("loss"), Some(0.25));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    values: BTreeMap<String, Vec<f64>>,
}

impl History {
    /// Empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one epoch worth of logs.
    pub fn record(&mut self, logs: &BTreeMap<String, f64>) {
        for (name, &value) in logs {
            self.values.entry(name.clone()).or_default().push(value);
        }
    }

    /// All recorded values for `name`, oldest first.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.values.get(name).map(Vec::as_slice)
    }

    /// Most recent value for `name`.
    #[must_use]
    pub fn last(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(|v| v.last().copied())
    }

    /// Recorded names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of recorded epochs.
    #[must_use]
    pub fn n_epochs(&self) -> usize {
        self.values.values().map(Vec::len).max().unwrap_or(0)
    }

    /// True before the first epoch is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }
}

impl Index<&str> for History {
    type Output = [f64];

    /// # Panics
    ///
    /// Panics if nothing was recorded under `name`.
    fn index(&self, name: &str) -> &[f64] {
        match self.values.get(name) {
            Some(v) => v,
            None => panic!("no history recorded for {name:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logs(loss: f64, r2: f64) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("loss".to_string(), loss),
            ("r_squared".to_string(), r2),
        ])
    }

    #[test]
    fn test_record_and_read() {
        let mut h = History::new();
        assert!(h.is_empty());
        h.record(&logs(1.0, 0.1));
        h.record(&logs(0.5, 0.6));

        assert_eq!(h.n_epochs(), 2);
        assert_eq!(&h["r_squared"], &[0.1, 0.6]);
        assert_eq!(h.last("loss"), Some(0.5));
        assert_eq!(h.keys().collect::<Vec<_>>(), vec!["loss", "r_squared"]);
    }

    #[test]
    fn test_missing_key() {
        let h = History::new();
        assert_eq!(h.get("loss"), None);
        assert_eq!(h.last("loss"), None);
    }

    #[test]
    #[should_panic(expected = "no history recorded")]
    fn test_index_missing_panics() {
        let h = History::new();
        let _ = &h["r_squared"];
    }

    #[test]
    fn test_clear() {
        let mut h = History::new();
        h.record(&logs(1.0, 0.0));
        h.clear();
        assert_eq!(h.n_epochs(), 0);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut h = History::new();
        h.record(&logs(1.0, 0.25));
        let json = serde_json::to_string(&h).expect("encode");
        let back: History = serde_json::from_str(&json).expect("decode");
        assert_eq!(back, h);
    }
}
