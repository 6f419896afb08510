// Metric data domain models
use std::collections::BTreeMap;

/// Flat mapping of named numeric metrics, as returned by one backend call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSnapshot {
    values: BTreeMap<String, f64>,
}

impl MetricSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Raw lookup; `None` when the backend left the field out.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Value used for display. Missing and non-finite fields read as zero.
    pub fn value_or_zero(&self, name: &str) -> f64 {
        match self.get(name) {
            Some(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
impl MetricSnapshot {
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetricSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (name, value) in iter {
            snapshot.insert(name, value);
        }
        snapshot
    }
}

/// One `(category, value)` datum of a chart series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub category: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_reads_zero() {
        let snapshot = MetricSnapshot::new().with("total_patients", 12.0);
        assert_eq!(snapshot.get("total_doctors"), None);
        assert_eq!(snapshot.value_or_zero("total_doctors"), 0.0);
        assert_eq!(snapshot.value_or_zero("total_patients"), 12.0);
    }

    #[test]
    fn test_non_finite_reads_zero() {
        let snapshot: MetricSnapshot = [("a", f64::NAN), ("b", f64::INFINITY)]
            .into_iter()
            .collect();
        assert_eq!(snapshot.value_or_zero("a"), 0.0);
        assert_eq!(snapshot.value_or_zero("b"), 0.0);
        assert!(snapshot.get("a").is_some());
    }
}
