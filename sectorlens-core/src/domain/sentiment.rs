//! Analyst sentiment metrics keyed by their on-page label.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Zero-width space, which the sentiment source sprinkles into labels.
const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// One labeled statistic block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentMetric {
    pub label: String,
    pub main_value: String,
    pub detail: String,
}

/// Label → metric mapping for a single ticker.
///
/// Inserting a label that is already present replaces the earlier metric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentMap {
    metrics: HashMap<String, SentimentMetric>,
}

impl SentimentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a metric under its normalized label (last write wins).
    ///
    /// Returns the metric that was replaced, if any.
    pub fn insert(&mut self, mut metric: SentimentMetric) -> Option<SentimentMetric> {
        metric.label = normalize_label(&metric.label);
        self.metrics.insert(metric.label.clone(), metric)
    }

    pub fn get(&self, label: &str) -> Option<&SentimentMetric> {
        self.metrics.get(label)
    }

    /// Main value for `label`, if present.
    pub fn main_value(&self, label: &str) -> Option<&str> {
        self.get(label).map(|m| m.main_value.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.metrics.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Strip zero-width spaces and surrounding whitespace from a label.
pub fn normalize_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != ZERO_WIDTH_SPACE)
        .collect::<String>()
        .trim()
        .to_string()
}
