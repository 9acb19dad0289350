//! Per-process metric statistics.
//!
//! Summarizes finalized process records, one entry per metric.
//!
//! # Metrics
//!
//! | Metric | Strategies |
//! |--------|-----------|
//! | `arrival_time`, `burst_time`, `completion_time` | All |
//! | `turnaround_time`, `waiting_time` | All |
//! | `quantum_used`, `normalized_turnaround_time` | Round Robin |
//!
//! Mean and standard deviation are population values (divide by N) rounded
//! to 2 decimals; min and max are the raw values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::StrategyDetails;
use crate::models::ProcessRecord;

/// A raw metric value: integral for time metrics, fractional for ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Real(f64),
}

impl MetricValue {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(v) => v as f64,
            Self::Real(v) => v,
        }
    }
}

/// Summary of one metric across all processes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Population mean (2 decimals).
    pub mean: f64,
    /// Population standard deviation (2 decimals).
    pub std_dev: f64,
    /// Smallest value.
    pub min: MetricValue,
    /// Largest value.
    pub max: MetricValue,
}

impl MetricSummary {
    /// Summarizes fractional `values`. Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let min = values.iter().copied().reduce(f64::min)?;
        let max = values.iter().copied().reduce(f64::max)?;
        Some(Self::summarize(values, MetricValue::Real(min), MetricValue::Real(max)))
    }

    /// Summarizes integral `values`, keeping min and max as integers.
    pub fn from_integers(values: &[i64]) -> Option<Self> {
        let min = values.iter().copied().min()?;
        let max = values.iter().copied().max()?;
        let as_float: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        Some(Self::summarize(
            &as_float,
            MetricValue::Integer(min),
            MetricValue::Integer(max),
        ))
    }

    fn summarize(values: &[f64], min: MetricValue, max: MetricValue) -> Self {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Self {
            mean: round2(mean),
            std_dev: round2(variance.sqrt()),
            min,
            max,
        }
    }
}

/// Metric summaries keyed by metric name (sorted).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statistics {
    metrics: BTreeMap<String, MetricSummary>,
}

impl Statistics {
    /// Computes the metrics shared by every strategy.
    ///
    /// Empty input yields empty statistics.
    pub fn calculate(records: &[ProcessRecord]) -> Self {
        let mut stats = Self::default();
        stats.insert("arrival_time", records, |p| p.arrival_time);
        stats.insert("burst_time", records, |p| p.burst_time);
        stats.insert("completion_time", records, |p| p.completion_time);
        stats.insert("turnaround_time", records, |p| p.turnaround_time);
        stats.insert("waiting_time", records, |p| p.waiting_time);
        stats
    }

    /// Computes the shared metrics plus any strategy-specific ones.
    pub fn calculate_with_details(records: &[ProcessRecord], details: &StrategyDetails) -> Self {
        let mut stats = Self::calculate(records);
        if let Some(metrics) = details.round_robin_metrics() {
            let rr: Vec<_> = records.iter().filter_map(|p| metrics.get(&p.id)).collect();
            let quantum_used: Vec<i64> = rr.iter().map(|m| i64::from(m.quantum_used)).collect();
            let normalized: Vec<f64> = rr.iter().map(|m| m.normalized_turnaround_time).collect();
            stats.put("quantum_used", MetricSummary::from_integers(&quantum_used));
            stats.put("normalized_turnaround_time", MetricSummary::from_values(&normalized));
        }
        stats
    }

    fn insert(&mut self, name: &str, records: &[ProcessRecord], f: impl Fn(&ProcessRecord) -> i64) {
        let values: Vec<i64> = records.iter().map(f).collect();
        self.put(name, MetricSummary::from_integers(&values));
    }

    fn put(&mut self, name: &str, summary: Option<MetricSummary>) {
        if let Some(summary) = summary {
            self.metrics.insert(name.to_string(), summary);
        }
    }

    /// Summary for a metric.
    pub fn get(&self, name: &str) -> Option<&MetricSummary> {
        self.metrics.get(name)
    }

    /// Metric names in sorted order.
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Arithmetic mean; 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Rounds to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
