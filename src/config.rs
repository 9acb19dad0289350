//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Tunables shared by the session boundary and the strategies.
///
/// Deserializes with every field optional; missing fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Quantum used by Round Robin when none (or an invalid one) is supplied.
    pub default_quantum: u32,
    /// Smallest quantum accepted when selecting Round Robin.
    pub min_quantum: u32,
    /// Largest quantum accepted when selecting Round Robin.
    pub max_quantum: u32,
    /// FCFS flags a convoy effect when any burst exceeds this.
    pub convoy_burst_threshold: i64,
}

impl EngineConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback Round Robin quantum.
    pub fn with_default_quantum(mut self, quantum: u32) -> Self {
        self.default_quantum = quantum;
        self
    }

    /// Sets the accepted quantum range (inclusive).
    pub fn with_quantum_range(mut self, min: u32, max: u32) -> Self {
        self.min_quantum = min;
        self.max_quantum = max;
        self
    }

    /// Sets the convoy effect burst threshold.
    pub fn with_convoy_burst_threshold(mut self, threshold: i64) -> Self {
        self.convoy_burst_threshold = threshold;
        self
    }

    /// Whether `quantum` falls in the accepted range.
    pub fn accepts_quantum(&self, quantum: i64) -> bool {
        quantum >= i64::from(self.min_quantum) && quantum <= i64::from(self.max_quantum)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_quantum: 4,
            min_quantum: 1,
            max_quantum: 20,
            convoy_burst_threshold: 10,
        }
    }
}
