//! Process model.
//!
//! A process is a unit of CPU work described by its arrival and burst
//! time. Strategies finalize the computed timing fields.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use serde::{Deserialize, Serialize};

/// Static process descriptor, as supplied by the caller.
///
/// All times are in abstract ticks relative to t=0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process identifier.
    #[serde(rename = "pid")]
    pub id: String,
    /// Time the process becomes ready.
    pub arrival_time: i64,
    /// Total CPU time required.
    pub burst_time: i64,
}

impl ProcessSpec {
    /// Creates a new descriptor.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
        }
    }
}

/// A process with its static inputs and computed outputs.
///
/// Created with every computed field zeroed and `remaining_time == burst_time`;
/// mutated only by the strategy that runs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Unique process identifier.
    #[serde(rename = "pid")]
    pub id: String,
    /// Time the process becomes ready.
    pub arrival_time: i64,
    /// Total CPU time required.
    pub burst_time: i64,
    /// CPU time still owed. Always in `0..=burst_time`.
    pub remaining_time: i64,
    /// Time of first dispatch.
    pub start_time: i64,
    /// Time the last unit of work finished.
    pub completion_time: i64,
    /// Turnaround time (strategy-defined, see [`ProcessRecord::finish`]).
    pub turnaround_time: i64,
    /// `turnaround_time - burst_time`.
    pub waiting_time: i64,
}

impl ProcessRecord {
    /// Creates a fresh record.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            start_time: 0,
            completion_time: 0,
            turnaround_time: 0,
            waiting_time: 0,
        }
    }

    /// The static descriptor of this record.
    pub fn spec(&self) -> ProcessSpec {
        ProcessSpec::new(self.id.clone(), self.arrival_time, self.burst_time)
    }

    /// Whether the process has never been dispatched.
    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.remaining_time == self.burst_time
    }

    /// Whether all work is done.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Consumes up to `slice` ticks of remaining work.
    ///
    /// Returns the ticks actually executed.
    pub fn execute(&mut self, slice: i64) -> i64 {
        let exec = slice.min(self.remaining_time).max(0);
        self.remaining_time -= exec;
        exec
    }

    /// Finalizes with the standard definitions:
    /// `TT = CT - AT`, `WT = TT - BT`.
    pub fn finish(&mut self, completion_time: i64) {
        self.remaining_time = 0;
        self.completion_time = completion_time;
        self.turnaround_time = completion_time - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
    }

    /// Finalizes treating every process as ready at t=0:
    /// `TT = CT`, `WT = TT - BT`. Used by the offline SJF strategy.
    pub fn finish_from_zero(&mut self, completion_time: i64) {
        self.remaining_time = 0;
        self.completion_time = completion_time;
        self.turnaround_time = completion_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
    }
}

impl From<&ProcessSpec> for ProcessRecord {
    fn from(spec: &ProcessSpec) -> Self {
        Self::new(spec.id.clone(), spec.arrival_time, spec.burst_time)
    }
}

/// Round-Robin-only per-process values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundRobinMetrics {
    /// Number of CPU dispatches received.
    pub quantum_used: u32,
    /// Turnaround / burst, rounded to 2 decimals.
    pub normalized_turnaround_time: f64,
}
