//! Scheduling strategies and statistics.
//!
//! Provides the three uniprocessor policies and the metrics computed over
//! their results.
//!
//! # Strategies
//!
//! | Strategy | Preemptive | Order |
//! |----------|-----------|-------|
//! | `Fcfs` | No | Arrival time (stable) |
//! | `Sjf` | No | Burst time, then ID (offline, all ready at t=0) |
//! | `RoundRobin` | Quantum expiry | FIFO ready queue, arrival seeding |
//!
//! # Statistics
//!
//! `Statistics` computes population mean, standard deviation, minimum and
//! maximum for each per-process metric.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

mod fcfs;
mod round_robin;
mod sjf;
mod stats;

pub use fcfs::Fcfs;
pub use round_robin::{QuantumVerdict, RoundRobin, RoundRobinReport};
pub use sjf::Sjf;
pub use stats::{mean, MetricSummary, MetricValue, Statistics};

pub(crate) use stats::round2;

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::models::{ProcessRecord, RoundRobinMetrics, TimelineSegment};

/// A CPU scheduling policy.
///
/// # Contract
/// `run` receives freshly created records in ingestion order. It must
/// finalize every record's computed fields in place without reordering
/// the slice, and return a chronological, contiguous-from-zero timeline.
pub trait SchedulingStrategy: Debug {
    /// Short name (e.g., "FCFS", "RR").
    fn name(&self) -> &'static str;

    /// Runs the policy to completion.
    fn run(&self, records: &mut [ProcessRecord]) -> StrategyRun;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Output of one strategy run (the records are finalized in place).
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRun {
    /// Busy and idle segments in chronological order.
    pub timeline: Vec<TimelineSegment>,
    /// Strategy-specific narrative and extension values.
    pub details: StrategyDetails,
}

/// Strategy-specific result variant.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyDetails {
    /// FCFS convoy effect analysis.
    Fcfs { convoy_effect_info: String },
    /// SJF reordering analysis.
    Sjf { algorithm_analysis: String },
    /// Round Robin report plus per-process extension values.
    RoundRobin {
        report: RoundRobinReport,
        metrics: BTreeMap<String, RoundRobinMetrics>,
    },
}

impl StrategyDetails {
    /// Human-readable narrative for this run.
    pub fn narrative(&self) -> String {
        match self {
            Self::Fcfs { convoy_effect_info } => convoy_effect_info.clone(),
            Self::Sjf { algorithm_analysis } => algorithm_analysis.clone(),
            Self::RoundRobin { report, .. } => report.to_string(),
        }
    }

    /// Quantum used (Round Robin only).
    pub fn quantum(&self) -> Option<u32> {
        match self {
            Self::RoundRobin { report, .. } => Some(report.quantum),
            _ => None,
        }
    }

    /// Per-process Round Robin values, keyed by process ID.
    pub fn round_robin_metrics(&self) -> Option<&BTreeMap<String, RoundRobinMetrics>> {
        match self {
            Self::RoundRobin { metrics, .. } => Some(metrics),
            _ => None,
        }
    }
}
