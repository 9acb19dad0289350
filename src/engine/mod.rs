//! Engine dispatcher.
//!
//! Maps a validated algorithm choice onto a strategy and assembles
//! results. Two entry points:
//!
//! - [`simulate`]: pure; takes a snapshot of process descriptors and
//!   returns a fresh [`AggregateResult`].
//! - [`Session`]: a caller-owned context holding the selected algorithm,
//!   the live process set and the last result.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::engine::{simulate, Strategy};
//! use u_cpusched::models::ProcessSpec;
//!
//! let strategy = Strategy::select("rr", Some(2)).unwrap();
//! let specs = vec![ProcessSpec::new("A", 0, 5), ProcessSpec::new("B", 1, 3)];
//! let result = simulate(&strategy, &specs).unwrap();
//! assert_eq!(result.quantum(), Some(2));
//! ```

mod result;
mod session;

pub use result::AggregateResult;
pub use session::{Session, SessionState};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{ProcessRecord, ProcessSpec};
use crate::scheduler::{Fcfs, RoundRobin, SchedulingStrategy, Sjf, StrategyRun};
use crate::validation::validate_process_set;

/// Supported scheduling algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come, First-Served.
    #[default]
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest Job First.
    #[serde(rename = "SJF")]
    Sjf,
    /// Round Robin.
    #[serde(rename = "RR")]
    RoundRobin,
}

impl Algorithm {
    /// All algorithms.
    pub const ALL: [Algorithm; 3] = [Algorithm::Fcfs, Algorithm::Sjf, Algorithm::RoundRobin];

    /// Canonical name ("FCFS", "SJF", "RR").
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::RoundRobin => "RR",
        }
    }

    /// Parses a name case-insensitively.
    pub fn parse(name: &str) -> Result<Self> {
        let upper = name.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|a| a.code() == upper)
            .ok_or_else(|| EngineError::UnsupportedAlgorithm {
                name: name.to_string(),
            })
    }

    /// Whether the algorithm takes a quantum.
    pub fn requires_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A configured strategy, one variant per algorithm.
#[derive(Debug, Clone)]
pub enum Strategy {
    Fcfs(Fcfs),
    Sjf(Sjf),
    RoundRobin(RoundRobin),
}

impl Strategy {
    /// Selects a strategy by name with default configuration.
    ///
    /// The quantum only matters for Round Robin; a missing or invalid one
    /// falls back to the default. Range checks belong to the caller.
    pub fn select(name: &str, quantum: Option<i64>) -> Result<Self> {
        Ok(Self::for_algorithm(
            Algorithm::parse(name)?,
            quantum,
            &EngineConfig::default(),
        ))
    }

    /// Builds the strategy for an already-validated algorithm.
    pub fn for_algorithm(algorithm: Algorithm, quantum: Option<i64>, config: &EngineConfig) -> Self {
        let strategy = match algorithm {
            Algorithm::Fcfs => {
                Self::Fcfs(Fcfs::new().with_convoy_threshold(config.convoy_burst_threshold))
            }
            Algorithm::Sjf => Self::Sjf(Sjf),
            Algorithm::RoundRobin => Self::RoundRobin(RoundRobin::from_requested(
                quantum,
                config.default_quantum,
            )),
        };
        debug!(algorithm = %algorithm, quantum = ?strategy.quantum(), "strategy selected");
        strategy
    }

    /// The algorithm this strategy implements.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Fcfs(_) => Algorithm::Fcfs,
            Self::Sjf(_) => Algorithm::Sjf,
            Self::RoundRobin(_) => Algorithm::RoundRobin,
        }
    }

    /// Quantum (Round Robin only).
    pub fn quantum(&self) -> Option<u32> {
        match self {
            Self::RoundRobin(rr) => Some(rr.quantum()),
            _ => None,
        }
    }
}

impl SchedulingStrategy for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Self::Fcfs(s) => s.name(),
            Self::Sjf(s) => s.name(),
            Self::RoundRobin(s) => s.name(),
        }
    }

    fn run(&self, records: &mut [ProcessRecord]) -> StrategyRun {
        match self {
            Self::Fcfs(s) => s.run(records),
            Self::Sjf(s) => s.run(records),
            Self::RoundRobin(s) => s.run(records),
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Fcfs(s) => s.description(),
            Self::Sjf(s) => s.description(),
            Self::RoundRobin(s) => s.description(),
        }
    }
}

/// Runs `strategy` over a snapshot of process descriptors.
///
/// Builds fresh records, so the same input always yields the same result.
///
/// # Errors
/// - [`EngineError::EmptyProcessSet`] if `specs` is empty.
/// - [`EngineError::InvalidProcessSet`] if any descriptor is invalid or
///   an ID repeats.
pub fn simulate<S>(strategy: &S, specs: &[ProcessSpec]) -> Result<AggregateResult>
where
    S: SchedulingStrategy + ?Sized,
{
    if specs.is_empty() {
        return Err(EngineError::EmptyProcessSet);
    }
    validate_process_set(specs).map_err(|errors| EngineError::InvalidProcessSet { errors })?;

    let mut records: Vec<ProcessRecord> = specs.iter().map(ProcessRecord::from).collect();
    let run = strategy.run(&mut records);
    let result = AggregateResult::assemble(records, run);

    debug!(
        strategy = strategy.name(),
        processes = result.processes.len(),
        segments = result.timeline.len(),
        avg_wait = result.average_waiting_time,
        avg_turnaround = result.average_turnaround_time,
        "simulation complete"
    );
    Ok(result)
}
