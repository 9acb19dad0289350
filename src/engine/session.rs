//! Caller-owned scheduling session.
//!
//! Holds the selected algorithm, the live process set and the last result.
//! Each session is an ordinary value: share one across threads by wrapping
//! it in a lock, or give every caller its own.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{simulate, AggregateResult, Algorithm, Strategy};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::ProcessSpec;
use crate::presets::Preset;
use crate::validation::validate_new_process;

/// Read-only snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Selected algorithm.
    pub algorithm: Algorithm,
    /// Quantum (Round Robin only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<u32>,
    /// Number of processes in the set.
    pub process_count: usize,
    /// Process descriptors in ingestion order.
    pub processes: Vec<ProcessSpec>,
}

/// A scheduling session.
///
/// Every failing call leaves the session unchanged.
///
/// # Example
/// ```
/// use u_cpusched::engine::Session;
///
/// let mut session = Session::new();
/// session.select_algorithm("rr", Some(2)).unwrap();
/// session.ingest("A", 0, 5).unwrap();
/// session.ingest("B", 1, 3).unwrap();
/// assert_eq!(session.run().unwrap().makespan(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: EngineConfig,
    algorithm: Algorithm,
    quantum: Option<u32>,
    processes: Vec<ProcessSpec>,
    last_result: Option<AggregateResult>,
}

impl Session {
    /// Creates an empty FCFS session with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty FCFS session with the given configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn quantum(&self) -> Option<u32> {
        self.quantum
    }

    /// Process descriptors in ingestion order.
    pub fn processes(&self) -> &[ProcessSpec] {
        &self.processes
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Result of the last successful `run`, if still current.
    pub fn last_result(&self) -> Option<&AggregateResult> {
        self.last_result.as_ref()
    }

    /// Adds a process to the set.
    ///
    /// Returns the new process count.
    ///
    /// # Errors
    /// - [`EngineError::Validation`] for an empty ID, negative arrival,
    ///   non-positive burst, or a set whose timeline would overflow the clock.
    /// - [`EngineError::DuplicateId`] if the ID is already present.
    pub fn ingest(
        &mut self,
        id: impl Into<String>,
        arrival_time: i64,
        burst_time: i64,
    ) -> Result<usize> {
        let spec = ProcessSpec::new(id, arrival_time, burst_time);
        if let Err(err) = validate_new_process(&spec, &self.processes) {
            warn!(pid = %spec.id, reason = %err, "process rejected");
            return Err(err.into());
        }

        self.processes.push(spec);
        self.last_result = None;
        Ok(self.processes.len())
    }

    /// Adds a batch of processes. Either all are added or none.
    ///
    /// Returns the new process count.
    pub fn ingest_all<I>(&mut self, specs: I) -> Result<usize>
    where
        I: IntoIterator<Item = ProcessSpec>,
    {
        let mut staged = self.processes.clone();
        for spec in specs {
            if let Err(err) = validate_new_process(&spec, &staged) {
                warn!(pid = %spec.id, reason = %err, "batch rejected");
                return Err(err.into());
            }
            staged.push(spec);
        }

        self.processes = staged;
        self.last_result = None;
        Ok(self.processes.len())
    }

    /// Selects the algorithm and discards the current process set.
    ///
    /// # Errors
    /// - [`EngineError::UnsupportedAlgorithm`] for names other than
    ///   FCFS, SJF and RR (case-insensitive).
    /// - [`EngineError::InvalidQuantum`] when RR is selected without a
    ///   quantum in the configured range.
    pub fn select_algorithm(&mut self, name: &str, quantum: Option<i64>) -> Result<()> {
        let algorithm = match Algorithm::parse(name) {
            Ok(algorithm) => algorithm,
            Err(err) => {
                warn!(name, reason = %err, "algorithm rejected");
                return Err(err);
            }
        };

        let quantum = if algorithm.requires_quantum() {
            let accepted = quantum
                .filter(|&q| self.config.accepts_quantum(q))
                .and_then(|q| u32::try_from(q).ok());
            if accepted.is_none() {
                let err = EngineError::InvalidQuantum {
                    quantum,
                    min: self.config.min_quantum,
                    max: self.config.max_quantum,
                };
                warn!(reason = %err, "quantum rejected");
                return Err(err);
            }
            accepted
        } else {
            None
        };

        self.algorithm = algorithm;
        self.quantum = quantum;
        self.clear();
        info!(algorithm = %algorithm, ?quantum, "algorithm changed, session reset");
        Ok(())
    }

    /// The strategy for the current selection.
    pub fn strategy(&self) -> Strategy {
        Strategy::for_algorithm(
            self.algorithm,
            self.quantum.map(i64::from),
            &self.config,
        )
    }

    /// Runs the selected algorithm over the current process set and
    /// stores the result.
    ///
    /// # Errors
    /// [`EngineError::EmptyProcessSet`] if no processes were ingested.
    pub fn run(&mut self) -> Result<&AggregateResult> {
        let result = simulate(&self.strategy(), &self.processes)?;
        info!(
            algorithm = %self.algorithm,
            processes = self.processes.len(),
            avg_wait = result.average_waiting_time,
            "scheduling completed"
        );
        let stored: &AggregateResult = self.last_result.insert(result);
        Ok(stored)
    }

    /// Clears the process set and the stored result. Keeps the selection.
    pub fn reset(&mut self) {
        self.clear();
        info!("session reset");
    }

    /// Replaces the process set with a built-in preset.
    pub fn load_preset(&mut self, preset: Preset) -> Result<usize> {
        let mut fresh = Self {
            config: self.config.clone(),
            algorithm: self.algorithm,
            quantum: self.quantum,
            ..Self::default()
        };
        let count = fresh.ingest_all(preset.processes())?;
        *self = fresh;
        info!(preset = preset.key(), count, "preset loaded");
        Ok(count)
    }

    /// Read-only snapshot.
    pub fn current_state(&self) -> SessionState {
        SessionState {
            algorithm: self.algorithm,
            quantum: self.quantum,
            process_count: self.processes.len(),
            processes: self.processes.clone(),
        }
    }

    fn clear(&mut self) {
        self.processes.clear();
        self.last_result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        let mut session = Session::new();
        session.ingest("A", 0, 5).unwrap();
        session.ingest("B", 1, 3).unwrap();
        session.ingest("C", 2, 8).unwrap();
        session
    }

    #[test_log::test]
    fn test_ingest_and_run() {
        let mut session = sample_session();
        assert_eq!(session.process_count(), 3);

        let result = session.run().unwrap();
        assert_eq!(result.process("C").unwrap().waiting_time, 6);
        assert!(session.last_result().is_some());
    }

    #[test_log::test]
    fn test_ingest_rejections_leave_state() {
        let mut session = sample_session();
        session.run().unwrap();

        assert!(matches!(
            session.ingest("", 0, 1),
            Err(EngineError::Validation { .. })
        ));
        assert!(matches!(
            session.ingest("D", -1, 1),
            Err(EngineError::Validation { .. })
        ));
        assert!(matches!(
            session.ingest("D", 0, 0),
            Err(EngineError::Validation { .. })
        ));
        assert_eq!(
            session.ingest("B", 4, 4),
            Err(EngineError::DuplicateId { id: "B".into() })
        );
        assert_eq!(session.process_count(), 3);
        assert!(session.last_result().is_some());
    }

    #[test]
    fn test_ingest_invalidates_result() {
        let mut session = sample_session();
        session.run().unwrap();
        session.ingest("D", 3, 1).unwrap();
        assert!(session.last_result().is_none());
    }

    #[test_log::test]
    fn test_ingest_extreme_times_rejected_without_panic() {
        let mut session = Session::new();
        assert!(matches!(
            session.ingest("A", i64::MAX, 1),
            Err(EngineError::Validation { .. })
        ));

        session.ingest("A", i64::MAX - 2, 1).unwrap();
        assert!(matches!(
            session.ingest("B", 0, 2),
            Err(EngineError::Validation { .. })
        ));
        assert_eq!(session.process_count(), 1);

        let result = session.run().unwrap();
        assert_eq!(result.process("A").unwrap().completion_time, i64::MAX - 1);
    }

    #[test]
    fn test_ingest_accepts_whitespace_id() {
        let mut session = Session::new();
        assert_eq!(session.ingest(" ", 0, 1).unwrap(), 1);
        assert!(session.run().unwrap().process(" ").is_some());
    }

    #[test]
    fn test_ingest_all_is_atomic() {
        let mut session = sample_session();
        let err = session
            .ingest_all(vec![ProcessSpec::new("D", 0, 1), ProcessSpec::new("D", 1, 1)])
            .unwrap_err();
        assert_eq!(err, EngineError::DuplicateId { id: "D".into() });
        assert_eq!(session.process_count(), 3);

        let count = session
            .ingest_all(vec![ProcessSpec::new("D", 0, 1), ProcessSpec::new("E", 1, 1)])
            .unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn test_run_empty() {
        let mut session = Session::new();
        assert_eq!(session.run().unwrap_err(), EngineError::EmptyProcessSet);
    }

    #[test_log::test]
    fn test_select_algorithm() {
        let mut session = sample_session();
        session.select_algorithm("sjf", None).unwrap();
        assert_eq!(session.algorithm(), Algorithm::Sjf);
        assert_eq!(session.process_count(), 0);
        assert_eq!(session.quantum(), None);

        session.select_algorithm("Rr", Some(3)).unwrap();
        assert_eq!(session.algorithm(), Algorithm::RoundRobin);
        assert_eq!(session.quantum(), Some(3));
        assert_eq!(session.strategy().quantum(), Some(3));
    }

    #[test]
    fn test_select_algorithm_errors_leave_state() {
        let mut session = sample_session();

        assert_eq!(
            session.select_algorithm("lottery", None),
            Err(EngineError::UnsupportedAlgorithm {
                name: "lottery".into()
            })
        );
        for quantum in [None, Some(0), Some(21), Some(-5)] {
            assert!(matches!(
                session.select_algorithm("RR", quantum),
                Err(EngineError::InvalidQuantum { .. })
            ));
        }
        assert_eq!(session.algorithm(), Algorithm::Fcfs);
        assert_eq!(session.process_count(), 3);
    }

    #[test]
    fn test_quantum_range_from_config() {
        let mut session = Session::with_config(EngineConfig::default().with_quantum_range(1, 50));
        session.select_algorithm("RR", Some(40)).unwrap();
        assert_eq!(session.quantum(), Some(40));
    }

    #[test]
    fn test_reset() {
        let mut session = sample_session();
        session.select_algorithm("RR", Some(2)).unwrap();
        session.ingest("A", 0, 1).unwrap();
        session.run().unwrap();

        session.reset();
        assert_eq!(session.process_count(), 0);
        assert!(session.last_result().is_none());
        assert_eq!(session.algorithm(), Algorithm::RoundRobin);

        // No-op when already empty.
        session.reset();
        assert_eq!(session.process_count(), 0);
    }

    #[test]
    fn test_reset_then_rerun_is_identical() {
        let mut session = Session::new();
        session.select_algorithm("RR", Some(2)).unwrap();
        session.ingest("A", 0, 5).unwrap();
        session.ingest("B", 1, 3).unwrap();
        let first = serde_json::to_string(session.run().unwrap()).unwrap();

        session.reset();
        session.ingest("A", 0, 5).unwrap();
        session.ingest("B", 1, 3).unwrap();
        let second = serde_json::to_string(session.run().unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_current_state() {
        let mut session = Session::new();
        let state = session.current_state();
        assert_eq!(state.algorithm, Algorithm::Fcfs);
        assert_eq!(state.process_count, 0);

        session.select_algorithm("RR", Some(5)).unwrap();
        session.ingest("P1", 0, 3).unwrap();
        let state = session.current_state();
        assert_eq!(state.quantum, Some(5));
        assert_eq!(state.processes, vec![ProcessSpec::new("P1", 0, 3)]);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["algorithm"], "RR");
        assert_eq!(json["quantum"], 5);
        assert_eq!(json["processes"][0]["pid"], "P1");
    }

    #[test]
    fn test_load_preset() {
        let mut session = sample_session();
        let count = session.load_preset(Preset::ConvoyEffect).unwrap();
        assert_eq!(count, 4);
        assert_eq!(session.processes()[0], ProcessSpec::new("P1", 0, 20));

        let result = session.run().unwrap();
        assert!(result.narrative().starts_with("Convoy effect detected"));
    }
}
