//! Round Robin (preemptive, fixed quantum).
//!
//! # Algorithm
//!
//! 1. Seed order: `(arrival_time, id)` ascending. Admit every process that
//!    has arrived by t=0 into a FIFO ready queue.
//! 2. While work remains:
//!    a. If the queue is empty, idle until the next arrival and admit it.
//!    b. Dequeue the head; record its start on first dispatch.
//!    c. Run for `min(Q, remaining)`.
//!    d. Admit every process that arrived by the new clock.
//!    e. Finalize the process if done, otherwise re-enqueue it at the tail.
//!
//! Step (d) precedes step (e): processes arriving at or before the
//! preemption instant queue ahead of the preempted process.
//!
//! # Complexity
//! O(total_burst / Q + n log n).

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{round2, SchedulingStrategy, StrategyDetails, StrategyRun};
use crate::models::{ProcessRecord, RoundRobinMetrics, SegmentAnnotation, TimelineSegment};

/// Preemptive Round Robin with a fixed quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    quantum: u32,
}

/// Qualitative assessment of the quantum for a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantumVerdict {
    /// `Q >= max(burst)`: every process finishes in one dispatch.
    FcfsLike,
    /// `Q == 1`: a context switch after every tick.
    ExcessiveSwitching,
    /// Neither extreme.
    Balanced,
}

/// Round Robin run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRobinReport {
    /// Quantum used.
    pub quantum: u32,
    /// Number of busy segments.
    pub dispatches: usize,
    /// `dispatches - process_count`.
    pub context_switches: usize,
    /// Quantum assessment.
    pub verdict: QuantumVerdict,
}

impl RoundRobin {
    /// Quantum used when none (or an invalid one) is requested.
    pub const DEFAULT_QUANTUM: u32 = 4;

    /// Creates the strategy. A zero quantum falls back to the default.
    pub fn new(quantum: u32) -> Self {
        Self {
            quantum: if quantum == 0 {
                Self::DEFAULT_QUANTUM
            } else {
                quantum
            },
        }
    }

    /// Creates the strategy from an unchecked request.
    ///
    /// Missing or non-positive quanta fall back to `default`.
    pub fn from_requested(quantum: Option<i64>, default: u32) -> Self {
        let quantum = quantum
            .and_then(|q| u32::try_from(q).ok())
            .filter(|&q| q >= 1)
            .unwrap_or(default);
        Self::new(quantum)
    }

    /// The quantum.
    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    /// Indices into `records` ordered by `(arrival_time, id)`.
    pub fn seed_order(records: &[ProcessRecord]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..records.len()).collect();
        indices.sort_by(|&a, &b| {
            records[a]
                .arrival_time
                .cmp(&records[b].arrival_time)
                .then_with(|| records[a].id.cmp(&records[b].id))
        });
        indices
    }

    fn verdict(&self, records: &[ProcessRecord]) -> QuantumVerdict {
        let max_burst = records.iter().map(|p| p.burst_time).max().unwrap_or(0);
        if i64::from(self.quantum) >= max_burst {
            QuantumVerdict::FcfsLike
        } else if self.quantum == 1 {
            QuantumVerdict::ExcessiveSwitching
        } else {
            QuantumVerdict::Balanced
        }
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUANTUM)
    }
}

/// Moves every seeded process that has arrived by `clock` into the queue.
fn admit(
    ready: &mut VecDeque<usize>,
    seed: &[usize],
    next: &mut usize,
    records: &[ProcessRecord],
    clock: i64,
) {
    while let Some(&idx) = seed.get(*next) {
        if records[idx].arrival_time > clock {
            break;
        }
        ready.push_back(idx);
        *next += 1;
    }
}

impl SchedulingStrategy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn run(&self, records: &mut [ProcessRecord]) -> StrategyRun {
        let q = i64::from(self.quantum);
        let seed = Self::seed_order(records);
        let mut dispatches = vec![0u32; records.len()];
        let mut ready = VecDeque::with_capacity(records.len());
        let mut next = 0;
        let mut clock = 0;
        let mut timeline = Vec::new();

        admit(&mut ready, &seed, &mut next, records, clock);

        while !ready.is_empty() || next < seed.len() {
            let Some(idx) = ready.pop_front() else {
                let arrival = records[seed[next]].arrival_time;
                if arrival > clock {
                    trace!(from = clock, to = arrival, "cpu idle");
                    timeline.push(TimelineSegment::idle(clock, arrival));
                    clock = arrival;
                }
                admit(&mut ready, &seed, &mut next, records, clock);
                continue;
            };

            let p = &mut records[idx];
            if p.is_fresh() {
                p.start_time = clock;
            }
            let exec = p.execute(q);
            dispatches[idx] += 1;
            timeline.push(
                TimelineSegment::busy(p.id.as_str(), clock, clock + exec).with_annotation(
                    SegmentAnnotation::RoundRobin {
                        quantum_number: dispatches[idx],
                        remaining_time_after: p.remaining_time,
                    },
                ),
            );
            trace!(pid = %p.id, start = clock, exec, remaining = p.remaining_time, "dispatch");
            clock += exec;

            let finished = p.is_finished();
            if finished {
                p.finish(clock);
            }

            admit(&mut ready, &seed, &mut next, records, clock);
            if !finished {
                ready.push_back(idx);
            }
        }

        let metrics: BTreeMap<String, RoundRobinMetrics> = records
            .iter()
            .zip(&dispatches)
            .map(|(p, &quantum_used)| {
                let normalized = if p.burst_time > 0 {
                    round2(p.turnaround_time as f64 / p.burst_time as f64)
                } else {
                    0.0
                };
                (
                    p.id.clone(),
                    RoundRobinMetrics {
                        quantum_used,
                        normalized_turnaround_time: normalized,
                    },
                )
            })
            .collect();

        let busy = timeline.iter().filter(|s| s.is_busy()).count();
        let report = RoundRobinReport {
            quantum: self.quantum,
            dispatches: busy,
            context_switches: busy.saturating_sub(records.len()),
            verdict: self.verdict(records),
        };

        StrategyRun {
            timeline,
            details: StrategyDetails::RoundRobin { report, metrics },
        }
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }
}

impl fmt::Display for QuantumVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FcfsLike => write!(f, "Quantum too large: behaves like FCFS"),
            Self::ExcessiveSwitching => write!(f, "Quantum too small: excessive context switching"),
            Self::Balanced => write!(f, "Balanced quantum"),
        }
    }
}

impl fmt::Display for RoundRobinReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quantum: {} | Total dispatches: {} | Context switches: {} | {}",
            self.quantum, self.dispatches, self.context_switches, self.verdict
        )
    }
}
