//! First-Come-First-Served.
//!
//! # Algorithm
//!
//! 1. Order processes by arrival time; ties keep ingestion order.
//! 2. Run each to completion; when the next arrival is in the future,
//!    the CPU idles until it.
//!
//! # Complexity
//! O(n log n).

use tracing::trace;

use super::{SchedulingStrategy, StrategyDetails, StrategyRun};
use crate::models::{ProcessRecord, TimelineSegment};

/// Non-preemptive FCFS.
///
/// Flags a convoy effect when any burst exceeds the configured threshold
/// (a display heuristic, not a statistical test).
#[derive(Debug, Clone, Copy)]
pub struct Fcfs {
    convoy_burst_threshold: i64,
}

impl Fcfs {
    /// Default convoy effect burst threshold.
    pub const DEFAULT_CONVOY_THRESHOLD: i64 = 10;

    /// Creates the strategy with the default threshold.
    pub fn new() -> Self {
        Self {
            convoy_burst_threshold: Self::DEFAULT_CONVOY_THRESHOLD,
        }
    }

    /// Sets the convoy effect burst threshold.
    pub fn with_convoy_threshold(mut self, threshold: i64) -> Self {
        self.convoy_burst_threshold = threshold;
        self
    }

    /// Indices into `records` in execution order.
    pub fn execution_order(records: &[ProcessRecord]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..records.len()).collect();
        // Stable: equal arrivals keep ingestion order.
        indices.sort_by_key(|&i| records[i].arrival_time);
        indices
    }

    fn analyze_convoy_effect(&self, records: &[ProcessRecord]) -> String {
        if records.len() < 2 {
            return "Not enough processes to analyze the convoy effect.".to_string();
        }

        let long = records
            .iter()
            .filter(|p| p.burst_time > self.convoy_burst_threshold)
            .count();
        if long > 0 {
            format!(
                "Convoy effect detected: {long} long process(es) (BT > {}) can cause significant delays.",
                self.convoy_burst_threshold
            )
        } else {
            "No significant convoy effect detected.".to_string()
        }
    }
}

impl Default for Fcfs {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingStrategy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn run(&self, records: &mut [ProcessRecord]) -> StrategyRun {
        let order = Self::execution_order(records);
        let mut timeline = Vec::with_capacity(order.len());
        let mut clock = 0;

        for idx in order {
            let p = &mut records[idx];
            if p.arrival_time > clock {
                trace!(from = clock, to = p.arrival_time, "cpu idle");
                timeline.push(TimelineSegment::idle(clock, p.arrival_time));
                clock = p.arrival_time;
            }

            p.start_time = clock;
            let end = clock + p.burst_time;
            p.finish(end);
            trace!(pid = %p.id, start = clock, end, "dispatch");
            timeline.push(TimelineSegment::busy(p.id.as_str(), clock, end));
            clock = end;
        }

        StrategyRun {
            timeline,
            details: StrategyDetails::Fcfs {
                convoy_effect_info: self.analyze_convoy_effect(records),
            },
        }
    }

    fn description(&self) -> &'static str {
        "First-Come, First-Served"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timeline;

    fn records(specs: &[(&str, i64, i64)]) -> Vec<ProcessRecord> {
        specs
            .iter()
            .map(|&(id, at, bt)| ProcessRecord::new(id, at, bt))
            .collect()
    }

    #[test]
    fn test_fcfs_basic() {
        let mut procs = records(&[("A", 0, 5), ("B", 1, 3), ("C", 2, 8)]);
        let run = Fcfs::new().run(&mut procs);

        let completions: Vec<i64> = procs.iter().map(|p| p.completion_time).collect();
        let waits: Vec<i64> = procs.iter().map(|p| p.waiting_time).collect();
        assert_eq!(completions, vec![5, 8, 16]);
        assert_eq!(waits, vec![0, 4, 6]);
        assert_eq!(procs[2].start_time, 8);
        assert_eq!(procs[2].turnaround_time, 14);
        assert_eq!(run.timeline.len(), 3);
        assert!(timeline::is_contiguous(&run.timeline));
    }

    #[test]
    fn test_idle_gap() {
        let mut procs = records(&[("A", 3, 2), ("B", 10, 1)]);
        let run = Fcfs::new().run(&mut procs);

        assert_eq!(run.timeline.len(), 4);
        assert!(run.timeline[0].is_idle());
        assert_eq!((run.timeline[0].start, run.timeline[0].end), (0, 3));
        assert!(run.timeline[2].is_idle());
        assert_eq!((run.timeline[2].start, run.timeline[2].end), (5, 10));
        assert_eq!(procs[1].completion_time, 11);
        assert_eq!(procs[1].waiting_time, 0);
    }

    #[test]
    fn test_ties_keep_ingestion_order() {
        let mut procs = records(&[("Z", 0, 2), ("A", 0, 2), ("M", 0, 2)]);
        let run = Fcfs::new().run(&mut procs);

        let ids: Vec<&str> = run
            .timeline
            .iter()
            .filter_map(|s| s.process_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_records_keep_ingestion_order() {
        let mut procs = records(&[("late", 5, 1), ("early", 0, 1)]);
        Fcfs::new().run(&mut procs);
        assert_eq!(procs[0].id, "late");
        assert_eq!(procs[0].start_time, 5);
        assert_eq!(procs[1].start_time, 0);
    }

    #[test]
    fn test_invariants() {
        let mut procs = records(&[("P1", 2, 6), ("P2", 0, 2), ("P3", 3, 8), ("P4", 1, 3)]);
        let run = Fcfs::new().run(&mut procs);
        for p in &procs {
            assert_eq!(p.waiting_time + p.burst_time, p.turnaround_time);
            assert_eq!(p.turnaround_time, p.completion_time - p.arrival_time);
            assert_eq!(p.remaining_time, 0);
        }
        let makespan = procs.iter().map(|p| p.completion_time).max().unwrap();
        assert_eq!(timeline::total_duration(&run.timeline), makespan);
    }

    #[test]
    fn test_convoy_effect() {
        let mut procs = records(&[("P1", 0, 20), ("P2", 1, 1), ("P3", 2, 1)]);
        let run = Fcfs::new().run(&mut procs);
        let info = run.details.narrative();
        assert!(info.starts_with("Convoy effect detected: 1 long"));

        let mut procs = records(&[("P1", 0, 10), ("P2", 1, 1)]);
        let run = Fcfs::new().run(&mut procs);
        assert_eq!(run.details.narrative(), "No significant convoy effect detected.");

        let run = Fcfs::new().with_convoy_threshold(5).run(&mut procs);
        assert!(run.details.narrative().starts_with("Convoy effect detected"));
    }

    #[test]
    fn test_convoy_needs_two_processes() {
        let mut procs = records(&[("P1", 0, 30)]);
        let run = Fcfs::new().run(&mut procs);
        assert!(run.details.narrative().starts_with("Not enough processes"));
    }
}
