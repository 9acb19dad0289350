//! Shortest-Job-First (non-preemptive, offline).
//!
//! # Algorithm
//!
//! 1. Order processes by `(burst_time, id)`; arrival time is ignored.
//! 2. Run them back-to-back from t=0, as if all were ready at t=0.
//!
//! Because every process counts as ready at t=0, turnaround is defined as
//! `TT = CT` (not `CT - AT`), and `WT = TT - BT`. The declared arrival is
//! kept on the timeline for display only.
//!
//! # Reference
//! Smith (1956), SPT is optimal for mean flow time on a single machine.

use super::{SchedulingStrategy, StrategyDetails, StrategyRun};
use crate::models::{ProcessRecord, SegmentAnnotation, TimelineSegment};

/// Offline, non-preemptive SJF.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl Sjf {
    /// Indices into `records` in execution order.
    pub fn execution_order(records: &[ProcessRecord]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..records.len()).collect();
        indices.sort_by(|&a, &b| {
            records[a]
                .burst_time
                .cmp(&records[b].burst_time)
                .then_with(|| records[a].id.cmp(&records[b].id))
        });
        indices
    }

    /// Describes how SJF reordered the processes.
    ///
    /// Lists the execution order, contrasts it with the natural (ID) order
    /// when they differ, and names every process that overtook earlier
    /// arrivals with longer bursts.
    fn analyze(records: &[ProcessRecord], order: &[usize]) -> String {
        if records.len() < 2 {
            return "Not enough processes to analyze SJF characteristics.".to_string();
        }

        let mut analysis = vec!["SJF reordering:".to_string()];

        let by_burst: Vec<String> = order
            .iter()
            .map(|&i| format!("({}, BT={})", records[i].id, records[i].burst_time))
            .collect();
        analysis.push(format!("Processes by BT: [{}]", by_burst.join(", ")));

        let mut natural: Vec<&str> = records.iter().map(|p| p.id.as_str()).collect();
        natural.sort_unstable();
        let executed: Vec<&str> = order.iter().map(|&i| records[i].id.as_str()).collect();
        if natural != executed {
            analysis.push(format!("Natural order: [{}]", natural.join(", ")));
            analysis.push(format!("SJF order: [{}]", executed.join(", ")));
        }

        for &i in order {
            let p = &records[i];
            if p.arrival_time == 0 {
                continue;
            }
            let overtaken: Vec<&str> = order
                .iter()
                .map(|&j| &records[j])
                .filter(|q| q.arrival_time < p.arrival_time && q.burst_time > p.burst_time)
                .map(|q| q.id.as_str())
                .collect();
            if !overtaken.is_empty() {
                analysis.push(format!(
                    "{} (BT={}) ran before [{}] (arrived first)",
                    p.id,
                    p.burst_time,
                    overtaken.join(", ")
                ));
            }
        }

        analysis.push("Minimizes average waiting time".to_string());
        analysis.push("May cause starvation of long processes".to_string());
        analysis.join(" | ")
    }
}

impl SchedulingStrategy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn run(&self, records: &mut [ProcessRecord]) -> StrategyRun {
        let order = Self::execution_order(records);
        let mut timeline = Vec::with_capacity(order.len());
        let mut clock = 0;

        for (rank, &idx) in order.iter().enumerate() {
            let p = &mut records[idx];
            p.start_time = clock;
            let end = clock + p.burst_time;
            p.finish_from_zero(end);
            timeline.push(
                TimelineSegment::busy(p.id.as_str(), clock, end).with_annotation(
                    SegmentAnnotation::Sjf {
                        execution_order: rank + 1,
                        declared_arrival_time: p.arrival_time,
                    },
                ),
            );
            clock = end;
        }

        StrategyRun {
            timeline,
            details: StrategyDetails::Sjf {
                algorithm_analysis: Self::analyze(records, &order),
            },
        }
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}
