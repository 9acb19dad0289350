//! Aggregate simulation result.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::models::{ProcessRecord, RoundRobinMetrics, TimelineSegment};
use crate::scheduler::{mean, round2, Statistics, StrategyDetails, StrategyRun};

/// Finalized processes, timeline and summary metrics of one run.
///
/// `processes` keeps ingestion order, not execution order.
///
/// # Serialized shape
///
/// ```text
/// processes, gantt_chart, average_waiting_time, average_turnaround_time,
/// convoy_effect_info (FCFS) | algorithm_analysis (SJF, RR),
/// quantum (RR), statistics
/// ```
///
/// Round Robin runs add `quantum_used` and `normalized_turnaround_time`
/// to each process object.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    /// Finalized records in ingestion order.
    pub processes: Vec<ProcessRecord>,
    /// Busy and idle segments in chronological order.
    pub timeline: Vec<TimelineSegment>,
    /// Mean waiting time (2 decimals).
    pub average_waiting_time: f64,
    /// Mean turnaround time (2 decimals).
    pub average_turnaround_time: f64,
    /// Strategy-specific narrative and extension values.
    pub details: StrategyDetails,
    /// Per-metric summaries.
    pub statistics: Statistics,
}

impl AggregateResult {
    pub(crate) fn assemble(processes: Vec<ProcessRecord>, run: StrategyRun) -> Self {
        let waits: Vec<f64> = processes.iter().map(|p| p.waiting_time as f64).collect();
        let turnarounds: Vec<f64> = processes
            .iter()
            .map(|p| p.turnaround_time as f64)
            .collect();
        let statistics = Statistics::calculate_with_details(&processes, &run.details);

        Self {
            average_waiting_time: round2(mean(&waits)),
            average_turnaround_time: round2(mean(&turnarounds)),
            processes,
            timeline: run.timeline,
            details: run.details,
            statistics,
        }
    }

    /// Narrative text for this run.
    pub fn narrative(&self) -> String {
        self.details.narrative()
    }

    /// Quantum (Round Robin only).
    pub fn quantum(&self) -> Option<u32> {
        self.details.quantum()
    }

    /// Round Robin per-process values, keyed by process ID.
    pub fn round_robin_metrics(&self) -> Option<&BTreeMap<String, RoundRobinMetrics>> {
        self.details.round_robin_metrics()
    }

    /// Finds a finalized process by ID.
    pub fn process(&self, id: &str) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Process IDs in first-dispatch order.
    pub fn execution_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = Vec::with_capacity(self.processes.len());
        for id in self.timeline.iter().filter_map(|s| s.process_id.as_deref()) {
            if !order.contains(&id) {
                order.push(id);
            }
        }
        order
    }

    /// Latest completion time.
    pub fn makespan(&self) -> i64 {
        self.processes
            .iter()
            .map(|p| p.completion_time)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Serialize)]
struct ProcessView<'a> {
    #[serde(flatten)]
    record: &'a ProcessRecord,
    #[serde(flatten)]
    round_robin: Option<&'a RoundRobinMetrics>,
}

impl Serialize for AggregateResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let rr = self.round_robin_metrics();
        let processes: Vec<ProcessView<'_>> = self
            .processes
            .iter()
            .map(|record| ProcessView {
                record,
                round_robin: rr.and_then(|m| m.get(&record.id)),
            })
            .collect();

        let fields = if self.quantum().is_some() { 7 } else { 6 };
        let mut state = serializer.serialize_struct("AggregateResult", fields)?;
        state.serialize_field("processes", &processes)?;
        state.serialize_field("gantt_chart", &self.timeline)?;
        state.serialize_field("average_waiting_time", &self.average_waiting_time)?;
        state.serialize_field("average_turnaround_time", &self.average_turnaround_time)?;
        match &self.details {
            StrategyDetails::Fcfs { convoy_effect_info } => {
                state.serialize_field("convoy_effect_info", convoy_effect_info)?;
            }
            StrategyDetails::Sjf { algorithm_analysis } => {
                state.serialize_field("algorithm_analysis", algorithm_analysis)?;
            }
            StrategyDetails::RoundRobin { report, .. } => {
                state.serialize_field("algorithm_analysis", &report.to_string())?;
                state.serialize_field("quantum", &report.quantum)?;
            }
        }
        state.serialize_field("statistics", &self.statistics)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::{simulate, Strategy};
    use crate::models::ProcessSpec;

    fn specs() -> Vec<ProcessSpec> {
        vec![ProcessSpec::new("A", 0, 5), ProcessSpec::new("B", 1, 3)]
    }

    #[test]
    fn test_fcfs_json_shape() {
        let result = simulate(&Strategy::select("FCFS", None).unwrap(), &specs()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["processes"][0]["pid"], "A");
        assert_eq!(json["processes"][1]["completion_time"], 8);
        assert!(json["processes"][0].get("quantum_used").is_none());
        assert_eq!(json["gantt_chart"][0]["type"], "process");
        assert!(json["convoy_effect_info"].is_string());
        assert!(json.get("algorithm_analysis").is_none());
        assert!(json.get("quantum").is_none());
        assert_eq!(json["statistics"]["burst_time"]["max"], 5);
        assert!(json["statistics"]["burst_time"]["max"].is_i64());
    }

    #[test]
    fn test_sjf_json_shape() {
        let result = simulate(&Strategy::select("SJF", None).unwrap(), &specs()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert!(json["algorithm_analysis"].is_string());
        assert!(json.get("convoy_effect_info").is_none());
        assert_eq!(json["gantt_chart"][0]["pid"], "B");
        assert_eq!(json["gantt_chart"][0]["execution_order"], 1);
        assert_eq!(json["gantt_chart"][0]["declared_arrival_time"], 1);
    }

    #[test]
    fn test_round_robin_json_shape() {
        let result = simulate(&Strategy::select("RR", Some(2)).unwrap(), &specs()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["quantum"], 2);
        assert_eq!(json["processes"][0]["quantum_used"], 3);
        assert_eq!(json["processes"][1]["quantum_used"], 2);
        assert_eq!(json["processes"][0]["normalized_turnaround_time"], 1.6);
        assert_eq!(json["gantt_chart"][1]["quantum_number"], 1);
        assert_eq!(json["gantt_chart"][1]["remaining_time_after"], 1);
        assert!(json["statistics"]["quantum_used"].is_object());
        assert!(json["algorithm_analysis"]
            .as_str()
            .unwrap()
            .starts_with("Quantum: 2"));
    }

    #[test]
    fn test_accessors() {
        let result = simulate(&Strategy::select("RR", Some(2)).unwrap(), &specs()).unwrap();
        assert_eq!(result.makespan(), 8);
        assert_eq!(result.execution_order(), vec!["A", "B"]);
        assert_eq!(result.process("B").unwrap().turnaround_time, 6);
        assert!(result.process("Z").is_none());
        assert_eq!(result.round_robin_metrics().unwrap()["A"].quantum_used, 3);
    }
}
