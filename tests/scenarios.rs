//! End-to-end scheduling scenarios through the public API.

use u_cpusched::engine::{simulate, AggregateResult, Algorithm, Session, Strategy};
use u_cpusched::models::{timeline, ProcessSpec};
use u_cpusched::presets::Preset;
use u_cpusched::workload::WorkloadGenerator;
use u_cpusched::EngineError;

fn abc() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new("A", 0, 5),
        ProcessSpec::new("B", 1, 3),
        ProcessSpec::new("C", 2, 8),
    ]
}

fn run(name: &str, quantum: Option<i64>, specs: &[ProcessSpec]) -> AggregateResult {
    simulate(&Strategy::select(name, quantum).unwrap(), specs).unwrap()
}

#[test]
fn fcfs_worked_example() {
    let result = run("FCFS", None, &abc());

    let completions: Vec<i64> = result.processes.iter().map(|p| p.completion_time).collect();
    let waits: Vec<i64> = result.processes.iter().map(|p| p.waiting_time).collect();
    assert_eq!(completions, vec![5, 8, 16]);
    assert_eq!(waits, vec![0, 4, 6]);
    assert!((result.average_waiting_time - 3.33).abs() < 1e-9);
}

#[test]
fn sjf_worked_example() {
    let result = run("sjf", None, &abc());

    assert_eq!(result.execution_order(), vec!["B", "A", "C"]);
    for (id, completion, wait) in [("B", 3, 0), ("A", 8, 3), ("C", 16, 8)] {
        let p = result.process(id).unwrap();
        assert_eq!(p.completion_time, completion);
        assert_eq!(p.turnaround_time, completion);
        assert_eq!(p.waiting_time, wait);
    }
}

#[test]
fn round_robin_quantum_bounds() {
    let specs = vec![ProcessSpec::new("A", 0, 5), ProcessSpec::new("B", 1, 3)];
    let result = run("RR", Some(2), &specs);
    let metrics = result.round_robin_metrics().unwrap();

    for p in &result.processes {
        let used = i64::from(metrics[&p.id].quantum_used);
        assert!(used * 2 >= p.burst_time);
        assert!((used - 1) * 2 < p.burst_time);
        assert_eq!(timeline::busy_time(&result.timeline, &p.id), p.burst_time);
    }
    assert_eq!(timeline::total_duration(&result.timeline), result.makespan());
}

#[test]
fn waiting_plus_burst_is_turnaround_for_fcfs_and_rr() {
    let specs = WorkloadGenerator::new(12)
        .with_max_arrival(30)
        .with_burst_range(1, 9)
        .with_seed(11)
        .generate();

    for (name, quantum) in [("FCFS", None), ("RR", Some(1)), ("RR", Some(3)), ("RR", Some(20))] {
        let result = run(name, quantum, &specs);
        for p in &result.processes {
            assert_eq!(p.waiting_time + p.burst_time, p.turnaround_time, "{name}");
            assert_eq!(p.turnaround_time, p.completion_time - p.arrival_time, "{name}");
            assert_eq!(p.remaining_time, 0);
            assert!(p.start_time >= p.arrival_time);
        }
        assert!(timeline::is_contiguous(&result.timeline), "{name}");
        assert_eq!(timeline::total_duration(&result.timeline), result.makespan());
    }
}

#[test]
fn every_timeline_covers_all_bursts() {
    let specs = WorkloadGenerator::new(9).with_seed(5).generate();
    for algorithm in Algorithm::ALL {
        let result = run(algorithm.code(), Some(2), &specs);
        for p in &result.processes {
            assert_eq!(timeline::busy_time(&result.timeline, &p.id), p.burst_time);
        }
        assert!(timeline::is_contiguous(&result.timeline));
    }
}

#[test]
fn statistics_use_population_formula() {
    let result = run("FCFS", None, &abc());
    let burst = result.statistics.get("burst_time").unwrap();
    assert!((burst.mean - 5.33).abs() < 1e-9);
    assert!((burst.std_dev - 2.05).abs() < 1e-9);
}

#[test]
fn session_reset_reproduces_identical_results() {
    let mut session = Session::new();
    session.select_algorithm("RR", Some(3)).unwrap();
    session.load_preset(Preset::FcfsVsSjf).unwrap();
    let first = serde_json::to_string(session.run().unwrap()).unwrap();

    session.reset();
    for spec in Preset::FcfsVsSjf.processes() {
        session
            .ingest(spec.id, spec.arrival_time, spec.burst_time)
            .unwrap();
    }
    let second = serde_json::to_string(session.run().unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_session_reports_error() {
    let mut session = Session::new();
    assert_eq!(session.run().unwrap_err(), EngineError::EmptyProcessSet);
    let state = session.current_state();
    assert_eq!(state.process_count, 0);
    assert!(state.processes.is_empty());
}
