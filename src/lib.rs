//! CPU process-scheduling simulator.
//!
//! Computes deterministic execution timelines and per-process timing
//! metrics for classic uniprocessor scheduling policies. Intended for
//! teaching: every run is pure computation over an in-memory process set.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessSpec`, `ProcessRecord`,
//!   `TimelineSegment`
//! - **`scheduler`**: The `SchedulingStrategy` trait, the FCFS, SJF and
//!   Round-Robin strategies, and the statistics calculator
//! - **`engine`**: Algorithm selection, the pure `simulate` entry point,
//!   `AggregateResult` and the caller-owned `Session`
//! - **`validation`**: Process descriptor checks (empty IDs, negative
//!   arrivals, non-positive bursts, duplicate IDs)
//! - **`presets`** / **`workload`**: Demonstration workloads
//!
//! # Example
//!
//! ```
//! use u_cpusched::engine::Session;
//!
//! let mut session = Session::new();
//! session.ingest("A", 0, 5).unwrap();
//! session.ingest("B", 1, 3).unwrap();
//! let result = session.run().unwrap();
//! assert_eq!(result.processes[1].completion_time, 8);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod presets;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
