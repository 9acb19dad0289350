//! Built-in demonstration workloads.
//!
//! Each preset highlights one behavior of the policies and records the
//! execution order FCFS and SJF are expected to produce.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::Algorithm;
use crate::error::EngineError;
use crate::models::ProcessSpec;

/// A named demonstration workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Short jobs queued behind a long one: SJF clearly reduces waiting.
    FcfsVsSjf,
    /// One 20-tick job ahead of three 1-tick jobs.
    ConvoyEffect,
    /// Reference table where FCFS and SJF happen to agree.
    Reference,
}

impl Preset {
    /// All presets.
    pub const ALL: [Preset; 3] = [Preset::FcfsVsSjf, Preset::ConvoyEffect, Preset::Reference];

    /// Stable key ("fcfs_vs_sjf", ...).
    pub fn key(&self) -> &'static str {
        match self {
            Self::FcfsVsSjf => "fcfs_vs_sjf",
            Self::ConvoyEffect => "convoy_effect",
            Self::Reference => "reference",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FcfsVsSjf => "FCFS vs SJF",
            Self::ConvoyEffect => "Convoy Effect",
            Self::Reference => "Reference Values",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FcfsVsSjf => "Processes that show how SJF lowers the average waiting time",
            Self::ConvoyEffect => "A long process delays every short process behind it under FCFS",
            Self::Reference => "Reference table with mixed arrivals",
        }
    }

    /// Process descriptors, in ingestion order.
    pub fn processes(&self) -> Vec<ProcessSpec> {
        let table: &[(&str, i64, i64)] = match self {
            Self::FcfsVsSjf => &[("P1", 0, 8), ("P2", 1, 2), ("P3", 2, 1), ("P4", 3, 4)],
            Self::ConvoyEffect => &[("P1", 0, 20), ("P2", 1, 1), ("P3", 2, 1), ("P4", 3, 1)],
            Self::Reference => &[("P1", 2, 6), ("P2", 0, 2), ("P3", 3, 8), ("P4", 1, 3)],
        };
        table
            .iter()
            .map(|&(id, arrival, burst)| ProcessSpec::new(id, arrival, burst))
            .collect()
    }

    /// Expected execution order. `None` for Round Robin, whose order
    /// depends on the quantum.
    pub fn expected_order(&self, algorithm: Algorithm) -> Option<&'static [&'static str]> {
        match (self, algorithm) {
            (_, Algorithm::RoundRobin) => None,
            (Self::FcfsVsSjf, Algorithm::Fcfs) => Some(&["P1", "P2", "P3", "P4"]),
            (Self::FcfsVsSjf, Algorithm::Sjf) => Some(&["P3", "P2", "P4", "P1"]),
            (Self::ConvoyEffect, Algorithm::Fcfs) => Some(&["P1", "P2", "P3", "P4"]),
            (Self::ConvoyEffect, Algorithm::Sjf) => Some(&["P2", "P3", "P4", "P1"]),
            (Self::Reference, _) => Some(&["P2", "P4", "P1", "P3"]),
        }
    }
}

impl FromStr for Preset {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownPreset { name: s.to_string() })
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
