//! Random workload generation.
//!
//! Produces reproducible process sets for demonstrations: the same seed
//! always yields the same descriptors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::ProcessSpec;

/// Seeded generator of uniformly random process sets.
///
/// IDs are `P1..Pn`; arrivals are drawn from `0..=max_arrival` and bursts
/// from `min_burst..=max_burst`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    /// Number of processes.
    pub count: usize,
    /// Latest possible arrival time.
    pub max_arrival: i64,
    /// Shortest burst (at least 1).
    pub min_burst: i64,
    /// Longest burst.
    pub max_burst: i64,
    /// RNG seed.
    pub seed: u64,
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range (inclusive).
    pub fn with_burst_range(mut self, min_burst: i64, max_burst: i64) -> Self {
        self.min_burst = min_burst;
        self.max_burst = max_burst;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generates the workload from the configured seed.
    pub fn generate(&self) -> Vec<ProcessSpec> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.generate_with(&mut rng)
    }

    /// Generates the workload from an external RNG.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Vec<ProcessSpec> {
        let max_arrival = self.max_arrival.max(0);
        let min_burst = self.min_burst.max(1);
        let max_burst = self.max_burst.max(min_burst);

        (1..=self.count)
            .map(|n| {
                ProcessSpec::new(
                    format!("P{n}"),
                    rng.random_range(0..=max_arrival),
                    rng.random_range(min_burst..=max_burst),
                )
            })
            .collect()
    }
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            seed: 0,
        }
    }
}
