//! Run configuration.
//!
//! [`BenchConfig`] holds everything a benchmark run needs. Its scheduling
//! policy is not optional and has no default: a run without one is
//! rejected at startup with [`ConfigError::MissingSchedule`].

use crate::schedule::Schedule;
use thiserror::Error;

/// Measured iterations per kernel; one extra warm-up iteration precedes them.
pub const NITERATIONS: usize = 5;

/// Percentage of lower-half cells zeroed in the sparse operand.
pub const SPARSE_FACTOR: u32 = 80;

/// Seed of the initialisation stream.
pub const DEFAULT_SEED: u64 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "no scheduling policy selected for the sparse kernel; pass --schedule <static|dynamic|guided> or set MM_SCHEDULE"
    )]
    MissingSchedule,

    #[error("thread team must have at least one thread")]
    NoThreads,

    #[error("at least one measured iteration is required")]
    NoIterations,

    #[error("sparse factor must be a percentage between 0 and 100, got {0}")]
    SparseFactorOutOfRange(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Matrix dimension n.
    pub size: usize,
    /// Row distribution of the sparse kernel.
    pub schedule: Schedule,
    /// Thread team size for every parallel region.
    pub threads: usize,
    /// Measured iterations per kernel, warm-up excluded.
    pub iterations: usize,
    pub sparse_factor: u32,
    pub seed: u64,
}

impl BenchConfig {
    /// Configuration with the benchmark's fixed defaults and one thread per
    /// hardware thread.
    pub fn new(size: usize, schedule: Schedule) -> Self {
        Self {
            size,
            schedule,
            threads: num_cpus::get().max(1),
            iterations: NITERATIONS,
            sparse_factor: SPARSE_FACTOR,
            seed: DEFAULT_SEED,
        }
    }

    /// Reject values no run can use. The matrix size is an invariant, not a
    /// configuration error, and is asserted where matrices are created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        if self.sparse_factor > 100 {
            return Err(ConfigError::SparseFactorOutOfRange(self.sparse_factor));
        }
        Ok(())
    }
}
