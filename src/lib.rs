//! Parallel matrix multiply, three ways.
//!
//! A micro-benchmark comparing how a thread team can share the work of
//! C += A * B on square `f64` matrices:
//!
//! - **mult1**: one parallel region, rows split statically across the team
//! - **mult2**: a fresh parallel region for every row, columns split across
//!   the team, to expose the cost of rebuilding the team n times
//! - **sparsemult**: one parallel region, rows handed out by a static,
//!   dynamic or guided [`Schedule`], zero cells of A skipped
//!
//! The sparse operand only has zeros in its lower half, so a static split
//! leaves some threads with cheap rows and others with expensive ones. How
//! each schedule copes with that is the point of the benchmark.
//!
//! ## Usage
//!
//! ```
//! use mm::matrix::{create_matrix, init_dense, init_sparse, seeded_rng};
//! use mm::{Profiler, Schedule, matmul_sparse_mt};
//!
//! let n = 32;
//! let mut rng = seeded_rng(1);
//! let mut a = create_matrix(n);
//! let mut b = create_matrix(n);
//! init_sparse(&mut a, &mut rng, 80);
//! init_dense(&mut b, &mut rng);
//!
//! let mut c = create_matrix(n);
//! let mut profiler = Profiler::setup(4);
//! let report = matmul_sparse_mt(&mut c, &a, &b, 4, Schedule::Guided, &mut profiler);
//! assert_eq!(report.threads.len(), 4);
//! ```
//!
//! Every kernel accumulates into C and never clears it, so calling one
//! twice on the same C adds the product twice.

pub mod cli;
pub mod config;
pub mod harness;
pub mod matrix;
pub mod profile;
pub mod schedule;
pub mod threaded;

pub use config::{BenchConfig, ConfigError};
pub use harness::{Kernel, Timing, Workload};
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::{Matrix, create_matrix};
pub use profile::{ProfileReport, Profiler};
pub use schedule::Schedule;
pub use threaded::{matmul_inner_mt, matmul_outer_mt, matmul_sparse_mt};
