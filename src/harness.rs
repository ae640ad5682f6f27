//! Benchmark driver.
//!
//! Builds every matrix once, then runs the three kernels back to back.
//! Each kernel gets one warm-up call followed by the configured number of
//! measured calls, each timed with a wall clock around the whole kernel.
//! Only measured calls are reported, one `<label>: <seconds>` line each.
//!
//! The result matrices are never reset between calls: every call
//! accumulates into what the previous one left.

use crate::config::BenchConfig;
use crate::matrix::{Matrix, create_matrix, init_dense, init_sparse, seeded_rng};
use crate::profile::Profiler;
use crate::threaded::{matmul_inner_mt, matmul_outer_mt, matmul_sparse_mt};
use std::fmt;
use std::io::{self, Write};
use std::time::Instant;
use tracing::{debug, info};

/// The three benchmarked strategies, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    Outer,
    Inner,
    Sparse,
}

impl Kernel {
    pub const ALL: [Kernel; 3] = [Kernel::Outer, Kernel::Inner, Kernel::Sparse];

    /// Label printed in front of each timing.
    pub fn label(self) -> &'static str {
        match self {
            Kernel::Outer => "mult1",
            Kernel::Inner => "mult2",
            Kernel::Sparse => "sparsemult",
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wall-clock time of one measured kernel call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub kernel: Kernel,
    pub seconds: f64,
}

/// Operands and per-kernel result matrices, all n×n.
#[derive(Debug, Clone)]
pub struct Workload {
    pub a: Matrix,
    pub b: Matrix,
    pub sparse_a: Matrix,
    pub c_outer: Matrix,
    pub c_inner: Matrix,
    pub c_sparse: Matrix,
}

impl Workload {
    /// Allocate and fill every matrix from one random stream, in the order
    /// A, B, C1, C2, C3, sparse A.
    pub fn generate(n: usize, sparse_factor: u32, seed: u64) -> Self {
        let mut rng = seeded_rng(seed);
        let mut dense = || {
            let mut m = create_matrix(n);
            init_dense(&mut m, &mut rng);
            m
        };
        let a = dense();
        let b = dense();
        let c_outer = dense();
        let c_inner = dense();
        let c_sparse = dense();

        let mut sparse_a = create_matrix(n);
        init_sparse(&mut sparse_a, &mut rng, sparse_factor);

        Self {
            a,
            b,
            sparse_a,
            c_outer,
            c_inner,
            c_sparse,
        }
    }

    /// One call of `kernel` on this workload.
    pub fn multiply(&mut self, kernel: Kernel, config: &BenchConfig, profiler: &mut Profiler) {
        let threads = config.threads;
        match kernel {
            Kernel::Outer => {
                matmul_outer_mt(&mut self.c_outer, &self.a, &self.b, threads, profiler);
            }
            Kernel::Inner => {
                matmul_inner_mt(&mut self.c_inner, &self.a, &self.b, threads, profiler);
            }
            Kernel::Sparse => {
                matmul_sparse_mt(
                    &mut self.c_sparse,
                    &self.sparse_a,
                    &self.b,
                    threads,
                    config.schedule,
                    profiler,
                );
            }
        }
    }
}

/// Run the whole benchmark and write one line per measured iteration to
/// `out`. Returns the same timings in order.
///
/// # Panics
///
/// Panics if `config.size == 0`.
pub fn run<W: Write>(config: &BenchConfig, out: &mut W) -> io::Result<Vec<Timing>> {
    assert!(config.size > 0, "matrix size must be positive");

    let mut profiler = Profiler::setup(num_cpus::get().max(config.threads));
    let mut workload = Workload::generate(config.size, config.sparse_factor, config.seed);
    info!(
        n = config.size,
        threads = config.threads,
        schedule = %config.schedule,
        sparse_zeros = workload.sparse_a.zero_count(),
        "matrices ready"
    );

    let mut timings = Vec::with_capacity(Kernel::ALL.len() * config.iterations);
    for kernel in Kernel::ALL {
        timings.extend(bench_kernel(kernel, &mut workload, config, &mut profiler, out)?);
    }
    out.flush()?;
    Ok(timings)
}

/// Warm-up plus `config.iterations` measured calls of one kernel.
pub fn bench_kernel<W: Write>(
    kernel: Kernel,
    workload: &mut Workload,
    config: &BenchConfig,
    profiler: &mut Profiler,
    out: &mut W,
) -> io::Result<Vec<Timing>> {
    let mut timings = Vec::with_capacity(config.iterations);
    for it in 0..=config.iterations {
        let start = Instant::now();
        workload.multiply(kernel, config, profiler);
        let seconds = start.elapsed().as_secs_f64();

        if it == 0 {
            debug!(%kernel, seconds, "warm-up discarded");
            continue;
        }
        writeln!(out, "{}: {:.6}", kernel, seconds)?;
        timings.push(Timing { kernel, seconds });
    }
    Ok(timings)
}
