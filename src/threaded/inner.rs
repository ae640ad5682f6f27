//! Inner-loop-parallel dense multiply.

use super::team::{parallel_region_with, split_static};
use crate::matrix::Matrix;
use crate::profile::{ProfileReport, Profiler};
use tracing::debug;

/// C += A * B with the column loop of each row split across a new team.
///
/// Rows are walked in order on the calling thread. For every row a fresh
/// thread team is spawned, the row's columns are cut into `threads`
/// contiguous blocks, and the team joins before the next row starts: the
/// region is built and torn down `n` times. Each member is profiled over
/// its block of each row; the profiler is dumped once after the last row.
///
/// # Panics
///
/// Panics if the matrices differ in size, if `threads == 0`, or if
/// `threads` exceeds the profiler's slot count.
pub fn matmul_inner_mt(
    c: &mut Matrix,
    a: &Matrix,
    b: &Matrix,
    threads: usize,
    profiler: &mut Profiler,
) -> ProfileReport {
    let n = c.n();
    assert_eq!(a.n(), n, "A: expected {}x{}", n, n);
    assert_eq!(b.n(), n, "B: expected {}x{}", n, n);
    assert!(threads > 0, "thread team must have at least one thread");
    assert!(threads <= profiler.nprocs(), "team of {} exceeds {} profiling slots", threads, profiler.nprocs());

    debug!(n, threads, regions = n, "mult2 regions");
    let b = b.as_slice();

    {
        let profiler = &*profiler;
        for (i, c_row) in c.as_mut_slice().chunks_exact_mut(n).enumerate() {
            let a_row = a.row(i);
            let blocks = split_static(c_row, n, 1, threads);
            parallel_region_with(blocks, |tid, (cols, c_cols)| {
                let span = profiler.start(tid);
                for (j, c_ij) in cols.zip(c_cols.iter_mut()) {
                    for k in 0..n {
                        *c_ij += a_row[k] * b[k * n + j];
                    }
                }
                span.end();
            });
        }
    }

    profiler.dump("mult2")
}
