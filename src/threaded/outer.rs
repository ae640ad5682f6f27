//! Outer-loop-parallel dense multiply.

use super::team::{parallel_region_with, split_static};
use crate::matrix::Matrix;
use crate::profile::{ProfileReport, Profiler};
use tracing::debug;

/// C += A * B with the row loop split across one thread team.
///
/// A single parallel region covers the whole multiply. Rows are cut into
/// `threads` contiguous blocks up front and each member owns its block
/// until the region joins. Every member is profiled over its whole block;
/// the profiler is dumped once afterwards.
///
/// # Panics
///
/// Panics if the matrices differ in size, if `threads == 0`, or if
/// `threads` exceeds the profiler's slot count.
pub fn matmul_outer_mt(
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

    debug!(n, threads, "mult1 region");
    let (a, b) = (a.as_slice(), b.as_slice());
    let blocks = split_static(c.as_mut_slice(), n, n, threads);

    {
        let profiler = &*profiler;
        parallel_region_with(blocks, |tid, (rows, c_block)| {
            let span = profiler.start(tid);
            for (i, c_row) in rows.zip(c_block.chunks_exact_mut(n)) {
                let a_row = &a[i * n..(i + 1) * n];
                for (j, c_ij) in c_row.iter_mut().enumerate() {
                    for k in 0..n {
                        *c_ij += a_row[k] * b[k * n + j];
                    }
                }
            }
            span.end();
        });
    }

    profiler.dump("mult1")
}
