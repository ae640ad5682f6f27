//! Sparsity-aware multiply under a configurable loop schedule.

use super::team::{SharedRows, parallel_region};
use crate::matrix::Matrix;
use crate::profile::{ProfileReport, Profiler};
use crate::schedule::{RowDispenser, Schedule};
use tracing::debug;

/// C += A * B, skipping every term whose A cell is exactly zero.
///
/// One parallel region covers the whole multiply. Rows of C are handed to
/// the team by `schedule`; each row goes to exactly one member, which is
/// what keeps writes to C disjoint. The zero test runs for every (i, j, k),
/// only the multiply-add is skipped, so the cost of a row tracks the
/// density of the matching row of A.
///
/// # Panics
///
/// Panics if the matrices differ in size, if `threads == 0`, or if
/// `threads` exceeds the profiler's slot count.
pub fn matmul_sparse_mt(
    c: &mut Matrix,
    a: &Matrix,
    b: &Matrix,
    threads: usize,
    schedule: Schedule,
    profiler: &mut Profiler,
) -> ProfileReport {
    let n = c.n();
    assert_eq!(a.n(), n, "A: expected {}x{}", n, n);
    assert_eq!(b.n(), n, "B: expected {}x{}", n, n);
    assert!(threads > 0, "thread team must have at least one thread");
    assert!(threads <= profiler.nprocs(), "team of {} exceeds {} profiling slots", threads, profiler.nprocs());

    let (a, b) = (a.as_slice(), b.as_slice());
    let dispenser = RowDispenser::new(schedule, n, threads);
    debug!(n, threads, schedule = %dispenser.schedule(), "sparsemult region");
    let c_rows = SharedRows::new(c.as_mut_slice(), n);

    {
        let profiler = &*profiler;
        parallel_region(threads, |tid| {
            let span = profiler.start(tid);
            dispenser.for_each_chunk(tid, |rows| {
                for i in rows {
                    // SAFETY: the dispenser hands row `i` to this member only.
                    let c_row = unsafe { c_rows.row_mut(i) };
                    let a_row = &a[i * n..(i + 1) * n];
                    for (j, c_ij) in c_row.iter_mut().enumerate() {
                        for k in 0..n {
                            if a_row[k] != 0.0 {
                                *c_ij += a_row[k] * b[k * n + j];
                            }
                        }
                    }
                }
            });
            span.end();
        });
    }

    profiler.dump("sparsemult")
}
