//! Loop-scheduling policies for the sparse kernel.
//!
//! A [`Schedule`] decides how the rows of a multiply are handed to the
//! threads of a team. [`RowDispenser`] is the per-call state that actually
//! hands them out: every row in `0..len` is dispensed exactly once,
//! whichever policy is active.

use clap::ValueEnum;
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(any(
    all(feature = "schedule-static", feature = "schedule-dynamic"),
    all(feature = "schedule-static", feature = "schedule-guided"),
    all(feature = "schedule-dynamic", feature = "schedule-guided"),
))]
compile_error!("at most one of the schedule-static, schedule-dynamic and schedule-guided features may be enabled");

/// How loop iterations (rows) are assigned to threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Schedule {
    /// Equal contiguous blocks decided up front, one per thread.
    Static,
    /// One row at a time from a shared counter, to whichever thread asks.
    Dynamic,
    /// Chunks of `ceil(remaining / threads)` rows, shrinking as work drains.
    Guided,
}

impl Schedule {
    pub const ALL: [Schedule; 3] = [Schedule::Static, Schedule::Dynamic, Schedule::Guided];

    /// The policy pinned by a `schedule-*` Cargo feature, if any.
    pub const fn built_in() -> Option<Schedule> {
        if cfg!(feature = "schedule-static") {
            Some(Schedule::Static)
        } else if cfg!(feature = "schedule-dynamic") {
            Some(Schedule::Dynamic)
        } else if cfg!(feature = "schedule-guided") {
            Some(Schedule::Guided)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Schedule::Static => "static",
            Schedule::Dynamic => "dynamic",
            Schedule::Guided => "guided",
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block `index` of `len` items split into `parts` near-equal contiguous
/// blocks. The first `len % parts` blocks hold one extra item.
///
/// # Panics
///
/// Panics if `parts == 0` or `index >= parts`.
pub fn static_range(len: usize, parts: usize, index: usize) -> Range<usize> {
    assert!(parts > 0, "cannot split into zero parts");
    assert!(index < parts, "block {} out of {}", index, parts);

    let base = len / parts;
    let extra = len % parts;
    let start = index * base + index.min(extra);
    let size = base + usize::from(index < extra);
    start..start + size
}

/// Hands out the rows of one multiply to a team of `threads` threads.
///
/// Create one per kernel call and share it by reference with the team.
#[derive(Debug)]
pub struct RowDispenser {
    schedule: Schedule,
    len: usize,
    threads: usize,
    next: AtomicUsize,
}

impl RowDispenser {
    /// # Panics
    ///
    /// Panics if `threads == 0`.
    pub fn new(schedule: Schedule, len: usize, threads: usize) -> Self {
        assert!(threads > 0, "thread team must have at least one thread");
        Self {
            schedule,
            len,
            threads,
            next: AtomicUsize::new(0),
        }
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Run `body` on every chunk of rows thread `tid` is given, in the
    /// order they are handed out. Returns when no rows are left for `tid`.
    pub fn for_each_chunk<F>(&self, tid: usize, mut body: F)
    where
        F: FnMut(Range<usize>),
    {
        match self.schedule {
            Schedule::Static => {
                let rows = static_range(self.len, self.threads, tid);
                if !rows.is_empty() {
                    body(rows);
                }
            }
            Schedule::Dynamic => loop {
                let row = self.next.fetch_add(1, Ordering::Relaxed);
                if row >= self.len {
                    break;
                }
                body(row..row + 1);
            },
            Schedule::Guided => {
                while let Some(rows) = self.grab_guided() {
                    body(rows);
                }
            }
        }
    }

    fn grab_guided(&self) -> Option<Range<usize>> {
        let mut start = self.next.load(Ordering::Relaxed);
        loop {
            if start >= self.len {
                return None;
            }
            let chunk = (self.len - start).div_ceil(self.threads).max(1);
            match self.next.compare_exchange_weak(
                start,
                start + chunk,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Some(start..start + chunk),
                Err(current) => start = current,
            }
        }
    }
}
