//! Per-thread profiling of parallel regions.
//!
//! A [`Profiler`] is created once per process, sized to the hardware
//! thread count, and passed by reference into every thread of a team. Each
//! thread brackets its work with [`Profiler::start`] and
//! [`ProfileSpan::end`]; the orchestrating thread calls [`Profiler::dump`]
//! once the region has joined.
//!
//! Samples land in one mutex per thread slot, so team members never
//! contend with each other. `dump` takes `&mut self`: it cannot run while
//! any span is still open.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Accumulated measurements of one team thread since the last dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadProfile {
    /// Number of closed spans.
    pub regions: u64,
    /// Total time spent inside spans.
    pub busy: Duration,
}

/// Summary returned by [`Profiler::dump`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReport {
    pub label: &'static str,
    pub threads: Vec<ThreadProfile>,
}

impl ProfileReport {
    pub fn total_regions(&self) -> u64 {
        self.threads.iter().map(|t| t.regions).sum()
    }

    pub fn max_busy(&self) -> Duration {
        self.threads.iter().map(|t| t.busy).max().unwrap_or_default()
    }

    /// Mean busy time over the threads that recorded at least one span.
    pub fn mean_busy(&self) -> Duration {
        let active: Vec<_> = self.threads.iter().filter(|t| t.regions > 0).collect();
        if active.is_empty() {
            return Duration::ZERO;
        }
        active.iter().map(|t| t.busy).sum::<Duration>() / active.len() as u32
    }

    /// Slowest thread over the average one; 1.0 is perfect balance.
    pub fn imbalance(&self) -> f64 {
        let mean = self.mean_busy().as_secs_f64();
        if mean == 0.0 {
            1.0
        } else {
            self.max_busy().as_secs_f64() / mean
        }
    }
}

#[derive(Debug)]
pub struct Profiler {
    slots: Vec<Mutex<ThreadProfile>>,
}

impl Profiler {
    /// One-time setup, one slot per hardware thread.
    ///
    /// # Panics
    ///
    /// Panics if `nprocs == 0`.
    pub fn setup(nprocs: usize) -> Self {
        assert!(nprocs > 0, "profiler needs at least one thread slot");
        debug!(nprocs, "profiler ready");
        Self {
            slots: (0..nprocs).map(|_| Mutex::new(ThreadProfile::default())).collect(),
        }
    }

    /// Number of thread slots; the largest team this profiler can follow.
    pub fn nprocs(&self) -> usize {
        self.slots.len()
    }

    /// Open a span for team member `tid`. The span records itself when it
    /// is ended or dropped.
    ///
    /// # Panics
    ///
    /// Panics if `tid >= self.nprocs()`.
    pub fn start(&self, tid: usize) -> ProfileSpan<'_> {
        assert!(tid < self.slots.len(), "thread {} has no profiling slot", tid);
        ProfileSpan {
            slot: &self.slots[tid],
            started: Instant::now(),
        }
    }

    /// Summarise everything recorded since the previous dump, log it, and
    /// reset every slot.
    pub fn dump(&mut self, label: &'static str) -> ProfileReport {
        let threads: Vec<ThreadProfile> = self
            .slots
            .iter_mut()
            .map(|slot| {
                let profile = slot.get_mut().unwrap_or_else(PoisonError::into_inner);
                std::mem::take(profile)
            })
            .collect();

        for (tid, t) in threads.iter().enumerate().filter(|(_, t)| t.regions > 0) {
            debug!(label, tid, regions = t.regions, busy_s = t.busy.as_secs_f64(), "thread profile");
        }

        let report = ProfileReport { label, threads };
        info!(
            label,
            regions = report.total_regions(),
            max_busy_s = report.max_busy().as_secs_f64(),
            mean_busy_s = report.mean_busy().as_secs_f64(),
            imbalance = report.imbalance(),
            "profile dump"
        );
        report
    }
}

/// An open measurement for one thread inside one parallel region.
///
/// Borrowing the profiler ties the span to the region: it is closed before
/// the team joins and before any dump.
#[must_use = "a span measures until it is ended or dropped"]
#[derive(Debug)]
pub struct ProfileSpan<'p> {
    slot: &'p Mutex<ThreadProfile>,
    started: Instant,
}

impl ProfileSpan<'_> {
    pub fn end(self) {}
}

impl Drop for ProfileSpan<'_> {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        let mut profile = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        profile.regions += 1;
        profile.busy += elapsed;
    }
}
