//! Fork-join thread teams.
//!
//! A parallel region spawns a fresh team with [`std::thread::scope`], the
//! calling thread joining in as member 0, and returns once every member
//! has finished. Nothing outlives the region: a new call builds a new team.

use crate::schedule::static_range;
use std::marker::PhantomData;
use std::ops::Range;
use std::thread;

/// Run `body(tid)` on a team of `threads` threads and wait for all of them.
///
/// # Panics
///
/// Panics if `threads == 0`, or re-raises a panic from any member.
pub fn parallel_region<F>(threads: usize, body: F)
where
    F: Fn(usize) + Sync,
{
    assert!(threads > 0, "thread team must have at least one thread");
    let body = &body;
    thread::scope(|s| {
        for tid in 1..threads {
            s.spawn(move || body(tid));
        }
        body(0);
    });
}

/// Like [`parallel_region`], but member `tid` takes ownership of
/// `parts[tid]`. The team has `parts.len()` members; no parts, no team.
pub fn parallel_region_with<T, F>(parts: Vec<T>, body: F)
where
    T: Send,
    F: Fn(usize, T) + Sync,
{
    let body = &body;
    let mut parts = parts.into_iter().enumerate();
    let Some((_, first)) = parts.next() else {
        return;
    };
    thread::scope(|s| {
        for (tid, part) in parts {
            s.spawn(move || body(tid, part));
        }
        body(0, first);
    });
}

/// Split `data`, made of `len` units of `width` elements each, into
/// `parts` contiguous blocks following [`static_range`].
///
/// Returns, per block, the unit range it covers and the matching slice.
///
/// # Panics
///
/// Panics if `data.len() != len * width` or `parts == 0`.
pub fn split_static(
    data: &mut [f64],
    len: usize,
    width: usize,
    parts: usize,
) -> Vec<(Range<usize>, &mut [f64])> {
    assert_eq!(data.len(), len * width, "expected {} units of {}", len, width);

    let mut blocks = Vec::with_capacity(parts);
    let mut rest = data;
    for index in 0..parts {
        let units = static_range(len, parts, index);
        let (block, tail) = std::mem::take(&mut rest).split_at_mut(units.len() * width);
        blocks.push((units, block));
        rest = tail;
    }
    blocks
}

/// Rows of a row-major buffer that team members claim one at a time.
///
/// Used when rows are handed out at run time and cannot be split up front.
pub struct SharedRows<'a> {
    ptr: *mut f64,
    width: usize,
    rows: usize,
    _buffer: PhantomData<&'a mut [f64]>,
}

// SAFETY: the buffer is borrowed mutably for 'a and only reached through
// `row_mut`, whose callers guarantee no row is borrowed twice at once.
unsafe impl Send for SharedRows<'_> {}
unsafe impl Sync for SharedRows<'_> {}

impl<'a> SharedRows<'a> {
    pub fn new(data: &'a mut [f64], width: usize) -> Self {
        assert!(width > 0, "row width must be positive");
        assert_eq!(data.len() % width, 0, "buffer is not a whole number of rows");
        Self {
            ptr: data.as_mut_ptr(),
            width,
            rows: data.len() / width,
            _buffer: PhantomData,
        }
    }

    /// Mutable view of row `i`.
    ///
    /// # Safety
    ///
    /// No other reference to row `i` may be alive while the returned slice
    /// is. A scheduler that dispenses each row once satisfies this.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn row_mut(&self, i: usize) -> &mut [f64] {
        assert!(i < self.rows, "row {} out of {}", i, self.rows);
        // SAFETY: in bounds by the assert above; exclusivity is the caller's.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.add(i * self.width), self.width) }
    }
}
