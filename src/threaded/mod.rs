//! Multi-threaded multiply kernels.
//!
//! All three compute C += A * B on square row-major matrices with the
//! classical i-j-k loop and never clear C first. They differ only in how
//! the work is spread over a thread team:
//!
//! - `outer`: one region, rows split statically (`mult1`)
//! - `inner`: one region per row, columns split statically (`mult2`)
//! - `sparse`: one region, rows dispensed by a [`Schedule`](crate::schedule::Schedule),
//!   zero cells of A skipped (`sparsemult`)
//!
//! For a given (i, j) the k loop always runs in ascending order on a
//! single thread, so every kernel reproduces the sequential product bit
//! for bit.

pub mod inner;
pub mod outer;
pub mod sparse;
pub mod team;

pub use inner::matmul_inner_mt;
pub use outer::matmul_outer_mt;
pub use sparse::matmul_sparse_mt;
