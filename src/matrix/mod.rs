//! Matrix storage and population.
//!
//! Every matrix in the benchmark is square, row-major and made of `f64`.
//! Dense and sparse-patterned matrices share one physical layout; they only
//! differ in how [`init_dense`] and [`init_sparse`] fill them.

pub mod naive_ijk;
pub mod store;

pub use store::{Matrix, RAND_MAX, create_matrix, init_dense, init_sparse, pseudo_random, seeded_rng};
