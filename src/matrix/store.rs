//! Square row-major matrices and their pseudo-random population.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Upper bound (inclusive) of [`pseudo_random`], matching a 31-bit `rand()`.
pub const RAND_MAX: u32 = 0x7fff_ffff;

/// A square n×n matrix of `f64`, row-major: `(row, col) -> row * n + col`.
///
/// The buffer never changes shape after creation. Operands are read-only
/// for the whole benchmark and results only ever accumulate.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    n: usize,
}

impl Matrix {
    /// Allocate an n×n matrix with every cell set to zero.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0` or `n * n` overflows. Allocation failure aborts
    /// the process.
    pub fn zeros(n: usize) -> Self {
        assert!(n > 0, "matrix size must be positive");
        let len = n.checked_mul(n).expect("matrix size overflows usize");
        Self {
            data: vec![0.0; len],
            n,
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != n * n` or `n == 0`.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Self {
        assert!(n > 0, "matrix size must be positive");
        assert_eq!(data.len(), n * n, "expected {}x{}={} elements", n, n, n * n);
        Self { data, n }
    }

    /// Dimension of the matrix.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    /// Row `i` as a slice of `n` cells.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Number of cells that are exactly `0.0`.
    pub fn zero_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == 0.0).count()
    }
}

/// Allocate a zeroed n×n matrix. Same as [`Matrix::zeros`].
pub fn create_matrix(n: usize) -> Matrix {
    Matrix::zeros(n)
}

/// The random stream every initialisation draws from.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform draw over `[0, RAND_MAX]`.
pub fn pseudo_random<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(0..=RAND_MAX)
}

fn dense_value<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    pseudo_random(rng) as f64 / 10.0
}

/// Fill every cell with `pseudo_random() / 10.0`.
pub fn init_dense<R: Rng + ?Sized>(m: &mut Matrix, rng: &mut R) {
    for cell in m.data.iter_mut() {
        *cell = dense_value(rng);
    }
}

/// Fill a sparse-patterned matrix.
///
/// Rows with index `> n / 2` draw a percentage in `0..100` per cell and
/// are zero when it falls below `sparse_factor`; surviving cells get a
/// dense value. Rows `<= n / 2` are always fully dense, so the upper rows
/// cost a full dot product each while the lower rows are mostly skipped.
///
/// The comparison is strict, so a cell is zeroed with probability exactly
/// `sparse_factor / 100` and a factor of 0 leaves the matrix dense. A `<=`
/// comparison would zero 81% of cells at the default factor of 80; keep
/// that in mind when comparing timings with C builds that use it.
///
/// # Panics
///
/// Panics if `sparse_factor > 100`.
pub fn init_sparse<R: Rng + ?Sized>(m: &mut Matrix, rng: &mut R, sparse_factor: u32) {
    assert!(sparse_factor <= 100, "sparse factor is a percentage, got {}", sparse_factor);

    let n = m.n;
    for (i, row) in m.data.chunks_exact_mut(n).enumerate() {
        for cell in row.iter_mut() {
            let zero = i > n / 2 && rng.random_range(0..100u32) < sparse_factor;
            *cell = if zero { 0.0 } else { dense_value(rng) };
        }
    }
}
