use super::Matrix;

/// Sequential matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple loop the parallel kernels distribute, run
/// on the calling thread only. The innermost loop walks B with stride `n`
/// (column-wise), exactly like the benchmarked kernels do.
///
/// Use this as a correctness baseline, not for performance.
///
/// # Arguments
///
/// * `a` - Matrix A (n × n), row-major
/// * `b` - Matrix B (n × n), row-major
/// * `c` - Matrix C (n × n), row-major, accumulated into (C += A * B)
///
/// # Panics
///
/// Panics if the three matrices do not share the same dimension.
pub fn matmul_naive_ijk(a: &Matrix, b: &Matrix, c: &mut Matrix) {
    let n = c.n();
    assert_eq!(a.n(), n, "A: expected {}x{}", n, n);
    assert_eq!(b.n(), n, "B: expected {}x{}", n, n);

    let (a, b, c) = (a.as_slice(), b.as_slice(), c.as_mut_slice());
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                c[i * n + j] += a[i * n + k] * b[k * n + j];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_2x2_product() {
        let a = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::from_vec(2, vec![5.0, 6.0, 7.0, 8.0]);
        let mut c = Matrix::zeros(2);

        matmul_naive_ijk(&a, &b, &mut c);

        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_accumulates_into_c() {
        let a = Matrix::from_vec(2, vec![1.0, 0.0, 0.0, 1.0]);
        let b = Matrix::from_vec(2, vec![2.0, 3.0, 4.0, 5.0]);
        let mut c = Matrix::from_vec(2, vec![10.0; 4]);

        matmul_naive_ijk(&a, &b, &mut c);

        assert_eq!(c.as_slice(), &[12.0, 13.0, 14.0, 15.0]);
    }

    #[test]
    #[should_panic(expected = "B: expected")]
    fn test_mismatched_sizes_panic() {
        let a = Matrix::zeros(2);
        let b = Matrix::zeros(3);
        let mut c = Matrix::zeros(2);
        matmul_naive_ijk(&a, &b, &mut c);
    }
}
