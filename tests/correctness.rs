use mm::harness::{self, Kernel, Workload};
use mm::matrix::{create_matrix, init_dense, init_sparse, seeded_rng};
use mm::{BenchConfig, Matrix, Profiler, Schedule};
use mm::{matmul_inner_mt, matmul_naive_ijk, matmul_outer_mt, matmul_sparse_mt};

fn assert_matrices_equal(expected: &Matrix, actual: &Matrix, name: &str) {
    assert_eq!(expected.n(), actual.n(), "{}: size mismatch", name);
    let (expected, actual) = (expected.as_slice(), actual.as_slice());
    for i in 0..expected.len() {
        let tolerance = 1e-12 * expected[i].abs().max(1.0);
        assert!(
            (expected[i] - actual[i]).abs() <= tolerance,
            "{}: mismatch at index {}: expected {}, got {}",
            name,
            i,
            expected[i],
            actual[i]
        );
    }
}

fn random_operands(n: usize, seed: u64) -> (Matrix, Matrix, Matrix) {
    let mut rng = seeded_rng(seed);
    let mut a = create_matrix(n);
    let mut sparse_a = create_matrix(n);
    let mut b = create_matrix(n);
    init_dense(&mut a, &mut rng);
    init_sparse(&mut sparse_a, &mut rng, 80);
    init_dense(&mut b, &mut rng);
    (a, sparse_a, b)
}

fn config(n: usize, threads: usize, schedule: Schedule) -> BenchConfig {
    BenchConfig {
        threads,
        ..BenchConfig::new(n, schedule)
    }
}

// ============================================================
// Kernels agree with the sequential product
// ============================================================

#[test]
fn test_all_kernels_match_reference() {
    for n in [1, 2, 3, 7, 16, 33] {
        for threads in [1, 2, 3, 4] {
            let (a, _, b) = random_operands(n, n as u64);

            let mut expected = create_matrix(n);
            matmul_naive_ijk(&a, &b, &mut expected);

            let mut profiler = Profiler::setup(threads);
            let name = format!("n={} threads={}", n, threads);

            let mut c = create_matrix(n);
            matmul_outer_mt(&mut c, &a, &b, threads, &mut profiler);
            assert_matrices_equal(&expected, &c, &format!("mult1 {}", name));

            let mut c = create_matrix(n);
            matmul_inner_mt(&mut c, &a, &b, threads, &mut profiler);
            assert_matrices_equal(&expected, &c, &format!("mult2 {}", name));

            for schedule in Schedule::ALL {
                let mut c = create_matrix(n);
                matmul_sparse_mt(&mut c, &a, &b, threads, schedule, &mut profiler);
                assert_matrices_equal(&expected, &c, &format!("sparsemult {} {}", schedule, name));
            }
        }
    }
}

#[test]
fn test_sparse_kernel_is_value_transparent() {
    let n = 40;
    let (_, sparse_a, b) = random_operands(n, 21);
    assert!(sparse_a.zero_count() > 0);

    let mut profiler = Profiler::setup(4);
    let mut dense = create_matrix(n);
    matmul_outer_mt(&mut dense, &sparse_a, &b, 4, &mut profiler);

    for schedule in Schedule::ALL {
        let mut sparse = create_matrix(n);
        matmul_sparse_mt(&mut sparse, &sparse_a, &b, 4, schedule, &mut profiler);
        assert_eq!(sparse, dense, "schedule {}", schedule);
    }
}

#[test]
fn test_results_reproducible_across_runs() {
    let n = 24;
    let (_, sparse_a, b) = random_operands(n, 5);
    let mut profiler = Profiler::setup(4);

    for schedule in [Schedule::Dynamic, Schedule::Guided] {
        let mut first = create_matrix(n);
        let mut second = create_matrix(n);
        matmul_sparse_mt(&mut first, &sparse_a, &b, 4, schedule, &mut profiler);
        matmul_sparse_mt(&mut second, &sparse_a, &b, 4, schedule, &mut profiler);
        assert_eq!(first, second, "schedule {}", schedule);
    }
}

// ============================================================
// Accumulation test (C += A*B, not C = A*B)
// ============================================================

#[test]
fn test_twice_adds_product_twice() {
    let n = 12;
    let (a, _, b) = random_operands(n, 3);
    let mut c0 = create_matrix(n);
    init_dense(&mut c0, &mut seeded_rng(4));

    let mut expected = c0.clone();
    matmul_naive_ijk(&a, &b, &mut expected);
    matmul_naive_ijk(&a, &b, &mut expected);

    let mut profiler = Profiler::setup(3);

    let mut c = c0.clone();
    matmul_outer_mt(&mut c, &a, &b, 3, &mut profiler);
    matmul_outer_mt(&mut c, &a, &b, 3, &mut profiler);
    assert_matrices_equal(&expected, &c, "mult1 twice");

    let mut c = c0.clone();
    matmul_inner_mt(&mut c, &a, &b, 3, &mut profiler);
    matmul_inner_mt(&mut c, &a, &b, 3, &mut profiler);
    assert_matrices_equal(&expected, &c, "mult2 twice");

    let mut c = c0.clone();
    matmul_sparse_mt(&mut c, &a, &b, 3, Schedule::Static, &mut profiler);
    matmul_sparse_mt(&mut c, &a, &b, 3, Schedule::Static, &mut profiler);
    assert_matrices_equal(&expected, &c, "sparsemult twice");

    assert_ne!(c, c0, "Should accumulate, not overwrite");
}

// ============================================================
// Boundary: 1×1
// ============================================================

#[test]
fn test_1x1_all_kernels() {
    let a = Matrix::from_vec(1, vec![3.0]);
    let b = Matrix::from_vec(1, vec![4.0]);
    let c0 = Matrix::from_vec(1, vec![5.0]);
    let mut profiler = Profiler::setup(2);

    let mut c = c0.clone();
    matmul_outer_mt(&mut c, &a, &b, 2, &mut profiler);
    assert_eq!(c.get(0, 0), 17.0);

    let mut c = c0.clone();
    matmul_inner_mt(&mut c, &a, &b, 2, &mut profiler);
    assert_eq!(c.get(0, 0), 17.0);

    for schedule in Schedule::ALL {
        let mut c = c0.clone();
        matmul_sparse_mt(&mut c, &a, &b, 2, schedule, &mut profiler);
        assert_eq!(c.get(0, 0), 17.0, "schedule {}", schedule);
    }
}

// ============================================================
// Profiling brackets
// ============================================================

#[test]
fn test_profile_spans_per_region() {
    let n = 6;
    let threads = 3;
    let (a, sparse_a, b) = random_operands(n, 8);
    let mut profiler = Profiler::setup(threads);
    let mut c = create_matrix(n);

    let report = matmul_outer_mt(&mut c, &a, &b, threads, &mut profiler);
    assert_eq!(report.total_regions(), threads as u64);

    let report = matmul_inner_mt(&mut c, &a, &b, threads, &mut profiler);
    assert_eq!(report.total_regions(), (n * threads) as u64);

    for schedule in Schedule::ALL {
        let report = matmul_sparse_mt(&mut c, &sparse_a, &b, threads, schedule, &mut profiler);
        assert_eq!(report.total_regions(), threads as u64, "schedule {}", schedule);
    }
}

// ============================================================
// End to end
// ============================================================

#[test]
fn test_end_to_end_output() {
    let config = config(4, 2, Schedule::Dynamic);
    let mut out = Vec::new();

    let timings = harness::run(&config, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 15);
    assert_eq!(timings.len(), 15);

    for (block, kernel) in Kernel::ALL.iter().enumerate() {
        for line in &lines[block * 5..(block + 1) * 5] {
            let (label, seconds) = line.split_once(": ").unwrap();
            assert_eq!(label, kernel.label());
            let (_, fraction) = seconds.split_once('.').unwrap();
            assert_eq!(fraction.len(), 6, "{}", line);
            assert!(seconds.parse::<f64>().unwrap() >= 0.0);
        }
    }
    assert!(timings.iter().all(|t| t.seconds >= 0.0));
}

#[test]
fn test_end_to_end_every_schedule_n1() {
    for schedule in Schedule::ALL {
        let config = config(1, 3, schedule);
        let timings = harness::run(&config, &mut std::io::sink()).unwrap();
        assert_eq!(timings.len(), 15, "schedule {}", schedule);
    }
}

#[test]
fn test_workload_replay_matches_reference() {
    let config = BenchConfig {
        iterations: 1,
        ..config(5, 2, Schedule::Guided)
    };
    harness::run(&config, &mut std::io::sink()).unwrap();

    // Replaying the same seed by hand: warm-up + 1 call per kernel.
    let mut workload = Workload::generate(5, config.sparse_factor, config.seed);
    let mut expected = workload.c_sparse.clone();
    matmul_naive_ijk(&workload.sparse_a, &workload.b, &mut expected);
    matmul_naive_ijk(&workload.sparse_a, &workload.b, &mut expected);

    let mut profiler = Profiler::setup(2);
    workload.multiply(Kernel::Sparse, &config, &mut profiler);
    workload.multiply(Kernel::Sparse, &config, &mut profiler);
    assert_matrices_equal(&expected, &workload.c_sparse, "replay");
}
