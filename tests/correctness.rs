use blockbench::blocked::{Tile, tiles};
use blockbench::matrix::check_square;
use blockbench::{
    BenchError, Matrix, matmul_blocked, matmul_naive_ijk, matmul_naive_ikj, seed_inputs,
};

fn assert_matrices_equal(expected: &[f64], actual: &[f64], name: &str) {
    assert_eq!(expected.len(), actual.len(), "{}: length mismatch", name);
    for i in 0..expected.len() {
        assert!(
            (expected[i] - actual[i]).abs() < 1e-8,
            "{}: mismatch at index {}: expected {}, got {}",
            name,
            i,
            expected[i],
            actual[i]
        );
    }
}

fn patterned(n: usize, modulus: usize) -> Vec<f64> {
    (0..n * n).map(|i| (i % modulus) as f64).collect()
}

// ============================================================
// Reference kernels
// ============================================================

#[test]
fn test_2x2_multiply() {
    let a = vec![1.0, 2.0, 3.0, 4.0];
    let b = vec![5.0, 6.0, 7.0, 8.0];

    let mut c_ijk = vec![0.0; 4];
    let mut c_ikj = vec![0.0; 4];

    matmul_naive_ijk(&a, &b, &mut c_ijk, 2);
    matmul_naive_ikj(&a, &b, &mut c_ikj, 2);

    assert_eq!(c_ikj, vec![19.0, 22.0, 43.0, 50.0]);
    assert_matrices_equal(&c_ijk, &c_ikj, "2x2");
}

#[test]
fn test_loop_orders_agree() {
    for size in [1, 3, 5, 7, 11, 16, 17, 33] {
        let a = patterned(size, 10);
        let b = patterned(size, 7);

        let mut c_ijk = vec![0.0; size * size];
        let mut c_ikj = vec![0.0; size * size];

        matmul_naive_ijk(&a, &b, &mut c_ijk, size);
        matmul_naive_ikj(&a, &b, &mut c_ikj, size);

        assert_matrices_equal(&c_ijk, &c_ikj, &format!("loop_order_size_{}", size));
    }
}

#[test]
#[should_panic(expected = "B: expected")]
fn test_mismatched_slice_panics() {
    let a = vec![1.0; 9];
    let b = vec![1.0; 4];
    let mut c = vec![0.0; 9];
    matmul_naive_ikj(&a, &b, &mut c, 3);
}

// ============================================================
// Blocked kernel
// ============================================================

#[test]
fn test_hand_computed_4x4_block_3() {
    // 3 does not divide 4, so every axis has a 3-wide and a 1-wide tile.
    let a = vec![
        1.0, 2.0, 3.0, 4.0, //
        5.0, 6.0, 7.0, 8.0, //
        9.0, 10.0, 11.0, 12.0, //
        13.0, 14.0, 15.0, 16.0,
    ];
    let b = vec![
        1.0, 0.0, 0.0, 1.0, //
        0.0, 1.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, 1.0, //
        1.0, 1.0, 1.0, 0.0,
    ];
    let expected = vec![
        5.0, 6.0, 7.0, 6.0, //
        13.0, 14.0, 15.0, 18.0, //
        21.0, 22.0, 23.0, 30.0, //
        29.0, 30.0, 31.0, 42.0,
    ];

    let mut c_blocked = vec![0.0; 16];
    let mut c_reference = vec![0.0; 16];
    matmul_blocked(&a, &b, &mut c_blocked, 4, 3);
    matmul_naive_ikj(&a, &b, &mut c_reference, 4);

    assert_eq!(c_blocked, expected);
    assert_eq!(c_reference, expected);
}

#[test]
fn test_tile_boundaries_match_reference() {
    let block_sizes = [1, 2, 3, 4, 5, 7, 8, 16];

    for size in [1, 2, 7, 8, 9, 15, 16, 17, 31, 33] {
        let a = patterned(size, 10);
        let b = patterned(size, 9);

        let mut c_reference = vec![0.0; size * size];
        matmul_naive_ikj(&a, &b, &mut c_reference, size);

        for &block_size in block_sizes.iter().filter(|&&s| s <= size) {
            let mut c_blocked = vec![0.0; size * size];
            matmul_blocked(&a, &b, &mut c_blocked, size, block_size);
            assert_matrices_equal(
                &c_reference,
                &c_blocked,
                &format!("blocked_size_{}_block_{}", size, block_size),
            );
        }
    }
}

#[test]
fn test_degenerate_block_equals_dimension() {
    let size = 24;
    let mut a = Matrix::zeros(size).unwrap();
    let mut b = Matrix::zeros(size).unwrap();
    seed_inputs(&mut a, &mut b, 7);

    let mut c_reference = vec![0.0; size * size];
    let mut c_blocked = vec![0.0; size * size];
    matmul_naive_ikj(a.as_slice(), b.as_slice(), &mut c_reference, size);
    matmul_blocked(a.as_slice(), b.as_slice(), &mut c_blocked, size, size);

    // One tile, same summation order: bit-identical.
    assert_eq!(c_reference, c_blocked);
}

#[test]
fn test_block_larger_than_dimension() {
    let size = 10;
    let a = patterned(size, 10);
    let b = patterned(size, 3);

    let mut c_reference = vec![0.0; size * size];
    let mut c_blocked = vec![0.0; size * size];
    matmul_naive_ikj(&a, &b, &mut c_reference, size);
    matmul_blocked(&a, &b, &mut c_blocked, size, 64);

    assert_eq!(c_reference, c_blocked);
}

#[test]
fn test_accumulation() {
    let size = 20;
    let a = patterned(size, 10);
    let b = patterned(size, 10);

    // Start with non-zero C
    let mut c_reference = vec![5.0; size * size];
    let mut c_blocked = vec![5.0; size * size];

    matmul_naive_ikj(&a, &b, &mut c_reference, size);
    matmul_blocked(&a, &b, &mut c_blocked, size, 6);

    assert_matrices_equal(&c_reference, &c_blocked, "accumulation");
    assert!(c_blocked[1] > 5.0, "Should accumulate, not overwrite");
}

// ============================================================
// Tile enumeration
// ============================================================

#[test]
fn test_tiles_even_split_are_cubic() {
    let all: Vec<Tile> = tiles(16, 4).collect();

    assert_eq!(all.len(), 4 * 4 * 4);
    assert!(all.iter().all(|t| t.extent() == (4, 4, 4)));
}

#[test]
fn test_tiles_clamp_last_tile() {
    let (n, s) = (10, 4);
    let all: Vec<Tile> = tiles(n, s).collect();

    assert_eq!(all.len(), 27);
    for tile in &all {
        for range in [&tile.rows, &tile.cols, &tile.depth] {
            assert!(range.end <= n, "tile {:?} runs past {}", tile, n);
            let expected = if range.start == 8 { n % s } else { s };
            assert_eq!(range.len(), expected, "tile {:?}", tile);
        }
    }
}

#[test]
fn test_tiles_order_and_coverage() {
    let all: Vec<Tile> = tiles(5, 2).collect();

    // Reduction index varies fastest, then column, then row.
    assert_eq!(all[0], Tile { rows: 0..2, cols: 0..2, depth: 0..2 });
    assert_eq!(all[1], Tile { rows: 0..2, cols: 0..2, depth: 2..4 });
    assert_eq!(all[2], Tile { rows: 0..2, cols: 0..2, depth: 4..5 });
    assert_eq!(all[3], Tile { rows: 0..2, cols: 2..4, depth: 0..2 });

    // Every (i, j, k) triple is visited exactly once.
    let mut seen = vec![0u32; 5 * 5 * 5];
    for tile in &all {
        for i in tile.rows.clone() {
            for j in tile.cols.clone() {
                for k in tile.depth.clone() {
                    seen[(i * 5 + j) * 5 + k] += 1;
                }
            }
        }
    }
    assert!(seen.iter().all(|&count| count == 1));
}

#[test]
fn test_single_tile_when_block_reaches_dimension() {
    let all: Vec<Tile> = tiles(6, 6).collect();
    assert_eq!(all, vec![Tile { rows: 0..6, cols: 0..6, depth: 0..6 }]);
}

#[test]
#[should_panic(expected = "block size must be at least 1")]
fn test_zero_block_size_panics() {
    let _ = tiles(4, 0);
}

// ============================================================
// Matrix allocation and seeding
// ============================================================

#[test]
fn test_zeros_and_indexing() {
    let mut m = Matrix::zeros(3).unwrap();
    assert_eq!(m.as_slice().len(), 9);

    m[(1, 2)] = 4.5;
    assert_eq!(m.as_slice()[5], 4.5);
    assert_eq!(m.row(1), &[0.0, 0.0, 4.5]);

    m.clear();
    assert!(m.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn test_zero_dimension_rejected() {
    assert!(matches!(Matrix::zeros(0), Err(BenchError::InvalidDimension { n: 0, .. })));
}

#[test]
fn test_from_vec_checks_length() {
    assert!(Matrix::from_vec(2, vec![1.0; 4]).is_ok());
    assert!(matches!(
        Matrix::from_vec(2, vec![1.0; 5]),
        Err(BenchError::InvalidDimension { n: 2, .. })
    ));
}

#[test]
fn test_huge_allocation_fails_gracefully() {
    // n * n fits in usize but the byte count does not fit in memory.
    let n = 1usize << (usize::BITS / 2 - 1);
    match Matrix::zeros(n) {
        Err(BenchError::Allocation { .. }) => {}
        other => panic!("expected allocation failure, got {:?}", other.map(|m| m.dim())),
    }
}

#[test]
fn test_seeding_is_deterministic_and_in_range() {
    let n = 32;
    let (mut a1, mut b1) = (Matrix::zeros(n).unwrap(), Matrix::zeros(n).unwrap());
    let (mut a2, mut b2) = (Matrix::zeros(n).unwrap(), Matrix::zeros(n).unwrap());
    seed_inputs(&mut a1, &mut b1, 42);
    seed_inputs(&mut a2, &mut b2, 42);

    let bits = |m: &Matrix| m.as_slice().iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a1), bits(&a2));
    assert_eq!(bits(&b1), bits(&b2));

    for &x in a1.as_slice().iter().chain(b1.as_slice()) {
        assert!((1.0..=10.0).contains(&x) && x.fract() == 0.0, "unexpected seed value {}", x);
    }
    assert_ne!(a1, b1);

    let (mut a3, mut b3) = (Matrix::zeros(n).unwrap(), Matrix::zeros(n).unwrap());
    seed_inputs(&mut a3, &mut b3, 43);
    assert_ne!(a1, a3);
}

#[test]
fn test_check_square() {
    let a = Matrix::zeros(4).unwrap();
    let b = Matrix::zeros(4).unwrap();
    let c = Matrix::zeros(4).unwrap();
    let odd = Matrix::zeros(3).unwrap();

    assert_eq!(check_square(&a, &b, &c).unwrap(), 4);
    assert!(matches!(
        check_square(&a, &odd, &c),
        Err(BenchError::DimensionMismatch { a_cols: 4, b_rows: 3, c_dim: 4 })
    ));
    assert!(matches!(
        check_square(&a, &b, &odd),
        Err(BenchError::DimensionMismatch { c_dim: 3, .. })
    ));
}
