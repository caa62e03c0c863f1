/// Cache-friendly square matrix multiplication using i-k-j loop order.
///
/// Swapping the j and k loops makes the innermost loop walk both B's row
/// `k` and C's row `i` with stride 1. This is the unblocked reference that
/// every blocked configuration is checked and timed against.
///
/// # Arguments
///
/// * `a` - Matrix A (n × n), row-major
/// * `b` - Matrix B (n × n), row-major
/// * `c` - Matrix C (n × n), row-major, accumulated into (C += A * B)
/// * `n` - Shared dimension
///
/// # Panics
///
/// Panics if any slice is not `n * n` long.
///
/// # Example
///
/// ```
/// use blockbench::matmul_naive_ikj;
///
/// let a = vec![1.0, 2.0,
///              3.0, 4.0];
/// let b = vec![5.0, 6.0,
///              7.0, 8.0];
/// let mut c = vec![0.0; 4];
///
/// matmul_naive_ikj(&a, &b, &mut c, 2);
///
/// assert_eq!(c, vec![19.0, 22.0,
///                    43.0, 50.0]);
/// ```
pub fn matmul_naive_ikj(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    assert_eq!(a.len(), n * n, "A: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(b.len(), n * n, "B: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(c.len(), n * n, "C: expected {}x{}={} elements", n, n, n * n);

    for i in 0..n {
        let c_row = &mut c[i * n..(i + 1) * n];
        for k in 0..n {
            let a_ik = a[i * n + k];
            let b_row = &b[k * n..(k + 1) * n];
            for (c_ij, &b_kj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ik * b_kj;
            }
        }
    }
}
