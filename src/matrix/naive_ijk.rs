/// Naive square matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple loop. The innermost loop walks B down a
/// column (stride `n`), so nearly every access to B touches a new cache
/// line. Informally it runs about 4× slower than [`matmul_naive_ikj`] on
/// 512×512 inputs.
///
/// Kept as the "Standard" side of the loop-order experiment.
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
/// [`matmul_naive_ikj`]: super::naive_ikj::matmul_naive_ikj
pub fn matmul_naive_ijk(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    assert_eq!(a.len(), n * n, "A: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(b.len(), n * n, "B: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(c.len(), n * n, "C: expected {}x{}={} elements", n, n, n * n);

    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                c[i * n + j] += a[i * n + k] * b[k * n + j];
            }
        }
    }
}
