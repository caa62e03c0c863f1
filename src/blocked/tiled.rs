//! Tile enumeration and the blocked i-k-j kernel.

use std::ops::Range;

/// One cubic (or boundary-clamped) piece of the i/j/k iteration space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Rows of A and C (`i`)
    pub rows: Range<usize>,
    /// Columns of B and C (`j`)
    pub cols: Range<usize>,
    /// Reduction index (`k`): columns of A, rows of B
    pub depth: Range<usize>,
}

impl Tile {
    /// Edge lengths as `(rows, cols, depth)`.
    pub fn extent(&self) -> (usize, usize, usize) {
        (self.rows.len(), self.cols.len(), self.depth.len())
    }
}

/// Enumerate the tiles of an `n`×`n`×`n` product in block-row, block-column,
/// block-reduction order.
///
/// Every axis steps by `block_size` from 0 and is clamped to `n`, so when
/// `block_size` does not divide `n` the last tile along an axis is
/// `n % block_size` wide. `block_size >= n` yields a single tile.
///
/// # Panics
///
/// Panics if `block_size` is zero.
///
/// # Example
///
/// ```
/// use blockbench::blocked::tiles;
///
/// let extents: Vec<_> = tiles(5, 3).map(|t| t.extent()).collect();
/// assert_eq!(extents.len(), 8);
/// assert_eq!(extents[0], (3, 3, 3));
/// assert_eq!(extents[7], (2, 2, 2));
/// ```
pub fn tiles(n: usize, block_size: usize) -> impl Iterator<Item = Tile> {
    assert!(block_size > 0, "block size must be at least 1");

    let span = move |start: usize| start..(start + block_size).min(n);

    (0..n).step_by(block_size).flat_map(move |ii| {
        (0..n).step_by(block_size).flat_map(move |jj| {
            (0..n).step_by(block_size).map(move |kk| Tile {
                rows: span(ii),
                cols: span(jj),
                depth: span(kk),
            })
        })
    })
}

/// Blocked square matrix multiply: C += A * B.
///
/// Walks [`tiles`] and, inside each, runs the same i-k-j loop as
/// [`matmul_naive_ikj`](crate::matmul_naive_ikj) restricted to the tile's
/// ranges. The result matches the unblocked kernel up to floating-point
/// summation order.
///
/// # Arguments
///
/// * `a` - Matrix A (n × n), row-major
/// * `b` - Matrix B (n × n), row-major
/// * `c` - Matrix C (n × n), row-major, accumulated into
/// * `n` - Shared dimension
/// * `block_size` - Tile edge length, at least 1
///
/// # Panics
///
/// Panics if any slice is not `n * n` long or `block_size` is zero.
pub fn matmul_blocked(a: &[f64], b: &[f64], c: &mut [f64], n: usize, block_size: usize) {
    assert_eq!(a.len(), n * n, "A: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(b.len(), n * n, "B: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(c.len(), n * n, "C: expected {}x{}={} elements", n, n, n * n);

    for tile in tiles(n, block_size) {
        let Tile { rows, cols, depth } = tile;

        for i in rows {
            let c_row = &mut c[i * n + cols.start..i * n + cols.end];
            for k in depth.clone() {
                let a_ik = a[i * n + k];
                let b_row = &b[k * n + cols.start..k * n + cols.end];
                for (c_ij, &b_kj) in c_row.iter_mut().zip(b_row) {
                    *c_ij += a_ik * b_kj;
                }
            }
        }
    }
}
