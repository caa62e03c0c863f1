//! Square matrix storage and the unblocked reference kernels.
//!
//! A [`Matrix`] is one contiguous row-major buffer plus its dimension.
//! The kernels in [`naive_ijk`] and [`naive_ikj`] work on plain slices so
//! they can be benchmarked without going through the wrapper.

pub mod naive_ijk;
pub mod naive_ikj;

use std::ops::{Index, IndexMut};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{BenchError, Result};

/// Smallest and largest seeded input value (inclusive).
pub const SEED_RANGE: (u32, u32) = (1, 10);

/// Dense N×N matrix of `f64`, stored row-major in a single buffer.
///
/// Element `(r, c)` lives at offset `r * n + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Allocate an N×N matrix filled with zeros.
    ///
    /// The buffer is reserved fallibly, so an out-of-memory condition comes
    /// back as [`BenchError::Allocation`] instead of aborting the process.
    ///
    /// ```
    /// use blockbench::Matrix;
    ///
    /// let m = Matrix::zeros(3).unwrap();
    /// assert_eq!(m.dim(), 3);
    /// assert!(m.as_slice().iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(n: usize) -> Result<Self> {
        let len = element_count(n)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|source| BenchError::Allocation {
                what: "matrix buffer",
                elements: len,
                source,
            })?;
        data.resize(len, 0.0);
        tracing::trace!(n, bytes = len * size_of::<f64>(), "allocated matrix");
        Ok(Self { n, data })
    }

    /// Wrap an existing row-major buffer of exactly `n * n` elements.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Result<Self> {
        let len = element_count(n)?;
        if data.len() != len {
            return Err(BenchError::InvalidDimension {
                n,
                reason: "data length is not n * n",
            });
        }
        Ok(Self { n, data })
    }

    /// Matrix dimension N.
    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Row `r` as a contiguous slice.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.n..(r + 1) * self.n]
    }

    /// Reset every element to zero (done before each timed run).
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        assert!(r < self.n && c < self.n, "index ({r}, {c}) out of bounds for {n}x{n}", n = self.n);
        &self.data[r * self.n + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        assert!(r < self.n && c < self.n, "index ({r}, {c}) out of bounds for {n}x{n}", n = self.n);
        &mut self.data[r * self.n + c]
    }
}

fn element_count(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(BenchError::InvalidDimension {
            n,
            reason: "dimension must be at least 1",
        });
    }
    n.checked_mul(n).ok_or(BenchError::InvalidDimension {
        n,
        reason: "n * n overflows",
    })
}

/// Fill A and B with deterministic values in [`SEED_RANGE`].
///
/// Draws alternate between A and B element by element, so the pair is a
/// pure function of `seed`. Running twice with one seed gives bit-identical
/// inputs.
///
/// ```
/// use blockbench::{Matrix, seed_inputs};
///
/// let (mut a1, mut b1) = (Matrix::zeros(8).unwrap(), Matrix::zeros(8).unwrap());
/// let (mut a2, mut b2) = (Matrix::zeros(8).unwrap(), Matrix::zeros(8).unwrap());
/// seed_inputs(&mut a1, &mut b1, 42);
/// seed_inputs(&mut a2, &mut b2, 42);
/// assert_eq!(a1, a2);
/// assert_eq!(b1, b2);
/// ```
pub fn seed_inputs(a: &mut Matrix, b: &mut Matrix, seed: u64) {
    assert_eq!(a.dim(), b.dim(), "seeded inputs must share one dimension");

    let mut rng = StdRng::seed_from_u64(seed);
    let (lo, hi) = SEED_RANGE;
    for (a_ij, b_ij) in a.data.iter_mut().zip(b.data.iter_mut()) {
        *a_ij = rng.gen_range(lo..=hi) as f64;
        *b_ij = rng.gen_range(lo..=hi) as f64;
    }
    tracing::debug!(n = a.dim(), seed, "seeded input matrices");
}

/// Check that A, B and C can take part in one square multiplication.
///
/// Returns the shared dimension.
pub fn check_square(a: &Matrix, b: &Matrix, c: &Matrix) -> Result<usize> {
    if a.dim() != b.dim() || c.dim() != a.dim() {
        return Err(BenchError::DimensionMismatch {
            a_cols: a.dim(),
            b_rows: b.dim(),
            c_dim: c.dim(),
        });
    }
    Ok(a.dim())
}
