//! i-j-k versus i-k-j on the same inputs.

use tracing::{info, warn};

use super::clock::{Clock, time_ms};
use super::metrics::{Configuration, Measurement, traffic_bytes};
use super::report::{ListingHeader, RecordSink};
use crate::error::{BenchError, Result};
use crate::matrix::naive_ijk::matmul_naive_ijk;
use crate::matrix::naive_ikj::matmul_naive_ikj;
use crate::matrix::{Matrix, check_square, seed_inputs};

/// File the loop-order listing is written to by default.
pub const DEFAULT_OUTPUT: &str = "mxm_results.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct LoopOrderConfig {
    pub n: usize,
    pub seed: u64,
}

impl Default for LoopOrderConfig {
    fn default() -> Self {
        Self {
            n: super::sweep::DEFAULT_DIM,
            seed: super::sweep::DEFAULT_SEED,
        }
    }
}

pub fn loop_order_header(n: usize) -> ListingHeader {
    ListingHeader {
        title: "Matrix Multiplication Performance Analysis",
        dim: Some(n),
        columns: "Version, Time (msec), Bandwidth (MB/s)",
        console_columns: "Version, Time (msec), Bandwidth (MB/s)",
    }
}

/// Owns the two inputs and one accumulator per loop order.
pub struct LoopOrder {
    a: Matrix,
    b: Matrix,
    c_ijk: Matrix,
    c_ikj: Matrix,
}

impl LoopOrder {
    /// Allocate A, B and both accumulators and seed the inputs.
    pub fn new(config: &LoopOrderConfig) -> Result<Self> {
        if config.n == 0 {
            return Err(BenchError::InvalidDimension {
                n: config.n,
                reason: "dimension must be at least 1",
            });
        }
        let mut a = Matrix::zeros(config.n)?;
        let mut b = Matrix::zeros(config.n)?;
        seed_inputs(&mut a, &mut b, config.seed);
        Self::with_inputs(a, b)
    }

    /// Compare loop orders on caller-provided inputs.
    pub fn with_inputs(a: Matrix, b: Matrix) -> Result<Self> {
        let c_ijk = Matrix::zeros(a.dim())?;
        let n = check_square(&a, &b, &c_ijk)?;
        let c_ikj = Matrix::zeros(n)?;
        Ok(Self { a, b, c_ijk, c_ikj })
    }

    pub fn dim(&self) -> usize {
        self.a.dim()
    }

    /// Products left by the last [`run`](Self::run), i-j-k first.
    pub fn products(&self) -> (&Matrix, &Matrix) {
        (&self.c_ijk, &self.c_ikj)
    }

    /// Time one i-j-k and one i-k-j multiplication of the inputs.
    ///
    /// Both products are compared afterwards; a disagreement is logged, not
    /// returned, since the timings are still meaningful.
    pub fn run<C, S>(&mut self, clock: &mut C, sink: &mut S) -> Result<Vec<Measurement>>
    where
        C: Clock,
        S: RecordSink<Measurement>,
    {
        let n = self.dim();
        let traffic = traffic_bytes(n);
        let mut records = Vec::with_capacity(2);

        self.c_ijk.clear();
        self.c_ikj.clear();
        let (a, b) = (self.a.as_slice(), self.b.as_slice());

        let c = self.c_ijk.as_mut_slice();
        let ms = time_ms(clock, || matmul_naive_ijk(a, b, c, n));
        let record = Measurement::new(Configuration::NaiveIjk, ms, traffic, None);
        sink.record(&record)?;
        records.push(record);

        let c = self.c_ikj.as_mut_slice();
        let ms = time_ms(clock, || matmul_naive_ikj(a, b, c, n));
        let record = Measurement::new(Configuration::NaiveIkj, ms, traffic, None);
        sink.record(&record)?;
        records.push(record);

        let max_diff = self
            .c_ijk
            .as_slice()
            .iter()
            .zip(self.c_ikj.as_slice())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0f64, f64::max);
        if max_diff > 1e-6 {
            warn!(max_diff, "i-j-k and i-k-j products disagree");
        }
        info!(n, "loop-order comparison finished");

        Ok(records)
    }
}

/// Allocate, seed, compare and release in one call.
pub fn run_loop_order<C, S>(
    config: &LoopOrderConfig,
    clock: &mut C,
    sink: &mut S,
) -> Result<Vec<Measurement>>
where
    C: Clock,
    S: RecordSink<Measurement>,
{
    LoopOrder::new(config)?.run(clock, sink)
}
