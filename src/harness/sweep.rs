//! Block-size sweep over the blocked multiplier.
//!
//! A sweep seeds A and B once, then for every block size clears C, times
//! one multiplication and emits a [`Measurement`]. After the list it times
//! the unblocked reference one more time as an explicit "no blocking" line.

use tracing::{debug, info};

use super::clock::{Clock, time_ms};
use super::metrics::{Configuration, Measurement, speedup, traffic_bytes};
use super::report::{ListingHeader, RecordSink};
use crate::blocked::matmul_blocked;
use crate::error::{BenchError, Result};
use crate::matrix::naive_ikj::matmul_naive_ikj;
use crate::matrix::{Matrix, check_square, seed_inputs};

/// Matrix dimension used when none is given.
pub const DEFAULT_DIM: usize = 512;

/// Tile edges swept when none are given.
pub const DEFAULT_BLOCK_SIZES: [usize; 6] = [8, 16, 32, 64, 128, 256];

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// File the sweep listing is written to by default.
pub const DEFAULT_OUTPUT: &str = "mxm_bloc_results.txt";

/// What the "Speedup vs Standard" column is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaselinePolicy {
    /// Time of the first swept configuration, replaced by the configuration
    /// whose block size equals N
    #[default]
    FirstSwept,
    /// Time of one unblocked reference run made before the sweep starts
    Unblocked,
}

/// Parameters of one sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub n: usize,
    pub block_sizes: Vec<usize>,
    pub seed: u64,
    pub baseline: BaselinePolicy,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_DIM,
            block_sizes: DEFAULT_BLOCK_SIZES.to_vec(),
            seed: DEFAULT_SEED,
            baseline: BaselinePolicy::default(),
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(BenchError::InvalidDimension {
                n: self.n,
                reason: "dimension must be at least 1",
            });
        }
        if self.block_sizes.is_empty() {
            return Err(BenchError::EmptyBlockSizes);
        }
        if let Some(&zero) = self.block_sizes.iter().find(|&&s| s == 0) {
            return Err(BenchError::InvalidBlockSize(zero));
        }
        Ok(())
    }
}

/// Listing header for a sweep over N×N matrices.
pub fn sweep_header(n: usize) -> ListingHeader {
    ListingHeader {
        title: "Block Matrix Multiplication Performance Analysis",
        dim: Some(n),
        columns: "Block Size, Time (msec), Bandwidth (MB/s), Speedup vs Standard",
        console_columns: "Block Size, Time (msec), Bandwidth (MB/s), Speedup",
    }
}

/// Owns the three matrices and the baseline for one sweep.
pub struct BlockSweep<C: Clock> {
    config: SweepConfig,
    clock: C,
    a: Matrix,
    b: Matrix,
    c: Matrix,
    traffic: u64,
    baseline_ms: Option<f64>,
}

impl<C: Clock> BlockSweep<C> {
    /// Validate `config`, allocate A, B and C and seed the inputs.
    pub fn new(config: SweepConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let mut a = Matrix::zeros(config.n)?;
        let mut b = Matrix::zeros(config.n)?;
        seed_inputs(&mut a, &mut b, config.seed);
        Self::with_inputs(config, clock, a, b)
    }

    /// Sweep over caller-provided inputs. `config.seed` is ignored.
    pub fn with_inputs(config: SweepConfig, clock: C, a: Matrix, b: Matrix) -> Result<Self> {
        config.validate()?;
        let c = Matrix::zeros(config.n)?;
        let n = check_square(&a, &b, &c)?;
        info!(n, block_sizes = ?config.block_sizes, "block sweep ready");

        Ok(Self {
            traffic: traffic_bytes(n),
            config,
            clock,
            a,
            b,
            c,
            baseline_ms: None,
        })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn inputs(&self) -> (&Matrix, &Matrix) {
        (&self.a, &self.b)
    }

    /// C as left by the most recent timed run.
    pub fn product(&self) -> &Matrix {
        &self.c
    }

    /// Baseline captured by the last [`run`](Self::run), if any.
    pub fn baseline_ms(&self) -> Option<f64> {
        self.baseline_ms
    }

    /// Run every configuration in order, then the trailing reference run.
    ///
    /// Each record goes to `sink` as soon as it exists and is also returned.
    pub fn run<S: RecordSink<Measurement>>(&mut self, sink: &mut S) -> Result<Vec<Measurement>> {
        let n = self.config.n;
        let block_sizes = self.config.block_sizes.clone();
        let mut records = Vec::with_capacity(block_sizes.len() + 1);

        self.baseline_ms = None;
        if self.config.baseline == BaselinePolicy::Unblocked {
            let ms = self.timed_run(None);
            info!(elapsed_ms = ms, "timed unblocked baseline");
            self.baseline_ms = Some(ms);
        }

        for (idx, &block_size) in block_sizes.iter().enumerate() {
            // Block loops would run exactly once; use the reference directly.
            let degenerate = block_size >= n;
            let ms = self.timed_run((!degenerate).then_some(block_size));

            // Only S == N stands in for the unblocked run; S > N keeps the baseline.
            let resets = idx == 0 || block_size == n;
            if self.config.baseline == BaselinePolicy::FirstSwept && resets {
                self.baseline_ms = Some(ms);
            }

            let ratio = self.baseline_ms.and_then(|base| speedup(base, ms));
            let configuration = Configuration::Blocked(block_size);
            let record = Measurement::new(configuration, ms, self.traffic, ratio);
            debug!(block_size, elapsed_ms = ms, speedup = ?ratio, "timed blocked run");
            sink.record(&record)?;
            records.push(record);
        }

        let ms = self.timed_run(None);
        let record = Measurement::new(Configuration::Unblocked, ms, self.traffic, Some(1.0));
        debug!(elapsed_ms = ms, "timed unblocked run");
        sink.record(&record)?;
        records.push(record);

        info!(configurations = records.len(), "block sweep finished");
        Ok(records)
    }

    /// Clear C and time one multiplication; `None` means unblocked.
    fn timed_run(&mut self, block_size: Option<usize>) -> f64 {
        let n = self.config.n;
        self.c.clear();

        let (a, b, c) = (self.a.as_slice(), self.b.as_slice(), self.c.as_mut_slice());
        match block_size {
            Some(s) => time_ms(&mut self.clock, || matmul_blocked(a, b, c, n, s)),
            None => time_ms(&mut self.clock, || matmul_naive_ikj(a, b, c, n)),
        }
    }
}

/// Allocate, seed, sweep and release in one call.
///
/// The matrices are dropped before this returns, on success and on error.
///
/// ```
/// use blockbench::harness::clock::CpuClock;
/// use blockbench::harness::sweep::{SweepConfig, run_block_sweep};
///
/// let config = SweepConfig { n: 16, block_sizes: vec![4, 8], ..SweepConfig::default() };
/// let mut records = Vec::new();
/// let out = run_block_sweep(config, CpuClock::new(), &mut records).unwrap();
///
/// assert_eq!(out.len(), 3);
/// assert_eq!(out[2].speedup(), Some(1.0));
/// ```
pub fn run_block_sweep<C, S>(
    config: SweepConfig,
    clock: C,
    sink: &mut S,
) -> Result<Vec<Measurement>>
where
    C: Clock,
    S: RecordSink<Measurement>,
{
    let mut sweep = BlockSweep::new(config, clock)?;
    sweep.run(sink)
}
