//! Bandwidth and speedup derivation, and the per-configuration record.

use super::report::ListingLine;

/// Bytes in one "MB" of the reported bandwidth (binary megabyte).
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Estimated memory traffic of one N×N×N multiply-accumulate pass.
///
/// Models 3 reads and 1 write of an `f64` per inner iteration. This is a
/// deliberately simple model, not a cache-accurate count.
pub fn traffic_bytes(n: usize) -> u64 {
    let n = n as u64;
    4 * n * n * n * size_of::<f64>() as u64
}

/// Achieved bandwidth in MB/s for `bytes` moved in `elapsed_ms`.
///
/// Returns `None` when the elapsed time is zero, negative or not finite,
/// which happens when a run finishes below the clock's resolution.
///
/// ```
/// use blockbench::harness::metrics::bandwidth_mb_s;
///
/// assert_eq!(bandwidth_mb_s(1024 * 1024, 1000.0), Some(1.0));
/// assert_eq!(bandwidth_mb_s(1024 * 1024, 0.0), None);
/// ```
pub fn bandwidth_mb_s(bytes: u64, elapsed_ms: f64) -> Option<f64> {
    if !(elapsed_ms.is_finite() && elapsed_ms > 0.0) {
        return None;
    }
    Some(bytes as f64 * (1000.0 / elapsed_ms) / BYTES_PER_MB)
}

/// Ratio of a baseline time to a candidate time.
pub fn speedup(baseline_ms: f64, elapsed_ms: f64) -> Option<f64> {
    if !(elapsed_ms.is_finite() && elapsed_ms > 0.0 && baseline_ms.is_finite()) {
        return None;
    }
    Some(baseline_ms / elapsed_ms)
}

/// Which kernel (and which tiling) produced a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Configuration {
    /// Blocked kernel with this tile edge (unblocked if it reached N)
    Blocked(usize),
    /// The trailing explicit reference run of a block sweep
    Unblocked,
    /// i-j-k loop order
    NaiveIjk,
    /// i-k-j loop order
    NaiveIkj,
}

impl Configuration {
    /// Label used in the first column of the listing.
    pub fn label(&self) -> String {
        match self {
            Self::Blocked(block_size) => format!("{block_size:4}"),
            Self::Unblocked => "Standard (no blocking)".to_string(),
            Self::NaiveIjk => "i-j-k (Standard)".to_string(),
            Self::NaiveIkj => "i-k-j (Optimized)".to_string(),
        }
    }
}

/// One timed configuration. Never changes once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    configuration: Configuration,
    elapsed_ms: f64,
    bandwidth_mb_s: Option<f64>,
    speedup: Option<f64>,
}

impl Measurement {
    /// Derive bandwidth from `traffic` and attach a precomputed speedup.
    pub fn new(
        configuration: Configuration,
        elapsed_ms: f64,
        traffic: u64,
        speedup: Option<f64>,
    ) -> Self {
        Self {
            configuration,
            elapsed_ms,
            bandwidth_mb_s: bandwidth_mb_s(traffic, elapsed_ms),
            speedup,
        }
    }

    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn bandwidth_mb_s(&self) -> Option<f64> {
        self.bandwidth_mb_s
    }

    pub fn speedup(&self) -> Option<f64> {
        self.speedup
    }
}

/// Right-aligned fixed-point value, or `n/a` in the same width.
pub(crate) fn fixed(value: Option<f64>, width: usize, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:width$.precision$}"),
        None => format!("{:>width$}", "n/a"),
    }
}

impl ListingLine for Measurement {
    fn listing_line(&self) -> String {
        match self.configuration {
            Configuration::Blocked(_) | Configuration::Unblocked => format!(
                "{}, {:10.2}, {}, {}",
                self.configuration.label(),
                self.elapsed_ms,
                fixed(self.bandwidth_mb_s, 12, 2),
                match self.speedup {
                    Some(s) => format!("{s:6.2}x"),
                    None => format!("{:>7}", "n/a"),
                }
            ),
            Configuration::NaiveIjk | Configuration::NaiveIkj => format!(
                "{}, {:.4}, {}",
                self.configuration.label(),
                self.elapsed_ms,
                fixed(self.bandwidth_mb_s, 0, 2)
            ),
        }
    }
}
