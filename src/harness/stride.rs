//! Strided reads over a large buffer.
//!
//! The number of elements touched stays fixed while the distance between
//! them grows, so every extra stride step spends more cache lines on the
//! same amount of useful data.

use tracing::info;

use super::clock::{Clock, time_ms};
use super::metrics::{bandwidth_mb_s, fixed};
use super::report::{ListingHeader, ListingLine, RecordSink};
use crate::error::{BenchError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct StrideConfig {
    /// Elements summed per stride
    pub touches: usize,
    /// Largest stride tried; strides run 1..=max_stride
    pub max_stride: usize,
}

impl Default for StrideConfig {
    fn default() -> Self {
        Self {
            touches: 1_000_000,
            max_stride: 20,
        }
    }
}

pub fn stride_header() -> ListingHeader {
    ListingHeader {
        title: "",
        dim: None,
        columns: "stride , sum, time (msec), rate (MB/s)",
        console_columns: "stride , sum, time (msec), rate (MB/s)",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrideMeasurement {
    pub stride: usize,
    pub sum: f64,
    pub elapsed_ms: f64,
    pub bandwidth_mb_s: Option<f64>,
}

impl ListingLine for StrideMeasurement {
    fn listing_line(&self) -> String {
        format!(
            "{}, {:.6}, {:.6}, {}",
            self.stride,
            self.sum,
            self.elapsed_ms,
            fixed(self.bandwidth_mb_s, 0, 6)
        )
    }
}

/// Sum `touches` elements at every stride from 1 to `max_stride`.
///
/// The buffer holds `touches * max_stride` ones, so each sum equals
/// `touches` exactly.
pub fn run_stride<C, S>(
    config: &StrideConfig,
    clock: &mut C,
    sink: &mut S,
) -> Result<Vec<StrideMeasurement>>
where
    C: Clock,
    S: RecordSink<StrideMeasurement>,
{
    if config.touches == 0 || config.max_stride == 0 {
        return Err(BenchError::InvalidDimension {
            n: config.touches.min(config.max_stride),
            reason: "touches and max stride must be at least 1",
        });
    }
    let len = config
        .touches
        .checked_mul(config.max_stride)
        .ok_or(BenchError::InvalidDimension {
            n: config.touches,
            reason: "touches * max stride overflows",
        })?;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|source| BenchError::Allocation {
            what: "stride buffer",
            elements: len,
            source,
        })?;
    // Touch every page up front so first-use faults stay out of the timings.
    buffer.resize(len, 1.0f64);

    let bytes = (size_of::<f64>() * config.touches) as u64;
    let mut records = Vec::with_capacity(config.max_stride);

    for stride in 1..=config.max_stride {
        let mut sum = 0.0;
        let ms = time_ms(clock, || {
            sum = buffer.iter().step_by(stride).take(config.touches).sum::<f64>();
        });
        let record = StrideMeasurement {
            stride,
            sum,
            elapsed_ms: ms,
            bandwidth_mb_s: bandwidth_mb_s(bytes, ms),
        };
        sink.record(&record)?;
        records.push(record);
    }
    info!(strides = config.max_stride, touches = config.touches, "stride experiment finished");

    Ok(records)
}
