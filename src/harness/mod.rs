//! Timing harness: clocks, derived metrics, listings and the experiments.
//!
//! Every experiment is single-threaded and runs each configuration exactly
//! once. There is no warm-up and no outlier rejection; the numbers are for
//! comparing access patterns against each other on one machine.
//!
//! - `sweep`: blocked multiplication across tile sizes
//! - `loop_order`: i-j-k vs i-k-j
//! - `stride`: strided reads over a large buffer

pub mod clock;
pub mod loop_order;
pub mod metrics;
pub mod report;
pub mod stride;
pub mod sweep;
