//! Cache-locality microbenchmarks, built from scratch.
//!
//! I wanted to see how much memory access patterns alone move the needle
//! on one core, without SIMD or threads muddying the picture. This crate
//! has three experiments:
//!
//! - a block-size sweep over a tiled matrix multiply
//! - i-j-k versus i-k-j loop order
//! - strided reads over a large buffer
//!
//! plus a tiny allocate/duplicate/release walk-through.
//!
//! ## Usage
//!
//! ```
//! use blockbench::{matmul_blocked, matmul_naive_ikj};
//!
//! let n = 64;
//! let a = vec![1.0f64; n * n];
//! let b = vec![2.0f64; n * n];
//! let mut reference = vec![0.0f64; n * n];
//! let mut tiled = vec![0.0f64; n * n];
//!
//! matmul_naive_ikj(&a, &b, &mut reference, n);
//! matmul_blocked(&a, &b, &mut tiled, n, 24);
//! assert_eq!(reference, tiled);
//! ```
//!
//! Timings are single runs of process CPU time. Bandwidth is an estimate
//! from a 3-reads-1-write traffic model, not a hardware counter.

pub mod blocked;
pub mod error;
pub mod harness;
pub mod lifecycle;
pub mod matrix;

pub use blocked::matmul_blocked;
pub use error::{BenchError, Result};
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::naive_ikj::matmul_naive_ikj;
pub use matrix::{Matrix, seed_inputs};
