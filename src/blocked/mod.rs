//! Cache-blocked matrix multiplication.
//!
//! The iteration space is cut into cubic tiles of edge `block_size` and the
//! reference i-k-j order runs inside each tile. With a tile of A, B and C
//! resident in a fast cache level, the inner loops stop streaming whole
//! rows of B from memory. The best edge length depends on the machine,
//! which is what the sweep in [`crate::harness::sweep`] measures.

pub mod tiled;

pub use tiled::{Tile, matmul_blocked, tiles};
