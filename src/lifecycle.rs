//! Allocate, initialize, duplicate and release a small integer buffer.
//!
//! Each buffer owns its storage and frees it exactly once when dropped, so
//! the whole walk-through finishes with nothing left allocated.

use std::fmt;
use std::io::Write;

use crate::error::{BenchError, Result};

/// Default element count for [`run`].
pub const DEFAULT_LEN: usize = 5;

#[derive(Debug, PartialEq, Eq)]
pub struct IntBuffer {
    values: Vec<i32>,
}

impl IntBuffer {
    /// Allocate `len` zeroed elements, reporting failure instead of aborting.
    pub fn allocate(len: usize) -> Result<Self> {
        let mut values = Vec::new();
        values
            .try_reserve_exact(len)
            .map_err(|source| BenchError::Allocation {
                what: "integer buffer",
                elements: len,
                source,
            })?;
        values.resize(len, 0);
        Ok(Self { values })
    }

    /// Set element `i` to `i * 10`.
    pub fn initialize(&mut self) {
        for (i, v) in self.values.iter_mut().enumerate() {
            *v = i as i32 * 10;
        }
    }

    /// Heap-allocated copy with its own storage.
    pub fn duplicate(&self) -> Result<Self> {
        let mut copy = Self::allocate(self.values.len())?;
        copy.values.copy_from_slice(&self.values);
        Ok(copy)
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }
}

impl fmt::Display for IntBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array elements: ")?;
        for v in &self.values {
            write!(f, "{v} ")?;
        }
        Ok(())
    }
}

impl Drop for IntBuffer {
    fn drop(&mut self) {
        tracing::trace!(len = self.values.len(), "released integer buffer");
    }
}

/// allocate → initialize → print → duplicate → print → release
///
/// ```
/// let mut out = Vec::new();
/// blockbench::lifecycle::run(3, &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "Array elements: 0 10 20 \nArray elements: 0 10 20 \n"
/// );
/// ```
pub fn run<W: Write>(len: usize, out: &mut W) -> Result<()> {
    let mut array = IntBuffer::allocate(len)?;
    array.initialize();
    writeln!(out, "{array}")?;

    let copy = array.duplicate()?;
    writeln!(out, "{copy}")?;

    drop(array);
    drop(copy);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_owns_its_storage() {
        let mut original = IntBuffer::allocate(4).unwrap();
        original.initialize();

        let mut copy = original.duplicate().unwrap();
        assert_eq!(copy, original);
        assert_ne!(copy.values.as_ptr(), original.values.as_ptr());

        copy.values[0] = 99;
        copy.values[3] = -1;
        assert_eq!(original.as_slice(), &[0, 10, 20, 30]);
        assert_eq!(copy.as_slice(), &[99, 10, 20, -1]);

        drop(original);
        assert_eq!(copy.to_string(), "Array elements: 99 10 20 -1 ");
    }

    #[test]
    fn test_empty_buffer() {
        let mut empty = IntBuffer::allocate(0).unwrap();
        empty.initialize();
        assert!(empty.duplicate().unwrap().as_slice().is_empty());
        assert_eq!(empty.to_string(), "Array elements: ");
    }
}
