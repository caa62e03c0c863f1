//! Result listings: one console stream, optionally mirrored to a file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{BenchError, Result};

/// How a record renders as one comma-separated listing line.
pub trait ListingLine {
    fn listing_line(&self) -> String;
}

/// Receives each record as soon as the driver produces it.
pub trait RecordSink<R> {
    fn record(&mut self, record: &R) -> Result<()>;
}

impl<R: Clone> RecordSink<R> for Vec<R> {
    fn record(&mut self, record: &R) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Header block printed before the records.
///
/// The persisted copy and the console copy differ only in their column line.
#[derive(Debug, Clone)]
pub struct ListingHeader {
    pub title: &'static str,
    /// Matrix dimension, printed as `Matrix size: N x N` when present
    pub dim: Option<usize>,
    pub columns: &'static str,
    pub console_columns: &'static str,
}

impl ListingHeader {
    fn write_to<W: Write>(&self, out: &mut W, columns: &str) -> std::io::Result<()> {
        if !self.title.is_empty() {
            writeln!(out, "{}", self.title)?;
        }
        if let Some(n) = self.dim {
            writeln!(out, "Matrix size: {n} x {n}\n")?;
        }
        writeln!(out, "{columns}")
    }
}

/// Tees a listing to a console writer and an optional result file.
pub struct Listing<C: Write, F: Write> {
    console: C,
    file: Option<F>,
}

impl<C: Write, F: Write> Listing<C, F> {
    pub fn new(console: C, file: Option<F>) -> Self {
        Self { console, file }
    }

    pub fn header(&mut self, header: &ListingHeader) -> Result<()> {
        header.write_to(&mut self.console, header.console_columns)?;
        if let Some(file) = self.file.as_mut() {
            header.write_to(file, header.columns)?;
        }
        Ok(())
    }

    pub fn line(&mut self, line: &str) -> Result<()> {
        writeln!(self.console, "{line}")?;
        if let Some(file) = self.file.as_mut() {
            writeln!(file, "{line}")?;
        }
        Ok(())
    }

    /// Flush both destinations and hand the writers back.
    pub fn finish(mut self) -> Result<(C, Option<F>)> {
        self.console.flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok((self.console, self.file))
    }
}

impl<R: ListingLine, C: Write, F: Write> RecordSink<R> for Listing<C, F> {
    fn record(&mut self, record: &R) -> Result<()> {
        self.line(&record.listing_line())
    }
}

/// Create (or truncate) the persisted result listing at `path`.
pub fn create_listing_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| BenchError::OutputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "opened result listing");
    Ok(BufWriter::new(file))
}
