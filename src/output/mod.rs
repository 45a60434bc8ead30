//! Output writers for computed matrices.
//!
//! Writers consume the matrix through its read accessors only; triangular
//! matrices are expanded to full rows on the way out via the symmetric
//! lookup.

pub mod libsvm;
pub mod text;

pub use libsvm::LibsvmWriter;
pub use text::TextWriter;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use tracing::warn;

use crate::error::Error;
use crate::matrix::Matrix;

/// Sink for a computed matrix.
pub trait MatrixWriter {
    fn write(&mut self, matrix: &Matrix) -> Result<(), Error>;
}

/// Create a writer for `format` targeting `path` (`"-"` is stdout).
///
/// Unknown formats log a warning and fall back to `text`.
pub fn create(format: &str, path: &str) -> Result<Box<dyn MatrixWriter>, Error> {
    match format.to_ascii_lowercase().as_str() {
        "text" => Ok(Box::new(TextWriter::new(open_sink(path)?))),
        "libsvm" => Ok(Box::new(LibsvmWriter::new(open_sink(path)?))),
        other => {
            warn!(format = other, "unknown output format, using 'text'");
            create("text", path)
        }
    }
}

fn open_sink(path: &str) -> Result<Box<dyn Write + Send>, Error> {
    if path == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}
