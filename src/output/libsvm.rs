//! LIBSVM-format writer.
//!
//! One line per x index: the value's class label followed by `f:score`
//! pairs, features numbered from 1 across the y range. Suitable as a
//! precomputed kernel matrix for SVM tooling.

use std::io::Write;

use super::MatrixWriter;
use crate::error::Error;
use crate::matrix::Matrix;

pub struct LibsvmWriter<W: Write> {
    out: W,
}

impl<W: Write> LibsvmWriter<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> MatrixWriter for LibsvmWriter<W> {
    fn write(&mut self, matrix: &Matrix) -> Result<(), Error> {
        let (x, y, _) = matrix.active_ranges();
        for xi in x.start..x.end {
            write!(self.out, "{}", matrix.label(xi))?;
            for (feature, yi) in (y.start..y.end).enumerate() {
                write!(self.out, " {}:{}", feature + 1, matrix.get(xi, yi))?;
            }
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
