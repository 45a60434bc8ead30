//! Plain text writer.
//!
//! A comment header describing the active sub-rectangle, then one line per
//! x index with the scores across the y range, space-separated.

use std::io::Write;

use super::MatrixWriter;
use crate::error::Error;
use crate::matrix::Matrix;

pub struct TextWriter<W: Write> {
    out: W,
}

impl<W: Write> TextWriter<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> MatrixWriter for TextWriter<W> {
    fn write(&mut self, matrix: &Matrix) -> Result<(), Error> {
        let (x, y, triangular) = matrix.active_ranges();
        writeln!(
            self.out,
            "# x: {}:{} y: {}:{} triangular: {}",
            x.start, x.end, y.start, y.end, triangular
        )?;

        for xi in x.start..x.end {
            let mut sep = "";
            for yi in y.start..y.end {
                write!(self.out, "{}{}", sep, matrix.get(xi, yi))?;
                sep = " ";
            }
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
