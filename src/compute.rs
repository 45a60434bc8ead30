//! Parallel matrix fill.
//!
//! The fill iterates the stored cells directly: each linear index maps back
//! to its absolute coordinates, so the triangular case never visits the
//! mirrored upper half and every cell is written by exactly one worker.
//! Workers exist only for the duration of a fill.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::debug;

use crate::error::Error;
use crate::matrix::Matrix;
use crate::measures::Measure;
use crate::progress::Progress;
use crate::value::StringValue;

/// Summary of a completed fill.
#[derive(Debug, Clone, Copy)]
pub struct ComputeStats {
    pub cells: usize,
    pub elapsed: Duration,
}

/// Options controlling the fill driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeOptions {
    /// Draw a progress bar on stderr while filling.
    pub progress_bar: bool,
}

/// Fill every cell of the active sub-rectangle with `measure` scores.
///
/// `strings` must be the collection the matrix was initialized from; it is
/// borrowed for the duration of the call. The matrix must be allocated.
/// On return every stored cell has been written.
pub fn compute(
    matrix: &mut Matrix,
    strings: &[StringValue],
    measure: &dyn Measure,
    options: ComputeOptions,
) -> Result<ComputeStats, Error> {
    if strings.len() != matrix.num() {
        return Err(Error::CollectionMismatch { expected: matrix.num(), got: strings.len() });
    }

    let started = Instant::now();
    let (cells, layout) = matrix.fill_parts()?;
    let progress = Progress::new(layout.size(), options.progress_bar);

    cells.par_iter_mut().enumerate().for_each(|(idx, cell)| {
        let (x, y) = layout.coords(idx);
        *cell = measure.compare(&strings[x], &strings[y]);
        progress.tick();
    });

    progress.finish();
    let stats = ComputeStats { cells: layout.size(), elapsed: started.elapsed() };
    debug!(
        measure = measure.name(),
        cells = stats.cells,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "matrix fill complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::measures;

    fn values(texts: &[&str]) -> Vec<StringValue> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| StringValue::from_text(t).with_idx(i))
            .collect()
    }

    #[test]
    fn test_triangular_fill_levenshtein() {
        let s = values(&["abc", "abd", "xyz"]);
        let mut m = Matrix::new(&s);
        m.alloc();
        let measure = measures::resolve("levenshtein", &Config::default());

        let stats = compute(&mut m, &s, measure.as_ref(), ComputeOptions::default()).unwrap();
        assert_eq!(stats.cells, 6);

        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(1, 0), 1.0);
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.get(2, 0), 3.0);
        assert_eq!(m.get(2, 1), 3.0);
        assert_eq!(m.get(2, 2), 0.0);
        // Symmetric lookup resolves to the stored half.
        assert_eq!(m.get(0, 1), m.get(1, 0));
    }

    #[test]
    fn test_rectangular_split_fill() {
        let s = values(&["abc", "abd", "xyz"]);
        let mut m = Matrix::new(&s);
        m.set_y_range("1:3");
        m.split("2:0").unwrap();
        m.alloc();

        let (x, y, triangular) = m.active_ranges();
        assert_eq!((x.len(), y.len()), (3, 1));
        assert!(!triangular);

        let measure = measures::resolve("levenshtein", &Config::default());
        let stats = compute(&mut m, &s, measure.as_ref(), ComputeOptions::default()).unwrap();
        assert_eq!(stats.cells, 3);
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.get(2, 1), 3.0);
    }

    #[test]
    fn test_every_cell_written() {
        struct One;
        impl Measure for One {
            fn compare(&self, _: &StringValue, _: &StringValue) -> f32 {
                1.0
            }
            fn name(&self) -> &'static str {
                "one"
            }
        }

        let s = values(&["a", "b", "c", "d", "e"]);
        let mut m = Matrix::new(&s);
        m.alloc();
        compute(&mut m, &s, &One, ComputeOptions::default()).unwrap();
        assert!(m.values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_unallocated_matrix_is_an_error() {
        let s = values(&["a", "b"]);
        let mut m = Matrix::new(&s);
        let measure = measures::resolve("levenshtein", &Config::default());
        assert!(matches!(
            compute(&mut m, &s, measure.as_ref(), ComputeOptions::default()),
            Err(Error::Unallocated)
        ));
    }

    #[test]
    fn test_collection_mismatch_is_an_error() {
        let s = values(&["a", "b", "c"]);
        let mut m = Matrix::new(&s);
        m.alloc();
        let measure = measures::resolve("levenshtein", &Config::default());
        assert!(matches!(
            compute(&mut m, &s[..2], measure.as_ref(), ComputeOptions::default()),
            Err(Error::CollectionMismatch { .. })
        ));
    }
}
