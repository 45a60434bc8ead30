//! Similarity matrix over a sub-rectangle of the input collection.
//!
//! The matrix covers the full collection by default. Narrowing the x and y
//! ranges selects a sub-rectangle; when both ranges coincide the matrix is
//! triangular and only the lower half including the diagonal is stored.
//! Splitting shards the y range into equal-height blocks so independent
//! processes can each compute one block of a large matrix.
//!
//! All index arithmetic lives in [`Layout`]; accessors and the parallel
//! driver map between absolute coordinates and linear cell indices through
//! that one type.

use tracing::warn;

use crate::error::Error;
use crate::value::StringValue;

// ============================================================================
// Ranges
// ============================================================================

/// Half-open interval of absolute indices into the input collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    #[must_use]
    pub fn full(n: usize) -> Self {
        Self { start: 0, end: n }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Parse a range specification against a collection of `n` values.
    ///
    /// Accepts `"a:b"`, `"a:"`, `":b"` and `":"`; a missing bound defaults
    /// to the full extent and a negative end counts back from `n`. An empty
    /// specification or any violation of `0 <= a < b <= n` falls back to the
    /// full range (with a warning for violations).
    #[must_use]
    pub fn parse(spec: &str, n: usize) -> Self {
        let full = Self::full(n);
        if spec.is_empty() {
            return full;
        }

        let Some((lo, hi)) = spec.split_once(':') else {
            warn!(spec, "range has no ':', using full range");
            return full;
        };

        let start: i64 = match lo {
            "" => 0,
            s => match s.parse() {
                Ok(v) => v,
                Err(_) => {
                    warn!(spec, "unparsable range start, using full range");
                    return full;
                }
            },
        };
        let mut end: i64 = match hi {
            "" => n as i64,
            s => match s.parse() {
                Ok(v) => v,
                Err(_) => {
                    warn!(spec, "unparsable range end, using full range");
                    return full;
                }
            },
        };

        if end < 0 {
            end += n as i64;
        }
        if start < 0 || end < 0 || start >= end || end > n as i64 {
            warn!(spec, n, "range out of bounds, using full range");
            return full;
        }

        Self { start: start as usize, end: end as usize }
    }
}

// ============================================================================
// Storage layout
// ============================================================================

/// Storage layout of the active sub-rectangle.
///
/// Rectangular cells are row-major over the sub-rectangle. Triangular
/// storage keeps the lower half including the diagonal: coordinates are
/// canonicalized to `(min, max)` range offsets before index arithmetic, so
/// a query for either `(X, Y)` or `(Y, X)` lands on the same cell.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    x: Range,
    y: Range,
    triangular: bool,
    size: usize,
}

/// First linear index of triangular row `i` when `k` rows are stored.
#[inline]
fn row_base(i: usize, k: usize) -> usize {
    i * (2 * k - i + 1) / 2
}

impl Layout {
    fn new(x: Range, y: Range) -> Self {
        let triangular = x == y;
        let size = if triangular {
            let k = x.len();
            k * (k + 1) / 2
        } else {
            x.len() * y.len()
        };
        Self { x, y, triangular, size }
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn triangular(&self) -> bool {
        self.triangular
    }

    /// Linear index of the cell holding `(x, y)`.
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        if self.triangular {
            let k = self.x.len();
            let a = x - self.x.start;
            let b = y - self.y.start;
            let (i, j) = if a > b { (b, a) } else { (a, b) };
            (j - i) + row_base(i, k)
        } else {
            (x - self.x.start) + (y - self.y.start) * self.x.len()
        }
    }

    /// Absolute coordinates of linear cell `idx`, row coordinate first.
    ///
    /// Inverse of [`Layout::index`] over the stored half; for triangular
    /// layouts the returned pair satisfies `row >= column`.
    #[must_use]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        if self.triangular {
            let k = self.x.len();
            let fk = (2 * k + 1) as f64;
            let mut i = ((fk - (fk * fk - 8.0 * idx as f64).sqrt()) / 2.0) as usize;
            // The float estimate can be off by one near row boundaries.
            while i + 1 < k && row_base(i + 1, k) <= idx {
                i += 1;
            }
            while i > 0 && row_base(i, k) > idx {
                i -= 1;
            }
            let j = i + (idx - row_base(i, k));
            (self.x.start + j, self.y.start + i)
        } else {
            let xl = self.x.len();
            (self.x.start + idx % xl, self.y.start + idx / xl)
        }
    }
}

// ============================================================================
// Matrix
// ============================================================================

/// Pairwise score matrix plus the per-value metadata writers need.
///
/// Labels and sources cover the full original collection, not just the
/// active sub-rectangle, so writers can look up identity by absolute index.
#[derive(Debug, Clone)]
pub struct Matrix {
    num: usize,
    x: Range,
    y: Range,
    values: Vec<f32>,
    allocated: bool,
    layout: Layout,
    labels: Vec<f32>,
    srcs: Vec<Option<String>>,
}

impl Matrix {
    /// Initialize a matrix for `strings`, capturing labels and sources.
    /// Ranges default to the full collection; call [`Matrix::alloc`] before
    /// filling.
    #[must_use]
    pub fn new(strings: &[StringValue]) -> Self {
        let n = strings.len();
        let full = Range::full(n);
        Self {
            num: n,
            x: full,
            y: full,
            values: Vec::new(),
            allocated: false,
            layout: Layout::new(full, full),
            labels: strings.iter().map(|s| s.label).collect(),
            srcs: strings.iter().map(|s| s.src.clone()).collect(),
        }
    }

    /// Size of the original collection.
    #[must_use]
    pub fn num(&self) -> usize {
        self.num
    }

    /// Narrow the x range; see [`Range::parse`] for the accepted syntax.
    pub fn set_x_range(&mut self, spec: &str) {
        self.x = Range::parse(spec, self.num);
    }

    /// Narrow the y range; see [`Range::parse`] for the accepted syntax.
    pub fn set_y_range(&mut self, spec: &str) {
        self.y = Range::parse(spec, self.num);
    }

    /// Shard the y range into `blocks` equal-height blocks and narrow it to
    /// block `index`, given as `"blocks:index"`. The last block may be
    /// shorter, or empty when rounding leaves no rows for it; an empty
    /// block simply computes nothing. Applied after y-range narrowing.
    ///
    /// Unlike range parsing, violations of the `blocks`/`index` bounds are
    /// fatal: a silently wrong block assignment would corrupt a distributed
    /// run.
    pub fn split(&mut self, spec: &str) -> Result<(), Error> {
        if spec.is_empty() {
            return Ok(());
        }
        let err = || Error::InvalidSplit(spec.to_string());

        let (blocks, index) = spec.split_once(':').ok_or_else(err)?;
        let blocks: i64 = blocks.parse().map_err(|_| err())?;
        let index: i64 = index.parse().map_err(|_| err())?;

        let ylen = self.y.len() as i64;
        if blocks <= 0 || blocks > ylen {
            return Err(err());
        }
        if index < 0 || index >= blocks {
            return Err(err());
        }

        let height = (ylen + blocks - 1) / blocks;
        let start = self.y.start + (index * height) as usize;
        let end = self.y.end.min(start + height as usize);
        self.y = Range { start, end: end.max(start) };
        Ok(())
    }

    /// Allocate zeroed storage for the active sub-rectangle and fix the
    /// layout. Returns the number of stored cells.
    pub fn alloc(&mut self) -> usize {
        self.layout = Layout::new(self.x, self.y);
        self.values = vec![0.0; self.layout.size()];
        self.allocated = true;
        self.layout.size()
    }

    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    /// Active ranges and whether storage is triangular.
    #[must_use]
    pub fn active_ranges(&self) -> (Range, Range, bool) {
        (self.x, self.y, self.layout.triangular)
    }

    /// `(x length, y length, stored cells)`.
    #[must_use]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.x.len(), self.y.len(), self.layout.size())
    }

    /// Label of the value at `absolute_index`.
    #[must_use]
    pub fn label(&self, absolute_index: usize) -> f32 {
        self.labels[absolute_index]
    }

    /// Source tag of the value at `absolute_index`.
    #[must_use]
    pub fn src(&self, absolute_index: usize) -> Option<&str> {
        self.srcs[absolute_index].as_deref()
    }

    /// Read the cell `(x, y)`.
    ///
    /// For triangular matrices the lookup is symmetric: the mirror cell is
    /// returned for coordinates in the upper half.
    ///
    /// # Panics
    /// Panics if the matrix has not been allocated or the coordinates are
    /// outside the active sub-rectangle.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[self.layout.index(x, y)]
    }

    /// Write the cell `(x, y)`.
    ///
    /// Writes to the upper half of a triangular matrix are canonicalized to
    /// the stored lower-half cell.
    ///
    /// # Panics
    /// Panics if the matrix has not been allocated or the coordinates are
    /// outside the active sub-rectangle.
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.layout.index(x, y);
        self.values[idx] = value;
    }

    /// Stored cells in layout order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Mutable storage plus the layout describing it, for the fill driver.
    pub(crate) fn fill_parts(&mut self) -> Result<(&mut [f32], Layout), Error> {
        if !self.allocated {
            return Err(Error::Unallocated);
        }
        Ok((&mut self.values, self.layout))
    }
}
