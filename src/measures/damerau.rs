//! Damerau-Levenshtein distance (optimal string alignment).
//!
//! Extends Levenshtein with transpositions of adjacent symbols; no
//! substring is edited more than once.
//!
//! # Complexity
//! - Time: O(m*n)
//! - Space: O(n) using three rolling rows

use smallvec::SmallVec;

use super::{Measure, Norm};
use crate::config::Config;
use crate::value::{symbols_of, StringValue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Damerau {
    pub norm: Norm,
}

impl Damerau {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(cfg: &Config) -> Self {
        Self { norm: Norm::parse(cfg.get_str("damerau.norm", "none")) }
    }

    fn distance(xs: &[u64], ys: &[u64]) -> usize {
        let m = xs.len();
        let n = ys.len();
        if m == 0 {
            return n;
        }
        if n == 0 {
            return m;
        }

        // Three rows for transposition detection.
        let mut prev2: SmallVec<[usize; 64]> = smallvec::smallvec![0; n + 1];
        let mut prev: SmallVec<[usize; 64]> = (0..=n).collect();
        let mut curr: SmallVec<[usize; 64]> = smallvec::smallvec![0; n + 1];

        for i in 1..=m {
            curr[0] = i;
            for j in 1..=n {
                let cost = usize::from(xs[i - 1] != ys[j - 1]);
                curr[j] = (prev[j] + 1)
                    .min(curr[j - 1] + 1)
                    .min(prev[j - 1] + cost);

                if i > 1 && j > 1 && xs[i - 1] == ys[j - 2] && xs[i - 2] == ys[j - 1] {
                    curr[j] = curr[j].min(prev2[j - 2] + 1);
                }
            }
            std::mem::swap(&mut prev2, &mut prev);
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[n]
    }
}

impl Measure for Damerau {
    fn compare(&self, a: &StringValue, b: &StringValue) -> f32 {
        let xs = symbols_of(a);
        let ys = symbols_of(b);
        self.norm.apply(Self::distance(&xs, &ys) as f32, a.len(), b.len())
    }

    fn name(&self) -> &'static str {
        "damerau"
    }
}
