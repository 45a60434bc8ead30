//! Jaro and Jaro-Winkler similarity.
//!
//! Good for short values such as names and identifiers; Jaro-Winkler gives
//! extra weight to a common prefix.
//!
//! # Complexity
//! - Time: O(m*n) for matching symbols
//! - Space: O(m+n) for match flags

use smallvec::SmallVec;

use super::Measure;
use crate::config::Config;
use crate::value::{symbols_of, StringValue};

/// Shared matching core: fraction of matched symbols and transpositions.
///
/// Both inputs empty scores 1, one empty scores 0. The intermediate sums
/// are commutative, so the result is bit-identical under argument swap.
fn jaro(xs: &[u64], ys: &[u64]) -> f64 {
    let m = xs.len();
    let n = ys.len();
    if m == 0 && n == 0 {
        return 1.0;
    }
    if m == 0 || n == 0 {
        return 0.0;
    }

    let window = (m.max(n) / 2).saturating_sub(1);
    let mut x_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; m];
    let mut y_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; n];

    let mut matches = 0usize;
    for i in 0..m {
        let lo = i.saturating_sub(window);
        let hi = (i + window + 1).min(n);
        for j in lo..hi {
            if !y_matched[j] && xs[i] == ys[j] {
                x_matched[i] = true;
                y_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Count transpositions between the matched subsequences.
    let mut transpositions = 0usize;
    let mut j = 0;
    for i in 0..m {
        if !x_matched[i] {
            continue;
        }
        while !y_matched[j] {
            j += 1;
        }
        if xs[i] != ys[j] {
            transpositions += 1;
        }
        j += 1;
    }

    let mf = matches as f64;
    (mf / m as f64 + mf / n as f64 + (mf - transpositions as f64 / 2.0) / mf) / 3.0
}

/// Jaro similarity calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jaro;

impl Jaro {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Measure for Jaro {
    fn compare(&self, a: &StringValue, b: &StringValue) -> f32 {
        jaro(&symbols_of(a), &symbols_of(b)) as f32
    }

    fn name(&self) -> &'static str {
        "jaro"
    }
}

/// Jaro-Winkler similarity calculator.
///
/// Boosts the Jaro score by `prefix_len * scale * (1 - jaro)`. The scale is
/// clamped to [0, 0.25] to keep scores within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JaroWinkler {
    pub scale: f64,
    pub max_prefix: usize,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        Self { scale: 0.1, max_prefix: 4 }
    }
}

impl JaroWinkler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            scale: cfg.get_f64("jarowinkler.scale", 0.1).clamp(0.0, 0.25),
            max_prefix: cfg.get_usize("jarowinkler.max_prefix", 4),
        }
    }
}

impl Measure for JaroWinkler {
    fn compare(&self, a: &StringValue, b: &StringValue) -> f32 {
        let xs = symbols_of(a);
        let ys = symbols_of(b);
        let j = jaro(&xs, &ys);

        let prefix = xs
            .iter()
            .zip(ys.iter())
            .take(self.max_prefix)
            .take_while(|(x, y)| x == y)
            .count();

        (j + prefix as f64 * self.scale * (1.0 - j)) as f32
    }

    fn name(&self) -> &'static str {
        "jarowinkler"
    }
}
