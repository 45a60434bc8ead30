//! Spectrum kernel over contiguous n-grams.
//!
//! Counts how often each length-`n` window occurs in either value and
//! takes the dot product of the two count vectors. Windows are identified
//! by their stable 64-bit hash, so byte and token values share one kernel.
//!
//! # Complexity
//! - Time: O(m + n) window hashes plus map lookups
//! - Space: O(m) for the count map

use ahash::AHashMap;

use super::{KernNorm, Measure};
use crate::config::Config;
use crate::hash;
use crate::value::{symbols_of, StringValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spectrum {
    /// Window length `n`.
    pub length: usize,
    pub norm: KernNorm,
}

impl Default for Spectrum {
    fn default() -> Self {
        Self { length: 3, norm: KernNorm::None }
    }
}

impl Spectrum {
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self { length: length.max(1), ..Default::default() }
    }

    #[must_use]
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            length: cfg.get_usize("spectrum.length", 3).max(1),
            norm: KernNorm::parse(cfg.get_str("spectrum.norm", "none")),
        }
    }

    fn kernel(&self, xs: &[u64], ys: &[u64]) -> f64 {
        if xs.len() < self.length || ys.len() < self.length {
            return 0.0;
        }

        let mut counts: AHashMap<u64, u64> = AHashMap::with_capacity(xs.len());
        for w in xs.windows(self.length) {
            *counts.entry(hash::hash_symbols(w)).or_insert(0) += 1;
        }

        let mut k = 0u64;
        for w in ys.windows(self.length) {
            if let Some(&c) = counts.get(&hash::hash_symbols(w)) {
                k += c;
            }
        }
        k as f64
    }
}

impl Measure for Spectrum {
    fn compare(&self, a: &StringValue, b: &StringValue) -> f32 {
        let xs = symbols_of(a);
        let ys = symbols_of(b);
        let k = self.kernel(&xs, &ys);
        match self.norm {
            KernNorm::None => k as f32,
            KernNorm::L2 => {
                let kxx = self.kernel(&xs, &xs);
                let kyy = self.kernel(&ys, &ys);
                if kxx == 0.0 || kyy == 0.0 {
                    0.0
                } else {
                    (k / (kxx * kyy).sqrt()) as f32
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "spectrum"
    }
}
