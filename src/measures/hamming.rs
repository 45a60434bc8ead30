//! Hamming distance.
//!
//! Counts positions where the symbols differ. The classic definition only
//! covers equal-length inputs; here a length difference contributes one
//! mismatch per unmatched position, so the measure is total.

use super::{Measure, Norm};
use crate::config::Config;
use crate::value::StringValue;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hamming {
    pub norm: Norm,
}

impl Hamming {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(cfg: &Config) -> Self {
        Self { norm: Norm::parse(cfg.get_str("hamming.norm", "none")) }
    }
}

impl Measure for Hamming {
    fn compare(&self, a: &StringValue, b: &StringValue) -> f32 {
        let mismatches = a
            .symbols()
            .zip(b.symbols())
            .filter(|(x, y)| x != y)
            .count();
        let tail = a.len().abs_diff(b.len());
        self.norm.apply((mismatches + tail) as f32, a.len(), b.len())
    }

    fn name(&self) -> &'static str {
        "hamming"
    }
}
