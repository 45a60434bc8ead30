//! Bag distance.
//!
//! Treats both values as multisets and takes the larger of the two
//! exclusive element counts. A cheap lower bound for edit distances, often
//! used as a filter before the quadratic measures.

use super::coefficient::match_triple;
use super::{Measure, Norm};
use crate::config::Config;
use crate::value::StringValue;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bag {
    pub norm: Norm,
}

impl Bag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(cfg: &Config) -> Self {
        Self { norm: Norm::parse(cfg.get_str("bag.norm", "none")) }
    }
}

impl Measure for Bag {
    fn compare(&self, a: &StringValue, b: &StringValue) -> f32 {
        let t = match_triple(a, b);
        self.norm.apply(t.left.max(t.right) as f32, a.len(), b.len())
    }

    fn name(&self) -> &'static str {
        "bag"
    }
}
