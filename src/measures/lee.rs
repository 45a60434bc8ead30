//! Lee distance over a cyclic alphabet.
//!
//! Each position contributes the shorter way around a cycle of `q` symbols;
//! symbols are reduced modulo `q` first. Positions past the end of the
//! shorter value contribute the maximum per-symbol distance `q / 2`.

use super::{Measure, Norm};
use crate::config::Config;
use crate::value::StringValue;

/// Smallest admissible alphabet; below this the cycle degenerates.
const MIN_ALPHABET: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lee {
    /// Alphabet size `q`.
    pub q: u64,
    pub norm: Norm,
}

impl Default for Lee {
    fn default() -> Self {
        Self { q: 256, norm: Norm::None }
    }
}

impl Lee {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(cfg: &Config) -> Self {
        let q = (cfg.get_usize("lee.alphabet", 256) as u64).max(MIN_ALPHABET);
        Self { q, norm: Norm::parse(cfg.get_str("lee.norm", "none")) }
    }
}

impl Measure for Lee {
    fn compare(&self, a: &StringValue, b: &StringValue) -> f32 {
        let q = self.q;
        let mut sum: u64 = a
            .symbols()
            .zip(b.symbols())
            .map(|(x, y)| {
                let d = (x % q).abs_diff(y % q);
                d.min(q - d)
            })
            .sum();
        sum += a.len().abs_diff(b.len()) as u64 * (q / 2);
        self.norm.apply(sum as f32, a.len(), b.len())
    }

    fn name(&self) -> &'static str {
        "lee"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lee_wraps_around() {
        // Over bytes (q = 256): 'a' (97) vs 'c' (99) is 2 either way.
        let lee = Lee::new();
        let a = StringValue::from_text("a");
        let c = StringValue::from_text("c");
        assert_eq!(lee.compare(&a, &c), 2.0);

        // With q = 4 the symbols reduce to 1 and 3; the cycle distance is 2.
        let small = Lee { q: 4, norm: Norm::None };
        assert_eq!(small.compare(&a, &c), 2.0);

        // 0 vs 3 modulo 4 is 1 around the cycle, not 3.
        let z = StringValue::from_bytes(vec![0]);
        let t = StringValue::from_bytes(vec![3]);
        assert_eq!(small.compare(&z, &t), 1.0);
    }

    #[test]
    fn test_lee_identity_and_length_tail() {
        let lee = Lee::new();
        let a = StringValue::from_text("abc");
        assert_eq!(lee.compare(&a, &a), 0.0);

        let b = StringValue::from_text("abcxy");
        let base = lee.compare(&StringValue::from_text("abc"), &StringValue::from_text("abc"));
        assert_eq!(lee.compare(&a, &b), base + 2.0 * 128.0);
    }

    #[test]
    fn test_lee_alphabet_clamped() {
        let mut cfg = Config::new();
        cfg.set("lee.alphabet", "0");
        assert_eq!(Lee::from_config(&cfg).q, MIN_ALPHABET);
    }
}
