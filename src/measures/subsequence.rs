//! Gap-weighted subsequence kernel.
//!
//! Counts common (non-contiguous) subsequences of a fixed length, each
//! occurrence weighted by `lambda` raised to the span it stretches over.
//! The classic dynamic program of Lodhi et al.; O(p*m*n) time.

use super::{KernNorm, Measure};
use crate::config::Config;
use crate::value::{symbols_of, StringValue};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subsequence {
    /// Subsequence length `p`.
    pub length: usize,
    /// Gap decay in (0, 1].
    pub lambda: f64,
    pub norm: KernNorm,
}

impl Default for Subsequence {
    fn default() -> Self {
        Self { length: 3, lambda: 0.5, norm: KernNorm::None }
    }
}

impl Subsequence {
    #[must_use]
    pub fn new(length: usize, lambda: f64) -> Self {
        Self { length: length.max(1), lambda: lambda.clamp(f64::MIN_POSITIVE, 1.0), ..Default::default() }
    }

    #[must_use]
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            length: cfg.get_usize("subsequence.length", 3).max(1),
            lambda: cfg.get_f64("subsequence.lambda", 0.5).clamp(f64::MIN_POSITIVE, 1.0),
            norm: KernNorm::parse(cfg.get_str("subsequence.norm", "none")),
        }
    }

    fn kernel(&self, xs: &[u64], ys: &[u64]) -> f64 {
        let p = self.length;
        let n = xs.len();
        let m = ys.len();
        if n < p || m < p {
            return 0.0;
        }

        let lambda = self.lambda;
        let l2 = lambda * lambda;
        let idx = |i: usize, j: usize| i * (m + 1) + j;

        // kprime[idx(i, j)] = K'_{level}(x[..i], y[..j]), starting at level 0.
        let mut kprime = vec![1.0f64; (n + 1) * (m + 1)];
        for level in 1..p {
            let mut next = vec![0.0f64; (n + 1) * (m + 1)];
            for i in 1..=n {
                let mut kpp = 0.0;
                for j in 1..=m {
                    kpp = lambda * kpp
                        + if xs[i - 1] == ys[j - 1] {
                            l2 * kprime[idx(i - 1, j - 1)]
                        } else {
                            0.0
                        };
                    next[idx(i, j)] = lambda * next[idx(i - 1, j)] + kpp;
                }
            }
            kprime = next;
        }

        let mut k = 0.0;
        for i in 1..=n {
            for j in 1..=m {
                if xs[i - 1] == ys[j - 1] {
                    k += l2 * kprime[idx(i - 1, j - 1)];
                }
            }
        }
        k
    }
}

impl Measure for Subsequence {
    fn compare(&self, a: &StringValue, b: &StringValue) -> f32 {
        let mut xs = symbols_of(a);
        let mut ys = symbols_of(b);
        // The kernel is symmetric but its accumulation order is not;
        // canonicalize the argument order for bit-identical scores.
        if (xs.len(), &*xs) > (ys.len(), &*ys) {
            std::mem::swap(&mut xs, &mut ys);
        }

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
        "subsequence"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kern(a: &str, b: &str, p: usize, lambda: f64) -> f32 {
        Subsequence::new(p, lambda)
            .compare(&StringValue::from_text(a), &StringValue::from_text(b))
    }

    #[test]
    fn test_length_one_counts_matches() {
        // For p = 1 every matching symbol pair contributes lambda^2.
        assert_eq!(kern("ab", "ab", 1, 0.5), 0.5);
        assert_eq!(kern("aa", "aa", 1, 0.5), 1.0);
        assert_eq!(kern("ab", "cd", 1, 0.5), 0.0);
    }

    #[test]
    fn test_length_two_gap_weighting() {
        // "ab" vs "ab" with p = 2: the single common pair spans both
        // symbols in each value, contributing lambda^4.
        let lambda: f64 = 0.5;
        let expected = lambda.powi(4) as f32;
        assert_eq!(kern("ab", "ab", 2, lambda), expected);

        // "axb" stretches the same pair over a gap: lambda^5.
        let expected = lambda.powi(5) as f32;
        assert_eq!(kern("ab", "axb", 2, lambda), expected);
    }

    #[test]
    fn test_short_inputs_score_zero() {
        assert_eq!(kern("a", "abc", 2, 0.5), 0.0);
        assert_eq!(kern("", "", 1, 0.5), 0.0);
    }

    #[test]
    fn test_l2_norm_self_similarity() {
        let mut cfg = Config::new();
        cfg.set("subsequence.norm", "l2");
        let k = Subsequence::from_config(&cfg);
        let v = StringValue::from_text("abcde");
        assert_eq!(k.compare(&v, &v), 1.0);
    }
}
