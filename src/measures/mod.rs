//! Measure interface and dispatch.
//!
//! A measure is a `(configure, compare)` pair: `from_config` binds its
//! parameters from the shared configuration once, before any comparison,
//! and [`Measure::compare`] scores a pair of values. `compare` must be pure
//! and thread-safe; the fill driver calls it concurrently.
//!
//! Measures whose mathematical definition is symmetric return bit-identical
//! scores for swapped arguments. The kernels canonicalize argument order
//! internally to guarantee this for floating-point accumulation.

pub mod bag;
pub mod coefficient;
pub mod damerau;
pub mod hamming;
pub mod jaro;
pub mod lee;
pub mod levenshtein;
pub mod spectrum;
pub mod subsequence;

pub use bag::Bag;
pub use coefficient::{Coefficient, MatchTriple, SetCoefficient};
pub use damerau::Damerau;
pub use hamming::Hamming;
pub use jaro::{Jaro, JaroWinkler};
pub use lee::Lee;
pub use levenshtein::Levenshtein;
pub use spectrum::Spectrum;
pub use subsequence::Subsequence;

use tracing::warn;

use crate::config::Config;
use crate::value::StringValue;

/// Scoring function over a pair of string values.
pub trait Measure: Send + Sync {
    /// Score a pair of values. Must be pure; the driver calls it from
    /// multiple threads.
    fn compare(&self, a: &StringValue, b: &StringValue) -> f32;

    /// Name of the measure for dispatch and logging.
    fn name(&self) -> &'static str;
}

/// Measure used when an unknown name is requested.
pub const DEFAULT_MEASURE: &str = "levenshtein";

/// Resolve a measure name to a configured instance.
///
/// Names are case-insensitive and accept the `dist_`, `sim_` and `kern_`
/// prefixes as aliases. An unknown name logs a warning and falls back to
/// [`DEFAULT_MEASURE`].
#[must_use]
pub fn resolve(name: &str, cfg: &Config) -> Box<dyn Measure> {
    let lower = name.to_ascii_lowercase();
    let base = lower
        .strip_prefix("dist_")
        .or_else(|| lower.strip_prefix("sim_"))
        .or_else(|| lower.strip_prefix("kern_"))
        .unwrap_or(&lower);

    match base {
        "levenshtein" => Box::new(Levenshtein::from_config(cfg)),
        "damerau" | "damerau_levenshtein" => Box::new(Damerau::from_config(cfg)),
        "hamming" => Box::new(Hamming::from_config(cfg)),
        "lee" => Box::new(Lee::from_config(cfg)),
        "bag" => Box::new(Bag::from_config(cfg)),
        "jaro" => Box::new(Jaro::new()),
        "jarowinkler" | "jaro_winkler" => Box::new(JaroWinkler::from_config(cfg)),
        "spectrum" | "ngram" => Box::new(Spectrum::from_config(cfg)),
        "subsequence" | "ssk" => Box::new(Subsequence::from_config(cfg)),
        "jaccard" => Box::new(SetCoefficient::new(Coefficient::Jaccard)),
        "simpson" => Box::new(SetCoefficient::new(Coefficient::Simpson)),
        "braunblanquet" | "braun_blanquet" => {
            Box::new(SetCoefficient::new(Coefficient::BraunBlanquet))
        }
        "dice" => Box::new(SetCoefficient::new(Coefficient::Dice)),
        "sokalsneath" | "sokal_sneath" => Box::new(SetCoefficient::new(Coefficient::SokalSneath)),
        "kulczynski" => Box::new(SetCoefficient::new(Coefficient::Kulczynski)),
        "otsuka" => Box::new(SetCoefficient::new(Coefficient::Otsuka)),
        _ => {
            warn!(name, default = DEFAULT_MEASURE, "unknown measure, using default");
            resolve(DEFAULT_MEASURE, cfg)
        }
    }
}

// ============================================================================
// Score normalization
// ============================================================================

/// Length normalization applied to raw distance scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Norm {
    #[default]
    None,
    /// Divide by the shorter length.
    Min,
    /// Divide by the longer length.
    Max,
    /// Divide by the average length.
    Avg,
}

impl Norm {
    /// Parse a normalization name; unknown names warn and disable
    /// normalization.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "none" => Norm::None,
            "min" => Norm::Min,
            "max" => Norm::Max,
            "avg" => Norm::Avg,
            other => {
                warn!(norm = other, "unknown normalization, using none");
                Norm::None
            }
        }
    }

    /// Normalize `score` by the chosen function of the two lengths.
    /// A zero denominator leaves the score unchanged.
    #[inline]
    #[must_use]
    pub fn apply(self, score: f32, la: usize, lb: usize) -> f32 {
        let denom = match self {
            Norm::None => return score,
            Norm::Min => la.min(lb) as f32,
            Norm::Max => la.max(lb) as f32,
            Norm::Avg => (la + lb) as f32 / 2.0,
        };
        if denom == 0.0 {
            score
        } else {
            score / denom
        }
    }
}

/// Normalization applied to kernel values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KernNorm {
    #[default]
    None,
    /// `k(x,y) / sqrt(k(x,x) * k(y,y))`.
    L2,
}

impl KernNorm {
    /// Parse a kernel normalization name; unknown names warn and disable
    /// normalization.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "none" => KernNorm::None,
            "l2" => KernNorm::L2,
            other => {
                warn!(norm = other, "unknown kernel normalization, using none");
                KernNorm::None
            }
        }
    }
}
