//! Flat name→value configuration shared by measures and writers.
//!
//! Measures read their parameters from this map exactly once, when they are
//! resolved; nothing queries it during a fill. Values are stored as strings
//! and parsed on demand; a value that fails to parse logs a warning and the
//! caller's default is used instead.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    options: HashMap<String, String>,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file containing a single flat object.
    ///
    /// Scalar values of any JSON type are accepted; they are stored in their
    /// textual form and re-parsed by the typed getters.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        let mut cfg = Self::new();
        for (key, value) in raw {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            cfg.set(key, text);
        }
        Ok(cfg)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    #[must_use]
    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        match self.get(key) {
            None => default,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(key, value = raw, default, "option is not a number, using default");
                default
            }),
        }
    }

    #[must_use]
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        match self.get(key) {
            None => default,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(key, value = raw, default, "option is not an integer, using default");
                default
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_typed_getters() {
        let mut cfg = Config::new();
        cfg.set("spectrum.length", "4");
        cfg.set("subsequence.lambda", "0.25");
        cfg.set("levenshtein.norm", "max");

        assert_eq!(cfg.get_usize("spectrum.length", 3), 4);
        assert_eq!(cfg.get_f64("subsequence.lambda", 0.5), 0.25);
        assert_eq!(cfg.get_str("levenshtein.norm", "none"), "max");
        assert_eq!(cfg.get_str("missing", "fallback"), "fallback");
    }

    #[test]
    fn test_unparsable_value_falls_back() {
        let mut cfg = Config::new();
        cfg.set("spectrum.length", "four");
        assert_eq!(cfg.get_usize("spectrum.length", 3), 3);
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"measure": "jaccard", "spectrum.length": 5}}"#).unwrap();

        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.get("measure"), Some("jaccard"));
        assert_eq!(cfg.get_usize("spectrum.length", 3), 5);
    }

    #[test]
    fn test_load_rejects_non_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        assert!(Config::load(file.path()).is_err());
    }
}
