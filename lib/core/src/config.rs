use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "spanish";
pub const DEFAULT_MAX_FEATURES: usize = 1000;
pub const DEFAULT_TOP_N: usize = 5;

/// Configuration for a recommender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Stopword language, resolved through a `StopwordSource`
    pub language: String,
    /// Vocabulary cap, keeps the most frequent terms
    pub max_features: usize,
    /// Inclusive n-gram bounds
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in
    pub min_df: usize,
    /// Used when the caller does not pass `top_n`
    pub default_top_n: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: (1, 2),
            min_df: 1,
            default_top_n: DEFAULT_TOP_N,
        }
    }
}

impl RecommenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(Error::InvalidConfig("max_features must be positive".to_string()));
        }
        if self.min_df == 0 {
            return Err(Error::InvalidConfig("min_df must be at least 1".to_string()));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::InvalidConfig(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }
        if self.language.trim().is_empty() {
            return Err(Error::InvalidConfig("language must not be empty".to_string()));
        }
        Ok(())
    }
}
