//! TF-IDF vectorization
//!
//! Documents are tokenized, stripped of stopwords, expanded into n-grams and
//! weighted against a vocabulary fitted on the same batch:
//!
//! ```text
//! tfidf(t, d) = count(t, d) × idf(t)
//! idf(t)      = ln((1 + N) / (1 + df(t))) + 1
//! ```
//!
//! Every row is L2-normalized, so the dot product of two rows is their cosine
//! similarity. A batch with no usable terms yields zero rows, not an error.

use crate::config::RecommenderConfig;
use crate::stopwords::StopwordSet;
use crate::vector::Vector;
use crate::{Error, Result};
use ahash::AHashMap;
use rayon::prelude::*;
use std::cmp::Reverse;
use tracing::debug;

/// Lowercase, split on anything that is not a word character and drop
/// single-character tokens.
#[inline]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().nth(1).is_some())
        .map(str::to_string)
        .collect()
}

/// Row-per-document TF-IDF weights over a shared vocabulary
#[derive(Debug, Clone)]
pub struct TermMatrix {
    rows: Vec<Vector>,
    vocabulary: Vec<String>,
    idf: Vec<f32>,
}

impl TermMatrix {
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Vocabulary size; 0 when no term survived filtering
    #[inline]
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    pub fn row(&self, idx: usize) -> Option<&Vector> {
        self.rows.get(idx)
    }

    #[inline]
    pub fn rows(&self) -> &[Vector] {
        &self.rows
    }

    /// Terms in column order (alphabetical)
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.column(term).map(|col| self.idf[col])
    }

    pub fn weight(&self, row: usize, term: &str) -> Option<f32> {
        let col = self.column(term)?;
        self.rows.get(row).map(|v| v.as_slice()[col])
    }
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stopwords: StopwordSet,
    max_features: Option<usize>,
    ngram_range: (usize, usize),
    min_df: usize,
}

impl TfidfVectorizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stopwords: StopwordSet::empty(),
            max_features: None,
            ngram_range: (1, 1),
            min_df: 1,
        }
    }

    /// Vectorizer configured the way the recommender runs it
    #[must_use]
    pub fn from_config(config: &RecommenderConfig, stopwords: StopwordSet) -> Self {
        Self {
            stopwords,
            max_features: Some(config.max_features),
            ngram_range: config.ngram_range,
            min_df: config.min_df,
        }
    }

    #[must_use]
    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = stopwords;
        self
    }

    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    #[must_use]
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// Terms of one document: stopword-free tokens expanded to n-grams
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = tokenize(text)
            .into_iter()
            .filter(|t| !self.stopwords.contains(t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        // 0-grams carry no terms
        for n in min_n.max(1)..=max_n {
            if n == 1 {
                terms.extend(tokens.iter().cloned());
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        terms
    }

    /// Fit a vocabulary on `documents` and weight every document against it
    pub fn fit_transform<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Result<TermMatrix> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::Vectorization(format!(
                "invalid ngram range ({}, {})",
                min_n, max_n
            )));
        }

        let n_docs = documents.len();
        let counts: Vec<AHashMap<String, u32>> = documents
            .par_iter()
            .map(|doc| {
                let mut tf: AHashMap<String, u32> = AHashMap::new();
                for term in self.analyze(doc.as_ref()) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        // term -> (document frequency, corpus frequency)
        let mut stats: AHashMap<&str, (usize, u64)> = AHashMap::new();
        for tf in &counts {
            for (term, &count) in tf {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += u64::from(count);
            }
        }

        let mut kept: Vec<(&str, usize, u64)> = stats
            .into_iter()
            .filter(|(_, (df, _))| *df >= self.min_df)
            .map(|(term, (df, total))| (term, df, total))
            .collect();

        if let Some(limit) = self.max_features {
            if kept.len() > limit {
                kept.sort_by_key(|&(term, _, total)| (Reverse(total), term));
                kept.truncate(limit);
            }
        }
        kept.sort_unstable_by_key(|&(term, _, _)| term);

        let n = n_docs as f32;
        let vocabulary: Vec<String> = kept.iter().map(|(t, _, _)| t.to_string()).collect();
        let idf: Vec<f32> = kept
            .iter()
            .map(|&(_, df, _)| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();
        let columns: AHashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(col, term)| (term.as_str(), col))
            .collect();

        let rows: Vec<Vector> = counts
            .par_iter()
            .map(|tf| {
                let mut row = Vector::zeros(vocabulary.len());
                let data = row.as_mut_slice();
                for (term, &count) in tf {
                    if let Some(&col) = columns.get(term.as_str()) {
                        data[col] = count as f32 * idf[col];
                    }
                }
                row.normalize();
                row
            })
            .collect();

        if rows
            .iter()
            .any(|r| r.as_slice().iter().any(|x| !x.is_finite()))
        {
            return Err(Error::Vectorization(
                "non-finite weight in term matrix".to_string(),
            ));
        }

        debug!(
            "Vectorized {} documents over {} terms",
            n_docs,
            vocabulary.len()
        );

        Ok(TermMatrix {
            rows,
            vocabulary,
            idf,
        })
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}
