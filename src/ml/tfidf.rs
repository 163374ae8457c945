//! TF-IDF vectorizer over normalized tokens.
//!
//! Features are word n-grams built from the stems produced by
//! [`TextNormalizer`](crate::analysis::TextNormalizer). The vectorizer never
//! tokenizes text itself: training and inference both hand it the output of
//! the same normalizer.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};

/// Vectorizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfIdfConfig {
    /// Smallest n-gram length.
    pub ngram_min: usize,
    /// Largest n-gram length.
    pub ngram_max: usize,
    /// Vocabulary cap; the most frequent terms are kept.
    pub max_features: usize,
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        TfIdfConfig {
            ngram_min: 1,
            ngram_max: 2,
            max_features: 3000,
        }
    }
}

impl TfIdfConfig {
    /// Check the n-gram range and vocabulary cap.
    pub fn validate(&self) -> Result<()> {
        if self.ngram_min == 0 || self.ngram_min > self.ngram_max {
            return Err(BotError::configuration(format!(
                "invalid n-gram range ({}, {})",
                self.ngram_min, self.ngram_max
            )));
        }
        if self.max_features == 0 {
            return Err(BotError::configuration("max_features must be positive"));
        }
        Ok(())
    }
}

/// Sparse feature vector with entries sorted by feature index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from `(index, value)` pairs; pairs are sorted and zeros dropped.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, value)| value != 0.0);
        entries.sort_by_key(|&(idx, _)| idx);
        SparseVector { entries }
    }

    /// Non-zero entries in index order.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vector is all zeros.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Dot product with a dense row.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(idx, v)| dense.get(idx).map(|w| w * v))
            .sum()
    }
}

/// TF-IDF vectorizer for n-gram features.
///
/// The vocabulary is kept sorted, so a term's feature index is its position
/// in lexicographic order.
#[derive(Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    config: TfIdfConfig,
    /// Sorted vocabulary.
    terms: Vec<String>,
    /// Inverse document frequency per term.
    idf: Vec<f64>,
    /// Number of documents seen during fitting.
    n_documents: usize,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("config", &self.config)
            .field("vocabulary_size", &self.terms.len())
            .field("n_documents", &self.n_documents)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(config: TfIdfConfig) -> Self {
        TfIdfVectorizer {
            config,
            terms: Vec::new(),
            idf: Vec::new(),
            n_documents: 0,
        }
    }

    /// Fit the vocabulary and IDF weights.
    pub fn fit(&mut self, documents: &[Vec<String>]) -> Result<()> {
        self.config.validate()?;
        if documents.is_empty() {
            return Err(BotError::model("cannot fit a vectorizer on zero documents"));
        }

        let mut term_counts: AHashMap<String, usize> = AHashMap::new();
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();

        for doc in documents {
            let mut seen: AHashMap<String, usize> = AHashMap::new();
            for gram in self.ngrams(doc) {
                *seen.entry(gram).or_insert(0) += 1;
            }
            for (gram, count) in seen {
                *term_counts.entry(gram.clone()).or_insert(0) += count;
                *document_frequency.entry(gram).or_insert(0) += 1;
            }
        }

        if term_counts.is_empty() {
            return Err(BotError::model(
                "empty vocabulary: every training document normalized to nothing",
            ));
        }

        // Keep the most frequent terms, ties broken lexicographically
        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.config.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        self.terms = terms;
        self.idf = idf;
        self.n_documents = documents.len();

        log::debug!(
            "fitted tf-idf vocabulary of {} terms over {} documents",
            self.terms.len(),
            self.n_documents
        );
        Ok(())
    }

    /// Fit, then transform every document.
    pub fn fit_transform(&mut self, documents: &[Vec<String>]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Transform normalized tokens into an L2-normalized TF-IDF vector.
    ///
    /// Unknown n-grams are ignored, so input sharing nothing with the
    /// vocabulary yields an empty vector.
    pub fn transform(&self, tokens: &[String]) -> Result<SparseVector> {
        if !self.is_fitted() {
            return Err(BotError::model("vectorizer has not been fitted"));
        }

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in self.ngrams(tokens) {
            if let Ok(idx) = self.terms.binary_search(&gram) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in &mut entries {
                *value /= norm;
            }
        }

        Ok(SparseVector::from_entries(entries))
    }

    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let mut grams = Vec::new();
        for n in self.config.ngram_min..=self.config.ngram_max {
            if n == 0 || n > tokens.len() {
                continue;
            }
            grams.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        grams
    }

    /// Whether [`fit`](Self::fit) has run.
    pub fn is_fitted(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Number of features.
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Feature index of a term.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.terms.binary_search_by(|t| t.as_str().cmp(term)).ok()
    }

    /// IDF weight of a term.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.idf[idx])
    }

    /// Sorted vocabulary.
    pub fn vocabulary(&self) -> &[String] {
        &self.terms
    }

    /// Settings used for fitting.
    pub fn config(&self) -> &TfIdfConfig {
        &self.config
    }
}
