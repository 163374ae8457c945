//! The text normalizer shared by training and inference.
//!
//! The classifier's feature space is defined over normalized tokens, so a
//! model is only valid together with the normalizer it was trained with.
//! Both [`IntentTrainer`](crate::ml::trainer::IntentTrainer) and
//! [`ChatEngine`](crate::engine::ChatEngine) take a `TextNormalizer`, and the
//! trainer records its analyzer name in the model artifact.
//!
//! # Examples
//!
//! ```
//! use collegebot::analysis::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new();
//! let stems = normalizer.normalize("How do I prepare for exams?").unwrap();
//! assert_eq!(stems, vec!["prepar", "exam"]);
//!
//! assert!(normalizer.normalize("").unwrap().is_empty());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, EnglishAnalyzer};
use crate::error::Result;

/// Turns raw text into an ordered sequence of stems.
///
/// Output order follows the input and duplicates are kept.
#[derive(Clone)]
pub struct TextNormalizer {
    analyzer: Arc<dyn Analyzer>,
}

impl TextNormalizer {
    /// Create the default English normalizer.
    pub fn new() -> Self {
        Self::with_analyzer(Arc::new(EnglishAnalyzer::new()))
    }

    /// Create a normalizer backed by a custom analyzer.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        TextNormalizer { analyzer }
    }

    /// Normalize text into stems. Empty or symbol-only input yields an
    /// empty sequence.
    pub fn normalize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Normalize and join the stems with single spaces.
    pub fn normalize_to_string(&self, text: &str) -> Result<String> {
        Ok(self.normalize(text)?.join(" "))
    }

    /// Name of the underlying analyzer.
    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pipeline() {
        let normalizer = TextNormalizer::new();
        let stems = normalizer
            .normalize("Tips for preparing exams and improving focus!")
            .unwrap();

        assert_eq!(stems, vec!["tip", "prepar", "exam", "improv", "focu"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = TextNormalizer::new();
        let once = normalizer
            .normalize("Tips for preparing exams and improving focus!")
            .unwrap();
        let twice = normalizer.normalize(&once.join(" ")).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_duplicates_and_order_kept() {
        let normalizer = TextNormalizer::new();
        let stems = normalizer.normalize("exam exams EXAM timetable").unwrap();

        assert_eq!(stems, vec!["exam", "exam", "exam", "timet"]);
    }

    #[test]
    fn test_empty_and_stopword_only_input() {
        let normalizer = TextNormalizer::new();

        assert!(normalizer.normalize("").unwrap().is_empty());
        assert!(normalizer.normalize("?!...").unwrap().is_empty());
        assert!(normalizer.normalize("what is it").unwrap().is_empty());
    }

    #[test]
    fn test_contractions_collapse() {
        let normalizer = TextNormalizer::new();
        // "i'm" collapses to "im", which is not a stopword
        assert_eq!(
            normalizer.normalize_to_string("I'm stressed").unwrap(),
            "im stress"
        );
    }
}
