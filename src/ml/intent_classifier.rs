//! Intent classification over normalized tokens.
//!
//! [`IntentClassifier`] is the seam between the engine and any model: it maps
//! the stems of one request to a probability per tag. The engine only ever
//! looks at the best entry of the returned [`IntentScores`] and compares its
//! probability with the confidence threshold.

use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::ml::logistic::{FitReport, LogisticRegression, LogisticRegressionConfig};
use crate::ml::tfidf::{TfIdfConfig, TfIdfVectorizer};

/// Best tag of one request with its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub tag: String,
    pub confidence: f64,
}

/// Probability per tag, in the classifier's class order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentScores {
    scores: Vec<(String, f64)>,
}

impl IntentScores {
    pub fn new(scores: Vec<(String, f64)>) -> Self {
        IntentScores { scores }
    }

    /// Pair class labels with their probabilities.
    pub fn from_parts(tags: &[String], probabilities: Vec<f64>) -> Self {
        IntentScores {
            scores: tags.iter().cloned().zip(probabilities).collect(),
        }
    }

    /// Arg-max tag; on ties the earliest class wins.
    pub fn best(&self) -> Option<ClassificationResult> {
        let mut best: Option<&(String, f64)> = None;
        for entry in &self.scores {
            match best {
                Some((_, p)) if entry.1 <= *p => {}
                _ => best = Some(entry),
            }
        }
        best.map(|(tag, confidence)| ClassificationResult {
            tag: tag.clone(),
            confidence: *confidence,
        })
    }

    /// Probability of one tag.
    pub fn probability(&self, tag: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, p)| *p)
    }

    /// The `k` most likely tags, highest first.
    pub fn top(&self, k: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .scores
            .iter()
            .map(|(tag, p)| (tag.as_str(), *p))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        ranked
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(tag, p)| (tag.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Intent classifier trait.
///
/// Implementations must be shareable across request threads and must map
/// the same tokens to the same scores every time.
pub trait IntentClassifier: Send + Sync {
    /// Score every known tag for the given stems.
    fn classify(&self, tokens: &[String]) -> Result<IntentScores>;

    /// Tags this classifier can emit.
    fn tags(&self) -> &[String];

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// TF-IDF features fed into a multinomial logistic regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfIntentClassifier {
    vectorizer: TfIdfVectorizer,
    model: LogisticRegression,
}

impl TfIdfIntentClassifier {
    /// Fit vectorizer and model on normalized documents and their tags.
    pub fn fit(
        documents: &[Vec<String>],
        labels: &[String],
        vectorizer_config: &TfIdfConfig,
        training_config: &LogisticRegressionConfig,
    ) -> Result<(Self, FitReport)> {
        let mut vectorizer = TfIdfVectorizer::new(vectorizer_config.clone());
        let rows = vectorizer.fit_transform(documents)?;
        let (model, report) = LogisticRegression::fit(
            &rows,
            labels,
            vectorizer.vocabulary_size(),
            training_config,
        )?;
        Ok((TfIdfIntentClassifier { vectorizer, model }, report))
    }

    /// Assemble from fitted parts.
    pub fn from_parts(vectorizer: TfIdfVectorizer, model: LogisticRegression) -> Result<Self> {
        if vectorizer.vocabulary_size() != model.n_features() {
            return Err(BotError::model(format!(
                "vectorizer has {} features but the model expects {}",
                vectorizer.vocabulary_size(),
                model.n_features()
            )));
        }
        Ok(TfIdfIntentClassifier { vectorizer, model })
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }
}

impl IntentClassifier for TfIdfIntentClassifier {
    fn classify(&self, tokens: &[String]) -> Result<IntentScores> {
        let features = self.vectorizer.transform(tokens)?;
        let probabilities = self.model.predict_proba(&features)?;
        Ok(IntentScores::from_parts(self.model.classes(), probabilities))
    }

    fn tags(&self) -> &[String] {
        self.model.classes()
    }

    fn name(&self) -> &str {
        "tfidf_logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_best_prefers_first_on_tie() {
        let scores = IntentScores::new(vec![
            ("attendance".to_string(), 0.4),
            ("library".to_string(), 0.4),
            ("thanks".to_string(), 0.2),
        ]);

        let best = scores.best().unwrap();
        assert_eq!(best.tag, "attendance");
        assert_eq!(best.confidence, 0.4);
        assert_eq!(scores.probability("thanks"), Some(0.2));
        assert_eq!(scores.top(1), vec![("attendance", 0.4)]);
        assert!(IntentScores::default().best().is_none());
    }

    #[test]
    fn test_top_ranks_highest_first() {
        let scores = IntentScores::new(vec![
            ("greeting".to_string(), 0.1),
            ("library".to_string(), 0.6),
            ("study_tips".to_string(), 0.3),
        ]);

        assert_eq!(
            scores.top(2),
            vec![("library", 0.6), ("study_tips", 0.3)]
        );
        assert_eq!(scores.top(10).len(), 3);
    }

    #[test]
    fn test_tfidf_intent_classifier() {
        let documents = vec![
            doc("librari time"),
            doc("librari open"),
            doc("book librari"),
            doc("attend requir"),
            doc("minimum attend"),
            doc("attend percentag"),
        ];
        let labels: Vec<String> = ["library", "library", "library"]
            .iter()
            .chain(["attendance", "attendance", "attendance"].iter())
            .map(|s| s.to_string())
            .collect();

        let (classifier, _) = TfIdfIntentClassifier::fit(
            &documents,
            &labels,
            &TfIdfConfig::default(),
            &LogisticRegressionConfig::default(),
        )
        .unwrap();

        assert_eq!(classifier.tags(), &["attendance", "library"]);
        assert_eq!(classifier.name(), "tfidf_logistic");

        let scores = classifier.classify(&doc("librari")).unwrap();
        let total: f64 = scores.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(scores.best().unwrap().tag, "library");

        let scores = classifier.classify(&doc("attend")).unwrap();
        assert_eq!(scores.best().unwrap().tag, "attendance");
    }

    #[test]
    fn test_from_parts_checks_dimensions() {
        let documents = vec![doc("librari"), doc("attend")];
        let labels = vec!["library".to_string(), "attendance".to_string()];
        let (classifier, _) = TfIdfIntentClassifier::fit(
            &documents,
            &labels,
            &TfIdfConfig::default(),
            &LogisticRegressionConfig::default(),
        )
        .unwrap();

        let mut other = TfIdfVectorizer::new(TfIdfConfig::default());
        other.fit(&[doc("a b c")]).unwrap();

        assert!(TfIdfIntentClassifier::from_parts(other, classifier.model().clone()).is_err());
        assert!(
            TfIdfIntentClassifier::from_parts(
                classifier.vectorizer().clone(),
                classifier.model().clone()
            )
            .is_ok()
        );
    }
}
