//! Offline training of the intent classifier from catalog patterns.

use rayon::prelude::*;

use crate::analysis::TextNormalizer;
use crate::catalog::IntentCatalog;
use crate::error::{BotError, Result};
use crate::ml::intent_classifier::TfIdfIntentClassifier;
use crate::ml::logistic::{FitReport, LogisticRegressionConfig};
use crate::ml::tfidf::TfIdfConfig;

/// Statistics of one training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    pub samples: usize,
    pub classes: usize,
    pub vocabulary_size: usize,
    /// Patterns that normalized to no tokens at all.
    pub empty_samples: usize,
    pub fit: FitReport,
}

/// Fits a [`TfIdfIntentClassifier`] from the `(pattern, tag)` pairs of a
/// catalog.
///
/// Patterns go through the same [`TextNormalizer`] the engine uses at
/// request time.
#[derive(Debug, Clone)]
pub struct IntentTrainer {
    normalizer: TextNormalizer,
    vectorizer: TfIdfConfig,
    training: LogisticRegressionConfig,
}

impl IntentTrainer {
    pub fn new(normalizer: TextNormalizer) -> Self {
        IntentTrainer {
            normalizer,
            vectorizer: TfIdfConfig::default(),
            training: LogisticRegressionConfig::default(),
        }
    }

    pub fn with_vectorizer_config(mut self, config: TfIdfConfig) -> Self {
        self.vectorizer = config;
        self
    }

    pub fn with_training_config(mut self, config: LogisticRegressionConfig) -> Self {
        self.training = config;
        self
    }

    /// The normalizer patterns are run through.
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Train on every pattern of the catalog.
    pub fn train(
        &self,
        catalog: &IntentCatalog,
    ) -> Result<(TfIdfIntentClassifier, TrainingSummary)> {
        let samples = catalog.training_samples();
        if samples.is_empty() {
            return Err(BotError::model("catalog has no training patterns"));
        }

        log::info!(
            "training on {} patterns across {} intents",
            samples.len(),
            catalog.len()
        );

        let documents: Vec<Vec<String>> = samples
            .par_iter()
            .map(|(pattern, _)| self.normalizer.normalize(pattern))
            .collect::<Result<_>>()?;
        let labels: Vec<String> = samples.iter().map(|(_, tag)| tag.to_string()).collect();

        let empty_samples = documents.iter().filter(|doc| doc.is_empty()).count();
        if empty_samples > 0 {
            log::debug!("{empty_samples} patterns normalized to no tokens");
        }

        let (classifier, fit) =
            TfIdfIntentClassifier::fit(&documents, &labels, &self.vectorizer, &self.training)?;

        let summary = TrainingSummary {
            samples: documents.len(),
            classes: classifier.model().classes().len(),
            vocabulary_size: classifier.vectorizer().vocabulary_size(),
            empty_samples,
            fit,
        };

        log::info!(
            "trained classifier: {} classes, {} features, {} iterations",
            summary.classes,
            summary.vocabulary_size,
            summary.fit.iterations
        );

        Ok((classifier, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Intent;
    use crate::ml::intent_classifier::IntentClassifier;

    #[test]
    fn test_train_builtin_catalog() {
        let catalog = IntentCatalog::builtin().unwrap();
        let trainer = IntentTrainer::new(TextNormalizer::new());

        let (classifier, summary) = trainer.train(&catalog).unwrap();

        assert_eq!(summary.samples, catalog.pattern_count());
        assert_eq!(summary.classes, catalog.len());
        assert!(summary.vocabulary_size <= 3000);
        assert_eq!(classifier.tags().len(), catalog.len());

        let stems = trainer.normalizer().normalize("library timings").unwrap();
        let best = classifier.classify(&stems).unwrap().best().unwrap();
        assert_eq!(best.tag, "library");
    }

    #[test]
    fn test_train_without_patterns() {
        let catalog = IntentCatalog::new(vec![Intent::flat("greeting", ["Hello!"])]).unwrap();
        let trainer = IntentTrainer::new(TextNormalizer::new());

        assert!(matches!(trainer.train(&catalog), Err(BotError::Model(_))));
    }
}
