//! Statistical intent classification.
//!
//! - [`tfidf`]: n-gram TF-IDF features over normalized stems
//! - [`logistic`]: multinomial logistic regression
//! - [`intent_classifier`]: the [`IntentClassifier`] seam and its TF-IDF
//!   implementation
//! - [`trainer`]: fits a classifier from catalog patterns
//! - [`artifact`]: versioned on-disk model files

pub mod artifact;
pub mod intent_classifier;
pub mod logistic;
pub mod tfidf;
pub mod trainer;

pub use artifact::ModelArtifact;
pub use intent_classifier::{
    ClassificationResult, IntentClassifier, IntentScores, TfIdfIntentClassifier,
};
pub use logistic::{LogisticRegression, LogisticRegressionConfig};
pub use tfidf::{SparseVector, TfIdfConfig, TfIdfVectorizer};
pub use trainer::{IntentTrainer, TrainingSummary};
