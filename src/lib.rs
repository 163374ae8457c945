//! # collegebot
//!
//! A help desk chatbot answering common college questions.
//!
//! ## Features
//!
//! - Quick keyword rules for instant, deterministic answers
//! - Shared English normalization pipeline (stop words, Porter stemming)
//! - TF-IDF + logistic regression intent classifier with a confidence gate
//! - Data-driven sub-category routing inside the intent catalog
//! - Reproducible replies through an injected random source

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod ml;
pub mod resolver;
pub mod rules;
pub mod session;

pub mod prelude {
    pub use crate::analysis::TextNormalizer;
    pub use crate::catalog::{Intent, IntentCatalog, KeywordRoute, ResponseSet};
    pub use crate::config::BotConfig;
    pub use crate::engine::{ChatEngine, ChatEngineBuilder, Reply, ReplySource};
    pub use crate::error::{BotError, Result};
    pub use crate::ml::{IntentClassifier, IntentScores, IntentTrainer, ModelArtifact};
    pub use crate::resolver::ResponseResolver;
    pub use crate::rules::RuleMatcher;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
