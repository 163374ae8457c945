//! The request pipeline.
//!
//! A [`ChatEngine`] is built once at startup and then only read. Each call to
//! [`ChatEngine::respond`] runs:
//!
//! ```text
//! raw text → quick rules ─hit→ rule response
//!              │
//!              └miss→ normalize → classify → confidence gate ─low→ fallback
//!                                                 │
//!                                                 └ok→ resolve(tag, raw text)
//! ```
//!
//! `respond` never fails. Every comprehension problem ends in the configured
//! fallback text, and [`Reply::source`] tells the caller which branch was
//! taken.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use collegebot::analysis::TextNormalizer;
//! use collegebot::catalog::IntentCatalog;
//! use collegebot::engine::{ChatEngineBuilder, ReplySource};
//! use collegebot::ml::IntentTrainer;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let catalog = Arc::new(IntentCatalog::builtin().unwrap());
//! let (classifier, _) = IntentTrainer::new(TextNormalizer::new()).train(&catalog).unwrap();
//! let engine = ChatEngineBuilder::new(catalog)
//!     .classifier(Arc::new(classifier))
//!     .build()
//!     .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let reply = engine.respond("what sports clubs are there", &mut rng);
//! assert!(matches!(reply.source, ReplySource::Rule { .. }));
//! ```

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::TextNormalizer;
use crate::catalog::IntentCatalog;
use crate::error::{BotError, Result};
use crate::ml::IntentClassifier;
use crate::resolver::{Resolution, ResponseResolver};
use crate::rules::RuleMatcher;

/// The single apology wording used for every unresolvable request.
pub const DEFAULT_FALLBACK: &str = "Sorry, I didn't understand that.";

/// Number of ranked candidates written to the debug log per request.
const TOP_CANDIDATES_LOGGED: usize = 3;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Replies below this best-tag probability use the fallback.
    pub confidence_threshold: f64,
    /// Text returned when the bot cannot answer.
    pub fallback_response: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            confidence_threshold: 0.20,
            fallback_response: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(BotError::configuration(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if self.fallback_response.trim().is_empty() {
            return Err(BotError::configuration("fallback_response must not be empty"));
        }
        Ok(())
    }
}

/// Which branch of the pipeline produced a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplySource {
    /// A quick rule answered before classification.
    Rule { name: String },
    /// The classifier's tag was resolved from the catalog.
    Intent {
        tag: String,
        confidence: f64,
        category: Option<String>,
    },
    /// The best tag was below the confidence threshold.
    LowConfidence { tag: String, confidence: f64 },
    /// The classifier emitted a tag the catalog does not know.
    UnknownTag { tag: String },
    /// The input normalized to no tokens.
    Empty,
    /// Normalization or classification failed.
    Failed { reason: String },
}

/// Reply text with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

impl Reply {
    /// Whether the reply is the fallback apology.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self.source,
            ReplySource::LowConfidence { .. }
                | ReplySource::UnknownTag { .. }
                | ReplySource::Empty
                | ReplySource::Failed { .. }
        )
    }
}

/// Immutable request context shared by every request handler.
pub struct ChatEngine {
    catalog: Arc<IntentCatalog>,
    rules: RuleMatcher,
    normalizer: TextNormalizer,
    classifier: Arc<dyn IntentClassifier>,
    resolver: ResponseResolver,
    config: EngineConfig,
}

impl std::fmt::Debug for ChatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatEngine")
            .field("intents", &self.catalog.len())
            .field("rules", &self.rules.len())
            .field("normalizer", &self.normalizer)
            .field("classifier", &self.classifier.name())
            .field("config", &self.config)
            .finish()
    }
}

impl ChatEngine {
    /// Answer one user message.
    pub fn respond<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Reply {
        if let Some(rule) = self.rules.match_rule_named(text) {
            return Reply {
                text: rule.response.clone(),
                source: ReplySource::Rule {
                    name: rule.name.clone(),
                },
            };
        }

        let tokens = match self.normalizer.normalize(text) {
            Ok(tokens) => tokens,
            Err(e) => return self.failed(e),
        };
        // A trained model would only score its bias terms (the class prior)
        // here. Skipping it assumes no class prior reaches the threshold.
        if tokens.is_empty() {
            log::debug!("input normalized to no tokens");
            return self.fallback(ReplySource::Empty);
        }

        let scores = match self.classifier.classify(&tokens) {
            Ok(scores) => scores,
            Err(e) => return self.failed(e),
        };
        log::debug!(
            "classified {:?}, top candidates {:?}",
            tokens,
            scores.top(TOP_CANDIDATES_LOGGED)
        );
        let Some(best) = scores.best() else {
            return self.failed(BotError::model(format!(
                "classifier '{}' returned no scores",
                self.classifier.name()
            )));
        };

        if best.confidence < self.config.confidence_threshold {
            return self.fallback(ReplySource::LowConfidence {
                tag: best.tag,
                confidence: best.confidence,
            });
        }

        match self.resolver.resolve_detailed(&best.tag, text, rng) {
            Resolution::Response { text, category } => Reply {
                text: text.to_string(),
                source: ReplySource::Intent {
                    tag: best.tag,
                    confidence: best.confidence,
                    category: category.map(str::to_string),
                },
            },
            Resolution::UnknownTag => self.fallback(ReplySource::UnknownTag { tag: best.tag }),
        }
    }

    fn fallback(&self, source: ReplySource) -> Reply {
        Reply {
            text: self.config.fallback_response.clone(),
            source,
        }
    }

    fn failed(&self, error: BotError) -> Reply {
        log::error!("request degraded to fallback: {error}");
        self.fallback(ReplySource::Failed {
            reason: error.to_string(),
        })
    }

    pub fn catalog(&self) -> &Arc<IntentCatalog> {
        &self.catalog
    }

    pub fn rules(&self) -> &RuleMatcher {
        &self.rules
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> &Arc<dyn IntentClassifier> {
        &self.classifier
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Builder for [`ChatEngine`].
pub struct ChatEngineBuilder {
    catalog: Arc<IntentCatalog>,
    rules: RuleMatcher,
    normalizer: TextNormalizer,
    classifier: Option<Arc<dyn IntentClassifier>>,
    config: EngineConfig,
}

impl ChatEngineBuilder {
    /// Start from a catalog with the default rules, normalizer and settings.
    pub fn new(catalog: Arc<IntentCatalog>) -> Self {
        ChatEngineBuilder {
            catalog,
            rules: RuleMatcher::college_defaults(),
            normalizer: TextNormalizer::new(),
            classifier: None,
            config: EngineConfig::default(),
        }
    }

    pub fn rules(mut self, rules: RuleMatcher) -> Self {
        self.rules = rules;
        self
    }

    pub fn normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn confidence_threshold(mut self, threshold: f64) -> Self {
        self.config.confidence_threshold = threshold;
        self
    }

    pub fn fallback_response<S: Into<String>>(mut self, text: S) -> Self {
        self.config.fallback_response = text.into();
        self
    }

    /// Validate the settings and assemble the engine.
    pub fn build(self) -> Result<ChatEngine> {
        self.config.validate()?;
        let classifier = self
            .classifier
            .ok_or_else(|| BotError::configuration("chat engine needs a classifier"))?;

        let missing: Vec<&str> = classifier
            .tags()
            .iter()
            .map(String::as_str)
            .filter(|tag| !self.catalog.contains(tag))
            .collect();
        if !missing.is_empty() {
            log::warn!(
                "classifier '{}' can emit tags missing from the catalog: {}",
                classifier.name(),
                missing.join(", ")
            );
        }

        log::info!(
            "chat engine ready: {} intents, {} quick rules, classifier '{}', threshold {}",
            self.catalog.len(),
            self.rules.len(),
            classifier.name(),
            self.config.confidence_threshold
        );

        let resolver =
            ResponseResolver::new(Arc::clone(&self.catalog), &self.config.fallback_response);

        Ok(ChatEngine {
            catalog: self.catalog,
            rules: self.rules,
            normalizer: self.normalizer,
            classifier,
            resolver,
            config: self.config,
        })
    }
}
