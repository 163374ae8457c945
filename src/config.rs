//! Bot configuration.
//!
//! Every field has a default, so a configuration file only needs the values
//! it changes:
//!
//! ```json
//! {
//!   "engine": { "confidence_threshold": 0.3 },
//!   "chat": { "exit_keywords": ["exit", "quit"] }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;
use crate::error::{BotError, Result};
use crate::ml::logistic::LogisticRegressionConfig;
use crate::ml::tfidf::TfIdfConfig;

/// Interactive session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Cosmetic pause before each reply, in milliseconds.
    pub typing_delay_ms: u64,
    /// Inputs that end the session (compared case-insensitively).
    pub exit_keywords: Vec<String>,
    /// Printed when the session ends.
    pub farewell: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            typing_delay_ms: 0,
            exit_keywords: vec!["exit".to_string(), "quit".to_string(), "bye".to_string()],
            farewell: "Goodbye!".to_string(),
        }
    }
}

impl ChatConfig {
    /// Whether the input ends the session.
    pub fn is_exit(&self, input: &str) -> bool {
        let input = input.trim();
        self.exit_keywords
            .iter()
            .any(|keyword| keyword.eq_ignore_ascii_case(input))
    }
}

/// Configuration for the whole bot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Request pipeline settings.
    pub engine: EngineConfig,
    /// Feature extraction settings.
    pub vectorizer: TfIdfConfig,
    /// Classifier optimization settings.
    pub training: LogisticRegressionConfig,
    /// Interactive session settings.
    pub chat: ChatConfig,
}

impl BotConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: BotConfig = serde_json::from_str(json)
            .map_err(|e| BotError::configuration(format!("malformed configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        self.vectorizer.validate()?;
        self.training.validate()?;
        if self.chat.exit_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(BotError::configuration(
                "chat.exit_keywords needs at least one keyword",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();

        assert_eq!(config.engine.confidence_threshold, 0.20);
        assert_eq!(
            config.engine.fallback_response,
            "Sorry, I didn't understand that."
        );
        assert_eq!(config.vectorizer.max_features, 3000);
        assert_eq!(config.training.max_iter, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document() {
        let config =
            BotConfig::from_json_str(r#"{"engine": {"confidence_threshold": 0.35}}"#).unwrap();

        assert_eq!(config.engine.confidence_threshold, 0.35);
        assert_eq!(config.engine.fallback_response, EngineConfig::default().fallback_response);
        assert_eq!(config.chat, ChatConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        let err = BotConfig::from_json_str(r#"{"engine": {"confidence_threshold": 2.0}}"#)
            .unwrap_err();
        assert!(err.is_configuration());

        let err = BotConfig::from_json_str(r#"{"vectorizer": {"ngram_min": 3, "ngram_max": 2}}"#)
            .unwrap_err();
        assert!(err.is_configuration());

        let err = BotConfig::from_json_str(r#"{"chat": {"exit_keywords": []}}"#).unwrap_err();
        assert!(err.is_configuration());

        assert!(BotConfig::from_json_str("{").unwrap_err().is_configuration());
    }

    #[test]
    fn test_exit_keywords() {
        let chat = ChatConfig::default();
        assert!(chat.is_exit("  QUIT "));
        assert!(chat.is_exit("bye"));
        assert!(!chat.is_exit("bye for now"));
    }

    #[test]
    fn test_load_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"chat": {"typing_delay_ms": 250}}"#).unwrap();

        let config = BotConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.typing_delay_ms, 250);
    }
}
