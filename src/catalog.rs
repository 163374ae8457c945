//! The intent catalog: every tag the bot knows, its training patterns and its
//! canned responses.
//!
//! A catalog is loaded once at startup and is immutable afterwards, so it is
//! shared between requests behind an `Arc`. Every structural problem is
//! reported as [`BotError::Configuration`] at load time; nothing about the
//! catalog can fail at request time.
//!
//! # Document format
//!
//! ```json
//! {
//!   "intents": [
//!     {
//!       "tag": "exam_timetable",
//!       "patterns": ["when are the exams"],
//!       "responses": {"general": ["..."], "midsem": ["..."]},
//!       "routes": [{"category": "midsem", "any": ["mid"]}]
//!     }
//!   ]
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! use collegebot::catalog::IntentCatalog;
//!
//! let catalog = IntentCatalog::from_json_str(
//!     r#"{"intents": [{"tag": "greeting", "patterns": ["hi"], "responses": ["Hello!"]}]}"#,
//! )
//! .unwrap();
//!
//! assert!(catalog.contains("greeting"));
//! assert!(IntentCatalog::from_json_str(r#"{"intents": []}"#).is_err());
//! ```

pub mod intent;
pub mod route;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};

pub use intent::{GENERAL_CATEGORY, Intent, ResponseSet};
pub use route::{KeywordRoute, MatchMode, RouteInput};

const BUILTIN_CATALOG: &str = include_str!("../data/intents.json");

/// On-disk shape of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogDocument {
    intents: Vec<Intent>,
}

/// Validated, read-only collection of intents.
#[derive(Debug, Clone)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
    by_tag: AHashMap<String, usize>,
}

impl IntentCatalog {
    /// Validate intents and build a catalog.
    ///
    /// Route keywords are lowercased and trimmed as part of loading.
    pub fn new(mut intents: Vec<Intent>) -> Result<Self> {
        if intents.is_empty() {
            return Err(BotError::configuration("catalog contains no intents"));
        }

        let mut by_tag = AHashMap::with_capacity(intents.len());
        for (idx, intent) in intents.iter_mut().enumerate() {
            Self::validate_intent(intent)?;
            if by_tag.insert(intent.tag.clone(), idx).is_some() {
                return Err(BotError::configuration(format!(
                    "duplicate tag '{}'",
                    intent.tag
                )));
            }
            if intent.patterns.is_empty() {
                log::warn!(
                    "intent '{}' has no patterns and can never be predicted",
                    intent.tag
                );
            }
        }

        log::debug!("loaded intent catalog with {} intents", intents.len());
        Ok(IntentCatalog { intents, by_tag })
    }

    fn validate_intent(intent: &mut Intent) -> Result<()> {
        let tag = intent.tag.trim();
        if tag.is_empty() {
            return Err(BotError::configuration("intent with an empty tag"));
        }
        if tag.len() != intent.tag.len() {
            intent.tag = tag.to_string();
        }
        let tag = intent.tag.as_str();

        match &intent.responses {
            ResponseSet::Flat(list) => {
                if list.is_empty() {
                    return Err(BotError::configuration(format!(
                        "intent '{tag}' has no responses"
                    )));
                }
                if !intent.routes.is_empty() {
                    return Err(BotError::configuration(format!(
                        "intent '{tag}' declares routes but its responses are a flat list"
                    )));
                }
            }
            ResponseSet::Categorized(map) => {
                match map.get(GENERAL_CATEGORY) {
                    Some(general) if !general.is_empty() => {}
                    Some(_) => {
                        return Err(BotError::configuration(format!(
                            "intent '{tag}' has an empty '{GENERAL_CATEGORY}' sub-category"
                        )));
                    }
                    None => {
                        return Err(BotError::configuration(format!(
                            "intent '{tag}' is missing the '{GENERAL_CATEGORY}' sub-category"
                        )));
                    }
                }
                for route in &intent.routes {
                    if route.category.is_empty() {
                        return Err(BotError::configuration(format!(
                            "intent '{tag}' has a route without a category"
                        )));
                    }
                    if !route.has_keywords() {
                        return Err(BotError::configuration(format!(
                            "route '{}' of intent '{tag}' has no keywords",
                            route.category
                        )));
                    }
                    if !map.contains_key(&route.category) {
                        return Err(BotError::configuration(format!(
                            "route of intent '{tag}' targets missing sub-category '{}'",
                            route.category
                        )));
                    }
                }
            }
        }

        for route in &mut intent.routes {
            if route.normalize_keywords().is_some() {
                return Err(BotError::configuration(format!(
                    "route '{}' of intent '{}' has an empty keyword",
                    route.category, intent.tag
                )));
            }
        }

        Ok(())
    }

    /// Parse and validate a catalog document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| BotError::configuration(format!("malformed catalog: {e}")))?;
        Self::new(document.intents)
    }

    /// Read, parse and validate a catalog document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_reader(reader)
            .map_err(|e| BotError::configuration(format!("malformed catalog: {e}")))?;
        Self::new(document.intents)
    }

    /// Load a catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("loading intent catalog from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// The college help desk catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Serialize back into the document format.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let document = CatalogDocument {
            intents: self.intents.clone(),
        };
        let json = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(json)
    }

    /// Look up an intent by tag.
    pub fn get(&self, tag: &str) -> Option<&Intent> {
        self.by_tag.get(tag).map(|&idx| &self.intents[idx])
    }

    /// Whether the tag exists.
    pub fn contains(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Tags in document order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.intents.iter().map(|intent| intent.tag.as_str())
    }

    /// Intents in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }

    /// Number of intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Always false for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// `(pattern, tag)` pairs used to train the classifier.
    pub fn training_samples(&self) -> Vec<(&str, &str)> {
        self.intents
            .iter()
            .flat_map(|intent| {
                intent
                    .patterns
                    .iter()
                    .map(move |pattern| (pattern.as_str(), intent.tag.as_str()))
            })
            .collect()
    }

    /// Total number of training patterns.
    pub fn pattern_count(&self) -> usize {
        self.intents.iter().map(|intent| intent.patterns.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_config_error(json: &str, needle: &str) {
        match IntentCatalog::from_json_str(json) {
            Err(BotError::Configuration(msg)) => {
                assert!(msg.contains(needle), "'{msg}' does not mention '{needle}'")
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = IntentCatalog::builtin().unwrap();

        assert!(catalog.len() >= 8);
        assert!(catalog.contains("exam_timetable"));
        assert!(catalog.contains("societies_clubs"));
        assert!(catalog.pattern_count() > catalog.len());

        let exams = catalog.get("exam_timetable").unwrap();
        assert!(exams.responses.has_category("midsem"));
        assert_eq!(exams.routes[0].category, "midsem");
    }

    #[test]
    fn test_duplicate_tag() {
        assert_config_error(
            r#"{"intents": [
                {"tag": "a", "patterns": ["x"], "responses": ["r"]},
                {"tag": "a", "patterns": ["y"], "responses": ["s"]}
            ]}"#,
            "duplicate tag 'a'",
        );
    }

    #[test]
    fn test_empty_responses() {
        assert_config_error(
            r#"{"intents": [{"tag": "a", "patterns": ["x"], "responses": []}]}"#,
            "no responses",
        );
    }

    #[test]
    fn test_missing_general() {
        assert_config_error(
            r#"{"intents": [{"tag": "a", "responses": {"midsem": ["m"]}}]}"#,
            "missing the 'general'",
        );
        assert_config_error(
            r#"{"intents": [{"tag": "a", "responses": {"general": []}}]}"#,
            "empty 'general'",
        );
    }

    #[test]
    fn test_route_to_missing_category() {
        assert_config_error(
            r#"{"intents": [{
                "tag": "exam_timetable",
                "responses": {"general": ["g"]},
                "routes": [{"category": "midsem", "any": ["mid"]}]
            }]}"#,
            "missing sub-category 'midsem'",
        );
    }

    #[test]
    fn test_route_without_keywords() {
        assert_config_error(
            r#"{"intents": [{
                "tag": "a",
                "responses": {"general": ["g"], "b": ["b"]},
                "routes": [{"category": "b"}]
            }]}"#,
            "has no keywords",
        );
        assert_config_error(
            r#"{"intents": [{
                "tag": "a",
                "responses": {"general": ["g"], "b": ["b"]},
                "routes": [{"category": "b", "any": ["  "]}]
            }]}"#,
            "empty keyword",
        );
    }

    #[test]
    fn test_routes_on_flat_list() {
        assert_config_error(
            r#"{"intents": [{
                "tag": "a",
                "responses": ["r"],
                "routes": [{"category": "general", "any": ["x"]}]
            }]}"#,
            "flat list",
        );
    }

    #[test]
    fn test_malformed_document() {
        assert_config_error(r#"{"intents": "#, "malformed catalog");
        assert_config_error(r#"{"items": []}"#, "malformed catalog");
        assert_config_error(r#"{"intents": []}"#, "no intents");
        assert_config_error(
            r#"{"intents": [{"tag": " ", "responses": ["r"]}]}"#,
            "empty tag",
        );
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let catalog = IntentCatalog::from_json_str(
            r#"{"intents": [{
                "tag": "a",
                "responses": {"general": ["g"], "b": ["b"]},
                "routes": [{"category": "b", "any": [" MID "]}]
            }]}"#,
        )
        .unwrap();

        assert_eq!(catalog.get("a").unwrap().routes[0].any, vec!["mid"]);
    }

    #[test]
    fn test_training_samples_and_round_trip() {
        let catalog = IntentCatalog::new(vec![
            Intent::flat("greeting", ["Hello!"]).with_patterns(["hi", "hello"]),
            Intent::flat("thanks", ["Any time!"]).with_patterns(["thanks"]),
        ])
        .unwrap();

        assert_eq!(
            catalog.training_samples(),
            vec![("hi", "greeting"), ("hello", "greeting"), ("thanks", "thanks")]
        );
        assert_eq!(catalog.tags().collect::<Vec<_>>(), vec!["greeting", "thanks"]);

        let reloaded = IntentCatalog::from_json_str(&catalog.to_json(false).unwrap()).unwrap();
        assert_eq!(reloaded.get("thanks"), catalog.get("thanks"));
    }
}
