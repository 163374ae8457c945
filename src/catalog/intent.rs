//! Intent definitions and their response collections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::route::KeywordRoute;

/// Name of the sub-category every categorized response set must carry.
pub const GENERAL_CATEGORY: &str = "general";

/// The responses of one intent.
///
/// In the catalog document a JSON array becomes [`ResponseSet::Flat`] and a
/// JSON object becomes [`ResponseSet::Categorized`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseSet {
    /// Responses picked uniformly at random.
    Flat(Vec<String>),
    /// Responses partitioned by sub-category, with a `general` fallback.
    Categorized(BTreeMap<String, Vec<String>>),
}

impl ResponseSet {
    /// Responses of a sub-category. A flat set has no sub-categories.
    pub fn category(&self, name: &str) -> Option<&[String]> {
        match self {
            ResponseSet::Flat(_) => None,
            ResponseSet::Categorized(map) => map.get(name).map(Vec::as_slice),
        }
    }

    /// Whether the given sub-category exists.
    pub fn has_category(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    /// Sub-category names in sorted order; empty for a flat set.
    pub fn category_names(&self) -> Vec<&str> {
        match self {
            ResponseSet::Flat(_) => Vec::new(),
            ResponseSet::Categorized(map) => map.keys().map(String::as_str).collect(),
        }
    }

    /// Every response string in the set.
    pub fn all_responses(&self) -> Vec<&str> {
        match self {
            ResponseSet::Flat(list) => list.iter().map(String::as_str).collect(),
            ResponseSet::Categorized(map) => {
                map.values().flatten().map(String::as_str).collect()
            }
        }
    }

    /// Total number of response strings.
    pub fn len(&self) -> usize {
        match self {
            ResponseSet::Flat(list) => list.len(),
            ResponseSet::Categorized(map) => map.values().map(Vec::len).sum(),
        }
    }

    /// Whether the set holds no response at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single intent of the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Unique identifier of the intent.
    pub tag: String,

    /// Example utterances, only used to train the classifier.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Canned responses.
    pub responses: ResponseSet,

    /// Ordered sub-category routes, only meaningful for categorized responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<KeywordRoute>,
}

impl Intent {
    /// Create an intent with a flat list of responses.
    pub fn flat<S, I, R>(tag: S, responses: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Intent {
            tag: tag.into(),
            patterns: Vec::new(),
            responses: ResponseSet::Flat(responses.into_iter().map(Into::into).collect()),
            routes: Vec::new(),
        }
    }

    /// Create an intent with an empty categorized response map.
    pub fn categorized<S: Into<String>>(tag: S) -> Self {
        Intent {
            tag: tag.into(),
            patterns: Vec::new(),
            responses: ResponseSet::Categorized(BTreeMap::new()),
            routes: Vec::new(),
        }
    }

    /// Add responses under a sub-category. Converts a flat set into a
    /// categorized one, keeping the flat responses as `general`.
    pub fn with_category<S, I, R>(mut self, name: S, responses: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        let responses: Vec<String> = responses.into_iter().map(Into::into).collect();
        if let ResponseSet::Flat(list) = &mut self.responses {
            let mut map = BTreeMap::new();
            if !list.is_empty() {
                map.insert(GENERAL_CATEGORY.to_string(), std::mem::take(list));
            }
            self.responses = ResponseSet::Categorized(map);
        }
        if let ResponseSet::Categorized(map) = &mut self.responses {
            map.entry(name.into()).or_default().extend(responses);
        }
        self
    }

    /// Add training patterns.
    pub fn with_patterns<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Append a keyword route.
    pub fn with_route(mut self, route: KeywordRoute) -> Self {
        self.routes.push(route);
        self
    }
}
