//! Keyword routes that pick a sub-category for categorized responses.
//!
//! Routes are evaluated in declaration order against the lowercased raw user
//! text (never the stems) and the first one that fires decides the
//! sub-category.

use serde::{Deserialize, Serialize};

/// How a keyword is compared against the user text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The keyword occurs anywhere in the text (`"mid"` matches `"midsem"`).
    #[default]
    Substring,
    /// The keyword equals one of the whitespace separated words.
    Token,
}

/// Lowercased user text prepared once per request for route matching.
#[derive(Debug, Clone)]
pub struct RouteInput<'a> {
    text: &'a str,
    words: Vec<&'a str>,
}

impl<'a> RouteInput<'a> {
    /// Prepare already-lowercased text.
    pub fn new(lowered: &'a str) -> Self {
        RouteInput {
            text: lowered,
            words: lowered.split_whitespace().collect(),
        }
    }

    /// Test one keyword under the given mode.
    pub fn contains(&self, keyword: &str, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Substring => self.text.contains(keyword),
            MatchMode::Token => self.words.iter().any(|word| *word == keyword),
        }
    }
}

/// One `(keywords → sub-category)` rule of an intent.
///
/// The route fires when every `all` keyword matches and, if `any` is not
/// empty, at least one `any` keyword matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRoute {
    /// Target sub-category in the intent's response map.
    pub category: String,

    /// Keywords of which at least one must match.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any: Vec<String>,

    /// Keywords that must all match.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all: Vec<String>,

    /// Keyword comparison mode.
    #[serde(default, rename = "match")]
    pub mode: MatchMode,
}

impl KeywordRoute {
    /// Create a route firing on any of `keywords` by substring.
    pub fn any_of<S, I, K>(category: S, keywords: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        KeywordRoute {
            category: category.into(),
            any: keywords.into_iter().map(Into::into).collect(),
            all: Vec::new(),
            mode: MatchMode::Substring,
        }
    }

    /// Add keywords that must all be present.
    pub fn requiring<I, K>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.all.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Set the comparison mode.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether this route fires for the prepared input.
    pub fn matches(&self, input: &RouteInput<'_>) -> bool {
        let all_match = self.all.iter().all(|kw| input.contains(kw, self.mode));
        let any_match =
            self.any.is_empty() || self.any.iter().any(|kw| input.contains(kw, self.mode));
        all_match && any_match
    }

    pub(crate) fn has_keywords(&self) -> bool {
        !self.any.is_empty() || !self.all.is_empty()
    }

    /// Lowercase and trim all keywords in place, returning the first keyword
    /// that ends up empty, if any.
    pub(crate) fn normalize_keywords(&mut self) -> Option<usize> {
        let mut empty_at = None;
        for (i, keyword) in self.any.iter_mut().chain(self.all.iter_mut()).enumerate() {
            *keyword = keyword.trim().to_lowercase();
            if keyword.is_empty() && empty_at.is_none() {
                empty_at = Some(i);
            }
        }
        empty_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_route() {
        let route = KeywordRoute::any_of("midsem", ["mid"]);

        assert!(route.matches(&RouteInput::new("when is the midsem")));
        assert!(route.matches(&RouteInput::new("mid sem dates")));
        assert!(!route.matches(&RouteInput::new("end sem dates")));
    }

    #[test]
    fn test_token_route() {
        let route =
            KeywordRoute::any_of("technical", ["ai", "coding"]).with_mode(MatchMode::Token);

        assert!(route.matches(&RouteInput::new("is there an ai club")));
        assert!(!route.matches(&RouteInput::new("i need details on clubs")));
    }

    #[test]
    fn test_all_and_any() {
        let route =
            KeywordRoute::any_of("cgpa_formula", ["formula", "calculate"]).requiring(["cgpa"]);

        assert!(route.matches(&RouteInput::new("how do i calculate cgpa")));
        assert!(!route.matches(&RouteInput::new("how do i calculate sgpa")));
        assert!(!route.matches(&RouteInput::new("what is cgpa")));

        let only_all = KeywordRoute {
            category: "both".to_string(),
            any: Vec::new(),
            all: vec!["sgpa".to_string(), "formula".to_string()],
            mode: MatchMode::Substring,
        };
        assert!(only_all.matches(&RouteInput::new("sgpa formula please")));
        assert!(!only_all.matches(&RouteInput::new("sgpa please")));
    }

    #[test]
    fn test_normalize_keywords() {
        let mut route = KeywordRoute::any_of("x", [" Mid ", "FINAL"]).requiring([" "]);
        assert_eq!(route.normalize_keywords(), Some(2));
        assert_eq!(route.any, vec!["mid", "final"]);
    }

    #[test]
    fn test_route_deserialize_defaults() {
        let route: KeywordRoute =
            serde_json::from_str(r#"{"category": "resume", "any": ["resume"]}"#).unwrap();
        assert_eq!(route.mode, MatchMode::Substring);
        assert!(route.all.is_empty());

        let route: KeywordRoute =
            serde_json::from_str(r#"{"category": "sports", "match": "token", "any": ["cricket"]}"#)
                .unwrap();
        assert_eq!(route.mode, MatchMode::Token);
    }
}
