//! Quick keyword rules answered before any classification.
//!
//! Rules run against the lowercased raw text, never the stems. They are
//! checked in table order and the first rule with a matching trigger answers
//! the request.

use crate::catalog::{MatchMode, RouteInput};

/// One rule: any trigger firing returns the fixed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickRule {
    pub name: String,
    pub triggers: Vec<String>,
    pub response: String,
    pub mode: MatchMode,
}

impl QuickRule {
    /// Substring rule. Triggers are lowercased.
    pub fn new<N, I, T, R>(name: N, triggers: I, response: R) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
        R: Into<String>,
    {
        QuickRule {
            name: name.into(),
            triggers: triggers
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
            response: response.into(),
            mode: MatchMode::Substring,
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    fn fires(&self, input: &RouteInput<'_>) -> bool {
        self.triggers
            .iter()
            .any(|trigger| input.contains(trigger, self.mode))
    }
}

/// Ordered table of quick rules.
#[derive(Debug, Clone, Default)]
pub struct RuleMatcher {
    rules: Vec<QuickRule>,
}

impl RuleMatcher {
    /// An empty matcher that never fires.
    pub fn new() -> Self {
        RuleMatcher { rules: Vec::new() }
    }

    /// The help desk rule table.
    ///
    /// Triggers match as substrings, so short ones also fire inside longer
    /// words: "ai" in "explain", "dance" in "attendance".
    pub fn college_defaults() -> Self {
        RuleMatcher::new()
            .with_rule(QuickRule::new(
                "technical_societies",
                ["technical", "coding", "robot", "ai"],
                "You can join coding, robotics, AI or cybersecurity societies.",
            ))
            .with_rule(QuickRule::new(
                "sports_clubs",
                ["sports", "football", "cricket", "badminton"],
                "Sports clubs include football, cricket and badminton teams.",
            ))
            .with_rule(QuickRule::new(
                "cultural_societies",
                ["cultural", "dance", "music", "drama"],
                "Cultural societies include dance, drama and music clubs.",
            ))
            .with_rule(QuickRule::new(
                "sgpa_formula",
                ["sgpa formula"],
                "SGPA = Sum of (Grade Point × Subject Credits) ÷ Total Semester Credits.",
            ))
            .with_rule(QuickRule::new(
                "cgpa_formula",
                ["cgpa formula"],
                "CGPA = Total Grade Points ÷ Total Credits.",
            ))
            .with_rule(QuickRule::new(
                "good_cgpa",
                ["good cgpa"],
                "CGPA above 7 is considered good, above 8 is very strong.",
            ))
    }

    /// Append a rule at the lowest priority.
    pub fn with_rule(mut self, rule: QuickRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Return the response of the first rule that fires.
    pub fn match_rule(&self, raw_text: &str) -> Option<&str> {
        self.match_rule_named(raw_text)
            .map(|rule| rule.response.as_str())
    }

    /// Like [`match_rule`](Self::match_rule) but returns the whole rule.
    pub fn match_rule_named(&self, raw_text: &str) -> Option<&QuickRule> {
        if self.rules.is_empty() {
            return None;
        }
        let lowered = raw_text.to_lowercase();
        let input = RouteInput::new(&lowered);
        let rule = self.rules.iter().find(|rule| rule.fires(&input))?;
        log::debug!("quick rule '{}' matched", rule.name);
        Some(rule)
    }

    pub fn rules(&self) -> &[QuickRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let matcher = RuleMatcher::college_defaults();

        assert_eq!(
            matcher.match_rule("what sports clubs are there"),
            Some("Sports clubs include football, cricket and badminton teams.")
        );
        assert_eq!(
            matcher.match_rule("CGPA formula"),
            Some("CGPA = Total Grade Points ÷ Total Credits.")
        );
        assert_eq!(
            matcher.match_rule("Is 7.5 a good CGPA?"),
            Some("CGPA above 7 is considered good, above 8 is very strong.")
        );
        assert_eq!(matcher.match_rule("library timings"), None);
    }

    #[test]
    fn test_first_rule_wins() {
        let matcher = RuleMatcher::college_defaults();
        // mentions both technical and sports triggers
        let rule = matcher
            .match_rule_named("coding club or cricket team?")
            .unwrap();
        assert_eq!(rule.name, "technical_societies");
    }

    #[test]
    fn test_substring_semantics() {
        let matcher = RuleMatcher::college_defaults();
        // "robot" occurs inside "robotics"
        assert_eq!(
            matcher.match_rule_named("robotics society").unwrap().name,
            "technical_societies"
        );

        let token_only = RuleMatcher::new().with_rule(
            QuickRule::new("ai", ["ai"], "AI club").with_mode(MatchMode::Token),
        );
        assert_eq!(token_only.match_rule("explain the rules"), None);
        assert_eq!(token_only.match_rule("is there an ai club"), Some("AI club"));
    }

    #[test]
    fn test_triggers_inside_longer_words() {
        let matcher = RuleMatcher::college_defaults();

        let rule = matcher.match_rule_named("minimum attendance").unwrap();
        assert_eq!(rule.name, "cultural_societies");
        let rule = matcher.match_rule_named("explain the rules").unwrap();
        assert_eq!(rule.name, "technical_societies");

        assert!(matcher.match_rule_named("how many classes can i miss").is_none());
    }

    #[test]
    fn test_empty_matcher() {
        let matcher = RuleMatcher::new();
        assert!(matcher.is_empty());
        assert_eq!(matcher.match_rule("sports"), None);
    }
}
