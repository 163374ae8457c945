//! Punctuation removal char filter.
//!
//! Punctuation is deleted rather than replaced with whitespace, so a
//! contraction such as `don't` collapses into the single word `dont` and
//! `e-mail` into `email`.
//!
//! # Examples
//!
//! ```
//! use collegebot::analysis::char_filter::CharFilter;
//! use collegebot::analysis::char_filter::punctuation::PunctuationCharFilter;
//!
//! let filter = PunctuationCharFilter::new();
//! assert_eq!(filter.filter("what's the cgpa?!"), "whats the cgpa");
//! ```

use crate::analysis::char_filter::CharFilter;

/// Deletes ASCII punctuation characters (``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``).
///
/// Typographic punctuation such as curly quotes is left alone.
#[derive(Clone, Debug, Default)]
pub struct PunctuationCharFilter;

impl PunctuationCharFilter {
    pub fn new() -> Self {
        PunctuationCharFilter
    }
}

impl CharFilter for PunctuationCharFilter {
    fn filter(&self, input: &str) -> String {
        input.chars().filter(|c| !c.is_ascii_punctuation()).collect()
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}
