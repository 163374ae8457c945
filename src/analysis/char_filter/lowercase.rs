//! Lowercase char filter.

use crate::analysis::char_filter::CharFilter;

/// Converts the whole input to lowercase before tokenization.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_char_filter() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("What Is My CGPA?"), "what is my cgpa?");
        assert_eq!(filter.filter("ÉTUDE"), "étude");
        assert_eq!(filter.filter(""), "");
    }
}
