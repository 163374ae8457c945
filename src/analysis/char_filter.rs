//! Char filters that rewrite raw text before it reaches the tokenizer.
//!
//! - [`lowercase::LowercaseCharFilter`] - Lowercases the whole input
//! - [`punctuation::PunctuationCharFilter`] - Deletes punctuation characters

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod punctuation;
