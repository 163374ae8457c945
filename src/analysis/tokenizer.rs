//! Tokenizers that split text into word tokens.
//!
//! Tokenizers are the first token-producing step in the analysis pipeline.
//! Only Unicode word-boundary tokenization is needed here: naive whitespace
//! splitting would keep stray symbols glued to words.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so an analyzer can be shared by every
/// request-handling thread.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod unicode_word;
