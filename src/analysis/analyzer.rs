//! Analyzers combine char filters, a tokenizer and token filters into one
//! text processing pipeline.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Tokens
//! ```
//!
//! - [`PipelineAnalyzer`](pipeline::PipelineAnalyzer) - Custom tokenizer + filter chains
//! - [`EnglishAnalyzer`](english::EnglishAnalyzer) - Lowercase, punctuation,
//!   stop words and Porter stemming

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Analyzers are shared by all request handlers, hence `Send + Sync`.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod english;
pub mod pipeline;

pub use english::EnglishAnalyzer;
pub use pipeline::PipelineAnalyzer;
