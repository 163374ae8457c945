//! Text analysis for collegebot.
//!
//! Raw user text is turned into a sequence of stems by a pipeline of char
//! filters, a tokenizer and token filters. The same [`TextNormalizer`] is
//! used when training the intent classifier and when classifying requests,
//! so both sides always see an identical feature space.
//!
//! ```text
//! Raw Text → Lowercase → Strip Punctuation → Word Tokenizer → Stop Words → Stemmer
//! ```

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use normalizer::TextNormalizer;
