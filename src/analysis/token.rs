//! Token types flowing through the analysis pipeline.
//!
//! # Examples
//!
//! ```
//! use collegebot::analysis::token::Token;
//!
//! let token = Token::new("exams", 0);
//! assert_eq!(token.text, "exams");
//! assert_eq!(token.position, 0);
//! ```

use serde::{Deserialize, Serialize};

/// A single unit of text produced by a tokenizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the original token stream (0-based)
    pub position: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text, keeping the position.
    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        Token {
            text: text.into(),
            ..self
        }
    }
}

/// A stream of tokens, as produced by tokenizers and consumed by filters.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("clubs", 3);
        assert_eq!(token.text, "clubs");
        assert_eq!(token.position, 3);
        assert_eq!(token.len(), 5);
        assert!(!token.is_empty());
    }

    #[test]
    fn test_with_text_keeps_position() {
        let token = Token::new("running", 1).with_text("run");
        assert_eq!(token.text, "run");
        assert_eq!(token.position, 1);
    }
}
