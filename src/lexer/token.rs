use serde::{Deserialize, Serialize};
use std::fmt;

/// A single token from the source text
///
/// Bare words, numbers, and quoted string literals all arrive as
/// [`Token::String`]; classifying them is the parser's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// Opening parenthesis `(`
    Open,
    /// Closing parenthesis `)`
    Close,
    /// Any other token text (string literals keep their quotes)
    String(String),
}

impl Token {
    /// Creates a text token
    pub fn text(value: impl Into<String>) -> Self {
        Token::String(value.into())
    }

    /// Returns the source text this token stands for
    pub fn as_str(&self) -> &str {
        match self {
            Token::Open => "(",
            Token::Close => ")",
            Token::String(s) => s,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(Token::Open.as_str(), "(");
        assert_eq!(Token::Close.as_str(), ")");
        assert_eq!(Token::text("define").as_str(), "define");
        assert_eq!(Token::text("\"hi\"").to_string(), "\"hi\"");
    }
}
