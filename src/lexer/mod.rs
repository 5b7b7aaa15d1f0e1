//! Lexical analysis for plotlisp
//!
//! Converts source text into a flat stream of OPEN / CLOSE / STRING tokens.

mod token;
mod tokenizer;

pub use token::Token;
pub use tokenizer::{tokenize, Tokenizer};
