//! plotlisp parser module
//!
//! Turns a token sequence into a single expression tree.

mod stack_parser;

pub use stack_parser::{parse, parse_str, StackParser};
