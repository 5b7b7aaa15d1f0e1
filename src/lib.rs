//! # plotlisp - A Small Lisp for Plotting
//!
//! A tree-walking interpreter for a small prefix-notation Lisp with real and
//! complex arithmetic, lists, lambdas, property-annotated values, and a
//! threaded evaluation kernel that a front end can feed program text.
//!
//! ## Quick Start
//!
//! ```rust
//! use plotlisp::{Environment, Expression, Parser, Tokenizer};
//!
//! # fn main() -> plotlisp::Result<()> {
//! let tokens = Tokenizer::new("(begin (define r 10) (* r r))").tokenize();
//! let program = Parser::new(tokens).parse();
//! assert!(!program.is_none());
//!
//! let mut env = Environment::new();
//! let result = program.eval(&mut env)?;
//! assert_eq!(result, Expression::from(100.0));
//! # Ok(())
//! # }
//! ```
//!
//! ### Using the Interpreter
//!
//! [`Interpreter`] bundles parsing and evaluation over one environment:
//!
//! ```rust
//! use plotlisp::{Interpreter, Message};
//!
//! let mut interp = Interpreter::new();
//! let reply = interp.eval_text("(map sqrt (list 4 -4))");
//! match reply {
//!     Message::Result(value) => assert_eq!(value.to_string(), "(2 0,2)"),
//!     other => panic!("unexpected reply: {:?}", other),
//! }
//! ```
//!
//! ## Language Overview
//!
//! ### Data Types
//!
//! - **Number**: `f64`, printed like C's `%g`
//! - **Complex**: `I` is the imaginary unit, printed as `re,im`
//! - **String**: `"text"`, quotes kept
//! - **List**: `(list 1 2 3)`, printed as `(1 2 3)`
//! - **Lambda**: `(lambda (x) (* x x))`
//!
//! ### Special Forms
//!
//! - `(begin e1 e2 ...)` - Evaluate in order, return the last value
//! - `(define name value)` - Bind a name; names cannot be rebound
//! - `(lambda (params...) body)` - Procedure value
//! - `(apply proc (list ...))` / `(map proc (list ...))`
//! - `(set-property "key" value target)` / `(get-property "key" target)`
//!
//! ### Built-in Procedures
//!
//! - **Arithmetic**: `+ - * / sqrt ^ ln sin cos tan`
//! - **Complex**: `real imag mag arg conj`
//! - **Lists**: `list first rest length append join range`
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Tokenizer → Tokens → Parser → Expression → eval(Environment) → Expression
//! ```
//!
//! - [`Tokenizer`] - Splits source text into tokens
//! - [`Parser`] - Builds one [`Expression`] from tokens
//! - [`Environment`] - Symbol table of values and built-ins
//! - [`eval`] - Evaluates an expression in an environment
//! - [`Kernel`] - Runs an [`Interpreter`] on a worker thread
//!
//! ## Error Handling
//!
//! Parse failures yield the empty expression (check [`Expression::is_none`]).
//! Evaluation failures are [`Error`] values:
//!
//! ```rust
//! use plotlisp::{Environment, Error, Parser};
//!
//! let program = Parser::from_source("(ln -1)").parse();
//! let err = program.eval(&mut Environment::new()).unwrap_err();
//! assert!(matches!(err, Error::DomainError { .. }));
//! ```

/// Version of the plotlisp interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod interpreter;
pub mod kernel;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use error::{Error, Result};
pub use interpreter::Interpreter;
pub use kernel::{Kernel, KernelConfig, Message, MessageQueue};
pub use lexer::{tokenize, Token, Tokenizer};
pub use parser::{parse, parse_str, StackParser};
pub use runtime::{eval, Atom, Environment, Expression, Procedure};

/// Type alias for the stack-machine parser.
/// Converts tokens into a single expression tree.
pub type Parser = StackParser;
