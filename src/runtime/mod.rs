//! Runtime values, environment and evaluation for plotlisp programs

mod atom;
mod builtins;
mod environment;
mod evaluator;
mod expression;

pub use atom::{format_number, Atom, IMAGINARY_UNIT};
pub use environment::{Environment, Procedure};
pub use evaluator::{eval, is_special_form, SPECIAL_FORMS};
pub use expression::{Expression, LAMBDA_HEAD, LIST_HEAD};
