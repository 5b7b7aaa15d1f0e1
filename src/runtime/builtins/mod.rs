//! Built-in procedure library
//!
//! Every built-in follows the same pattern: check the argument count, check
//! each argument's runtime type, then compute. Arithmetic is contagious: if
//! any operand is Complex the result is Complex, otherwise it is a Number.

mod arithmetic;
mod complex;
mod lists;

use num_complex::Complex64;

use super::atom::Atom;
use super::environment::Procedure;
use super::expression::Expression;
use crate::error::{Error, Result};

/// Name → procedure table installed by `Environment::reset`
pub(crate) const BUILTINS: &[(&str, Procedure)] = &[
    ("+", arithmetic::add),
    ("-", arithmetic::subtract),
    ("*", arithmetic::multiply),
    ("/", arithmetic::divide),
    ("sqrt", arithmetic::sqrt),
    ("^", arithmetic::pow),
    ("ln", arithmetic::ln),
    ("sin", arithmetic::sin),
    ("cos", arithmetic::cos),
    ("tan", arithmetic::tan),
    ("real", complex::real),
    ("imag", complex::imag),
    ("mag", complex::mag),
    ("arg", complex::arg),
    ("conj", complex::conj),
    ("list", lists::list),
    ("first", lists::first),
    ("rest", lists::rest),
    ("length", lists::length),
    ("append", lists::append),
    ("join", lists::join),
    ("range", lists::range),
];

/// A numeric argument after type checking
#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    Real(f64),
    Complex(Complex64),
}

impl Numeric {
    fn as_complex(self) -> Complex64 {
        match self {
            Numeric::Real(n) => Complex64::new(n, 0.0),
            Numeric::Complex(c) => c,
        }
    }

    fn is_complex(self) -> bool {
        matches!(self, Numeric::Complex(_))
    }
}

fn expect_arity(procedure: &str, args: &[Expression], count: usize) -> Result<()> {
    if args.len() == count {
        Ok(())
    } else {
        Err(Error::arity(procedure, count.to_string(), args.len()))
    }
}

/// Accepts a leaf Number or Complex
fn numeric(procedure: &str, arg: &Expression) -> Result<Numeric> {
    if !arg.is_tail_empty() {
        return Err(Error::argument(procedure, "number or complex"));
    }
    match arg.head() {
        Atom::Number(n) => Ok(Numeric::Real(*n)),
        Atom::Complex(c) => Ok(Numeric::Complex(*c)),
        _ => Err(Error::argument(procedure, "number or complex")),
    }
}

/// Accepts a leaf Number only
fn number(procedure: &str, arg: &Expression) -> Result<f64> {
    match numeric(procedure, arg) {
        Ok(Numeric::Real(n)) => Ok(n),
        _ => Err(Error::argument(procedure, "number")),
    }
}

/// Accepts a leaf Complex only
fn complex_only(procedure: &str, arg: &Expression) -> Result<Complex64> {
    match numeric(procedure, arg) {
        Ok(Numeric::Complex(c)) => Ok(c),
        _ => Err(Error::argument(procedure, "complex")),
    }
}

/// Accepts a List value
fn list_arg<'a>(procedure: &str, arg: &'a Expression) -> Result<&'a [Expression]> {
    if arg.is_list() {
        Ok(arg.as_list())
    } else {
        Err(Error::argument(procedure, "list"))
    }
}

/// Builds a Complex result when `complex` is set, a Number otherwise
fn contagious(value: Complex64, complex: bool) -> Expression {
    if complex {
        Expression::from(value)
    } else {
        Expression::from(value.re)
    }
}
