//! Arithmetic and transcendental built-ins

use num_complex::Complex64;

use super::{contagious, expect_arity, number, numeric, Numeric};
use crate::error::{Error, Result};
use crate::runtime::Expression;

/// `(+ a b ...)`: sum of any number of operands
pub(super) fn add(args: &[Expression]) -> Result<Expression> {
    let mut sum = Complex64::new(0.0, 0.0);
    let mut has_complex = false;

    for arg in args {
        let value = numeric("add", arg)?;
        has_complex |= value.is_complex();
        sum += value.as_complex();
    }

    Ok(contagious(sum, has_complex))
}

/// `(* a b ...)`: product of any number of operands
pub(super) fn multiply(args: &[Expression]) -> Result<Expression> {
    let mut real_product = 1.0;
    let mut product = Complex64::new(1.0, 0.0);
    let mut has_complex = false;

    for arg in args {
        let value = numeric("multiply", arg)?;
        has_complex |= value.is_complex();
        if let Numeric::Real(n) = value {
            real_product *= n;
        }
        product *= value.as_complex();
    }

    if has_complex {
        Ok(Expression::from(product))
    } else {
        Ok(Expression::from(real_product))
    }
}

/// `(- a)` negates, `(- a b)` subtracts
pub(super) fn subtract(args: &[Expression]) -> Result<Expression> {
    match args {
        [a] => match numeric("negate", a)? {
            Numeric::Real(n) => Ok(Expression::from(-n)),
            Numeric::Complex(c) => Ok(Expression::from(-c)),
        },
        [a, b] => match (numeric("subtract", a)?, numeric("subtract", b)?) {
            (Numeric::Real(x), Numeric::Real(y)) => Ok(Expression::from(x - y)),
            (x, y) => Ok(Expression::from(x.as_complex() - y.as_complex())),
        },
        _ => Err(Error::arity("subtract", "1 or 2", args.len())),
    }
}

/// `(/ a b)`
pub(super) fn divide(args: &[Expression]) -> Result<Expression> {
    expect_arity("divide", args, 2)?;
    match (numeric("divide", &args[0])?, numeric("divide", &args[1])?) {
        (Numeric::Real(x), Numeric::Real(y)) => Ok(Expression::from(x / y)),
        (x, y) => Ok(Expression::from(x.as_complex() / y.as_complex())),
    }
}

/// `(sqrt a)`: Complex for negative Numbers and Complex input
pub(super) fn sqrt(args: &[Expression]) -> Result<Expression> {
    expect_arity("sqrt", args, 1)?;
    match numeric("sqrt", &args[0])? {
        Numeric::Real(n) if n >= 0.0 => Ok(Expression::from(n.sqrt())),
        value => Ok(Expression::from(value.as_complex().sqrt())),
    }
}

/// `(^ a b)`: two Numbers need `a >= 0` and `b > 0`; otherwise Complex power
pub(super) fn pow(args: &[Expression]) -> Result<Expression> {
    expect_arity("pow", args, 2)?;
    let base = numeric("pow", &args[0])?;
    let exponent = numeric("pow", &args[1])?;

    match (base, exponent) {
        (Numeric::Real(a), Numeric::Real(b)) => {
            if a >= 0.0 && b > 0.0 {
                Ok(Expression::from(a.powf(b)))
            } else {
                Err(Error::domain(
                    "pow",
                    "real base must be non-negative and exponent positive",
                ))
            }
        }
        (a, b) => Ok(contagious(a.as_complex().powc(b.as_complex()), true)),
    }
}

/// `(ln a)` for a non-negative Number
pub(super) fn ln(args: &[Expression]) -> Result<Expression> {
    expect_arity("ln", args, 1)?;
    let n = number("ln", &args[0])?;
    if n < 0.0 {
        return Err(Error::domain("ln", "argument is negative"));
    }
    Ok(Expression::from(n.ln()))
}

pub(super) fn sin(args: &[Expression]) -> Result<Expression> {
    expect_arity("sin", args, 1)?;
    Ok(Expression::from(number("sin", &args[0])?.sin()))
}

pub(super) fn cos(args: &[Expression]) -> Result<Expression> {
    expect_arity("cos", args, 1)?;
    Ok(Expression::from(number("cos", &args[0])?.cos()))
}

pub(super) fn tan(args: &[Expression]) -> Result<Expression> {
    expect_arity("tan", args, 1)?;
    Ok(Expression::from(number("tan", &args[0])?.tan()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Atom;

    fn n(value: f64) -> Expression {
        Expression::from(value)
    }

    fn c(re: f64, im: f64) -> Expression {
        Expression::from(Complex64::new(re, im))
    }

    #[test]
    fn test_add() {
        assert_eq!(add(&[n(1.0), n(2.0)]).unwrap(), n(3.0));
        assert_eq!(add(&[n(1.0), n(2.0), n(3.5)]).unwrap(), n(6.5));
        assert_eq!(add(&[c(0.0, 1.0), c(0.0, 1.0)]).unwrap(), c(0.0, 2.0));
        assert_eq!(add(&[n(1.0), c(0.0, 1.0)]).unwrap(), c(1.0, 1.0));
    }

    #[test]
    fn test_add_rejects_non_numbers() {
        let s = Expression::new(Atom::string("x"));
        assert!(matches!(
            add(&[n(1.0), s]),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(&[n(2.0), n(3.0)]).unwrap(), n(6.0));
        assert_eq!(multiply(&[c(0.0, 1.0), c(0.0, 1.0)]).unwrap(), c(-1.0, 0.0));
        assert_eq!(multiply(&[n(2.0), c(0.0, 1.0)]).unwrap(), c(0.0, 2.0));
    }

    #[test]
    fn test_subtract_and_negate() {
        assert_eq!(subtract(&[n(5.0)]).unwrap(), n(-5.0));
        assert_eq!(subtract(&[c(1.0, 2.0)]).unwrap(), c(-1.0, -2.0));
        assert_eq!(subtract(&[n(5.0), n(3.0)]).unwrap(), n(2.0));
        assert_eq!(subtract(&[n(5.0), c(0.0, 1.0)]).unwrap(), c(5.0, -1.0));
        assert!(subtract(&[]).is_err());
        assert!(subtract(&[n(1.0), n(2.0), n(3.0)]).is_err());
    }

    #[test]
    fn test_divide() {
        assert_eq!(divide(&[n(6.0), n(3.0)]).unwrap(), n(2.0));
        assert_eq!(divide(&[c(0.0, 2.0), n(2.0)]).unwrap(), c(0.0, 1.0));
        assert!(divide(&[n(1.0)]).is_err());
        let inf = divide(&[n(1.0), n(0.0)]).unwrap();
        assert!(inf.head().as_number().is_infinite());
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(&[n(4.0)]).unwrap(), n(2.0));
        assert_eq!(sqrt(&[n(-4.0)]).unwrap(), c(0.0, 2.0));
        assert!(sqrt(&[c(-1.0, 0.0)]).unwrap().is_head_complex());
        assert!(sqrt(&[n(1.0), n(2.0)]).is_err());
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow(&[n(2.0), n(3.0)]).unwrap(), n(8.0));
        assert!(matches!(
            pow(&[n(-2.0), n(2.0)]),
            Err(Error::DomainError { .. })
        ));
        assert!(pow(&[n(2.0), n(0.0)]).is_err());

        let result = pow(&[c(0.0, 1.0), n(2.0)]).unwrap();
        let value = result.head().as_complex();
        assert!((value.re + 1.0).abs() < 1e-12);
        assert!(value.im.abs() < 1e-12);
    }

    #[test]
    fn test_ln_and_trig() {
        assert_eq!(ln(&[n(1.0)]).unwrap(), n(0.0));
        assert!(ln(&[n(-1.0)]).is_err());
        assert!(ln(&[c(1.0, 0.0)]).is_err());

        assert_eq!(sin(&[n(0.0)]).unwrap(), n(0.0));
        assert_eq!(cos(&[n(0.0)]).unwrap(), n(1.0));
        assert_eq!(tan(&[n(0.0)]).unwrap(), n(0.0));
        assert!(sin(&[c(0.0, 1.0)]).is_err());
        assert!(cos(&[]).is_err());
    }
}
