//! Complex-number accessors; each takes exactly one Complex argument

use super::{complex_only, expect_arity};
use crate::error::Result;
use crate::runtime::Expression;

pub(super) fn real(args: &[Expression]) -> Result<Expression> {
    expect_arity("real", args, 1)?;
    Ok(Expression::from(complex_only("real", &args[0])?.re))
}

pub(super) fn imag(args: &[Expression]) -> Result<Expression> {
    expect_arity("imag", args, 1)?;
    Ok(Expression::from(complex_only("imag", &args[0])?.im))
}

/// Magnitude as a Number
pub(super) fn mag(args: &[Expression]) -> Result<Expression> {
    expect_arity("mag", args, 1)?;
    Ok(Expression::from(complex_only("mag", &args[0])?.norm()))
}

/// Phase angle in radians as a Number
pub(super) fn arg(args: &[Expression]) -> Result<Expression> {
    expect_arity("arg", args, 1)?;
    Ok(Expression::from(complex_only("arg", &args[0])?.arg()))
}

pub(super) fn conj(args: &[Expression]) -> Result<Expression> {
    expect_arity("conj", args, 1)?;
    Ok(Expression::from(complex_only("conj", &args[0])?.conj()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn c(re: f64, im: f64) -> Expression {
        Expression::from(Complex64::new(re, im))
    }

    #[test]
    fn test_parts() {
        assert_eq!(real(&[c(3.0, 4.0)]).unwrap(), Expression::from(3.0));
        assert_eq!(imag(&[c(3.0, 4.0)]).unwrap(), Expression::from(4.0));
        assert_eq!(mag(&[c(3.0, 4.0)]).unwrap(), Expression::from(5.0));
        assert_eq!(
            arg(&[c(0.0, 1.0)]).unwrap(),
            Expression::from(std::f64::consts::FRAC_PI_2)
        );
        assert_eq!(conj(&[c(3.0, 4.0)]).unwrap(), c(3.0, -4.0));
    }

    #[test]
    fn test_numbers_are_rejected() {
        assert!(real(&[Expression::from(1.0)]).is_err());
        assert!(mag(&[Expression::from(1.0)]).is_err());
        assert!(conj(&[c(1.0, 1.0), c(1.0, 1.0)]).is_err());
    }
}
