//! List construction and access

use super::{expect_arity, list_arg, number};
use crate::error::{Error, Result};
use crate::runtime::Expression;

/// Slack allowed when deciding whether `high` is reached by `range`
const RANGE_TOLERANCE: f64 = 1e-9;
/// Largest number of elements `range` will produce
const RANGE_MAX_ELEMENTS: f64 = 10_000_000.0;

/// `(list ...)`: a List of the evaluated arguments
pub(super) fn list(args: &[Expression]) -> Result<Expression> {
    Ok(Expression::list(args.to_vec()))
}

pub(super) fn first(args: &[Expression]) -> Result<Expression> {
    expect_arity("first", args, 1)?;
    match list_arg("first", &args[0])?.first() {
        Some(head) => Ok(head.clone()),
        None => Err(Error::domain("first", "argument is an empty list")),
    }
}

/// Everything but the first element
pub(super) fn rest(args: &[Expression]) -> Result<Expression> {
    expect_arity("rest", args, 1)?;
    match list_arg("rest", &args[0])? {
        [] => Err(Error::domain("rest", "argument is an empty list")),
        [_, remainder @ ..] => Ok(Expression::list(remainder.to_vec())),
    }
}

pub(super) fn length(args: &[Expression]) -> Result<Expression> {
    expect_arity("length", args, 1)?;
    let elements = list_arg("length", &args[0])?;
    Ok(Expression::from(elements.len() as f64))
}

/// `(append list expr)`: a copy of `list` with `expr` added at the end
pub(super) fn append(args: &[Expression]) -> Result<Expression> {
    expect_arity("append", args, 2)?;
    let mut elements = list_arg("append", &args[0])?.to_vec();
    elements.push(args[1].clone());
    Ok(Expression::list(elements))
}

/// `(join a b)`: concatenation of two lists
pub(super) fn join(args: &[Expression]) -> Result<Expression> {
    expect_arity("join", args, 2)?;
    let left = list_arg("join", &args[0])?;
    let right = list_arg("join", &args[1])?;

    let mut elements = Vec::with_capacity(left.len() + right.len());
    elements.extend_from_slice(left);
    elements.extend_from_slice(right);
    Ok(Expression::list(elements))
}

/// `(range low high step)`: `low, low + step, ...` up to and including `high`
pub(super) fn range(args: &[Expression]) -> Result<Expression> {
    expect_arity("range", args, 3)?;
    let low = number("range", &args[0])?;
    let high = number("range", &args[1])?;
    let step = number("range", &args[2])?;

    if !(low.is_finite() && high.is_finite() && step.is_finite()) {
        return Err(Error::domain("range", "bounds and step must be finite"));
    }
    if low >= high {
        return Err(Error::domain("range", "begin greater than or equal to end"));
    }
    if step <= 0.0 {
        return Err(Error::domain("range", "negative or zero increment"));
    }

    let steps = ((high - low) / step + RANGE_TOLERANCE).floor();
    if !steps.is_finite() || steps + 1.0 > RANGE_MAX_ELEMENTS {
        return Err(Error::domain("range", "too many elements"));
    }
    let steps = steps as usize;
    let elements = (0..=steps)
        .map(|i| Expression::from(low + i as f64 * step))
        .collect();
    Ok(Expression::list(elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Atom;

    fn n(value: f64) -> Expression {
        Expression::from(value)
    }

    fn numbers(values: &[f64]) -> Expression {
        Expression::list(values.iter().copied().map(Expression::from).collect())
    }

    #[test]
    fn test_list() {
        assert_eq!(list(&[]).unwrap(), Expression::list(vec![]));
        assert_eq!(list(&[n(1.0), n(2.0)]).unwrap(), numbers(&[1.0, 2.0]));
    }

    #[test]
    fn test_first_and_rest() {
        let l = numbers(&[1.0, 2.0, 3.0]);
        assert_eq!(first(&[l.clone()]).unwrap(), n(1.0));
        assert_eq!(rest(&[l]).unwrap(), numbers(&[2.0, 3.0]));
        assert_eq!(rest(&[numbers(&[1.0])]).unwrap(), numbers(&[]));
    }

    #[test]
    fn test_first_and_rest_errors() {
        assert!(matches!(
            first(&[numbers(&[])]),
            Err(Error::DomainError { .. })
        ));
        assert!(rest(&[numbers(&[])]).is_err());
        assert!(matches!(
            first(&[n(1.0)]),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(first(&[numbers(&[1.0]), numbers(&[1.0])]).is_err());
    }

    #[test]
    fn test_length() {
        assert_eq!(length(&[numbers(&[1.0, 2.0, 3.0])]).unwrap(), n(3.0));
        assert_eq!(length(&[numbers(&[])]).unwrap(), n(0.0));
        assert!(length(&[Expression::new(Atom::string("abc"))]).is_err());
    }

    #[test]
    fn test_append_and_join() {
        let l = numbers(&[1.0]);
        assert_eq!(append(&[l.clone(), n(2.0)]).unwrap(), numbers(&[1.0, 2.0]));

        let nested = append(&[l.clone(), numbers(&[2.0])]).unwrap();
        assert_eq!(nested.as_list().len(), 2);
        assert!(nested.as_list()[1].is_list());

        assert_eq!(
            join(&[l.clone(), numbers(&[2.0, 3.0])]).unwrap(),
            numbers(&[1.0, 2.0, 3.0])
        );
        assert!(join(&[l.clone(), n(2.0)]).is_err());
        assert!(append(&[n(1.0), l]).is_err());
    }

    #[test]
    fn test_range() {
        assert_eq!(
            range(&[n(0.0), n(2.0), n(1.0)]).unwrap(),
            numbers(&[0.0, 1.0, 2.0])
        );
        assert_eq!(
            range(&[n(0.0), n(1.0), n(0.5)]).unwrap(),
            numbers(&[0.0, 0.5, 1.0])
        );

        let tenths = range(&[n(0.0), n(1.0), n(0.1)]).unwrap();
        assert_eq!(tenths.as_list().len(), 11);

        let uneven = range(&[n(0.0), n(1.0), n(0.3)]).unwrap();
        assert_eq!(uneven.as_list().len(), 4);
    }

    #[test]
    fn test_range_errors() {
        assert!(range(&[n(0.0), n(1.0), n(0.0)]).is_err());
        assert!(range(&[n(2.0), n(1.0), n(1.0)]).is_err());
        assert!(range(&[n(1.0), n(1.0), n(1.0)]).is_err());
        assert!(range(&[n(0.0), n(1.0), n(-1.0)]).is_err());
        assert!(range(&[n(0.0), n(1.0)]).is_err());
        assert!(range(&[n(0.0), numbers(&[]), n(1.0)]).is_err());
    }

    #[test]
    fn test_range_rejects_huge_lists() {
        assert!(matches!(
            range(&[n(0.0), n(1.0), n(1e-300)]),
            Err(Error::DomainError { .. })
        ));
        assert!(range(&[n(-1e300), n(1e300), n(1.0)]).is_err());
    }
}
