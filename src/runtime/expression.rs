use num_complex::Complex64;
use std::collections::BTreeMap;
use std::fmt;

use super::atom::Atom;

/// Head symbol marking a List value
pub const LIST_HEAD: &str = "list";
/// Head symbol marking a Lambda value
pub const LAMBDA_HEAD: &str = "lambda";

/// A tree of atoms: a head followed by an ordered tail of sub-expressions
///
/// The same type is used for unevaluated syntax and for runtime values.
/// Lists are expressions headed by the symbol `list`; lambdas are headed by
/// `lambda` and carry exactly two children, a List of parameter symbols and
/// the unevaluated body.
///
/// Properties are side-channel metadata. They travel with clones but take no
/// part in equality or in the printed form.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    head: Atom,
    tail: Vec<Expression>,
    properties: BTreeMap<String, Expression>,
}

impl Expression {
    /// Creates a leaf expression with the given head
    pub fn new(head: Atom) -> Self {
        Expression {
            head,
            tail: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Creates a List value owning the given elements
    pub fn list(elements: Vec<Expression>) -> Self {
        Expression {
            head: Atom::symbol(LIST_HEAD),
            tail: elements,
            properties: BTreeMap::new(),
        }
    }

    /// Creates a Lambda value from parameter symbols and a body
    pub fn lambda(parameters: Vec<Expression>, body: Expression) -> Self {
        Expression {
            head: Atom::symbol(LAMBDA_HEAD),
            tail: vec![Expression::list(parameters), body],
            properties: BTreeMap::new(),
        }
    }

    /// Creates an application node `(head tail...)`
    pub fn call(head: Atom, tail: Vec<Expression>) -> Self {
        Expression {
            head,
            tail,
            properties: BTreeMap::new(),
        }
    }

    /// The head atom
    pub fn head(&self) -> &Atom {
        &self.head
    }

    /// Mutable access to the head atom
    pub fn head_mut(&mut self) -> &mut Atom {
        &mut self.head
    }

    /// The ordered children
    pub fn tail(&self) -> &[Expression] {
        &self.tail
    }

    /// Appends a child expression
    pub fn push(&mut self, child: Expression) {
        self.tail.push(child);
    }

    /// Appends a leaf child with the given atom as head
    pub fn append(&mut self, atom: Atom) {
        self.tail.push(Expression::new(atom));
    }

    /// Mutable access to a child by index
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Expression> {
        self.tail.get_mut(index)
    }

    /// True for the empty sentinel: no head and no children
    pub fn is_none(&self) -> bool {
        self.head.is_none() && self.tail.is_empty()
    }

    /// True if there are no children
    pub fn is_tail_empty(&self) -> bool {
        self.tail.is_empty()
    }

    /// True if the head is a Number
    pub fn is_head_number(&self) -> bool {
        self.head.is_number()
    }

    /// True if the head is a Symbol
    pub fn is_head_symbol(&self) -> bool {
        self.head.is_symbol()
    }

    /// True if the head is a Complex
    pub fn is_head_complex(&self) -> bool {
        self.head.is_complex()
    }

    /// True if the head is a String literal
    pub fn is_head_string(&self) -> bool {
        self.head.is_string()
    }

    /// True for a bare Symbol with no children
    pub fn is_bare_symbol(&self) -> bool {
        self.head.is_symbol() && self.tail.is_empty()
    }

    /// True if this is a List value
    pub fn is_list(&self) -> bool {
        self.head.as_symbol() == LIST_HEAD
    }

    /// True if this is a Lambda value
    pub fn is_lambda(&self) -> bool {
        self.head.as_symbol() == LAMBDA_HEAD
    }

    /// List elements, or an empty slice if this is not a List
    pub fn as_list(&self) -> &[Expression] {
        if self.is_list() {
            &self.tail
        } else {
            &[]
        }
    }

    /// Consumes a List value into its elements
    pub fn into_list(self) -> Option<Vec<Expression>> {
        if self.is_list() {
            Some(self.tail)
        } else {
            None
        }
    }

    /// The `(parameters, body)` pair of a Lambda value
    pub fn as_lambda(&self) -> Option<(&Expression, &Expression)> {
        match (self.is_lambda(), self.tail.as_slice()) {
            (true, [parameters, body]) => Some((parameters, body)),
            _ => None,
        }
    }

    /// Parameter names of a Lambda value
    pub fn lambda_parameters(&self) -> Vec<String> {
        match self.as_lambda() {
            Some((parameters, _)) => parameters
                .as_list()
                .iter()
                .map(|p| p.head().as_symbol().to_string())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Looks up a property by key
    pub fn property(&self, key: &str) -> Option<&Expression> {
        self.properties.get(key)
    }

    /// Sets a property, replacing any previous value for the key
    pub fn set_property(&mut self, key: impl Into<String>, value: Expression) {
        self.properties.insert(key.into(), value);
    }

    /// All properties attached to this expression
    pub fn properties(&self) -> &BTreeMap<String, Expression> {
        &self.properties
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.tail == other.tail
    }
}

impl From<Atom> for Expression {
    fn from(atom: Atom) -> Self {
        Expression::new(atom)
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::new(Atom::Number(value))
    }
}

impl From<Complex64> for Expression {
    fn from(value: Complex64) -> Self {
        Expression::new(Atom::Complex(value))
    }
}

impl Expression {
    /// Nested leaves print as bare atoms; everything else is parenthesized
    fn write_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tail.is_empty() && !self.is_list() && !self.is_lambda() {
            write!(f, "{}", self.head)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;

        if !self.is_list() && !self.is_lambda() {
            write!(f, "{}", self.head)?;
            if !self.tail.is_empty() {
                f.write_str(" ")?;
            }
        }

        for (i, child) in self.tail.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            child.write_nested(f)?;
        }

        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sentinel() {
        let e = Expression::default();
        assert!(e.is_none());
        assert!(e.is_tail_empty());
        assert_eq!(e.to_string(), "()");
        assert_eq!(Expression::from(3.0).to_string(), "(3)");
    }

    #[test]
    fn test_display_application() {
        let mut e = Expression::new(Atom::symbol("+"));
        e.append(Atom::Number(1.0));
        e.append(Atom::Number(2.0));
        assert_eq!(e.to_string(), "(+ 1 2)");
    }

    #[test]
    fn test_display_list_omits_head() {
        let l = Expression::list(vec![1.0.into(), 2.0.into(), Expression::list(vec![])]);
        assert_eq!(l.to_string(), "(1 2 ())");
    }

    #[test]
    fn test_lambda_accessors() {
        let params = vec![
            Expression::new(Atom::symbol("x")),
            Expression::new(Atom::symbol("y")),
        ];
        let body = Expression::new(Atom::symbol("x"));
        let lambda = Expression::lambda(params, body);

        assert!(lambda.is_lambda());
        assert!(!lambda.is_list());
        assert_eq!(lambda.lambda_parameters(), vec!["x", "y"]);
        assert_eq!(lambda.to_string(), "((x y) x)");
    }

    #[test]
    fn test_properties_ignored_by_equality() {
        let mut a = Expression::from(2.0);
        let b = Expression::from(2.0);
        a.set_property("units", Expression::new(Atom::string("m")));

        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(
            a.property("units"),
            Some(&Expression::new(Atom::string("m")))
        );
        assert!(b.property("units").is_none());
    }

    #[test]
    fn test_clone_is_deep_and_keeps_properties() {
        let mut inner = Expression::list(vec![1.0.into()]);
        inner.set_property("object-name", Expression::new(Atom::string("point")));
        let outer = Expression::list(vec![inner]);

        let mut copy = outer.clone();
        copy.child_mut(0).unwrap().push(2.0.into());

        assert_eq!(outer.as_list()[0].as_list().len(), 1);
        assert_eq!(copy.as_list()[0].as_list().len(), 2);
        assert!(copy.as_list()[0].property("object-name").is_some());
    }

    #[test]
    fn test_as_list_on_non_list() {
        let e = Expression::from(1.0);
        assert!(e.as_list().is_empty());
        assert!(e.clone().into_list().is_none());
        assert!(e.as_lambda().is_none());
    }
}
