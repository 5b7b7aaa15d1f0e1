use std::collections::HashMap;
use std::f64::consts::{E, PI};
use std::fmt;

use super::atom::{Atom, IMAGINARY_UNIT};
use super::builtins::BUILTINS;
use super::expression::Expression;
use crate::error::{Error, Result};

/// A built-in procedure: evaluated arguments in, value out
pub type Procedure = fn(&[Expression]) -> Result<Expression>;

/// What a symbol is bound to
#[derive(Clone)]
enum Binding {
    Value(Expression),
    Procedure { name: &'static str, proc: Procedure },
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Value(exp) => f.debug_tuple("Value").field(exp).finish(),
            Binding::Procedure { name, .. } => f.debug_tuple("Procedure").field(name).finish(),
        }
    }
}

impl PartialEq for Binding {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Binding::Value(a), Binding::Value(b)) => a == b,
            (Binding::Procedure { name: a, .. }, Binding::Procedure { name: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// Procedure returned by [`Environment::get_proc`] for unknown names
fn default_proc(_args: &[Expression]) -> Result<Expression> {
    Ok(Expression::default())
}

/// Symbol table mapping names to values or built-in procedures
///
/// The top-level environment refuses to rebind a name. A call frame, made
/// with [`Environment::shadow`], is a full copy of its parent that may
/// overwrite bindings, which is how lambda parameters shadow outer names.
#[derive(Debug, Clone)]
pub struct Environment {
    bindings: HashMap<String, Binding>,
    call_frame: bool,
}

impl Environment {
    /// Creates the default environment with constants and built-ins
    pub fn new() -> Self {
        let mut env = Environment {
            bindings: HashMap::new(),
            call_frame: false,
        };
        env.reset();
        env
    }

    /// Copies this environment as a call frame
    pub fn shadow(&self) -> Self {
        Environment {
            bindings: self.bindings.clone(),
            call_frame: true,
        }
    }

    /// True if this environment was produced by [`Environment::shadow`]
    pub fn is_call_frame(&self) -> bool {
        self.call_frame
    }

    /// True if the symbol is bound to anything
    pub fn is_known(&self, sym: &Atom) -> bool {
        sym.is_symbol() && self.bindings.contains_key(sym.as_symbol())
    }

    /// True if the symbol is bound to a value
    pub fn is_exp(&self, sym: &Atom) -> bool {
        sym.is_symbol() && self.value(sym.as_symbol()).is_some()
    }

    /// True if the symbol is bound to a built-in procedure
    pub fn is_proc(&self, sym: &Atom) -> bool {
        sym.is_symbol() && self.procedure(sym.as_symbol()).is_some()
    }

    /// True if the symbol is bound to a Lambda value
    pub fn is_anon_proc(&self, sym: &Atom) -> bool {
        sym.is_symbol()
            && self
                .value(sym.as_symbol())
                .is_some_and(Expression::is_lambda)
    }

    /// The value bound to the symbol, or the None expression
    pub fn get_exp(&self, sym: &Atom) -> Expression {
        if !sym.is_symbol() {
            return Expression::default();
        }
        self.value(sym.as_symbol()).cloned().unwrap_or_default()
    }

    /// The procedure bound to the symbol, or a procedure returning None
    pub fn get_proc(&self, sym: &Atom) -> Procedure {
        if !sym.is_symbol() {
            return default_proc;
        }
        self.procedure(sym.as_symbol()).unwrap_or(default_proc)
    }

    /// Binds a symbol to a value
    ///
    /// Fails if `sym` is not a Symbol, or if it is already bound and this is
    /// not a call frame.
    pub fn add_exp(&mut self, sym: &Atom, exp: Expression) -> Result<()> {
        if !sym.is_symbol() {
            return Err(Error::Binding(
                "attempt to add non-symbol to environment".to_string(),
            ));
        }

        let name = sym.as_symbol();
        if !self.call_frame && self.bindings.contains_key(name) {
            return Err(Error::Redefinition {
                name: name.to_string(),
                kind: "previously defined symbol",
            });
        }

        self.bindings.insert(name.to_string(), Binding::Value(exp));
        Ok(())
    }

    /// Clears every binding and reinstalls the constants and built-ins
    pub fn reset(&mut self) {
        self.bindings.clear();

        self.bindings
            .insert("pi".to_string(), Binding::Value(Expression::from(PI)));
        self.bindings
            .insert("e".to_string(), Binding::Value(Expression::from(E)));
        self.bindings.insert(
            "I".to_string(),
            Binding::Value(Expression::from(IMAGINARY_UNIT)),
        );

        for &(name, proc) in BUILTINS {
            self.bindings
                .insert(name.to_string(), Binding::Procedure { name, proc });
        }
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True if nothing is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn value(&self, name: &str) -> Option<&Expression> {
        match self.bindings.get(name) {
            Some(Binding::Value(exp)) => Some(exp),
            _ => None,
        }
    }

    pub(crate) fn procedure(&self, name: &str) -> Option<Procedure> {
        match self.bindings.get(name) {
            Some(Binding::Procedure { proc, .. }) => Some(*proc),
            _ => None,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
    }
}
