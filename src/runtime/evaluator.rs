//! Tree-walking evaluator
//!
//! Evaluation dispatches on the shape of the expression:
//! - a leaf that is not a List is a terminal (symbol lookup or self-evaluating literal)
//! - a head naming a special form receives its tail unevaluated
//! - anything else is an application: the tail is evaluated left to right and
//!   handed to the built-in or lambda named by the head
//!
//! Lambdas do not capture their defining environment. A call copies the
//! environment at the call site, binds the parameters in the copy and
//! evaluates the body there, so free variables resolve dynamically.

use tracing::debug;

use super::atom::Atom;
use super::environment::Environment;
use super::expression::Expression;
use crate::error::{Error, Result};

/// Names reserved for special forms; `define` refuses to bind them
pub const SPECIAL_FORMS: &[&str] = &[
    "begin",
    "define",
    "lambda",
    "apply",
    "map",
    "set-property",
    "get-property",
];

/// Returns true if `name` is a special form
pub fn is_special_form(name: &str) -> bool {
    SPECIAL_FORMS.contains(&name)
}

/// Evaluates an expression in the given environment
pub fn eval(exp: &Expression, env: &mut Environment) -> Result<Expression> {
    if exp.is_tail_empty() && !exp.is_list() {
        return eval_terminal(exp, env);
    }

    let args = exp.tail();
    match exp.head().as_symbol() {
        "begin" => eval_begin(args, env),
        "define" => eval_define(args, env),
        "lambda" => eval_lambda(args, env),
        "apply" => eval_apply(args, env),
        "map" => eval_map(args, env),
        "set-property" => eval_set_property(args, env),
        "get-property" => eval_get_property(args, env),
        _ => eval_application(exp, env),
    }
}

impl Expression {
    /// Evaluates this expression; see [`eval`]
    pub fn eval(&self, env: &mut Environment) -> Result<Expression> {
        eval(self, env)
    }
}

fn eval_terminal(exp: &Expression, env: &Environment) -> Result<Expression> {
    match exp.head() {
        Atom::Symbol(name) => env.value(name).cloned().ok_or_else(|| Error::UnknownSymbol {
            name: name.clone(),
        }),
        Atom::Number(_) | Atom::Complex(_) | Atom::String(_) => Ok(exp.clone()),
        Atom::None => Err(Error::InvalidTerminal),
    }
}

/// (begin e1 e2 ...) - Evaluate in order, return the last value
fn eval_begin(args: &[Expression], env: &mut Environment) -> Result<Expression> {
    let mut result = Expression::default();
    for exp in args {
        result = eval(exp, env)?;
    }
    Ok(result)
}

/// (define name value) - Bind a symbol in the current environment
fn eval_define(args: &[Expression], env: &mut Environment) -> Result<Expression> {
    let [name, value] = args else {
        return Err(Error::special_form("define", "invalid number of arguments"));
    };

    if !name.is_bare_symbol() {
        return Err(Error::special_form("define", "first argument must be a symbol"));
    }

    let sym = name.head();
    let redefinition = |kind| Error::Redefinition {
        name: sym.as_symbol().to_string(),
        kind,
    };
    if is_special_form(sym.as_symbol()) {
        return Err(redefinition("special-form"));
    }
    if env.is_proc(sym) {
        return Err(redefinition("built-in procedure"));
    }
    // Lambda-valued names fall through; the environment decides
    if env.is_exp(sym) && !env.is_anon_proc(sym) {
        return Err(redefinition("previously defined symbol"));
    }

    let result = eval(value, env)?;
    env.add_exp(sym, result.clone())?;
    Ok(result)
}

/// (lambda (params...) body) - Build a Lambda value; the body stays unevaluated
fn eval_lambda(args: &[Expression], env: &Environment) -> Result<Expression> {
    let [params, body] = args else {
        return Err(Error::special_form("lambda", "invalid number of arguments"));
    };

    let candidates: Vec<Expression> = if params.is_list() {
        params.as_list().to_vec()
    } else {
        std::iter::once(Expression::new(params.head().clone()))
            .chain(params.tail().iter().cloned())
            .collect()
    };

    if !candidates.iter().all(Expression::is_bare_symbol) {
        return Err(Error::special_form(
            "lambda",
            "parameters must be symbols",
        ));
    }
    for parameter in &candidates {
        check_parameter(parameter.head(), env)?;
    }

    Ok(Expression::lambda(candidates, body.clone()))
}

/// Parameters may not shadow special forms or built-in procedures
fn check_parameter(sym: &Atom, env: &Environment) -> Result<()> {
    let kind = if is_special_form(sym.as_symbol()) {
        "special-form"
    } else if env.is_proc(sym) {
        "built-in procedure"
    } else {
        return Ok(());
    };
    Err(Error::Redefinition {
        name: sym.as_symbol().to_string(),
        kind,
    })
}

/// Checks the `(form proc (list ...))` shape shared by `apply` and `map`
///
/// Returns the procedure symbol and the literal list's unevaluated elements.
fn procedure_and_list<'a>(
    form: &'static str,
    args: &'a [Expression],
    env: &Environment,
) -> Result<(&'a Atom, &'a [Expression])> {
    let [procedure, list] = args else {
        return Err(Error::special_form(form, "invalid number of arguments"));
    };

    let sym = procedure.head();
    if !procedure.is_bare_symbol() || !(env.is_proc(sym) || env.is_anon_proc(sym)) {
        return Err(Error::special_form(
            form,
            "first argument does not name a procedure",
        ));
    }
    if !list.is_list() {
        return Err(Error::special_form(form, "second argument must be a list"));
    }

    Ok((sym, list.tail()))
}

/// (apply proc (list e1 e2 ...)) - Evaluate (proc e1 e2 ...)
fn eval_apply(args: &[Expression], env: &mut Environment) -> Result<Expression> {
    let (procedure, elements) = procedure_and_list("apply", args, env)?;
    let call = Expression::call(procedure.clone(), elements.to_vec());
    eval(&call, env)
}

/// (map proc (list e1 e2 ...)) - List of (proc e) for each element
fn eval_map(args: &[Expression], env: &mut Environment) -> Result<Expression> {
    let (procedure, elements) = procedure_and_list("map", args, env)?;

    let mut results = Vec::with_capacity(elements.len());
    for element in elements {
        let call = Expression::call(procedure.clone(), vec![element.clone()]);
        results.push(eval(&call, env)?);
    }
    Ok(Expression::list(results))
}

fn property_key<'a>(form: &'static str, key: &'a Expression) -> Result<&'a str> {
    if key.is_head_string() && key.is_tail_empty() {
        Ok(key.head().unquoted())
    } else {
        Err(Error::special_form(form, "first argument must be a string"))
    }
}

/// (set-property "key" value target) - Attach a property to the evaluated target
fn eval_set_property(args: &[Expression], env: &mut Environment) -> Result<Expression> {
    let [key, value, target] = args else {
        return Err(Error::special_form(
            "set-property",
            "invalid number of arguments",
        ));
    };

    let key = property_key("set-property", key)?;
    // The value is evaluated in a throwaway copy so it cannot define names
    let value = eval(value, &mut env.shadow())?;
    let mut result = eval(target, env)?;
    result.set_property(key, value);
    Ok(result)
}

/// (get-property "key" target) - Property of the evaluated target, or None
fn eval_get_property(args: &[Expression], env: &mut Environment) -> Result<Expression> {
    let [key, target] = args else {
        return Err(Error::special_form(
            "get-property",
            "invalid number of arguments",
        ));
    };

    let key = property_key("get-property", key)?;
    let result = eval(target, env)?;
    Ok(result.property(key).cloned().unwrap_or_default())
}

fn eval_application(exp: &Expression, env: &mut Environment) -> Result<Expression> {
    let args = exp
        .tail()
        .iter()
        .map(|child| eval(child, env))
        .collect::<Result<Vec<_>>>()?;

    let head = exp.head();
    if env.is_proc(head) {
        let procedure = env.get_proc(head);
        return procedure(&args);
    }

    match env.value(head.as_symbol()) {
        Some(lambda) if head.is_symbol() && lambda.is_lambda() => {
            let lambda = lambda.clone();
            call_lambda(head.as_symbol(), &lambda, args, env)
        }
        _ => Err(Error::NotAProcedure {
            name: head.to_string(),
        }),
    }
}

/// Invokes a Lambda value with already-evaluated arguments
fn call_lambda(
    name: &str,
    lambda: &Expression,
    args: Vec<Expression>,
    env: &Environment,
) -> Result<Expression> {
    let (_, body) = lambda.as_lambda().ok_or_else(|| Error::NotAProcedure {
        name: name.to_string(),
    })?;
    let parameters = lambda.lambda_parameters();

    if parameters.len() != args.len() {
        return Err(Error::arity(
            name,
            parameters.len().to_string(),
            args.len(),
        ));
    }

    debug!(procedure = name, arity = args.len(), "calling lambda");

    let mut frame = env.shadow();
    for (parameter, arg) in parameters.into_iter().zip(args) {
        let sym = Atom::Symbol(parameter);
        check_parameter(&sym, &frame)?;
        frame.add_exp(&sym, arg)?;
    }

    eval(body, &mut frame)
}
