//! Parse-then-evaluate facade over one environment

use std::io::Read;

use tracing::debug;

use crate::error::{Error, Result};
use crate::kernel::Message;
use crate::lexer::Tokenizer;
use crate::parser::StackParser;
use crate::runtime::{Environment, Expression};

/// Owns an environment and the most recently parsed program
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    env: Environment,
    ast: Expression,
}

impl Interpreter {
    /// Creates an interpreter with the default environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses program text, keeping the result for [`Interpreter::evaluate`]
    ///
    /// Returns false if the text is not exactly one balanced form.
    pub fn parse_stream(&mut self, program: &str) -> bool {
        self.store(Tokenizer::new(program))
    }

    /// Like [`Interpreter::parse_stream`], reading the program from a stream
    pub fn parse_reader<R: Read>(&mut self, reader: R) -> std::io::Result<bool> {
        Ok(self.store(Tokenizer::from_reader(reader)?))
    }

    fn store(&mut self, tokenizer: Tokenizer) -> bool {
        self.ast = StackParser::new(tokenizer.tokenize()).parse();
        !self.ast.is_none()
    }

    /// Evaluates the last parsed program
    pub fn evaluate(&mut self) -> Result<Expression> {
        if self.ast.is_none() {
            return Err(Error::CouldNotParse);
        }
        self.ast.eval(&mut self.env)
    }

    /// Parses and evaluates one request, folding failures into an Error reply
    pub fn eval_text(&mut self, program: &str) -> Message {
        if !self.parse_stream(program) {
            debug!(program, "request did not parse");
            return Message::Error(Error::CouldNotParse.to_string());
        }
        Message::from(self.evaluate())
    }

    /// Parses and evaluates a startup program
    pub fn startup(&mut self, program: &str) -> Result<Expression> {
        if !self.parse_stream(program) {
            return Err(Error::CouldNotParse);
        }
        self.evaluate()
    }

    /// Discards every user binding and the last parsed program
    pub fn reset(&mut self) {
        self.env.reset();
        self.ast = Expression::default();
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// The last parsed program, or the None expression
    pub fn ast(&self) -> &Expression {
        &self.ast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Atom;

    #[test]
    fn test_parse_then_evaluate() {
        let mut interp = Interpreter::new();
        assert!(interp.parse_stream("(+ 1 2)"));
        assert_eq!(interp.evaluate().unwrap(), Expression::from(3.0));
    }

    #[test]
    fn test_evaluate_without_program() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.evaluate(), Err(Error::CouldNotParse));

        assert!(!interp.parse_stream("(+ 1 2"));
        assert!(interp.evaluate().is_err());
    }

    #[test]
    fn test_parse_reader() {
        let mut interp = Interpreter::new();
        assert!(interp.parse_reader("(sqrt 4)".as_bytes()).unwrap());
        assert_eq!(interp.evaluate().unwrap(), Expression::from(2.0));
    }

    #[test]
    fn test_eval_text_replies() {
        let mut interp = Interpreter::new();
        assert_eq!(
            interp.eval_text("(define a 1)"),
            Message::Result(Expression::from(1.0))
        );
        assert!(interp.eval_text("(define a 2)").is_error());
        assert_eq!(
            interp.eval_text("(+ a"),
            Message::Error("Invalid expression, could not parse".to_string())
        );
    }

    #[test]
    fn test_reset_forgets_definitions() {
        let mut interp = Interpreter::new();
        interp.eval_text("(define a 1)");
        assert!(interp.environment().is_known(&Atom::symbol("a")));

        interp.reset();
        assert!(!interp.environment().is_known(&Atom::symbol("a")));
        assert!(interp.ast().is_none());
        assert!(interp.environment().is_proc(&Atom::symbol("+")));
    }
}
