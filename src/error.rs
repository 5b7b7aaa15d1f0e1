//! Error types for the plotlisp interpreter

use thiserror::Error;

/// Interpreter and kernel errors
///
/// Parse failures never surface as an `Error` from the parser itself (it returns
/// the empty sentinel expression); [`Error::CouldNotParse`] is only produced at
/// the kernel and interpreter boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Parse errors
    /// Program text did not tokenize or parse into a single balanced form
    #[error("Invalid expression, could not parse")]
    CouldNotParse,

    // Evaluation errors
    /// Reference to a symbol with no bound value
    ///
    /// **Triggered by:** `(+ x 1)` when `x` was never defined, or a bare
    /// built-in name used as a value (`+`)
    #[error("Error during evaluation: unknown symbol {name}")]
    UnknownSymbol {
        /// Symbol name
        name: String,
    },

    /// A leaf expression whose head cannot be evaluated (the None atom)
    #[error("Error during evaluation: invalid type in terminal expression")]
    InvalidTerminal,

    /// Special form used with the wrong shape
    ///
    /// **Example:** `(define 1 2)`, `(lambda x)`, `(apply + 3)`
    #[error("Error during evaluation: {form}: {reason}")]
    InvalidSpecialForm {
        /// Special-form name
        form: &'static str,
        /// What was wrong
        reason: String,
    },

    /// Procedure called with the wrong number of arguments
    #[error("Error in call to {procedure}: invalid number of arguments (expected {expected}, got {got})")]
    ArityMismatch {
        /// Procedure name
        procedure: String,
        /// Accepted argument count, in words
        expected: String,
        /// Argument count received
        got: usize,
    },

    /// Procedure argument has the wrong runtime type
    #[error("Error in call to {procedure}: invalid argument, expected {expected}")]
    InvalidArgument {
        /// Procedure name
        procedure: String,
        /// Expected kind of value
        expected: String,
    },

    /// Argument has the right type but is outside the procedure's domain
    ///
    /// **Example:** `(ln -1)`, `(range 0 1 0)`, `(first (list))`
    #[error("Error in call to {procedure}: {reason}")]
    DomainError {
        /// Procedure name
        procedure: String,
        /// Failure reason
        reason: String,
    },

    /// Attempt to rebind a protected or already-bound name
    #[error("Error during evaluation: attempt to redefine {kind} {name}")]
    Redefinition {
        /// Symbol name
        name: String,
        /// What the name currently is ("special-form", "built-in procedure", ...)
        kind: &'static str,
    },

    /// Head of an application is not a built-in or lambda
    #[error("Error during evaluation: {name} does not name a procedure")]
    NotAProcedure {
        /// Printed head of the failing application
        name: String,
    },

    /// Environment rejected a binding
    #[error("Error during evaluation: {0}")]
    Binding(String),

    /// Error text that crossed the kernel boundary
    #[error("{0}")]
    Semantic(String),

    // Kernel errors
    /// A request was made while no worker thread is running
    #[error("Kernel is not running")]
    KernelNotRunning,

    /// The worker thread could not be spawned
    #[error("Thread error: {message}")]
    ThreadError {
        /// Error message
        message: String,
    },

    /// Worker thread panicked before it could be joined cleanly
    #[error("Thread join failed: worker panicked")]
    ThreadJoinFailed,
}

impl Error {
    /// Create a semantic error carrying only a message
    pub fn semantic(msg: impl Into<String>) -> Self {
        Error::Semantic(msg.into())
    }

    pub(crate) fn arity(procedure: &str, expected: impl Into<String>, got: usize) -> Self {
        Error::ArityMismatch {
            procedure: procedure.to_string(),
            expected: expected.into(),
            got,
        }
    }

    pub(crate) fn argument(procedure: &str, expected: impl Into<String>) -> Self {
        Error::InvalidArgument {
            procedure: procedure.to_string(),
            expected: expected.into(),
        }
    }

    pub(crate) fn domain(procedure: &str, reason: impl Into<String>) -> Self {
        Error::DomainError {
            procedure: procedure.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn special_form(form: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidSpecialForm {
            form,
            reason: reason.into(),
        }
    }

    /// True for failures of the kernel machinery rather than of a program
    pub fn is_kernel_error(&self) -> bool {
        matches!(
            self,
            Error::KernelNotRunning | Error::ThreadError { .. } | Error::ThreadJoinFailed
        )
    }
}

/// Result type for plotlisp operations
pub type Result<T> = std::result::Result<T, Error>;
