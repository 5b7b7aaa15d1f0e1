use crate::error::{Error, Result};
use crate::runtime::Expression;

/// Control text that stops the worker loop
pub const STOP_COMMAND: &str = "%stop";
/// Alias of [`STOP_COMMAND`]
pub const EXIT_COMMAND: &str = "%exit";
/// Control text that reseeds the environment and stops the worker loop
pub const RESET_COMMAND: &str = "%reset";

/// Unit of communication between the caller and the kernel worker
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Message {
    /// Empty message
    #[default]
    None,
    /// Program text or a control command
    Text(String),
    /// Value of a successfully evaluated program
    Result(Expression),
    /// Error text of a failed request
    Error(String),
}

impl Message {
    pub fn text(program: impl Into<String>) -> Self {
        Message::Text(program.into())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Message::None)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Message::Text(_))
    }

    pub fn is_result(&self) -> bool {
        matches!(self, Message::Result(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Message::Error(_))
    }

    /// True for `%stop`, `%exit` and `%reset`
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Message::Text(text)
                if text == STOP_COMMAND || text == EXIT_COMMAND || text == RESET_COMMAND
        )
    }

    /// Converts a reply back into a `Result`
    ///
    /// An Error reply becomes [`Error::Semantic`] carrying the original text;
    /// None becomes the None expression.
    pub fn into_result(self) -> Result<Expression> {
        match self {
            Message::Result(exp) => Ok(exp),
            Message::Error(text) => Err(Error::Semantic(text)),
            Message::None => Ok(Expression::default()),
            Message::Text(_) => Err(Error::semantic("expected a reply, got program text")),
        }
    }
}

impl From<Result<Expression>> for Message {
    fn from(result: Result<Expression>) -> Self {
        match result {
            Ok(exp) => Message::Result(exp),
            Err(err) => Message::Error(err.to_string()),
        }
    }
}
