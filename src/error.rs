/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing an expression,
/// converting it to RPN and validating the RPN sequence. Parse errors carry
/// character positions into the preprocessed expression where available.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while executing validated
/// RPN. Evaluation errors include domain failures such as assigning to a
/// non-variable, division by zero, negative factorials, and exhausted
/// history recursion.
pub mod eval_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Top-level error type returned by [`Expression::eval`] and
/// [`Session::eval`].
///
/// Wraps either a [`ParseError`] (the expression never became valid RPN) or
/// an [`EvalError`] (the RPN failed while executing).
///
/// [`Expression::eval`]: crate::interpreter::evaluator::Expression::eval
/// [`Session::eval`]: crate::session::Session::eval
pub enum Error {
    /// The expression could not be parsed or validated.
    Parse(ParseError),
    /// The expression failed during evaluation.
    Eval(EvalError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Eval(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self {
        Self::Eval(e)
    }
}
