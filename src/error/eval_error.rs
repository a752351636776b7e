#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can be raised while evaluating validated RPN.
///
/// Domain errors (bad assignment targets, negative factorials, byte values
/// out of range) and evaluation errors (division by zero, recursion limits)
/// share this enum; all of them abort the current evaluation immediately.
pub enum EvalError {
    /// The left-hand side of `->` was not a variable.
    AssignmentTarget,
    /// Tried to create a multi-character variable whose name starts with
    /// a reserved literal-prefix letter (`x`, `o`, `b` or `h`).
    ReservedName {
        /// The offending first character.
        ch: char,
    },
    /// Attempted division (or remainder) by zero.
    DivisionByZero,
    /// An operation required a real operand but got a complex number, an
    /// array or a polynomial.
    ExpectedReal {
        /// The operation that rejected its operand.
        what: &'static str,
    },
    /// Factorial of a negative value.
    NegativeFactorial,
    /// Factorial of a non-integral value.
    FractionalFactorial,
    /// A function that requires non-negative input got a negative value.
    NegativeInput {
        /// The function name.
        func: &'static str,
    },
    /// A `BYT` parameter was outside the range 0..=255.
    NotAByte,
    /// An argument was invalid or out of the function's domain.
    InvalidArgument {
        /// Details about why the argument is invalid.
        detail: String,
    },
    /// A real value was too large (or not finite) to be truncated to an
    /// integer.
    ArgumentOutOfRange,
    /// A variadic aggregate function was called with no parameters.
    EmptyParameters {
        /// The function name.
        func: &'static str,
    },
    /// A variable token had no binding at evaluation time.
    UnknownVariable {
        /// The variable name.
        name: String,
    },
    /// `H(i)` referenced a history entry that does not exist.
    HistoryIndex {
        /// The requested index.
        index: usize,
        /// The number of stored entries.
        len:   usize,
    },
    /// A history entry failed to evaluate when replayed through `H`.
    HistoryEval {
        /// The requested index.
        index:  usize,
        /// The nested failure, rendered.
        detail: String,
    },
    /// Nested `H` evaluation exceeded the recursion depth limit.
    RecursionLimit,
    /// An imaginary literal was used while the evaluation policy has
    /// complex arithmetic disabled.
    ComplexDisabled,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AssignmentTarget => {
                write!(f, "Left-hand side of '->' is not a variable.")
            },
            Self::ReservedName { ch } => {
                write!(f, "Not allowed as first character of a variable: '{ch}'.")
            },
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::ExpectedReal { what } => {
                write!(f, "{what} requires a real operand.")
            },
            Self::NegativeFactorial => write!(f, "Factorial of a negative value."),
            Self::FractionalFactorial => {
                write!(f, "Factorial of a non-integral value.")
            },
            Self::NegativeInput { func } => {
                write!(f, "{func} requires non-negative input.")
            },
            Self::NotAByte => write!(f, "Not a byte value."),
            Self::InvalidArgument { detail } => {
                write!(f, "Invalid argument: {detail}.")
            },
            Self::ArgumentOutOfRange => {
                write!(f, "Value cannot be represented as an integer.")
            },
            Self::EmptyParameters { func } => {
                write!(f, "{func} requires at least one parameter.")
            },
            Self::UnknownVariable { name } => {
                write!(f, "Unknown variable '{name}'.")
            },
            Self::HistoryIndex { index, len } => {
                write!(f, "No history entry {index} (history holds {len}).")
            },
            Self::HistoryEval { index, detail } => {
                write!(f, "History entry {index} failed to evaluate: {detail}")
            },
            Self::RecursionLimit => {
                write!(f, "Recursion depth limit exceeded while evaluating history.")
            },
            Self::ComplexDisabled => {
                write!(f, "Complex arithmetic is disabled by the evaluation policy.")
            },
        }
    }
}

impl std::error::Error for EvalError {}
