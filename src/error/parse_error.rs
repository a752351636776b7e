#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while turning an expression string
/// into validated RPN.
///
/// Covers the tokenizer (unknown symbol runs, malformed literals), the
/// shunting-yard conversion (missing operands, mismatched parentheses) and
/// the RPN validator (argument counts, leftover values). Character positions
/// are zero-based offsets into the preprocessed expression string.
pub enum ParseError {
    /// A maximal run of symbol characters did not match any operator.
    UnknownOperator {
        /// The offending symbol text.
        text: String,
        /// Character position of the run.
        pos:  usize,
    },
    /// A numeric literal could not be decoded (e.g. a malformed radix
    /// literal such as `xZZ`).
    InvalidNumber {
        /// The literal text.
        text: String,
        /// Character position of the literal.
        pos:  usize,
    },
    /// An operator was found without the operands it needs.
    MissingOperands {
        /// The operator name.
        op:  String,
        /// Character position of the operator.
        pos: usize,
    },
    /// Opening and closing parentheses do not pair up.
    MismatchedParentheses,
    /// A function's parameter list was never closed, or a `,` appeared
    /// outside any parameter list.
    UnterminatedFunction {
        /// The most recently parsed function name, if any.
        name: Option<String>,
    },
    /// Two values follow each other with no operator between them.
    MissingOperator {
        /// Character position where the operator was expected.
        pos: usize,
    },
    /// A function was called with the wrong number of arguments.
    FunctionArgumentCount {
        /// The function name.
        name:     String,
        /// The declared arity.
        expected: usize,
        /// The number of arguments found.
        found:    usize,
    },
    /// A function token appeared with no enclosing scope to receive its
    /// result.
    ScopeExceeded,
    /// One or more function parameter lists were never consumed.
    UnclosedScopes,
    /// More than one value would remain after evaluation, which implies a
    /// missing operator.
    TooManyValues,
    /// The expression contains no value at all.
    EmptyExpression,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownOperator { text, pos } => {
                write!(f, "Unknown operator '{text}' at position {pos}.")
            },
            Self::InvalidNumber { text, pos } => {
                write!(f, "Invalid number '{text}' at position {pos}.")
            },
            Self::MissingOperands { op, pos } => {
                write!(f, "Missing parameter(s) for operator '{op}' at position {pos}.")
            },
            Self::MismatchedParentheses => write!(f, "Mismatched parentheses."),
            Self::UnterminatedFunction { name } => match name {
                Some(name) => write!(f, "Unterminated parameter list for function '{name}'."),
                None => write!(f, "Found ',' outside any function parameter list."),
            },
            Self::MissingOperator { pos } => {
                write!(f, "Missing operator at position {pos}.")
            },
            Self::FunctionArgumentCount { name,
                                          expected,
                                          found, } => {
                write!(f,
                       "Function '{name}' expected {expected} parameter(s), got {found}.")
            },
            Self::ScopeExceeded => {
                write!(f, "Too many function calls, maximum scope exceeded.")
            },
            Self::UnclosedScopes => {
                write!(f, "Too many unhandled function parameter lists.")
            },
            Self::TooManyValues => write!(f, "Too many numbers or variables."),
            Self::EmptyExpression => write!(f, "Empty expression."),
        }
    }
}

impl std::error::Error for ParseError {}
