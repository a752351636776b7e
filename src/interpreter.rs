/// The tokenizer module splits an expression string into tokens.
///
/// The tokenizer is a single-pass scanner with one character of lookahead
/// and one token of lookback. It produces numeric literals (including
/// scientific notation and `i`-suffixed imaginary literals), identifiers,
/// operator symbols and punctuation, each tagged with its character
/// position. It expects input that already went through the caller
/// preprocessing contract (see [`crate::session::prepare`]).
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Fuses a leading `-` into the following literal where the previous
///   token makes it a sign rather than a subtraction.
/// - Rejects symbol runs that match no registered operator.
pub mod tokenizer;
/// The parser module converts the token stream to RPN.
///
/// The parser implements the shunting-yard algorithm over an explicit
/// operator stack. It decodes radix-prefixed integers, classifies
/// identifiers as variables or functions, records identifiers that need
/// auto-declaration, and reports structural errors (missing operands,
/// mismatched parentheses) with character positions.
///
/// # Responsibilities
/// - Emits operands directly and reorders operators by precedence and
///   associativity.
/// - Marks function parameter lists so the evaluator can collect variadic
///   arguments.
/// - Returns newly referenced variable names as a side channel instead of
///   mutating the store mid-scan.
pub mod parser;
/// The validator module checks RPN for structural soundness.
///
/// A single pass over the RPN keeps an integer stack of per-scope argument
/// counts, mirroring a postfix grammar: operators need two values, function
/// tokens close their own scope and check arity, parentheses open scopes.
/// Validation guarantees that evaluation can never underflow its stack.
pub mod validator;
/// The evaluator module executes validated RPN and computes results.
///
/// The evaluator performs a single left-to-right pass over the RPN with an
/// eager operand stack. It resolves variables against the store, dispatches
/// operators and functions through the registries, applies the auto-splat
/// rule for variadic calls, and normalizes the final value.
///
/// # Responsibilities
/// - Owns [`evaluator::Expression`], the public entry point with its
///   memoized RPN.
/// - Threads the evaluation context (store, history, policy, recursion
///   depth) through every operator and function call.
pub mod evaluator;
/// The ops module defines the fixed operator registry.
///
/// All binary operators with their precedences, associativities and
/// evaluation functions live in one static table. The table is immutable;
/// there are no runtime-defined operators.
pub mod ops;
/// The functions module defines the fixed function registry.
///
/// All built-in functions with their arities and evaluation functions live
/// in one static table, split across submodules by topic (trigonometry,
/// statistics, integer functions, polynomials).
pub mod functions;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the tagged [`value::core::Value`] union over reals, complex
/// numbers, arrays and polynomials, together with promotion, arithmetic,
/// comparison and display.
pub mod value;
/// The vars module implements the case-insensitive variable store.
pub mod vars;
/// The history module implements the append-only expression history read
/// by the `H` function.
pub mod history;
