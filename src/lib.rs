//! # concalc
//!
//! concalc is an embeddable calculator engine written in Rust.
//! It tokenizes, parses, validates and evaluates infix expressions with
//! support for complex numbers, arrays, polynomials, user variables and an
//! expression history.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while tokenizing,
/// converting to RPN, validating or evaluating an expression. It
/// standardizes error reporting and carries character positions where
/// available.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (tokenizer, parser,
///   validator, evaluator).
/// - Attaches character offsets and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire evaluation pipeline.
///
/// This module ties together the tokenizer, the shunting-yard parser, the
/// RPN validator, the evaluator, the value model and the operator and
/// function registries to provide a complete engine for expression
/// evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: tokenizer, parser, validator and
///   evaluator.
/// - Provides [`interpreter::evaluator::Expression`], the entry point with
///   its memoized RPN.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Hosts a calculator session around the engine.
///
/// This module implements the caller preprocessing contract and the
/// session facade: shared variable store, expression history and numeric
/// policy.
///
/// # Responsibilities
/// - Normalizes raw input lines before tokenizing ([`session::prepare`]).
/// - Splits `:`-separated terms and records them in the history.
/// - Seeds the constants `e`, `PI`, `TRUE` and `FALSE`.
pub mod session;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers used throughout the registries
/// and the evaluator, including safe truncation between floating-point and
/// integer types and the gamma approximation.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u64`, `usize` and `f64` without silent
///   data loss.
/// - Provide general numeric functions used in multiple modules.
pub mod util;

pub use error::Error;
pub use interpreter::evaluator::{EvalPolicy, Expression, Precision};
pub use interpreter::value::core::Value;
pub use session::{prepare, Session};

/// Evaluates one input line in a fresh session and returns one value per
/// `:`-separated term.
///
/// This is the one-shot entry point the CLI uses; embedders that need
/// variables or history to persist across lines should hold a [`Session`]
/// instead.
///
/// # Errors
/// Returns an error if any term fails to parse, validate or evaluate.
///
/// # Examples
/// ```
/// use concalc::get_result;
///
/// let values = get_result("2+3*4", false).unwrap();
/// assert_eq!(values[0].to_string(), "14");
///
/// // Unbalanced parentheses are a parse error.
/// assert!(get_result("(1+2", false).is_err());
/// ```
pub fn get_result(line: &str, fast: bool) -> Result<Vec<Value>, Error> {
    let policy = EvalPolicy { precision: if fast { Precision::Fast } else { Precision::Exact },
                              complex:   true, };
    Session::with_policy(policy).eval(line)
}
