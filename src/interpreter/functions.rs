use crate::{
    interpreter::{evaluator::EvalContext, value::core::Value},
    util::num::EvalResult,
};

/// Elementary functions: rounding, logarithms, conditionals, randomness and
/// the history accessor.
pub mod basic;
/// Integer-domain functions: combinatorics, primes, Fibonacci and the
/// bit-string manipulations.
pub mod number;
/// Polynomial construction, calculus and evaluation.
pub mod poly;
/// Variadic aggregates and sequence builders.
pub mod stats;
/// Trigonometric, hyperbolic and complex-component functions.
pub mod trig;

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluation context and its evaluated parameters in
/// source order, and returns the resulting value.
pub type FunctionFn = fn(&mut EvalContext, Vec<Value>) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Fixed(n)` means the builtin must receive exactly `n` arguments.
/// - `Variadic` means any number is accepted (subject to the builtin's own
///   checks, e.g. the aggregates reject empty parameter lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variadic,
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity.
    #[must_use]
    pub const fn check(&self, n: usize) -> bool {
        match self {
            Self::Fixed(m) => n == *m,
            Self::Variadic => true,
        }
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name (matched case-insensitively),
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `FunctionDef` (public metadata),
/// - `FUNCTION_TABLE` (static table for lookup),
/// - `FUNCTION_NAMES` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Metadata for one builtin function.
        pub struct FunctionDef {
            /// The function name.
            pub name:  &'static str,
            /// The declared arity.
            pub arity: Arity,
            func:      FunctionFn,
        }
        static FUNCTION_TABLE: &[FunctionDef] = &[
            $(
                FunctionDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// The names of all builtin functions.
        pub const FUNCTION_NAMES: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "NOT"       => { arity: Arity::Fixed(1),  func: basic::not },
    "RND"       => { arity: Arity::Fixed(2),  func: basic::rnd },
    "MRS"       => { arity: Arity::Fixed(0),  func: basic::mrs },
    "IF"        => { arity: Arity::Fixed(3),  func: basic::if_fn },
    "ABS"       => { arity: Arity::Fixed(1),  func: basic::abs },
    "SQRT"      => { arity: Arity::Fixed(1),  func: basic::sqrt },
    "LN"        => { arity: Arity::Fixed(1),  func: basic::ln },
    "LOG"       => { arity: Arity::Fixed(1),  func: basic::log },
    "FLOOR"     => { arity: Arity::Fixed(1),  func: |ctx, p| basic::round_with(ctx, p, f64::floor) },
    "CEIL"      => { arity: Arity::Fixed(1),  func: |ctx, p| basic::round_with(ctx, p, f64::ceil) },
    "ROU"       => { arity: Arity::Fixed(1),  func: |ctx, p| basic::round_with(ctx, p, f64::round) },
    "PERC"      => { arity: Arity::Fixed(2),  func: basic::perc },
    "PER"       => { arity: Arity::Fixed(2),  func: basic::per },
    "PYT"       => { arity: Arity::Fixed(2),  func: basic::pyt },
    "H"         => { arity: Arity::Fixed(1),  func: basic::history },
    "SIN"       => { arity: Arity::Fixed(1),  func: |ctx, p| trig::unary(ctx, p, "SIN") },
    "COS"       => { arity: Arity::Fixed(1),  func: |ctx, p| trig::unary(ctx, p, "COS") },
    "TAN"       => { arity: Arity::Fixed(1),  func: |ctx, p| trig::unary(ctx, p, "TAN") },
    "ASIN"      => { arity: Arity::Fixed(1),  func: |ctx, p| trig::unary(ctx, p, "ASIN") },
    "ACOS"      => { arity: Arity::Fixed(1),  func: |ctx, p| trig::unary(ctx, p, "ACOS") },
    "ATAN"      => { arity: Arity::Fixed(1),  func: |ctx, p| trig::unary(ctx, p, "ATAN") },
    "SINH"      => { arity: Arity::Fixed(1),  func: |ctx, p| trig::unary(ctx, p, "SINH") },
    "COSH"      => { arity: Arity::Fixed(1),  func: |ctx, p| trig::unary(ctx, p, "COSH") },
    "TANH"      => { arity: Arity::Fixed(1),  func: |ctx, p| trig::unary(ctx, p, "TANH") },
    "RAD"       => { arity: Arity::Fixed(1),  func: trig::rad },
    "DEG"       => { arity: Arity::Fixed(1),  func: trig::deg },
    "ANG"       => { arity: Arity::Fixed(1),  func: trig::ang },
    "IM"        => { arity: Arity::Fixed(1),  func: trig::im },
    "RE"        => { arity: Arity::Fixed(1),  func: trig::re },
    "POL"       => { arity: Arity::Fixed(2),  func: trig::pol },
    "MAX"       => { arity: Arity::Variadic,  func: |ctx, p| stats::min_max(ctx, p, "MAX") },
    "MIN"       => { arity: Arity::Variadic,  func: |ctx, p| stats::min_max(ctx, p, "MIN") },
    "SUM"       => { arity: Arity::Variadic,  func: stats::sum },
    "PROD"      => { arity: Arity::Variadic,  func: stats::prod },
    "AMEAN"     => { arity: Arity::Variadic,  func: stats::amean },
    "GMEAN"     => { arity: Arity::Variadic,  func: stats::gmean },
    "HMEAN"     => { arity: Arity::Variadic,  func: stats::hmean },
    "VAR"       => { arity: Arity::Variadic,  func: stats::variance },
    "SEQ"       => { arity: Arity::Fixed(3),  func: stats::seq },
    "ARR"       => { arity: Arity::Variadic,  func: stats::arr },
    "BIN"       => { arity: Arity::Fixed(2),  func: number::bin },
    "STIR"      => { arity: Arity::Fixed(2),  func: number::stir },
    "MERS"      => { arity: Arity::Fixed(1),  func: number::mers },
    "GCD"       => { arity: Arity::Fixed(2),  func: number::gcd },
    "LCM"       => { arity: Arity::Fixed(2),  func: number::lcm },
    "NPR"       => { arity: Arity::Fixed(1),  func: number::npr },
    "FIB"       => { arity: Arity::Fixed(1),  func: number::fib },
    "NSWP"      => { arity: Arity::Fixed(1),  func: number::nswp },
    "BSWP"      => { arity: Arity::Fixed(1),  func: number::bswp },
    "BYT"       => { arity: Arity::Variadic,  func: number::byt },
    "POLY"      => { arity: Arity::Variadic,  func: poly::poly },
    "DERIVE"    => { arity: Arity::Variadic,  func: poly::derive },
    "INTEGRATE" => { arity: Arity::Variadic,  func: poly::integrate },
    "PVAL"      => { arity: Arity::Fixed(2),  func: poly::pval },
}

/// Looks a builtin up by name, case-insensitively.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static FunctionDef> {
    FUNCTION_TABLE.iter()
                  .find(|def| def.name.eq_ignore_ascii_case(name))
}

/// Tests whether `name` is a builtin function.
#[must_use]
pub fn is_function(name: &str) -> bool {
    lookup(name).is_some()
}

impl FunctionDef {
    /// Invokes the builtin, applying the auto-splat rule first.
    ///
    /// A variadic builtin called with exactly one `Array` argument receives
    /// the array's elements as its parameter list. A sole `Polynomial`
    /// passes through unsplit.
    ///
    /// # Errors
    /// Propagates the builtin's domain and evaluation errors.
    pub fn call(&self, ctx: &mut EvalContext, mut params: Vec<Value>) -> EvalResult<Value> {
        if self.arity == Arity::Variadic
           && params.len() == 1
           && matches!(params[0], Value::Array(..))
        {
            if let Some(Value::Array(items)) = params.pop() {
                params = items;
            }
        }
        (self.func)(ctx, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(is_function("sum"));
        assert!(is_function("Integrate"));
        assert!(!is_function("NOPE"));
    }

    #[test]
    fn arities_match_the_documented_signatures() {
        assert_eq!(lookup("SEQ").map(|d| d.arity), Some(Arity::Fixed(3)));
        assert_eq!(lookup("MRS").map(|d| d.arity), Some(Arity::Fixed(0)));
        assert_eq!(lookup("SUM").map(|d| d.arity), Some(Arity::Variadic));
    }
}
