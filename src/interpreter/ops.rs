use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::{EvalContext, Precision},
        value::core::Value,
    },
    util::num::{self, EvalResult},
};

/// A value paired with the variable name it was read from, if any.
///
/// The name is what makes `x -> 5` work: the evaluator pushes variable
/// reads as named operands, and the assignment operator looks the name up
/// on its left operand. Every other operator only uses the value.
#[derive(Debug, Clone)]
pub struct Operand {
    /// The operand's value.
    pub value: Value,
    /// The variable name the value was read from, or `None` for computed
    /// values and literals.
    pub name:  Option<String>,
}

impl Operand {
    /// Wraps a plain computed value.
    #[must_use]
    pub const fn value(value: Value) -> Self {
        Self { value, name: None }
    }

    /// Wraps a value read from the named variable.
    #[must_use]
    pub const fn named(value: Value, name: String) -> Self {
        Self { value,
               name: Some(name) }
    }
}

/// Type alias for operator handlers.
///
/// An operator receives the evaluation context and its two operands, left
/// first, and returns the resulting value.
type OperatorFn = fn(&mut EvalContext, Operand, Operand) -> EvalResult<Value>;

/// Defines the operator registry by generating a lookup table and a name
/// list.
///
/// Each entry provides:
/// - the operator's symbol or word,
/// - its precedence and associativity,
/// - a function pointer implementing it.
///
/// The macro produces:
/// - `OperatorDef` (public metadata),
/// - `OPERATOR_TABLE` (static table for lookup),
/// - `OPERATOR_NAMES` (public list of operator names).
macro_rules! operators {
    (
        $(
            $name:literal => {
                precedence: $prec:literal,
                left_assoc: $left:literal,
                apply: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Metadata for one registered operator.
        pub struct OperatorDef {
            /// The operator's symbol or word.
            pub name:       &'static str,
            /// Binding strength; higher binds tighter.
            pub precedence: u8,
            /// `true` for left-associative operators.
            pub left_assoc: bool,
            apply:          OperatorFn,
        }
        static OPERATOR_TABLE: &[OperatorDef] = &[
            $(
                OperatorDef { name: $name, precedence: $prec, left_assoc: $left, apply: $func },
            )*
        ];
        /// The names of all registered operators.
        pub const OPERATOR_NAMES: &[&str] = &[
            $($name,)*
        ];
    };
}

operators! {
    "||"  => { precedence: 2,  left_assoc: true,  apply: |_, l, r| Ok(Value::from(truthy(&l.value) || truthy(&r.value))) },
    "&&"  => { precedence: 4,  left_assoc: true,  apply: |_, l, r| Ok(Value::from(truthy(&l.value) && truthy(&r.value))) },
    "="   => { precedence: 7,  left_assoc: true,  apply: |_, l, r| Ok(Value::from(l.value.eq_numeric(&r.value))) },
    "!="  => { precedence: 7,  left_assoc: true,  apply: |_, l, r| Ok(Value::from(!l.value.eq_numeric(&r.value))) },
    "or"  => { precedence: 7,  left_assoc: true,  apply: |_, l, r| bitwise(&l, &r, |a, b| a | b) },
    "and" => { precedence: 7,  left_assoc: true,  apply: |_, l, r| bitwise(&l, &r, |a, b| a & b) },
    "xor" => { precedence: 7,  left_assoc: true,  apply: |_, l, r| bitwise(&l, &r, |a, b| a ^ b) },
    "->"  => { precedence: 7,  left_assoc: true,  apply: assign },
    "~"   => { precedence: 8,  left_assoc: true,  apply: bit_flip },
    "shl" => { precedence: 8,  left_assoc: true,  apply: shift_left },
    "shr" => { precedence: 8,  left_assoc: true,  apply: shift_right },
    ">"   => { precedence: 10, left_assoc: true,  apply: |_, l, r| Ok(Value::from(l.value.compare(&r.value).is_gt())) },
    ">="  => { precedence: 10, left_assoc: true,  apply: |_, l, r| Ok(Value::from(l.value.compare(&r.value).is_ge())) },
    "<"   => { precedence: 10, left_assoc: true,  apply: |_, l, r| Ok(Value::from(l.value.compare(&r.value).is_lt())) },
    "<="  => { precedence: 10, left_assoc: true,  apply: |_, l, r| Ok(Value::from(l.value.compare(&r.value).is_le())) },
    "+"   => { precedence: 20, left_assoc: true,  apply: add },
    "-"   => { precedence: 20, left_assoc: true,  apply: sub },
    "*"   => { precedence: 30, left_assoc: true,  apply: |_, l, r| l.value.mul(&r.value) },
    "/"   => { precedence: 30, left_assoc: true,  apply: |_, l, r| l.value.div(&r.value) },
    "%"   => { precedence: 30, left_assoc: true,  apply: |_, l, r| l.value.rem(&r.value) },
    "^"   => { precedence: 40, left_assoc: false, apply: |_, l, r| l.value.pow(&r.value) },
    "!"   => { precedence: 50, left_assoc: true,  apply: factorial },
}

/// Looks an operator up by name, case-insensitively.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static OperatorDef> {
    OPERATOR_TABLE.iter()
                  .find(|op| op.name.eq_ignore_ascii_case(name))
}

/// Tests whether `name` is a registered operator.
#[must_use]
pub fn is_operator(name: &str) -> bool {
    lookup(name).is_some()
}

impl OperatorDef {
    /// Applies the operator to its operands.
    ///
    /// # Errors
    /// Propagates the handler's domain and evaluation errors.
    pub fn apply(&self,
                 ctx: &mut EvalContext,
                 left: Operand,
                 right: Operand)
                 -> EvalResult<Value> {
        (self.apply)(ctx, left, right)
    }
}

fn truthy(v: &Value) -> bool {
    v.magnitude() != 0.0
}

/// Addition, or array append when the left operand is an array.
fn add(_: &mut EvalContext, l: Operand, r: Operand) -> EvalResult<Value> {
    if let Value::Array(mut items) = l.value {
        items.push(r.value);
        return Ok(Value::Array(items));
    }
    l.value.add(&r.value)
}

/// Subtraction, or removal of the first matching element when the left
/// operand is an array.
fn sub(_: &mut EvalContext, l: Operand, r: Operand) -> EvalResult<Value> {
    if let Value::Array(mut items) = l.value {
        if let Some(found) = items.iter().position(|v| v.eq_numeric(&r.value)) {
            items.remove(found);
        }
        return Ok(Value::Array(items));
    }
    l.value.sub(&r.value)
}

/// Writes the right value into the variable store under the left operand's
/// name and returns it.
fn assign(ctx: &mut EvalContext, l: Operand, r: Operand) -> EvalResult<Value> {
    let Some(name) = l.name else {
        return Err(EvalError::AssignmentTarget);
    };
    ctx.vars.borrow_mut().put(&name, r.value.clone())?;
    Ok(r.value)
}

fn int_operand(operand: &Operand, what: &'static str) -> EvalResult<i64> {
    num::f64_to_i64_trunc(operand.value.strict_real(what)?)
}

#[allow(clippy::cast_precision_loss)]
fn bitwise(l: &Operand, r: &Operand, f: impl FnOnce(i64, i64) -> i64) -> EvalResult<Value> {
    let a = int_operand(l, "Bitwise arithmetic")?;
    let b = int_operand(r, "Bitwise arithmetic")?;
    Ok(Value::Real(f(a, b) as f64))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shift_left(_: &mut EvalContext, l: Operand, r: Operand) -> EvalResult<Value> {
    bitwise(&l, &r, |a, b| a << (b as u32 & 63))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn shift_right(_: &mut EvalContext, l: Operand, r: Operand) -> EvalResult<Value> {
    // Logical shift: the sign bit does not smear.
    bitwise(&l, &r, |a, b| ((a as u64) >> (b as u32 & 63)) as i64)
}

/// Flips every bit below the operand's bit length. The operand is the right
/// value; preprocessing rewrites unary `~x` to `0~x`.
#[allow(clippy::cast_precision_loss)]
fn bit_flip(_: &mut EvalContext, _l: Operand, r: Operand) -> EvalResult<Value> {
    let v = int_operand(&r, "Bitwise arithmetic")?;
    if v < 0 {
        return Err(EvalError::NegativeInput { func: "~" });
    }
    let bits = std::cmp::max(1, 64 - v.leading_zeros());
    let mask = if bits >= 63 { i64::MAX } else { (1_i64 << bits) - 1 };
    Ok(Value::Real((!v & mask) as f64))
}

/// Factorial of the left value; preprocessing rewrites `n!` to `n!0`.
fn factorial(ctx: &mut EvalContext, l: Operand, _r: Operand) -> EvalResult<Value> {
    let v = l.value.strict_real("Factorial")?;
    if v < 0.0 {
        return Err(EvalError::NegativeFactorial);
    }
    if v.fract() != 0.0 {
        return Err(EvalError::FractionalFactorial);
    }
    let n = num::f64_to_u64_trunc(v, "!")?;
    let result = match ctx.policy.precision {
        Precision::Exact => {
            let mut product = BigUint::from(1_u64);
            for k in 2..=n {
                product *= k;
            }
            product.to_f64().unwrap_or(f64::INFINITY)
        },
        Precision::Fast => num::lanczos_gamma(v + 1.0),
    };
    Ok(Value::Real(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_table_matches_the_documented_precedences() {
        assert_eq!(lookup("^").map(|op| (op.precedence, op.left_assoc)),
                   Some((40, false)));
        assert_eq!(lookup("+").map(|op| op.precedence), Some(20));
        assert_eq!(lookup("OR").map(|op| op.precedence), Some(7));
        assert!(lookup("§").is_none());
    }

    #[test]
    fn bit_flip_stays_within_the_bit_length() {
        // 0b1010 -> 0b0101
        let mut ctx = EvalContext::for_tests();
        let flipped = bit_flip(&mut ctx, Operand::value(Value::Real(0.0)), Operand::value(Value::Real(10.0)));
        assert_eq!(flipped, Ok(Value::Real(5.0)));
    }
}
