use num_complex::Complex64;
use rand::Rng;

use crate::{
    interpreter::{evaluator::EvalContext, value::core::Value},
    util::num::{self, EvalResult},
};

/// `NOT(v)`: 1 if the magnitude of `v` is zero, otherwise 0.
pub fn not(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::from(params[0].magnitude() == 0.0))
}

/// `RND(low, high)`: uniform random real in `[low, high)`.
pub fn rnd(ctx: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let low = params[0].real_component();
    let high = params[1].real_component();
    Ok(Value::Real(low + ctx.rng.gen::<f64>() * (high - low)))
}

/// `MRS()`: random real in `[0, 1)`.
pub fn mrs(ctx: &mut EvalContext, _: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Real(ctx.rng.gen::<f64>()))
}

/// `IF(cond, a, b)`: `b` when the real component of `cond` is zero,
/// otherwise `a`. Both branches are already evaluated.
pub fn if_fn(_: &mut EvalContext, mut params: Vec<Value>) -> EvalResult<Value> {
    let selected = if params[0].real_component() == 0.0 { 2 } else { 1 };
    Ok(params.swap_remove(selected))
}

/// `ABS(v)`: Euclidean magnitude.
pub fn abs(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Real(params[0].magnitude()))
}

/// `SQRT(v)`: real square root for real input (NaN below zero), complex
/// square root otherwise.
pub fn sqrt(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    match &params[0] {
        Value::Real(r) => Ok(Value::Real(r.sqrt())),
        v => Ok(Value::Complex(v.as_complex("SQRT")?.sqrt())),
    }
}

/// `LN(v)`: natural logarithm.
pub fn ln(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    match &params[0] {
        Value::Real(r) => Ok(Value::Real(r.ln())),
        v => Ok(Value::Complex(v.as_complex("LN")?.ln())),
    }
}

/// `LOG(v)`: base-10 logarithm.
pub fn log(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    match &params[0] {
        Value::Real(r) => Ok(Value::Real(r.log10())),
        v => Ok(Value::Complex(v.as_complex("LOG")?.ln() / std::f64::consts::LN_10)),
    }
}

/// Shared body of `FLOOR`/`CEIL`/`ROU`: applies `f` componentwise to the
/// real and imaginary parts.
pub fn round_with(_: &mut EvalContext,
                  params: Vec<Value>,
                  f: fn(f64) -> f64)
                  -> EvalResult<Value> {
    params[0].unary("Rounding", |z| Complex64::new(f(z.re), f(z.im)))
}

/// `PERC(p, v)`: `p` percent of `v`.
pub fn perc(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    params[0].div(&Value::Real(100.0))?.mul(&params[1])
}

/// `PER(a, b)`: how many percent `a` is of `b`.
pub fn per(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    params[0].mul(&Value::Real(100.0))?.div(&params[1])
}

/// `PYT(a, b)`: `sqrt(a^2 + b^2)` over the real components.
pub fn pyt(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let a = params[0].real_component();
    let b = params[1].real_component();
    Ok(Value::Real(a.hypot(b)))
}

/// `H(i)`: re-evaluates history entry `i` as a fresh expression sharing the
/// session's store and history.
pub fn history(ctx: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let index = num::f64_to_usize_trunc(params[0].real_component())?;
    ctx.eval_history(index)
}
