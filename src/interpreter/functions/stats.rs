use crate::{
    error::EvalError,
    interpreter::{evaluator::EvalContext, value::core::Value},
    util::num::{self, EvalResult},
};

fn require_nonempty(func: &'static str, params: &[Value]) -> EvalResult<()> {
    if params.is_empty() {
        return Err(EvalError::EmptyParameters { func });
    }
    Ok(())
}

fn reals(params: &[Value]) -> impl Iterator<Item = f64> + '_ {
    params.iter().map(Value::real_component)
}

/// Shared body of `MIN`/`MAX`.
///
/// The first parameter decides the mode: a complex first parameter compares
/// magnitudes and tags the result complex, anything else compares real
/// components and tags the result real.
pub fn min_max(_: &mut EvalContext,
               params: Vec<Value>,
               name: &'static str)
               -> EvalResult<Value> {
    require_nonempty(name, &params)?;
    let want_max = name == "MAX";
    let better = |candidate: f64, best: f64| {
        if want_max {
            candidate > best
        } else {
            candidate < best
        }
    };

    if params[0].is_complex() {
        let mut best = &params[0];
        for candidate in &params[1..] {
            if better(candidate.magnitude(), best.magnitude()) {
                best = candidate;
            }
        }
        Ok(Value::Complex(best.as_complex(name)?))
    } else {
        let mut best = &params[0];
        for candidate in &params[1..] {
            if better(candidate.real_component(), best.real_component()) {
                best = candidate;
            }
        }
        Ok(Value::Real(best.real_component()))
    }
}

/// `SUM(...)`: sum of the real components.
pub fn sum(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    require_nonempty("SUM", &params)?;
    Ok(Value::Real(reals(&params).sum()))
}

/// `PROD(...)`: product of the real components.
pub fn prod(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    require_nonempty("PROD", &params)?;
    Ok(Value::Real(reals(&params).product()))
}

/// `AMEAN(...)`: arithmetic mean of the real components.
#[allow(clippy::cast_precision_loss)]
pub fn amean(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    require_nonempty("AMEAN", &params)?;
    Ok(Value::Real(reals(&params).sum::<f64>() / params.len() as f64))
}

/// `GMEAN(...)`: geometric mean of the real components.
#[allow(clippy::cast_precision_loss)]
pub fn gmean(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    require_nonempty("GMEAN", &params)?;
    let log_mean = reals(&params).map(f64::ln).sum::<f64>() / params.len() as f64;
    Ok(Value::Real(log_mean.exp()))
}

/// `HMEAN(...)`: harmonic mean, `n / |sum of reciprocals|`.
#[allow(clippy::cast_precision_loss)]
pub fn hmean(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    require_nonempty("HMEAN", &params)?;
    let reciprocals = reals(&params).map(|v| 1.0 / v).sum::<f64>();
    Ok(Value::Real(params.len() as f64 / reciprocals.abs()))
}

/// `VAR(...)`: sample variance of the real components.
#[allow(clippy::cast_precision_loss)]
pub fn variance(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    require_nonempty("VAR", &params)?;
    if params.len() == 1 {
        return Ok(Value::Real(0.0));
    }
    let n = params.len() as f64;
    let mean = reals(&params).sum::<f64>() / n;
    let squares = reals(&params).map(|v| (v - mean) * (v - mean)).sum::<f64>();
    Ok(Value::Real(squares / (n - 1.0)))
}

/// `SEQ(start, step, count)`: arithmetic progression of `count` reals.
///
/// The count truncates towards zero; a negative count yields an empty
/// array.
pub fn seq(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let mut current = params[0].real_component();
    let step = params[1].real_component();
    let count = num::f64_to_i64_trunc(params[2].real_component())?.max(0);
    let mut items = Vec::new();
    for _ in 0..count {
        items.push(Value::Real(current));
        current += step;
    }
    Ok(Value::Array(items))
}

/// `ARR(...)`: wraps the parameters into an array.
pub fn arr(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Array(params))
}
