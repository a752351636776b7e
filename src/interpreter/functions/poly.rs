use crate::{
    error::EvalError,
    interpreter::{
        evaluator::EvalContext,
        value::{core::Value, poly},
    },
    util::num::EvalResult,
};

/// Coerces a parameter list into a coefficient list.
///
/// A sole `Polynomial` passes its coefficients through; a sole `Array` (or
/// a flattened parameter list, which the auto-splat rule has already
/// produced from a sole array) contributes its real components.
fn coefficients(func: &'static str, params: &[Value]) -> EvalResult<Vec<f64>> {
    if params.is_empty() {
        return Err(EvalError::EmptyParameters { func });
    }
    if let [Value::Polynomial(coeffs)] = params {
        return Ok(coeffs.clone());
    }
    if let [Value::Array(items)] = params {
        return Ok(items.iter().map(Value::real_component).collect());
    }
    Ok(params.iter().map(Value::real_component).collect())
}

/// `POLY(...)`: builds a polynomial from the flattened coefficients,
/// constant term first.
pub fn poly(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Polynomial(poly::trim(coefficients("POLY", &params)?)))
}

/// `DERIVE(...)`: derivative of the coerced polynomial.
pub fn derive(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let coeffs = coefficients("DERIVE", &params)?;
    Ok(Value::Polynomial(poly::trim(poly::derive(&coeffs))))
}

/// `INTEGRATE(...)`: antiderivative of the coerced polynomial, with the
/// constant term fixed at zero.
pub fn integrate(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let coeffs = coefficients("INTEGRATE", &params)?;
    Ok(Value::Polynomial(poly::integrate(&coeffs)))
}

/// `PVAL(p, x)`: evaluates the polynomial at `x`.
pub fn pval(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let coeffs = match &params[0] {
        Value::Polynomial(coeffs) => coeffs.clone(),
        Value::Array(items) => items.iter().map(Value::real_component).collect(),
        _ => {
            let detail = "PVAL requires a polynomial first argument".to_string();
            return Err(EvalError::InvalidArgument { detail });
        },
    };
    Ok(Value::Real(poly::eval(&coeffs, params[1].real_component())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::EvalContext;

    #[test]
    fn derive_multiplies_by_the_original_index() {
        // d/dx (1 + 2x + 3x^2) = 2 + 6x
        let p = Value::Polynomial(vec![1.0, 2.0, 3.0]);
        let d = derive(&mut EvalContext::for_tests(), vec![p]);
        assert_eq!(d, Ok(Value::Polynomial(vec![2.0, 6.0])));
    }

    #[test]
    fn pval_rejects_scalar_first_arguments() {
        let r = pval(&mut EvalContext::for_tests(),
                     vec![Value::Real(1.0), Value::Real(2.0)]);
        assert!(r.is_err());
    }
}
