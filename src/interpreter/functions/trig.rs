use num_complex::Complex64;

use crate::{
    error::EvalError,
    interpreter::{evaluator::EvalContext, value::core::Value},
    util::num::EvalResult,
};

/// Shared body of the trigonometric and hyperbolic functions.
///
/// All of them compute through complex math and keep a real tag for real
/// input.
pub fn unary(_: &mut EvalContext, params: Vec<Value>, name: &'static str) -> EvalResult<Value> {
    let f: fn(Complex64) -> Complex64 = match name {
        "SIN" => Complex64::sin,
        "COS" => Complex64::cos,
        "TAN" => Complex64::tan,
        "ASIN" => Complex64::asin,
        "ACOS" => Complex64::acos,
        "ATAN" => Complex64::atan,
        "SINH" => Complex64::sinh,
        "COSH" => Complex64::cosh,
        "TANH" => Complex64::tanh,
        _ => {
            return Err(EvalError::InvalidArgument { detail: format!("no such function '{name}'") })
        },
    };
    params[0].unary(name, f)
}

/// `RAD(d)`: degrees to radians, over the real component.
pub fn rad(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Real(params[0].real_component().to_radians()))
}

/// `DEG(r)`: radians to degrees, over the real component.
pub fn deg(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Real(params[0].real_component().to_degrees()))
}

/// `ANG(z)`: the argument of `z`, `atan2(im, re)`.
pub fn ang(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Real(params[0].as_complex("ANG")?.arg()))
}

/// `IM(z)`: the imaginary part, as a real.
pub fn im(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Real(params[0].as_complex("IM")?.im))
}

/// `RE(z)`: the real part, as a real.
pub fn re(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Real(params[0].as_complex("RE")?.re))
}

/// `POL(angle, len)`: complex number from polar coordinates.
pub fn pol(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let angle = params[0].real_component();
    let len = params[1].real_component();
    Ok(Value::Complex(Complex64::from_polar(len, angle)))
}
