use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::{
    error::EvalError,
    interpreter::{evaluator::EvalContext, value::core::Value},
    util::num::{self, EvalResult},
};

fn nonneg_int(v: &Value, func: &'static str) -> EvalResult<u64> {
    num::f64_to_u64_trunc(v.real_component(), func)
}

/// `BIN(n, k)`: binomial coefficient "n choose k".
#[allow(clippy::cast_precision_loss)]
pub fn bin(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let n = nonneg_int(&params[0], "BIN")?;
    let k = nonneg_int(&params[1], "BIN")?;
    if k > n {
        return Err(EvalError::InvalidArgument { detail: "BIN requires k <= n".into() });
    }
    let k = k.min(n - k);
    let mut result = 1.0_f64;
    for j in 1..=k {
        result = result * (n - k + j) as f64 / j as f64;
    }
    Ok(Value::Real(result.round()))
}

/// `STIR(n, k)`: Stirling number of the second kind.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn stir(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let n = nonneg_int(&params[0], "STIR")? as usize;
    let k = nonneg_int(&params[1], "STIR")? as usize;
    if k > n {
        return Err(EvalError::InvalidArgument { detail: "STIR requires k <= n".into() });
    }
    // S(n, k) = k S(n-1, k) + S(n-1, k-1), one row at a time.
    let mut row = vec![0.0_f64; k + 1];
    row[0] = 1.0;
    for _ in 1..=n {
        for j in (1..=k).rev() {
            row[j] = j as f64 * row[j] + row[j - 1];
        }
        row[0] = 0.0;
    }
    Ok(Value::Real(if n == 0 { 1.0 } else { row[k] }))
}

/// `MERS(p)`: the Mersenne number `2^p - 1`.
pub fn mers(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    Value::Real(2.0).pow(&params[0])?.sub(&Value::Real(1.0))
}

fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `GCD(a, b)`: greatest common divisor of the truncated real components.
#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn gcd(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let a = num::f64_to_i64_trunc(params[0].real_component())?.unsigned_abs();
    let b = num::f64_to_i64_trunc(params[1].real_component())?.unsigned_abs();
    Ok(Value::Real(gcd_u64(a, b) as f64))
}

/// `LCM(a, b)`: least common multiple of the truncated real components.
#[allow(clippy::cast_precision_loss)]
pub fn lcm(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let a = num::f64_to_i64_trunc(params[0].real_component())?.unsigned_abs();
    let b = num::f64_to_i64_trunc(params[1].real_component())?.unsigned_abs();
    if a == 0 || b == 0 {
        return Ok(Value::Real(0.0));
    }
    Ok(Value::Real((a / gcd_u64(a, b) * b) as f64))
}

/// `NPR(n)`: smallest prime greater than or equal to `n`.
#[allow(clippy::cast_precision_loss)]
pub fn npr(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let n = num::f64_to_i64_trunc(params[0].real_component())?;
    if n <= 2 {
        return Ok(Value::Real(2.0));
    }
    let mut candidate = n as u64;
    if candidate % 2 == 0 {
        candidate += 1;
    }
    while !is_prime(candidate) {
        candidate += 2;
    }
    Ok(Value::Real(candidate as f64))
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// `FIB(n)`: the n-th Fibonacci number, computed iteratively.
pub fn fib(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let n = nonneg_int(&params[0], "FIB")?;
    let (mut a, mut b) = (0.0_f64, 1.0_f64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    Ok(Value::Real(a))
}

fn hex_digits(v: &Value, func: &'static str) -> EvalResult<String> {
    let n = nonneg_int(v, func)?;
    Ok(format!("{n:x}"))
}

fn from_hex_digits(s: &str) -> EvalResult<Value> {
    let n = BigUint::parse_bytes(s.as_bytes(), 16).ok_or(EvalError::ArgumentOutOfRange)?;
    Ok(Value::Real(n.to_f64().unwrap_or(f64::INFINITY)))
}

/// `NSWP(n)`: reverses the hexadecimal digit string of `n` (nibble swap).
pub fn nswp(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let digits: String = hex_digits(&params[0], "NSWP")?.chars().rev().collect();
    from_hex_digits(&digits)
}

/// `BSWP(n)`: reverses the bytes of `n`'s hexadecimal representation.
pub fn bswp(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let small = params[0].real_component() < 256.0;
    let mut digits = hex_digits(&params[0], "BSWP")?;
    while digits.len() % 4 != 0 {
        digits.push('0');
    }
    if small {
        digits.insert_str(0, "00");
    }
    let bytes: Vec<&str> = digits.as_bytes()
                                 .chunks(2)
                                 .map(|pair| std::str::from_utf8(pair).unwrap_or(""))
                                 .collect();
    let swapped: String = bytes.into_iter().rev().collect();
    from_hex_digits(&swapped)
}

/// `BYT(...)`: builds a value from a big-endian sequence of bytes.
pub fn byt(_: &mut EvalContext, params: Vec<Value>) -> EvalResult<Value> {
    let mut result = BigUint::from(0_u64);
    for param in &params {
        let byte = num::f64_to_i64_trunc(param.real_component())?;
        if !(0..=255).contains(&byte) {
            return Err(EvalError::NotAByte);
        }
        result = (result << 8) | BigUint::from(byte.unsigned_abs());
    }
    Ok(Value::Real(result.to_f64().unwrap_or(f64::INFINITY)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::EvalContext;

    fn ctx() -> EvalContext {
        EvalContext::for_tests()
    }

    #[test]
    fn binomial_coefficients() {
        let v = bin(&mut ctx(), vec![Value::Real(5.0), Value::Real(2.0)]);
        assert_eq!(v, Ok(Value::Real(10.0)));
        assert!(bin(&mut ctx(), vec![Value::Real(2.0), Value::Real(5.0)]).is_err());
    }

    #[test]
    fn stirling_numbers_of_the_second_kind() {
        // S(4, 2) = 7
        let v = stir(&mut ctx(), vec![Value::Real(4.0), Value::Real(2.0)]);
        assert_eq!(v, Ok(Value::Real(7.0)));
    }

    #[test]
    fn next_prime_is_inclusive() {
        assert_eq!(npr(&mut ctx(), vec![Value::Real(7.0)]), Ok(Value::Real(7.0)));
        assert_eq!(npr(&mut ctx(), vec![Value::Real(8.0)]), Ok(Value::Real(11.0)));
    }

    #[test]
    fn byte_sequences_accumulate_big_endian() {
        let v = byt(&mut ctx(), vec![Value::Real(1.0), Value::Real(0.0)]);
        assert_eq!(v, Ok(Value::Real(256.0)));
        assert_eq!(byt(&mut ctx(), vec![Value::Real(300.0)]),
                   Err(EvalError::NotAByte));
    }

    #[test]
    fn nibble_swap_reverses_hex_digits() {
        // 0x1f2 -> 0x2f1
        let v = nswp(&mut ctx(), vec![Value::Real(498.0)]);
        assert_eq!(v, Ok(Value::Real(753.0)));
    }
}
