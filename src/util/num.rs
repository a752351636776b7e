use crate::error::EvalError;

/// Result type shared by the numeric helpers and the evaluator.
pub type EvalResult<T> = Result<T, EvalError>;

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

/// Truncates an `f64` towards zero to an `i64`.
///
/// Fractional parts are discarded; this is the truncation rule used by the
/// bitwise operators and the integer-domain functions. Non-finite values and
/// values beyond the exactly-representable integer range are rejected.
///
/// # Errors
/// Returns [`EvalError::ArgumentOutOfRange`] if the value is not finite or
/// its magnitude exceeds `2^53 - 1`.
///
/// # Example
/// ```
/// use concalc::util::num::f64_to_i64_trunc;
///
/// assert_eq!(f64_to_i64_trunc(3.7).unwrap(), 3);
/// assert_eq!(f64_to_i64_trunc(-3.7).unwrap(), -3);
/// assert!(f64_to_i64_trunc(f64::NAN).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_trunc(value: f64) -> EvalResult<i64> {
    if !value.is_finite() || value.abs() > MAX_SAFE_INT {
        return Err(EvalError::ArgumentOutOfRange);
    }
    Ok(value.trunc() as i64)
}

/// Truncates an `f64` towards zero to a non-negative `i64`.
///
/// # Errors
/// Returns [`EvalError::NegativeInput`] (attributed to `func`) for negative
/// values, and [`EvalError::ArgumentOutOfRange`] for non-finite or oversized
/// ones.
pub fn f64_to_u64_trunc(value: f64, func: &'static str) -> EvalResult<u64> {
    let v = f64_to_i64_trunc(value)?;
    u64::try_from(v).map_err(|_| EvalError::NegativeInput { func })
}

/// Truncates an `f64` towards zero to a `usize` index or count.
///
/// Negative values are rejected rather than clamped, so a negative history
/// index or element count surfaces as an error instead of wrapping.
///
/// # Errors
/// Returns [`EvalError::ArgumentOutOfRange`] for negative, non-finite or
/// oversized values.
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_usize_trunc(value: f64) -> EvalResult<usize> {
    let v = f64_to_i64_trunc(value)?;
    usize::try_from(v).map_err(|_| EvalError::ArgumentOutOfRange)
}

/// Gamma function via the Lanczos approximation (g = 7, n = 9).
///
/// Used by the fast-precision factorial path: `n! = gamma(n + 1)`. Accurate
/// to roughly 13 significant digits over the positive reals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn lanczos_gamma(x: f64) -> f64 {
    const COEFFICIENTS: [f64; 9] = [0.999_999_999_999_809_93,
                                    676.520_368_121_885_1,
                                    -1_259.139_216_722_402_8,
                                    771.323_428_777_653_13,
                                    -176.615_029_162_140_6,
                                    12.507_343_278_686_905,
                                    -0.138_571_095_265_720_12,
                                    9.984_369_578_019_572e-6,
                                    1.505_632_735_149_311_6e-7];

    if x < 0.5 {
        // Reflection formula for the left half-plane.
        return std::f64::consts::PI / ((std::f64::consts::PI * x).sin() * lanczos_gamma(1.0 - x));
    }

    let x = x - 1.0;
    let mut sum = COEFFICIENTS[0];
    for (k, c) in COEFFICIENTS.iter().enumerate().skip(1) {
        sum += c / (x + k as f64);
    }
    let t = x + 7.5;
    (2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_matches_small_factorials() {
        for (n, expected) in [(1.0, 1.0), (4.0, 6.0), (6.0, 120.0)] {
            assert!((lanczos_gamma(n) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn truncation_drops_fractions_towards_zero() {
        assert_eq!(f64_to_i64_trunc(0.0).unwrap(), 0);
        assert_eq!(f64_to_i64_trunc(255.999).unwrap(), 255);
        assert_eq!(f64_to_i64_trunc(-0.5).unwrap(), 0);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(f64_to_i64_trunc(f64::INFINITY).is_err());
        assert!(f64_to_i64_trunc(1e300).is_err());
        assert!(f64_to_usize_trunc(-1.0).is_err());
    }
}
