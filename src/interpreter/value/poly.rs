//! Polynomial coefficient arithmetic.
//!
//! # Responsibilities
//! - Trims coefficient lists into canonical form.
//! - Differentiates and integrates coefficient lists.
//! - Evaluates a polynomial at a point via Horner's scheme.
//!
//! Coefficients are stored with the constant term first, so `coeffs[k]` is
//! the coefficient of `x^k`.

/// Drops trailing zero coefficients, keeping at least the constant term.
#[must_use]
pub fn trim(mut coeffs: Vec<f64>) -> Vec<f64> {
    while coeffs.len() > 1 && coeffs.last() == Some(&0.0) {
        coeffs.pop();
    }
    if coeffs.is_empty() {
        coeffs.push(0.0);
    }
    coeffs
}

/// Computes the derivative of a coefficient list.
///
/// # Example
/// ```
/// use concalc::interpreter::value::poly::derive;
///
/// // d/dx (1 + 2x + 3x^2) = 2 + 6x
/// assert_eq!(derive(&[1.0, 2.0, 3.0]), vec![2.0, 6.0]);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn derive(coeffs: &[f64]) -> Vec<f64> {
    if coeffs.len() <= 1 {
        return vec![0.0];
    }
    coeffs.iter()
          .enumerate()
          .skip(1)
          .map(|(degree, c)| c * degree as f64)
          .collect()
}

/// Computes the antiderivative of a coefficient list, with constant 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn integrate(coeffs: &[f64]) -> Vec<f64> {
    let mut result = Vec::with_capacity(coeffs.len() + 1);
    result.push(0.0);
    for (degree, c) in coeffs.iter().enumerate() {
        result.push(c / (degree + 1) as f64);
    }
    trim(result)
}

/// Evaluates the polynomial at `x` using Horner's scheme.
#[must_use]
pub fn eval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_then_integrate_loses_only_the_constant() {
        let p = vec![5.0, 0.0, 3.0];
        assert_eq!(integrate(&derive(&p)), vec![0.0, 0.0, 3.0]);
    }

    #[test]
    fn horner_matches_direct_evaluation() {
        // 1 + 2x + 3x^2 at x = 2 is 17
        assert_eq!(eval(&[1.0, 2.0, 3.0], 2.0), 17.0);
    }

    #[test]
    fn trimming_keeps_the_constant_term() {
        assert_eq!(trim(vec![0.0, 0.0]), vec![0.0]);
        assert_eq!(trim(vec![]), vec![0.0]);
    }
}
