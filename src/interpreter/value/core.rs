use std::cmp::Ordering;

use num_complex::Complex64;
use ordered_float::OrderedFloat;

use crate::{error::EvalError, util::num::EvalResult};

/// Represents a runtime value produced by evaluation.
///
/// This enum models the four value shapes that can appear as operands and
/// results: real numbers, complex numbers, ordered arrays and polynomials.
///
/// The tag is significant: arithmetic between two [`Real`](Self::Real)
/// values stays `Real` (the computation runs through complex math and the
/// real component of the result is kept), while any `Complex` operand
/// promotes the result to `Complex`. Comparisons involving a non-`Real`
/// operand compare Euclidean magnitudes rather than components.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A real number.
    Real(f64),
    /// A complex number with real and imaginary parts.
    Complex(Complex64),
    /// An ordered list of values. Supports only append (`+`) and
    /// remove-matching-element (`-`); no other arithmetic is defined on it.
    Array(Vec<Self>),
    /// A polynomial, stored as its coefficient list with the constant term
    /// first. Interchangeable with an array of its coefficients for
    /// functions that flatten, but never auto-splatted when passed whole.
    Polynomial(Vec<f64>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<Complex64> for Value {
    fn from(c: Complex64) -> Self {
        Self::Complex(c)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Real(if b { 1.0 } else { 0.0 })
    }
}

impl Value {
    /// Converts the value to a [`Complex64`] for a computation.
    ///
    /// `Real` values gain a zero imaginary part. Arrays and polynomials
    /// have no complex embedding and are rejected.
    ///
    /// # Errors
    /// Returns [`EvalError::ExpectedReal`] (attributed to `what`) for
    /// arrays and polynomials.
    pub fn as_complex(&self, what: &'static str) -> EvalResult<Complex64> {
        match self {
            Self::Real(r) => Ok(Complex64::new(*r, 0.0)),
            Self::Complex(c) => Ok(*c),
            Self::Array(_) | Self::Polynomial(_) => Err(EvalError::ExpectedReal { what }),
        }
    }

    /// Returns the real component of the value.
    ///
    /// Complex values contribute their real part; arrays and polynomials
    /// contribute `0.0`. This is the lenient projection used by the
    /// real-domain functions when flattening parameter lists.
    #[must_use]
    pub const fn real_component(&self) -> f64 {
        match self {
            Self::Real(r) => *r,
            Self::Complex(c) => c.re,
            Self::Array(_) | Self::Polynomial(_) => 0.0,
        }
    }

    /// Returns the real value, rejecting every other shape.
    ///
    /// The bitwise operators use this: they are undefined for complex and
    /// array operands, so those are an error rather than a silent
    /// truncation.
    ///
    /// # Errors
    /// Returns [`EvalError::ExpectedReal`] unless the value is `Real`.
    pub fn strict_real(&self, what: &'static str) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            _ => Err(EvalError::ExpectedReal { what }),
        }
    }

    /// Returns the Euclidean magnitude used by comparisons and `ABS`.
    ///
    /// Arrays and polynomials have zero real and imaginary components and
    /// therefore magnitude zero.
    ///
    /// # Example
    /// ```
    /// use concalc::interpreter::value::core::Value;
    /// use num_complex::Complex64;
    ///
    /// let c = Value::Complex(Complex64::new(3.0, 4.0));
    /// assert_eq!(c.magnitude(), 5.0);
    /// ```
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        match self {
            Self::Real(r) => r.abs(),
            Self::Complex(c) => c.norm(),
            Self::Array(_) | Self::Polynomial(_) => 0.0,
        }
    }

    /// Returns `true` if the value is [`Real`](Self::Real).
    #[must_use]
    pub const fn is_real(&self) -> bool {
        matches!(self, Self::Real(..))
    }

    /// Returns `true` if the value is [`Complex`](Self::Complex).
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(..))
    }

    /// Returns `true` if the value is [`Array`](Self::Array).
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Polynomial`](Self::Polynomial).
    #[must_use]
    pub const fn is_polynomial(&self) -> bool {
        matches!(self, Self::Polynomial(..))
    }

    /// Tags a computed complex result according to the operands.
    ///
    /// The result is `Real` (keeping the real component) exactly when all
    /// operands were `Real`.
    #[must_use]
    pub fn retag(all_real: bool, z: Complex64) -> Self {
        if all_real {
            Self::Real(z.re)
        } else {
            Self::Complex(z)
        }
    }

    fn promote2(&self, rhs: &Self, what: &'static str) -> EvalResult<(Complex64, Complex64, bool)> {
        let za = self.as_complex(what)?;
        let zb = rhs.as_complex(what)?;
        Ok((za, zb, self.is_real() && rhs.is_real()))
    }

    /// Adds two numeric values. Array append is handled by the `+`
    /// operator before arithmetic is reached.
    ///
    /// # Errors
    /// Returns an error for array or polynomial operands.
    pub fn add(&self, rhs: &Self) -> EvalResult<Self> {
        let (za, zb, real) = self.promote2(rhs, "addition")?;
        Ok(Self::retag(real, za + zb))
    }

    /// Subtracts two numeric values.
    ///
    /// # Errors
    /// Returns an error for array or polynomial operands.
    pub fn sub(&self, rhs: &Self) -> EvalResult<Self> {
        let (za, zb, real) = self.promote2(rhs, "subtraction")?;
        Ok(Self::retag(real, za - zb))
    }

    /// Multiplies two numeric values.
    ///
    /// # Errors
    /// Returns an error for array or polynomial operands.
    pub fn mul(&self, rhs: &Self) -> EvalResult<Self> {
        let (za, zb, real) = self.promote2(rhs, "multiplication")?;
        Ok(Self::retag(real, za * zb))
    }

    /// Divides two numeric values.
    ///
    /// # Errors
    /// Division by exact zero is [`EvalError::DivisionByZero`]; array and
    /// polynomial operands are rejected.
    pub fn div(&self, rhs: &Self) -> EvalResult<Self> {
        let (za, zb, real) = self.promote2(rhs, "division")?;
        if zb.re == 0.0 && zb.im == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(Self::retag(real, za / zb))
    }

    /// Computes the remainder over the real components.
    ///
    /// The result is always `Real`.
    ///
    /// # Errors
    /// A zero divisor is [`EvalError::DivisionByZero`]; array and
    /// polynomial operands are rejected.
    pub fn rem(&self, rhs: &Self) -> EvalResult<Self> {
        let a = self.as_complex("remainder")?.re;
        let b = rhs.as_complex("remainder")?.re;
        if b == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(Self::Real(a % b))
    }

    /// Raises the value to a power.
    ///
    /// Real base and exponent take an exact real path (integer exponents
    /// use repeated squaring via `powi`, so `2^3^2 == 512` exactly); any
    /// complex operand routes through the complex power function.
    ///
    /// # Errors
    /// Returns an error for array or polynomial operands.
    #[allow(clippy::cast_possible_truncation)]
    pub fn pow(&self, rhs: &Self) -> EvalResult<Self> {
        if let (Self::Real(a), Self::Real(b)) = (self, rhs) {
            let integral = b.fract() == 0.0 && b.abs() <= f64::from(i32::MAX);
            let r = if integral { a.powi(*b as i32) } else { a.powf(*b) };
            return Ok(Self::Real(r));
        }
        let (za, zb, _) = self.promote2(rhs, "exponentiation")?;
        Ok(Self::Complex(za.powc(zb)))
    }

    /// Applies a unary complex map, tagging the result like the operand.
    ///
    /// This is the shared shape of the trigonometric and hyperbolic
    /// functions: compute through complex math, stay `Real` for `Real`
    /// input.
    ///
    /// # Errors
    /// Returns an error for array or polynomial operands.
    pub fn unary(&self,
                 what: &'static str,
                 f: impl FnOnce(Complex64) -> Complex64)
                 -> EvalResult<Self> {
        let z = self.as_complex(what)?;
        Ok(Self::retag(self.is_real(), f(z)))
    }

    /// Orders two values for the comparison operators and `MIN`/`MAX`.
    ///
    /// Two `Real` values compare by numeric value; any other pairing
    /// compares magnitudes.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use concalc::interpreter::value::core::Value;
    /// use num_complex::Complex64;
    ///
    /// let a = Value::Real(-5.0);
    /// let b = Value::Complex(Complex64::new(3.0, 4.0));
    /// // a mixed pairing compares magnitudes: |-5| == |3+4i| == 5
    /// assert_eq!(a.compare(&b), Ordering::Equal);
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        if let (Self::Real(a), Self::Real(b)) = (self, other) {
            OrderedFloat(*a).cmp(&OrderedFloat(*b))
        } else {
            OrderedFloat(self.magnitude()).cmp(&OrderedFloat(other.magnitude()))
        }
    }

    /// Tests numeric equality with the same rule as [`compare`](Self::compare).
    #[must_use]
    pub fn eq_numeric(&self, other: &Self) -> bool {
        if let (Self::Real(a), Self::Real(b)) = (self, other) {
            a == b
        } else {
            self.magnitude() == other.magnitude()
        }
    }

    /// Normalizes a final evaluation result.
    ///
    /// Collapses negative zero to zero componentwise and recurses into
    /// arrays. Applied once at the end of a full evaluation, not after
    /// every sub-operation.
    #[must_use]
    pub fn normalize(self) -> Self {
        fn clean(v: f64) -> f64 {
            if v == 0.0 {
                0.0
            } else {
                v
            }
        }

        match self {
            Self::Real(r) => Self::Real(clean(r)),
            Self::Complex(c) => Self::Complex(Complex64::new(clean(c.re), clean(c.im))),
            Self::Array(items) => {
                Self::Array(items.into_iter().map(Self::normalize).collect())
            },
            Self::Polynomial(coeffs) => {
                Self::Polynomial(coeffs.into_iter().map(clean).collect())
            },
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{r}"),
            Self::Complex(c) => match (c.re, c.im) {
                (0.0, 0.0) => write!(f, "0"),
                (re, 0.0) => write!(f, "{re}"),
                (0.0, im) => write!(f, "{im}i"),
                (re, im) if im > 0.0 => write!(f, "{re} + {im}i"),
                (re, im) => write!(f, "{re} - {}i", -im),
            },
            Self::Array(items) => {
                write!(f, "[")?;
                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            },
            Self::Polynomial(coeffs) => {
                let mut first = true;
                for (degree, c) in coeffs.iter().enumerate() {
                    if *c == 0.0 && coeffs.len() > 1 {
                        continue;
                    }
                    if !first {
                        write!(f, " + ")?;
                    }
                    match degree {
                        0 => write!(f, "{c}")?,
                        1 => write!(f, "{c} x")?,
                        _ => write!(f, "{c} x^{degree}")?,
                    }
                    first = false;
                }
                if first {
                    write!(f, "0")?;
                }
                Ok(())
            },
        }
    }
}
