/// Core value type and arithmetic.
///
/// Defines the `Value` enum and the promotion rules between real and
/// complex arithmetic, magnitude-based comparison, and display.
pub mod core;

/// Polynomial coefficient helpers.
///
/// Operations on constant-first coefficient lists: derivative,
/// antiderivative and Horner evaluation.
pub mod poly;
