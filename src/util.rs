/// Numeric conversion helpers.
///
/// This module provides safe functions for truncating floating-point values
/// to integer types without silently accepting values that have no integer
/// representation. The bitwise operators and the integer-domain functions
/// (`GCD`, `FIB`, `BYT`, ...) all funnel through these helpers, which is
/// what gives the engine its single documented truncation rule.
pub mod num;
