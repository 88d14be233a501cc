/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss or rounding
/// errors. Use these helpers whenever an `i64` needs to become an `f64` in
/// a way that guarantees correctness.
pub mod num;
