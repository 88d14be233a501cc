use crate::{error::EvalError, evaluator::EvalResult, util::num::i64_to_f64_checked};

/// Represents a runtime numeric value.
///
/// Literals start out as integers; arithmetic stays in `Integer` as long
/// as both operands are integers and the result is representable.
/// Division always produces a `Real` (true division), and mixed-type
/// arithmetic promotes the integer side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A double precision floating-point value.
    Real(f64),
}

impl Value {
    /// Converts the value to an `f64`.
    ///
    /// Integers are only converted when exactly representable as `f64`.
    ///
    /// # Errors
    /// Returns `EvalError::LiteralTooLarge` for integers outside the safe
    /// range.
    pub fn as_real(&self) -> EvalResult<f64> {
        match self {
            Self::Integer(n) => i64_to_f64_checked(*n, EvalError::LiteralTooLarge),
            Self::Real(r) => Ok(*r),
        }
    }

    /// Adds two values, staying integral when both operands are integers.
    ///
    /// # Errors
    /// Returns `EvalError::Overflow` when integer addition overflows, or a
    /// promotion error for unsafely large integers.
    pub fn add(&self, other: &Self) -> EvalResult<Self> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => {
                a.checked_add(*b).map(Self::Integer).ok_or(EvalError::Overflow)
            },
            _ => Ok(Self::Real(self.as_real()? + other.as_real()?)),
        }
    }

    /// Subtracts `other` from `self`; integral when both are integers.
    ///
    /// # Errors
    /// Returns `EvalError::Overflow` when integer subtraction overflows,
    /// or a promotion error for unsafely large integers.
    pub fn sub(&self, other: &Self) -> EvalResult<Self> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => {
                a.checked_sub(*b).map(Self::Integer).ok_or(EvalError::Overflow)
            },
            _ => Ok(Self::Real(self.as_real()? - other.as_real()?)),
        }
    }

    /// Multiplies two values; integral when both are integers.
    ///
    /// # Errors
    /// Returns `EvalError::Overflow` when integer multiplication
    /// overflows, or a promotion error for unsafely large integers.
    pub fn mul(&self, other: &Self) -> EvalResult<Self> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => {
                a.checked_mul(*b).map(Self::Integer).ok_or(EvalError::Overflow)
            },
            _ => Ok(Self::Real(self.as_real()? * other.as_real()?)),
        }
    }

    /// Divides `self` by `other` using true division: the result is always
    /// a `Real`, even for two integer operands.
    ///
    /// # Errors
    /// Returns `EvalError::DivisionByZero` for a zero divisor, or a
    /// promotion error for unsafely large integers.
    ///
    /// ## Example
    /// ```
    /// use gencalc::value::Value;
    ///
    /// let v = Value::Integer(10).div(&Value::Integer(4)).unwrap();
    /// assert_eq!(v, Value::Real(2.5));
    ///
    /// assert!(Value::Integer(1).div(&Value::Integer(0)).is_err());
    /// ```
    pub fn div(&self, other: &Self) -> EvalResult<Self> {
        let divisor = other.as_real()?;
        if divisor == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(Self::Real(self.as_real()? / divisor))
    }

    /// Negates the value.
    ///
    /// # Errors
    /// Returns `EvalError::Overflow` when negating `i64::MIN`.
    pub fn neg(&self) -> EvalResult<Self> {
        match self {
            Self::Integer(n) => n.checked_neg().map(Self::Integer).ok_or(EvalError::Overflow),
            Self::Real(r) => Ok(Self::Real(-r)),
        }
    }

    /// Squares the value.
    ///
    /// # Errors
    /// Returns `EvalError::Overflow` when integer squaring overflows.
    pub fn sqr(&self) -> EvalResult<Self> {
        self.mul(self)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}
