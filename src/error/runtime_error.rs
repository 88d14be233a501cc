#[derive(Debug, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
///
/// Side effects on the binding store made before the failure point are
/// retained; partial-effect semantics are part of the evaluator contract.
pub enum EvalError {
    /// Applied an operator or function with no implementation.
    UnknownOperation {
        /// The name of the operation.
        name: String,
    },
    /// Read a variable that has no value yet.
    UnboundVariable {
        /// The name of the variable.
        name: String,
    },
    /// The wrong number of arguments was supplied to an operation.
    ArityMismatch {
        /// The name of the operation.
        name:     String,
        /// The number of arguments the operation takes.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// Integer arithmetic overflowed.
    Overflow,
    /// An integer was too large to promote to a real without loss.
    LiteralTooLarge,
    /// An empty (`Pass`) tree was used where a value was required.
    MissingValue,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownOperation { name } => {
                write!(f, "Evaluation error, no implementation of operation '{name}'")
            },
            Self::UnboundVariable { name } => {
                write!(f, "Evaluation error, variable '{name}' has no value yet")
            },
            Self::ArityMismatch { name,
                                  expected,
                                  found, } => {
                write!(f,
                       "Evaluation error, operation '{name}' takes {expected} argument(s) but {found} were given")
            },
            Self::DivisionByZero => write!(f, "Evaluation error, division by zero"),
            Self::Overflow => write!(f, "Evaluation error, integer overflow"),
            Self::LiteralTooLarge => {
                write!(f, "Evaluation error, integer too large to represent exactly")
            },
            Self::MissingValue => write!(f, "Evaluation error, expression produced no value"),
        }
    }
}

impl std::error::Error for EvalError {}
