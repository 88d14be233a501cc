#[derive(Debug, PartialEq, Eq)]
/// Represents all errors that can occur while sequentializing a tree.
///
/// When any of these is raised, the compiler rolls the statement buffer
/// back to its pre-call length; no partial output remains visible.
pub enum CompileError {
    /// Applied an operator with no rendering: the name is neither a
    /// built-in operation nor a well-formed identifier.
    UnknownOperation {
        /// The name of the operation.
        name: String,
    },
    /// A built-in operation was applied to the wrong number of arguments.
    ArityMismatch {
        /// The name of the operation.
        name:     String,
        /// The number of arguments the operation takes.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
    },
    /// An empty (`Pass`) tree was used as an operand.
    EmptyOperand,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownOperation { name } => {
                write!(f, "Compile error, no implementation of operation '{name}'")
            },
            Self::ArityMismatch { name,
                                  expected,
                                  found, } => {
                write!(f,
                       "Compile error, operation '{name}' takes {expected} argument(s) but {found} were given")
            },
            Self::EmptyOperand => write!(f, "Compile error, empty expression used as an operand"),
        }
    }
}

impl std::error::Error for CompileError {}
