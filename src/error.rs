/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of
/// source code, plus the aggregate diagnostics gate used by the
/// string-level entry points.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a tree,
/// such as unbound variables, unknown operations, or arithmetic failures.
pub mod runtime_error;
/// Compile errors.
///
/// Contains the error types that can be raised while sequentializing a
/// tree into statements.
pub mod compile_error;

pub use compile_error::CompileError;
pub use parse_error::{ParseError, ParseFailure};
pub use runtime_error::EvalError;
