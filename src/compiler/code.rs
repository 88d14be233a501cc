/// One statement of compiled output.
///
/// The compiler keeps its output as structured records rather than
/// pre-rendered text: rollback and cleanup logic then stay independent of
/// the target-language syntax, and nothing ever needs to re-parse its own
/// output. [`std::fmt::Display`] produces the target text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A comment line; carries no executable semantics.
    Comment(String),
    /// Binds a target name to the value of a rendered expression.
    Assign {
        /// The name being bound.
        target: String,
        /// The rendered right-hand side expression.
        expr:   String,
    },
    /// Removes a name from the execution context.
    Delete(String),
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Comment(text) => write!(f, "# {text}"),
            Self::Assign { target, expr } => write!(f, "{target} = {expr}"),
            Self::Delete(name) => write!(f, "del({name})"),
        }
    }
}

/// Renders a statement sequence as an executable program text, one
/// statement per line.
///
/// # Parameters
/// - `code`: The statements to render, in order.
///
/// # Returns
/// The joined program text, without a trailing newline.
///
/// ## Example
/// ```
/// use gencalc::compiler::{Statement, render};
///
/// let code = vec![Statement::Assign { target: "x".to_string(),
///                                     expr:   "1".to_string(), },
///                 Statement::Delete("x".to_string())];
/// assert_eq!(render(&code), "x = 1\ndel(x)");
/// ```
#[must_use]
pub fn render(code: &[Statement]) -> String {
    let lines: Vec<String> = code.iter().map(ToString::to_string).collect();
    lines.join("\n")
}
