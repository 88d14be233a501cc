use crate::{error::EvalError, evaluator::EvalResult, value::Value};

/// A built-in operation known to both backends.
///
/// `Builtin` is the read-only bidirectional mapping between an operator
/// symbol as it appears in an `Apply` node and the operation itself: it
/// answers "which operation is `+`?" via [`Builtin::lookup`] and "how does
/// `Add` render?" via [`Builtin::symbol`]. The evaluator uses it to apply
/// operations, the compiler and `unparse` use it to decide between infix
/// and call-style rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Arithmetic negation (`neg`, the parser's unary minus).
    Neg,
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Squaring (`sqr`)
    Sqr,
}

impl Builtin {
    /// Finds the operation for an operator symbol or function name.
    ///
    /// # Parameters
    /// - `symbol`: The symbol stored in an `Apply` node.
    ///
    /// # Returns
    /// `Some(Builtin)` when the symbol names a built-in operation,
    /// otherwise `None`.
    ///
    /// ## Example
    /// ```
    /// use gencalc::ops::Builtin;
    ///
    /// assert_eq!(Builtin::lookup("+"), Some(Builtin::Add));
    /// assert_eq!(Builtin::lookup("sqr"), Some(Builtin::Sqr));
    /// assert_eq!(Builtin::lookup("f"), None);
    /// ```
    #[must_use]
    pub fn lookup(symbol: &str) -> Option<Self> {
        match symbol {
            "neg" => Some(Self::Neg),
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "sqr" => Some(Self::Sqr),
            _ => None,
        }
    }

    /// Returns the symbol under which the operation appears in a tree.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "neg",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Sqr => "sqr",
        }
    }

    /// Returns the number of arguments the operation takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Neg | Self::Sqr => 1,
            Self::Add | Self::Sub | Self::Mul | Self::Div => 2,
        }
    }

    /// Whether the operation renders infix between its two operands.
    #[must_use]
    pub const fn is_infix(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }

    /// Applies the operation to already-evaluated arguments.
    ///
    /// Callers are expected to have checked [`Builtin::arity`] against the
    /// argument count first.
    ///
    /// # Parameters
    /// - `args`: The evaluated arguments, in source order.
    ///
    /// # Returns
    /// The resulting value.
    ///
    /// # Errors
    /// Propagates arithmetic failures such as overflow or division by
    /// zero; returns `EvalError::ArityMismatch` if the argument count is
    /// wrong after all.
    pub fn apply(self, args: &[Value]) -> EvalResult<Value> {
        if args.len() != self.arity() {
            return Err(EvalError::ArityMismatch { name:     self.symbol().to_string(),
                                                  expected: self.arity(),
                                                  found:    args.len(), });
        }

        match self {
            Self::Neg => args[0].neg(),
            Self::Add => args[0].add(&args[1]),
            Self::Sub => args[0].sub(&args[1]),
            Self::Mul => args[0].mul(&args[1]),
            Self::Div => args[0].div(&args[1]),
            Self::Sqr => args[0].sqr(),
        }
    }
}
