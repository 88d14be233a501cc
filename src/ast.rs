use crate::ops::Builtin;

/// An abstract syntax tree (AST) node representing one parsed expression.
///
/// `Tree` is the closed set of node kinds the parser can produce. Child
/// order is semantically significant: both backends visit children left to
/// right, so side effects of nested assignments happen in source order.
/// A `Tree` is immutable once produced; the evaluator and the compiler only
/// read it.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// A literal numeric value.
    Const(i64),
    /// Lookup of the current value bound to a name.
    Get(String),
    /// Binds a name to the value of an expression. The node's own value is
    /// the bound value, which is what makes assignment usable as a
    /// sub-expression, as in `(x = 2) + 1`.
    Set {
        /// The name being bound.
        name: String,
        /// The expression producing the bound value.
        expr: Box<Self>,
    },
    /// Applies an operator or named function to evaluated arguments.
    /// Binary operators like `+` and unary ones like `neg` are represented
    /// this way too; arity is defined by the operator table.
    Apply {
        /// The operator symbol or function name.
        op:   String,
        /// The argument expressions, in evaluation order.
        args: Vec<Self>,
    },
    /// The result of parsing an empty input. Evaluates to no value and
    /// compiles to no statements.
    Pass,
}

impl Tree {
    /// Renders the tree back into a textual form.
    ///
    /// Binary operators from the operator table render infix in
    /// parentheses, assignments render as `(name = expr)`, and every other
    /// application renders as `name(arg,arg,...)`. The result need not
    /// equal the original source string, but re-parsing it yields a
    /// structurally equal tree.
    ///
    /// # Returns
    /// The textual rendering; empty for `Pass`.
    ///
    /// ## Example
    /// ```
    /// use gencalc::parser::parse;
    ///
    /// let (diagnostics, tree) = parse("x = 1 + -y");
    /// assert!(diagnostics.is_empty());
    /// assert_eq!(tree.unparse(), "(x = (1 + neg(y)))");
    ///
    /// let (diagnostics, reparsed) = parse(&tree.unparse());
    /// assert!(diagnostics.is_empty());
    /// assert_eq!(reparsed, tree);
    /// ```
    #[must_use]
    pub fn unparse(&self) -> String {
        match self {
            Self::Const(value) => value.to_string(),
            Self::Get(name) => name.clone(),
            Self::Set { name, expr } => format!("({name} = {})", expr.unparse()),
            Self::Apply { op, args } => match Builtin::lookup(op) {
                Some(builtin) if builtin.is_infix() && args.len() == 2 => {
                    format!("({} {} {})",
                            args[0].unparse(),
                            builtin.symbol(),
                            args[1].unparse())
                },
                _ => {
                    let rendered: Vec<String> = args.iter().map(Self::unparse).collect();
                    format!("{op}({})", rendered.join(","))
                },
            },
            Self::Pass => String::new(),
        }
    }
}
