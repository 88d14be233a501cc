use std::collections::HashMap;

use crate::{ast::Tree, error::EvalError, ops::Builtin, value::Value};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluates a tree against a caller-owned binding store.
///
/// The binding store maps variable names to their current values and
/// persists across calls for as long as the caller keeps it, so
/// successive evaluations see earlier assignments. Bindings written
/// before a failure point are retained: an expression that assigns and
/// then fails leaves its partial side effects in place.
///
/// # Parameters
/// - `tree`: The expression to evaluate.
/// - `bindings`: Mutable map from variable name to current value.
///
/// # Returns
/// `Ok(Some(value))` for expressions that produce a value, `Ok(None)`
/// for an empty (`Pass`) tree.
///
/// # Errors
/// Returns an `EvalError` for an unknown operation, an unbound variable,
/// or an arithmetic failure.
///
/// ## Example
/// ```
/// use std::collections::HashMap;
///
/// use gencalc::{evaluator::evaluate, parser::parse, value::Value};
///
/// let mut bindings = HashMap::new();
///
/// let (diagnostics, tree) = parse("(x = 2) + 1");
/// assert!(diagnostics.is_empty());
/// assert_eq!(evaluate(&tree, &mut bindings).unwrap(), Some(Value::Integer(3)));
/// assert_eq!(bindings.get("x"), Some(&Value::Integer(2)));
/// ```
pub fn evaluate(tree: &Tree, bindings: &mut HashMap<String, Value>) -> EvalResult<Option<Value>> {
    match tree {
        Tree::Pass => Ok(None),
        _ => eval_tree(tree, bindings).map(Some),
    }
}

/// Evaluates a non-empty tree to a single value.
///
/// Dispatches exhaustively on the node kind: literals return themselves,
/// variable reads consult the binding store, assignments evaluate their
/// expression child and then write, and applications evaluate all
/// arguments left to right before applying the table operation.
fn eval_tree(tree: &Tree, bindings: &mut HashMap<String, Value>) -> EvalResult<Value> {
    match tree {
        Tree::Const(value) => Ok(Value::Integer(*value)),

        Tree::Get(name) => {
            bindings.get(name)
                    .copied()
                    .ok_or_else(|| EvalError::UnboundVariable { name: name.clone() })
        },

        Tree::Set { name, expr } => {
            let value = eval_tree(expr, bindings)?;
            bindings.insert(name.clone(), value);
            Ok(value)
        },

        Tree::Apply { op, args } => {
            let builtin = Builtin::lookup(op).ok_or_else(|| {
                                                 EvalError::UnknownOperation { name: op.clone() }
                                             })?;
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_tree(arg, bindings)?);
            }
            builtin.apply(&values)
        },

        Tree::Pass => Err(EvalError::MissingValue),
    }
}
