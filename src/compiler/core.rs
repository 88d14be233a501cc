use std::collections::HashMap;

use crate::{ast::Tree, compiler::code::Statement, error::CompileError, ops::Builtin};

/// Result type used by the compiler.
pub type CompileResult<T> = Result<T, CompileError>;

/// The reserved name the compiled program binds the expression's value to.
pub const RESULT_NAME: &str = "result";

/// Per-variable generation counters for one compile call.
///
/// Every assignment to a variable advances its generation; generation 0
/// is the bare name, generation n > 0 is the synthesized temporary
/// `_name_n`. Reads always reference the current generation, which is how
/// left-to-right assignment order survives the flattening. The map starts
/// empty for each top-level compile and is discarded afterward; it never
/// persists the way the evaluator's binding store does.
#[derive(Debug, Default)]
struct Generations {
    current: HashMap<String, u32>,
}

impl Generations {
    /// Returns the current generation of a name.
    ///
    /// A name never assigned within this compile defaults to generation 0:
    /// the variable may well be bound by code that runs before this
    /// fragment, so an unseen name is not an error.
    fn current(&self, name: &str) -> u32 {
        self.current.get(name).copied().unwrap_or(0)
    }

    /// Allocates and returns the next generation of a name.
    fn advance(&mut self, name: &str) -> u32 {
        let next = self.current(name) + 1;
        self.current.insert(name.to_string(), next);
        next
    }

    /// Returns all `(name, highest generation)` pairs in cleanup order.
    ///
    /// The sort key prepends the reserved `_` prefix to names that do not
    /// already carry one, so a bare name sorts adjacent to its own
    /// temporaries and before unrelated names. Names whose keys collide
    /// (`x` and `_x` both key as `_x`) fall back to plain name order, so
    /// the output is the same on every compile.
    fn sorted(&self) -> Vec<(&String, u32)> {
        let mut entries: Vec<(&String, u32)> =
            self.current.iter().map(|(name, generation)| (name, *generation)).collect();
        entries.sort_by(|(a, _), (b, _)| cleanup_key(a).cmp(&cleanup_key(b)).then_with(|| a.cmp(b)));
        entries
    }
}

/// Builds the cleanup sort key for a variable name.
fn cleanup_key(name: &str) -> String {
    if name.starts_with('_') {
        name.to_string()
    } else {
        format!("_{name}")
    }
}

/// Renders the name for a given generation of a variable.
///
/// Generation 0 is the bare name itself; generation n > 0 is the reserved
/// temporary `_<name>_<n>`.
fn generation_name(name: &str, generation: u32) -> String {
    if generation > 0 {
        format!("_{name}_{generation}")
    } else {
        name.to_string()
    }
}

/// Compiles a tree into an ordered statement sequence appended to `code`.
///
/// Produces a fragment that, executed by a target language with ordinary
/// statement-level assignment, reproduces the evaluator's final bindings
/// and result value even though the source language treats assignment as
/// a first-class sub-expression. Appending is transactional: on success
/// all new statements remain, on failure the buffer is truncated back to
/// its pre-call length.
///
/// The emitted sequence is: a marker pair of comment statements naming
/// the source expression, the hoisted assignment statements in evaluation
/// order, a statement binding [`RESULT_NAME`] to the top-level rendering,
/// and finally per-variable cleanup (rebind the bare name to its highest
/// generation, then delete every temporary generation).
///
/// # Parameters
/// - `tree`: The expression to compile.
/// - `code`: The growing statement buffer; prior contents are preserved.
///
/// # Returns
/// `Ok(Some(rendering))` with the result expression's text on success, or
/// `Ok(None)` for a `Pass` tree, which compiles to no statements at all.
///
/// # Errors
/// Returns a `CompileError` (with the buffer rolled back) when the tree
/// applies an operation that has no rendering.
///
/// ## Example
/// ```
/// use gencalc::{compiler::compile_top, parser::parse};
///
/// let (diagnostics, tree) = parse("(x = 2) + 1");
/// assert!(diagnostics.is_empty());
///
/// let mut code = Vec::new();
/// compile_top(&tree, &mut code).unwrap();
///
/// let lines: Vec<String> = code.iter().map(ToString::to_string).collect();
/// assert_eq!(lines,
///            vec!["# code for:",
///                 "# ((x = 2) + 1)",
///                 "_x_1 = 2",
///                 "result = (_x_1 + 1)",
///                 "# Update and cleanup x",
///                 "x = _x_1",
///                 "del(_x_1)"]);
/// ```
pub fn compile_top(tree: &Tree, code: &mut Vec<Statement>) -> CompileResult<Option<String>> {
    if matches!(tree, Tree::Pass) {
        return Ok(None);
    }

    // Remember the initial length in case we need to roll back.
    let initial_len = code.len();

    code.push(Statement::Comment("code for:".to_string()));
    code.push(Statement::Comment(tree.unparse()));

    let mut generations = Generations::default();
    let rendered = match compile_tree(tree, &mut generations, code) {
        Ok(rendered) => rendered,
        Err(e) => {
            code.truncate(initial_len);
            return Err(e);
        },
    };

    code.push(Statement::Assign { target: RESULT_NAME.to_string(),
                                  expr:   rendered.clone(), });

    // Rebind each touched variable to its final generation and drop the
    // temporaries, leaving every variable conceptually back at
    // generation 0.
    for (name, generation) in generations.sorted() {
        if generation == 0 {
            continue;
        }
        code.push(Statement::Comment(format!("Update and cleanup {name}")));
        code.push(Statement::Assign { target: name.clone(),
                                      expr:   generation_name(name, generation), });
        for g in 1..=generation {
            code.push(Statement::Delete(generation_name(name, g)));
        }
    }

    Ok(Some(rendered))
}

/// Compiles one tree node, returning the expression text that stands for
/// its value.
///
/// Statements required by nested assignments are appended to `code`
/// before the caller's own statement, preserving the evaluator's
/// left-to-right side-effect order.
fn compile_tree(tree: &Tree,
                generations: &mut Generations,
                code: &mut Vec<Statement>)
                -> CompileResult<String> {
    match tree {
        Tree::Const(value) => Ok(value.to_string()),

        Tree::Get(name) => Ok(generation_name(name, generations.current(name))),

        Tree::Set { name, expr } => {
            // The right-hand side compiles first so its statements land
            // ahead of this assignment's own statement.
            let rendered = compile_tree(expr, generations, code)?;
            let target = generation_name(name, generations.advance(name));
            code.push(Statement::Assign { target: target.clone(),
                                          expr:   rendered, });
            // Outer expressions see the bound value's name, matching the
            // evaluator's "Set returns the bound value".
            Ok(target)
        },

        Tree::Apply { op, args } => compile_apply(op, args, generations, code),

        Tree::Pass => Err(CompileError::EmptyOperand),
    }
}

/// Compiles an application node.
///
/// Arguments are compiled strictly left to right before any rendering
/// happens, so statements emitted by nested assignments keep their source
/// order. Built-in operations render in their fixed shapes; any other
/// identifier renders as an n-ary call, since the callee may be defined
/// in the execution context the fragment eventually runs in.
fn compile_apply(op: &str,
                 args: &[Tree],
                 generations: &mut Generations,
                 code: &mut Vec<Statement>)
                 -> CompileResult<String> {
    if let Some(builtin) = Builtin::lookup(op) {
        if args.len() != builtin.arity() {
            return Err(CompileError::ArityMismatch { name:     op.to_string(),
                                                     expected: builtin.arity(),
                                                     found:    args.len(), });
        }

        let mut parts = Vec::with_capacity(args.len());
        for arg in args {
            parts.push(compile_tree(arg, generations, code)?);
        }

        Ok(match builtin {
               Builtin::Neg => format!("(-{})", parts[0]),
               Builtin::Sqr => format!("({} ** 2)", parts[0]),
               _ => format!("({} {} {})", parts[0], builtin.symbol(), parts[1]),
           })
    } else if is_identifier(op) {
        let mut parts = Vec::with_capacity(args.len());
        for arg in args {
            parts.push(compile_tree(arg, generations, code)?);
        }

        Ok(format!("{op}({})", parts.join(", ")))
    } else {
        Err(CompileError::UnknownOperation { name: op.to_string() })
    }
}

/// Whether a name is a well-formed identifier and may render as a call.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next()
         .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
