use std::collections::HashMap;

use gencalc::{
    ast::Tree,
    compile_str,
    compiler::{Statement, compile_top},
    error::{CompileError, EvalError},
    evaluate_str,
    evaluator::evaluate,
    parser::parse,
    value::Value,
};

/// Parses a source string, asserting that no diagnostics were recorded.
fn parse_ok(source: &str) -> Tree {
    let (diagnostics, tree) = parse(source);
    assert!(diagnostics.is_empty(),
            "'{source}' produced diagnostics: {diagnostics:?}");
    tree
}

/// Compiles a source string and returns the rendered statement lines.
fn compile_lines(source: &str) -> Vec<String> {
    let mut code = Vec::new();
    compile_str(source, &mut code).unwrap_or_else(|e| panic!("'{source}' failed to compile: {e}"));
    code.iter().map(ToString::to_string).collect()
}

/// Evaluates a source string against a fresh binding store.
fn eval_fresh(source: &str) -> (Option<Value>, HashMap<String, Value>) {
    let mut bindings = HashMap::new();
    let value = evaluate_str(source, &mut bindings).unwrap_or_else(|e| {
                                                       panic!("'{source}' failed to evaluate: {e}")
                                                   });
    (value, bindings)
}

/// Executes compiled statements the way a target interpreter would:
/// assignments re-parse and evaluate their expression against the
/// context, deletions drop names, comments do nothing.
fn run_compiled(code: &[Statement], context: &mut HashMap<String, Value>) {
    for statement in code {
        match statement {
            Statement::Comment(_) => {},
            Statement::Assign { target, expr } => {
                let (diagnostics, tree) = parse(expr);
                assert!(diagnostics.is_empty(),
                        "compiled expression '{expr}' did not re-parse: {diagnostics:?}");
                let value = evaluate(&tree, context).unwrap().unwrap();
                context.insert(target.clone(), value);
            },
            Statement::Delete(name) => {
                context.remove(name);
            },
        }
    }
}

#[test]
fn parser_builds_expected_trees() {
    assert_eq!(parse_ok("(42)"), Tree::Const(42));

    assert_eq!(parse_ok("1 + 2"),
               Tree::Apply { op:   "+".to_string(),
                             args: vec![Tree::Const(1), Tree::Const(2)], });

    assert_eq!(parse_ok("x + 2"),
               Tree::Apply { op:   "+".to_string(),
                             args: vec![Tree::Get("x".to_string()), Tree::Const(2)], });

    assert_eq!(parse_ok("f()"),
               Tree::Apply { op:   "f".to_string(),
                             args: vec![], });

    assert_eq!(parse_ok("f(1, 2, 3)"),
               Tree::Apply { op:   "f".to_string(),
                             args: vec![Tree::Const(1), Tree::Const(2), Tree::Const(3)], });

    assert_eq!(parse_ok("x = 1 + y"),
               Tree::Set { name: "x".to_string(),
                           expr: Box::new(Tree::Apply { op:   "+".to_string(),
                                                        args: vec![Tree::Const(1),
                                                                   Tree::Get("y".to_string())], }), });
}

#[test]
fn assignment_extends_to_the_right() {
    // The right-hand side of an assignment claims the rest of the
    // expression, so these are not what the surface text suggests.
    assert_eq!(parse_ok("y + y = 1"),
               Tree::Apply { op:   "+".to_string(),
                             args: vec![Tree::Get("y".to_string()),
                                        Tree::Set { name: "y".to_string(),
                                                    expr: Box::new(Tree::Const(1)), }], });

    assert_eq!(parse_ok("-x = 3"),
               Tree::Apply { op:   "neg".to_string(),
                             args: vec![Tree::Set { name: "x".to_string(),
                                                    expr: Box::new(Tree::Const(3)), }], });
}

#[test]
fn empty_input_parses_to_pass() {
    let (diagnostics, tree) = parse("");
    assert!(diagnostics.is_empty());
    assert_eq!(tree, Tree::Pass);

    let (diagnostics, tree) = parse("   \n\t  ");
    assert!(diagnostics.is_empty());
    assert_eq!(tree, Tree::Pass);
}

#[test]
fn malformed_input_records_diagnostics() {
    let (diagnostics, tree) = parse("x + - + 1");
    assert_eq!(diagnostics, vec!["Syntax error at '+'".to_string()]);
    assert_eq!(tree, Tree::Pass);

    let (diagnostics, tree) = parse("(1,2)");
    assert_eq!(diagnostics, vec!["Syntax error at ','".to_string()]);
    assert_eq!(tree, Tree::Pass);

    let (diagnostics, tree) = parse("()+()");
    assert_eq!(diagnostics, vec!["Syntax error at ')'".to_string()]);
    assert_eq!(tree, Tree::Pass);

    let (diagnostics, tree) = parse("1 +");
    assert_eq!(diagnostics, vec!["Syntax error at EOF".to_string()]);
    assert_eq!(tree, Tree::Pass);

    let (diagnostics, tree) = parse("1 2");
    assert_eq!(diagnostics, vec!["Syntax error at '2'".to_string()]);
    assert_eq!(tree, Tree::Pass);

    let (diagnostics, tree) = parse("x + $");
    assert_eq!(diagnostics, vec!["Illegal character '$'".to_string()]);
    assert_eq!(tree, Tree::Pass);
}

#[test]
fn unparse_round_trips() {
    let sources = ["42",
                   "1 + 2 * 3 - 4 / 5",
                   "-x",
                   "- - 1",
                   "sqr(2)",
                   "f()",
                   "f(1, x, g(2, 3))",
                   "x = 1 + y",
                   "y + y = 1",
                   "(x = 1) + (x = x + 2) + (x = x + 42)",
                   "x = 1 + (y = (x = (x - - - - 3) + - - - - y))"];

    for source in sources {
        let tree = parse_ok(source);
        let (diagnostics, reparsed) = parse(&tree.unparse());
        assert!(diagnostics.is_empty(),
                "unparse of '{source}' did not re-parse: {diagnostics:?}");
        assert_eq!(reparsed, tree, "round trip changed the tree for '{source}'");
    }
}

#[test]
fn evaluator_basic_arithmetic() {
    let (value, _) = eval_fresh("1 + 2");
    assert_eq!(value, Some(Value::Integer(3)));

    let (value, _) = eval_fresh("sqr(2)");
    assert_eq!(value, Some(Value::Integer(4)));

    let (value, _) = eval_fresh("2 + 3 * 4");
    assert_eq!(value, Some(Value::Integer(14)));

    let (value, _) = eval_fresh("-(1 + 2)");
    assert_eq!(value, Some(Value::Integer(-3)));

    // True division always produces a real.
    let (value, _) = eval_fresh("10 / 4");
    assert_eq!(value, Some(Value::Real(2.5)));
}

#[test]
fn evaluator_assignment_is_an_expression() {
    let (value, bindings) = eval_fresh("(x = 2) + 1");
    assert_eq!(value, Some(Value::Integer(3)));
    assert_eq!(bindings.get("x"), Some(&Value::Integer(2)));

    let (value, bindings) = eval_fresh("(x = 1) + (x = x + 2) + (x = x + 42)");
    assert_eq!(value, Some(Value::Integer(49)));
    assert_eq!(bindings.get("x"), Some(&Value::Integer(45)));

    // Nested assignment: the outer set sees the sum of all the parts.
    let (value, bindings) = eval_fresh("(x = 2 + (x = 3) + (x = 4) + (x = 5))");
    assert_eq!(value, Some(Value::Integer(14)));
    assert_eq!(bindings.get("x"), Some(&Value::Integer(14)));
}

#[test]
fn evaluator_pass_produces_no_value() {
    let mut bindings = HashMap::new();
    assert_eq!(evaluate(&Tree::Pass, &mut bindings).unwrap(), None);
}

#[test]
fn evaluator_failures() {
    let mut bindings = HashMap::new();

    let tree = parse_ok("y = x + 1");
    assert_eq!(evaluate(&tree, &mut bindings),
               Err(EvalError::UnboundVariable { name: "x".to_string() }));

    let tree = parse_ok("f(1)");
    assert_eq!(evaluate(&tree, &mut bindings),
               Err(EvalError::UnknownOperation { name: "f".to_string() }));

    let tree = parse_ok("1 / 0");
    assert_eq!(evaluate(&tree, &mut bindings), Err(EvalError::DivisionByZero));
}

#[test]
fn evaluator_partial_effects_survive_failure() {
    let mut bindings = HashMap::new();

    let tree = parse_ok("(x = 5) + y");
    assert!(evaluate(&tree, &mut bindings).is_err());

    // The assignment to x happened before the unbound read of y failed,
    // and it stays.
    assert_eq!(bindings.get("x"), Some(&Value::Integer(5)));
}

#[test]
fn compile_literals_and_operators() {
    assert_eq!(compile_lines("1"), vec!["# code for:", "# 1", "result = 1"]);

    assert_eq!(compile_lines("-1"),
               vec!["# code for:", "# neg(1)", "result = (-1)"]);

    assert_eq!(compile_lines("sqr(2)"),
               vec!["# code for:", "# sqr(2)", "result = (2 ** 2)"]);

    assert_eq!(compile_lines("1 / 0"),
               vec!["# code for:", "# (1 / 0)", "result = (1 / 0)"]);

    assert_eq!(compile_lines("1 + 2"),
               vec!["# code for:", "# (1 + 2)", "result = (1 + 2)"]);

    assert_eq!(compile_lines("((x0 + y0) + x1)"),
               vec!["# code for:", "# ((x0 + y0) + x1)", "result = ((x0 + y0) + x1)"]);
}

#[test]
fn compile_generations_advance_per_assignment() {
    assert_eq!(compile_lines("(x = 1) + (x = x + 2) + (x = x + 42)"),
               vec!["# code for:",
                    "# (((x = 1) + (x = (x + 2))) + (x = (x + 42)))",
                    "_x_1 = 1",
                    "_x_2 = (_x_1 + 2)",
                    "_x_3 = (_x_2 + 42)",
                    "result = ((_x_1 + _x_2) + _x_3)",
                    "# Update and cleanup x",
                    "x = _x_3",
                    "del(_x_1)",
                    "del(_x_2)",
                    "del(_x_3)"]);

    assert_eq!(compile_lines("(x = (x = ( x = (x = 42))))"),
               vec!["# code for:",
                    "# (x = (x = (x = (x = 42))))",
                    "_x_1 = 42",
                    "_x_2 = _x_1",
                    "_x_3 = _x_2",
                    "_x_4 = _x_3",
                    "result = _x_4",
                    "# Update and cleanup x",
                    "x = _x_4",
                    "del(_x_1)",
                    "del(_x_2)",
                    "del(_x_3)",
                    "del(_x_4)"]);
}

#[test]
fn compile_does_not_require_bound_variables() {
    // The evaluator rejects this expression when x is unbound; the
    // compiler accepts it, since x may be bound by code that runs before
    // this fragment.
    assert_eq!(compile_lines("y = x + 1"),
               vec!["# code for:",
                    "# (y = (x + 1))",
                    "_y_1 = (x + 1)",
                    "result = _y_1",
                    "# Update and cleanup y",
                    "y = _y_1",
                    "del(_y_1)"]);

    assert_eq!(compile_lines("y + y = 1"),
               vec!["# code for:",
                    "# (y + (y = 1))",
                    "_y_1 = 1",
                    "result = (y + _y_1)",
                    "# Update and cleanup y",
                    "y = _y_1",
                    "del(_y_1)"]);
}

#[test]
fn compile_orders_statements_left_to_right() {
    assert_eq!(compile_lines("(a = 1) * (b = 2)"),
               vec!["# code for:",
                    "# ((a = 1) * (b = 2))",
                    "_a_1 = 1",
                    "_b_1 = 2",
                    "result = (_a_1 * _b_1)",
                    "# Update and cleanup a",
                    "a = _a_1",
                    "del(_a_1)",
                    "# Update and cleanup b",
                    "b = _b_1",
                    "del(_b_1)"]);

    assert_eq!(compile_lines("x=1 + (y=2) + (z=x)"),
               vec!["# code for:",
                    "# (x = ((1 + (y = 2)) + (z = x)))",
                    "_y_1 = 2",
                    "_z_1 = x",
                    "_x_1 = ((1 + _y_1) + _z_1)",
                    "result = _x_1",
                    "# Update and cleanup x",
                    "x = _x_1",
                    "del(_x_1)",
                    "# Update and cleanup y",
                    "y = _y_1",
                    "del(_y_1)",
                    "# Update and cleanup z",
                    "z = _z_1",
                    "del(_z_1)"]);
}

#[test]
fn compile_underscore_names_keep_their_prefix() {
    assert_eq!(compile_lines("_p_ + _g_ + _y_ = 3"),
               vec!["# code for:",
                    "# ((_p_ + _g_) + (_y_ = 3))",
                    "__y__1 = 3",
                    "result = ((_p_ + _g_) + __y__1)",
                    "# Update and cleanup _y_",
                    "_y_ = __y__1",
                    "del(__y__1)"]);
}

#[test]
fn compile_cleanup_groups_prefix_related_names() {
    // x and x1 are prefix-related; each variable's cleanup block must
    // stay contiguous, x before x1.
    assert_eq!(compile_lines("(x1 = 2) + (x = 1) + (x = x + x1)"),
               vec!["# code for:",
                    "# (((x1 = 2) + (x = 1)) + (x = (x + x1)))",
                    "_x1_1 = 2",
                    "_x_1 = 1",
                    "_x_2 = (_x_1 + _x1_1)",
                    "result = ((_x1_1 + _x_1) + _x_2)",
                    "# Update and cleanup x",
                    "x = _x_2",
                    "del(_x_1)",
                    "del(_x_2)",
                    "# Update and cleanup x1",
                    "x1 = _x1_1",
                    "del(_x1_1)"]);
}

#[test]
fn compile_cleanup_order_is_stable_for_colliding_keys() {
    // x and _x share the cleanup sort key "_x"; the tie breaks on the
    // plain name, so repeated compiles of this expression always order
    // the blocks the same way.
    let expected = vec!["# code for:".to_string(),
                        "# ((x = 1) + (_x = 2))".to_string(),
                        "_x_1 = 1".to_string(),
                        "__x_1 = 2".to_string(),
                        "result = (_x_1 + __x_1)".to_string(),
                        "# Update and cleanup _x".to_string(),
                        "_x = __x_1".to_string(),
                        "del(__x_1)".to_string(),
                        "# Update and cleanup x".to_string(),
                        "x = _x_1".to_string(),
                        "del(_x_1)".to_string()];

    for _ in 0..32 {
        assert_eq!(compile_lines("(x = 1) + (_x = 2)"), expected);
    }
}

#[test]
fn compile_unknown_calls_render_as_calls() {
    assert_eq!(compile_lines("f((x = 1), x, g())"),
               vec!["# code for:",
                    "# f((x = 1),x,g())",
                    "_x_1 = 1",
                    "result = f(_x_1, _x_1, g())",
                    "# Update and cleanup x",
                    "x = _x_1",
                    "del(_x_1)"]);
}

#[test]
fn compile_pass_emits_nothing() {
    let mut code = Vec::new();
    assert_eq!(compile_top(&Tree::Pass, &mut code).unwrap(), None);
    assert!(code.is_empty());

    assert_eq!(compile_str("", &mut code).unwrap(), None);
    assert!(code.is_empty());
}

#[test]
fn compile_rolls_back_on_failure() {
    // An operation name that is neither a built-in nor an identifier has
    // no rendering; such trees only arise by hand.
    let bad = Tree::Apply { op:   "+".to_string(),
                            args: vec![Tree::Set { name: "x".to_string(),
                                                   expr: Box::new(Tree::Const(1)), },
                                       Tree::Apply { op:   "?".to_string(),
                                                     args: vec![], }], };

    let mut code = vec![Statement::Comment("prior line".to_string())];
    let before = code.clone();

    let error = compile_top(&bad, &mut code).unwrap_err();
    assert_eq!(error, CompileError::UnknownOperation { name: "?".to_string() });

    // Everything appended during the failed call is gone, including the
    // statement for the assignment to x that preceded the failure.
    assert_eq!(code, before);
}

#[test]
fn compile_rejects_wrong_builtin_arity() {
    let bad = Tree::Apply { op:   "+".to_string(),
                            args: vec![Tree::Const(1)], };

    let mut code = Vec::new();
    let error = compile_top(&bad, &mut code).unwrap_err();
    assert_eq!(error,
               CompileError::ArityMismatch { name:     "+".to_string(),
                                             expected: 2,
                                             found:    1, });
    assert!(code.is_empty());
}

#[test]
fn parse_failure_leaves_buffer_untouched() {
    let mut code = vec![Statement::Comment("prior line".to_string())];
    let before = code.clone();

    let error = compile_str("x + - + 1", &mut code).unwrap_err();
    assert_eq!(error.to_string(),
               "Parsing generated errors:\nSyntax error at '+'");
    assert_eq!(code, before);
}

#[test]
fn compiled_code_reproduces_the_evaluator() {
    // Each case is evaluated directly and then executed in its compiled
    // form against an equal starting context; final bindings and the
    // result value must agree. (sqr is absent here: its compiled `**`
    // form is target syntax this grammar does not read back.)
    let cases: &[(&str, &[(&str, i64)])] =
        &[("1 + 2", &[]),
          ("10 / 4", &[]),
          ("(x = 2) + 1", &[]),
          ("(x = 1) + (x = x + 2) + (x = x + 42)", &[]),
          ("(x = 2 + (x = 3) + (x = 4) + (x = 5))", &[]),
          ("(x = 2) + (x = 3) + (x = 4) + (x = 5)", &[]),
          ("(x = 1) + (y = x + 1)", &[]),
          ("x=1 + (y=2) + (z=x)", &[]),
          ("(x1 = 2) + (x = 1) + (x = x + x1)", &[]),
          ("y + y = 1", &[("y", 7)]),
          ("x = 1 + (y = (x = (x - - - - 3) + - - - - y))", &[("x", 10), ("y", 4)])];

    for (source, seeds) in cases {
        let mut bindings = HashMap::new();
        let mut context = HashMap::new();
        for (name, value) in *seeds {
            bindings.insert((*name).to_string(), Value::Integer(*value));
            context.insert((*name).to_string(), Value::Integer(*value));
        }

        let expected = evaluate_str(source, &mut bindings).unwrap_or_else(|e| {
                                                              panic!("'{source}' failed to evaluate: {e}")
                                                          })
                                                          .unwrap();

        let mut code = Vec::new();
        compile_str(source, &mut code).unwrap();
        run_compiled(&code, &mut context);

        let result = context.remove("result");
        assert_eq!(result,
                   Some(expected),
                   "result value diverged for '{source}'");
        assert_eq!(context, bindings, "final bindings diverged for '{source}'");
    }
}

#[test]
fn evaluate_str_keeps_bindings_across_calls() {
    let mut bindings = HashMap::new();

    assert_eq!(evaluate_str("x = 2", &mut bindings).unwrap(),
               Some(Value::Integer(2)));
    assert_eq!(evaluate_str("x + 1", &mut bindings).unwrap(),
               Some(Value::Integer(3)));
    assert_eq!(evaluate_str("", &mut bindings).unwrap(), None);
}
