//! # gencalc
//!
//! gencalc is a small expression-language front end written in Rust. It
//! parses arithmetic formulas in which assignment is itself an expression,
//! and feeds the resulting tree to one of two backends: a direct evaluator
//! over a persistent binding store, or a sequentializing compiler that
//! flattens nested assignments into an ordered statement list using
//! per-variable generations.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::collections::HashMap;

use crate::{compiler::Statement, error::ParseFailure, value::Value};

/// Defines the structure of parsed code.
///
/// This module declares the `Tree` enum that represents the syntactic
/// structure of one expression, built by the parser and traversed
/// read-only by both backends, plus the `unparse` rendering back to text.
pub mod ast;
/// The sequentializing compiler backend.
///
/// Flattens a tree into an ordered list of single-assignment-style
/// statements plus cleanup statements, so that a target language without
/// expression-level assignment reproduces the same final bindings and the
/// same result value.
pub mod compiler;
/// Provides unified error types for parsing, evaluation, and compilation.
///
/// Defines one error enum per failure domain, with human-readable
/// `Display` output and standard error trait integration.
pub mod error;
/// The evaluator backend.
///
/// A tree-walking interpreter over a caller-owned name-to-value binding
/// store.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// Built on a derived [logos](https://docs.rs/logos) lexer; produces the
/// token stream the recursive-descent parser consumes.
pub mod lexer;
/// The operator table.
///
/// A read-only bidirectional mapping between operator symbols and the
/// built-in operations, shared by the evaluator, the compiler, and
/// `unparse`.
pub mod ops;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// Malformed input never raises; every problem is recorded as a
/// diagnostic string and a placeholder tree is returned instead.
pub mod parser;
/// General utilities for safe numeric conversion.
pub mod util;
/// Runtime numeric values.
///
/// The `Value` enum with checked integer arithmetic and lossless
/// promotion to floating point.
pub mod value;

/// Parses and evaluates one expression against a binding store.
///
/// This is the string-level evaluation service: it runs the parser, gates
/// on its diagnostics, and hands the tree to the evaluator. Bindings
/// persist in `bindings` across calls, so a sequence of calls behaves
/// like a calculator session.
///
/// # Parameters
/// - `source`: The expression text.
/// - `bindings`: Mutable map from variable name to current value.
///
/// # Returns
/// `Ok(Some(value))` for expressions that produce a value, `Ok(None)` for
/// empty input.
///
/// # Errors
/// Returns a `ParseFailure` when the parser records diagnostics, or the
/// evaluator's error otherwise. Bindings written before an evaluation
/// failure are retained.
///
/// ## Example
/// ```
/// use std::collections::HashMap;
///
/// use gencalc::{evaluate_str, value::Value};
///
/// let mut bindings = HashMap::new();
/// let value = evaluate_str("(x = 1) + (x = x + 2)", &mut bindings).unwrap();
/// assert_eq!(value, Some(Value::Integer(4)));
/// assert_eq!(bindings.get("x"), Some(&Value::Integer(3)));
///
/// // 'y' is unbound, so evaluation fails.
/// assert!(evaluate_str("y + 1", &mut bindings).is_err());
/// ```
pub fn evaluate_str(source: &str,
                    bindings: &mut HashMap<String, Value>)
                    -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let (diagnostics, tree) = parser::parse(source);
    if !diagnostics.is_empty() {
        return Err(Box::new(ParseFailure { diagnostics }));
    }
    Ok(evaluator::evaluate(&tree, bindings)?)
}

/// Parses and compiles one expression, appending to a statement buffer.
///
/// This is the string-level compilation service: it runs the parser,
/// gates on its diagnostics, and hands the tree to the sequentializing
/// compiler. On any failure the buffer is left exactly as it was.
///
/// # Parameters
/// - `source`: The expression text.
/// - `code`: The growing statement buffer; prior contents are preserved.
///
/// # Returns
/// `Ok(Some(rendering))` with the result expression's text on success, or
/// `Ok(None)` for empty input, which compiles to no statements.
///
/// # Errors
/// Returns a `ParseFailure` when the parser records diagnostics, or the
/// compiler's error otherwise.
///
/// ## Example
/// ```
/// use gencalc::{compile_str, compiler::render};
///
/// let mut code = Vec::new();
/// compile_str("1 + 2", &mut code).unwrap();
/// assert_eq!(render(&code), "# code for:\n# (1 + 2)\nresult = (1 + 2)");
/// ```
pub fn compile_str(source: &str,
                   code: &mut Vec<Statement>)
                   -> Result<Option<String>, Box<dyn std::error::Error>> {
    let (diagnostics, tree) = parser::parse(source);
    if !diagnostics.is_empty() {
        return Err(Box::new(ParseFailure { diagnostics }));
    }
    Ok(compiler::compile_top(&tree, code)?)
}
