/// Core parsing logic.
///
/// Contains the public `parse` entry point, the diagnostics policy, and
/// the top of the precedence hierarchy.
pub mod core;

/// Binary operator parsing.
///
/// Implements the left-associative additive and multiplicative precedence
/// levels.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Handles prefix minus, literals, identifiers, assignments, function
/// calls, and parenthesized groups.
pub mod unary;

/// Utility functions for the parser.
///
/// Provides helpers shared by the precedence levels, such as
/// comma-separated list parsing.
pub mod utils;

pub use core::parse;
