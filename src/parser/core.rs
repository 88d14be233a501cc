use std::iter::Peekable;

use logos::Logos;

use crate::{
    ast::Tree,
    error::ParseError,
    lexer::Token,
    parser::binary::parse_additive,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a source string into a tree plus a list of diagnostics.
///
/// This function never fails: malformed input records one human-readable
/// diagnostic string per problem and yields a placeholder `Tree::Pass`.
/// An empty input parses to `Pass` with no diagnostics. Callers must
/// treat the tree as unusable whenever the diagnostics list is non-empty.
///
/// # Parameters
/// - `source`: The expression text.
///
/// # Returns
/// A `(diagnostics, tree)` pair; diagnostics are ordered by generation.
///
/// ## Example
/// ```
/// use gencalc::{ast::Tree, parser::parse};
///
/// let (diagnostics, tree) = parse("1 + 2");
/// assert!(diagnostics.is_empty());
/// assert_eq!(tree,
///            Tree::Apply { op:   "+".to_string(),
///                          args: vec![Tree::Const(1), Tree::Const(2)], });
///
/// let (diagnostics, tree) = parse("x + - + 1");
/// assert_eq!(diagnostics, vec!["Syntax error at '+'".to_string()]);
/// assert_eq!(tree, Tree::Pass);
/// ```
#[must_use]
pub fn parse(source: &str) -> (Vec<String>, Tree) {
    let mut diagnostics = Vec::new();
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push(tok);
        } else {
            let text = lexer.slice().to_string();
            diagnostics.push(ParseError::IllegalCharacter { text }.to_string());
        }
    }

    if !diagnostics.is_empty() {
        return (diagnostics, Tree::Pass);
    }

    if tokens.is_empty() {
        return (Vec::new(), Tree::Pass);
    }

    let mut iter = tokens.iter().peekable();
    match parse_expression(&mut iter) {
        Ok(tree) => match iter.next() {
            None => (Vec::new(), tree),
            Some(token) => {
                let error = ParseError::SyntaxError { token: token.to_string() };
                (vec![error.to_string()], Tree::Pass)
            },
        },
        Err(e) => (vec![e.to_string()], Tree::Pass),
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, additive, and recursively descends through
/// the precedence hierarchy. Assignments do not appear here: they start
/// wherever an operand is expected and claim the rest of the expression
/// to their right, which is what makes `y + y = 1` parse as
/// `y + (y = 1)`.
///
/// Grammar: `expression := additive`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Tree>
    where I: Iterator<Item = &'a Token>
{
    parse_additive(tokens)
}
