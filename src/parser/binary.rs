use std::iter::Peekable;

use crate::{
    ast::Tree,
    lexer::Token,
    ops::Builtin,
    parser::{core::ParseResult, unary::parse_unary},
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A `Tree::Apply` chain representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Tree>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_operator(token)
           && matches!(op, Builtin::Add | Builtin::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = Tree::Apply { op:   op.symbol().to_string(),
                                 args: vec![left, right], };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles the left-associative operators `*` and `/`.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A binary application tree combining unary-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Tree>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_unary(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_operator(token)
           && matches!(op, Builtin::Mul | Builtin::Div)
        {
            tokens.next();
            let right = parse_unary(tokens)?;
            left = Tree::Apply { op:   op.symbol().to_string(),
                                 args: vec![left, right], };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(Builtin)` if the token is one of `+`, `-`, `*`, `/`, otherwise
/// `None`.
///
/// ## Example
/// ```
/// use gencalc::{lexer::Token, ops::Builtin, parser::binary::token_to_operator};
///
/// assert_eq!(token_to_operator(&Token::Plus), Some(Builtin::Add));
/// assert_eq!(token_to_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_operator(token: &Token) -> Option<Builtin> {
    match token {
        Token::Plus => Some(Builtin::Add),
        Token::Minus => Some(Builtin::Sub),
        Token::Star => Some(Builtin::Mul),
        Token::Slash => Some(Builtin::Div),
        _ => None,
    }
}
