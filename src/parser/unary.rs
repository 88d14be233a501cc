use std::iter::Peekable;

use crate::{
    ast::Tree,
    error::ParseError,
    lexer::Token,
    parser::{
        core::{ParseResult, parse_expression},
        utils::parse_comma_separated,
    },
};

/// Parses a unary expression.
///
/// The only prefix operator is `-` (numeric negation), which is
/// right-associative and becomes an `Apply("neg", ..)` node, so `- - x`
/// parses as `neg(neg(x))`. Without a prefix operator this delegates to
/// [`parse_primary`].
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | primary
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A negation application or a primary expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Tree>
    where I: Iterator<Item = &'a Token>
{
    if let Some(Token::Minus) = tokens.peek() {
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Tree::Apply { op:   "neg".to_string(),
                         args: vec![expr], })
    } else {
        parse_primary(tokens)
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - integer literals
/// - parenthesized expressions
/// - identifiers, which branch three ways on the following token:
///   assignment `name = expression`, call `name(arg, ...)`, or a plain
///   variable reference.
///
/// An assignment's right-hand side is a full expression, so it extends as
/// far right as possible; the assignment node then stands as a single
/// operand in the surrounding expression.
///
/// Grammar (simplified):
/// ```text
///     primary := NUMBER
///              | "(" expression ")"
///              | NAME "=" expression
///              | NAME "(" (expression ("," expression)*)? ")"
///              | NAME
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary
///   expression.
///
/// # Returns
/// The parsed primary `Tree` or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Tree>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(Token::Integer(n)) => Ok(Tree::Const(*n)),

        Some(Token::LParen) => {
            let expr = parse_expression(tokens)?;
            match tokens.next() {
                Some(Token::RParen) => Ok(expr),
                Some(token) => Err(ParseError::SyntaxError { token: token.to_string() }),
                None => Err(ParseError::UnexpectedEof),
            }
        },

        Some(Token::Identifier(name)) => match tokens.peek() {
            Some(Token::Equals) => {
                tokens.next();
                let expr = parse_expression(tokens)?;
                Ok(Tree::Set { name: name.clone(),
                               expr: Box::new(expr), })
            },
            Some(Token::LParen) => {
                tokens.next();
                let args = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                Ok(Tree::Apply { op: name.clone(),
                                 args })
            },
            _ => Ok(Tree::Get(name.clone())),
        },

        Some(token) => Err(ParseError::SyntaxError { token: token.to_string() }),
        None => Err(ParseError::UnexpectedEof),
    }
}
