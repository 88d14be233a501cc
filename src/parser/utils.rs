use std::iter::Peekable;

use crate::{error::ParseError, lexer::Token, parser::core::ParseResult};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility backs function argument lists. It repeatedly calls
/// `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list, which
/// is how zero-argument calls parse.
///
/// Grammar (simplified): `list := (item ("," item)*)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing
///   token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token
/// is encountered, or the stream ends before the closing token.
pub(in crate::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> Result<Vec<T>, ParseError>
    where I: Iterator<Item = &'a Token>
{
    let mut items = Vec::new();
    if let Some(token) = tokens.peek()
       && *token == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some(Token::Comma) => {
                tokens.next();
            },
            Some(token) if *token == closing => {
                tokens.next();
                break;
            },
            Some(token) => {
                return Err(ParseError::SyntaxError { token: token.to_string() });
            },
            None => return Err(ParseError::UnexpectedEof),
        }
    }
    Ok(items)
}
