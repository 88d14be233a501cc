#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
///
/// These are never propagated out of the parser as `Err`; the parser
/// converts each one into a diagnostic string and returns a placeholder
/// `Pass` tree instead.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    SyntaxError {
        /// The token encountered, as it appears in the source.
        token: String,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEof,
    /// The lexer could not form a token from the input.
    IllegalCharacter {
        /// The offending source text.
        text: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SyntaxError { token } => write!(f, "Syntax error at '{token}'"),
            Self::UnexpectedEof => write!(f, "Syntax error at EOF"),
            Self::IllegalCharacter { text } => write!(f, "Illegal character '{text}'"),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug)]
/// Aggregates parser diagnostics into a single failure.
///
/// The parser itself reports diagnostics as data; string-level callers
/// that need an error value (because a non-empty diagnostics list makes
/// the returned tree unusable) wrap the list in a `ParseFailure`.
pub struct ParseFailure {
    /// The recorded diagnostics, in order of generation.
    pub diagnostics: Vec<String>,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parsing generated errors:\n{}", self.diagnostics.join("\n"))
    }
}

impl std::error::Error for ParseFailure {}
