//! Syntax validation for a small tag-based templating language.
//!
//! The crate answers one question: is a source text a syntactically valid
//! template program? [`validate`] runs the full recursive-descent
//! derivation and reports the first lexical or syntax error; [`tokenize`]
//! exposes the token stream the recognizer consumes. No syntax tree is
//! built and nothing is evaluated.

pub mod location;
pub mod parse;

pub use parse::{Lexer, LexerError, Parser, ParserError, Token, TokenKind};

use parse::Cursor;

/// Returns the lazy token sequence for `text`, ending with an
/// [`Eof`](TokenKind::Eof) token or stopping at the first lexical error.
pub fn tokenize(text: &str) -> Lexer<'_> {
    Lexer::new(Cursor::new(text))
}

/// Checks whether `text` is a valid template program.
///
/// Stops at the first error; there is no recovery and no partial result.
pub fn validate(text: &str) -> Result<(), ParserError> {
    Parser::new(tokenize(text))?.parse()
}
