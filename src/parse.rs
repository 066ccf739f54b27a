mod cursor;
mod lexer;
mod parser;
mod token;

pub use cursor::{Cursor, Scan};
pub use lexer::{Lexer, LexerError, LexerErrorKind};
pub use parser::{Parser, ParserError};
pub use token::{Token, TokenKind};
