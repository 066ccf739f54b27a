use std::fmt::{self, Display};

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::location::Position;

use super::cursor::{Cursor, Scan};
use super::token::{Token, TokenKind};

fn format_char(c: char) -> impl Display {
    struct CharFormatter(char);

    impl Display for CharFormatter {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if self.0.is_ascii_graphic() {
                write!(f, "`{}`", self.0)
            } else {
                write!(f, "U+{:04x}", self.0 as u32)
            }
        }
    }

    CharFormatter(c)
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("lexical error at line {line}, column {column}: {kind}")]
pub struct LexerError {
    pub kind: LexerErrorKind,
    pub line: u32,
    pub column: u32,

    #[label("{kind}")]
    pub span: SourceSpan,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerErrorKind {
    #[error("unrecognized character {}", format_char(*.0))]
    UnrecognizedCharacter(char),

    #[error("the string literal is not terminated")]
    UnterminatedString,
}

/// Groups characters pulled from a [`Cursor`] into [`Token`]s, one per call
/// to [`Lexer::next_token`].
///
/// Lookahead never commits: peeking consumes from a throwaway copy of the
/// cursor, so every character of the input ends up in exactly one token.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    eof: bool,
}

impl Lexer<'_> {
    fn is_letter(c: char) -> bool {
        c.is_alphabetic()
    }

    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    fn is_word_part(c: char) -> bool {
        c.is_alphanumeric()
    }
}

impl<'a> Lexer<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self { cursor, eof: false }
    }

    pub fn pos(&self) -> Position {
        self.cursor.pos()
    }

    fn peek(&self) -> Option<char> {
        self.cursor.consume().value()
    }

    fn advance(&mut self) -> Option<char> {
        match self.cursor.consume() {
            Scan::Next(c, rest) => {
                self.cursor = rest;

                Some(c)
            }

            Scan::End(_) => None,
        }
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        self.advance_while(char::is_whitespace);
    }

    fn token(&self, kind: TokenKind, start: &Cursor<'a>) -> Token<'a> {
        let len = self.cursor.pos().offset - start.pos().offset;

        Token {
            kind,
            lexeme: &start.remaining()[..len],
            pos: self.cursor.pos(),
        }
    }

    fn error(&self, kind: LexerErrorKind, start: &Cursor<'a>) -> LexerError {
        let pos = self.cursor.pos();

        LexerError {
            kind,
            line: pos.line,
            column: pos.column,
            span: (start.pos().offset..pos.offset).into(),
        }
    }

    fn scan_word(&mut self, start: &Cursor<'a>) -> Token<'a> {
        self.advance();
        self.advance_while(Self::is_word_part);

        let lexeme = &start.remaining()[..self.cursor.pos().offset - start.pos().offset];
        let kind = TokenKind::keyword(lexeme).unwrap_or(TokenKind::Identifier);

        self.token(kind, start)
    }

    fn scan_number(&mut self, start: &Cursor<'a>) -> Token<'a> {
        self.advance();
        self.advance_while(Self::is_digit);

        if self.peek() != Some('.') {
            return self.token(TokenKind::IntConstant, start);
        }

        // A trailing `.` with no fractional digits still makes a float
        // lexeme: the fractional run may be empty.
        self.advance();
        self.advance_while(Self::is_digit);

        self.token(TokenKind::FloatConstant, start)
    }

    fn scan_string(&mut self, start: &Cursor<'a>) -> Result<Token<'a>, LexerError> {
        self.advance();

        loop {
            match self.advance() {
                Some('\'') => return Ok(self.token(TokenKind::StringConstant, start)),
                Some(_) => {}
                None => return Err(self.error(LexerErrorKind::UnterminatedString, start)),
            }
        }
    }

    fn scan_punctuation(&mut self, start: &Cursor<'a>) -> Result<Token<'a>, LexerError> {
        let c = self.advance().unwrap();

        let kind = match c {
            '<' => {
                if self.peek() == Some('>') {
                    self.advance();

                    TokenKind::NotEqual
                } else {
                    TokenKind::LessThan
                }
            }

            '=' => {
                if self.peek() == Some('=') {
                    self.advance();

                    TokenKind::Equal
                } else {
                    TokenKind::Assignation
                }
            }

            '>' => TokenKind::GreaterThan,
            '/' => TokenKind::Slash,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '%' => TokenKind::Percent,
            '-' => TokenKind::Hyphen,
            '+' => TokenKind::Plus,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '*' => TokenKind::Asterisk,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            // `:` has always lexed to the semicolon kind; no grammar rule
            // distinguishes the two.
            ':' => TokenKind::Semicolon,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '|' => TokenKind::Pipe,

            _ => return Err(self.error(LexerErrorKind::UnrecognizedCharacter(c), start)),
        };

        Ok(self.token(kind, start))
    }

    /// Produces the next token, or an [`Eof`](TokenKind::Eof) token with an
    /// empty lexeme once the input is exhausted. Calling again after `Eof`
    /// keeps producing `Eof`.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexerError> {
        self.skip_whitespace();

        let start = self.cursor.clone();

        match self.peek() {
            None => {
                self.eof = true;

                Ok(self.token(TokenKind::Eof, &start))
            }

            Some(c) if Self::is_letter(c) => Ok(self.scan_word(&start)),
            Some(c) if Self::is_digit(c) => Ok(self.scan_number(&start)),
            Some('\'') => self.scan_string(&start),
            Some(_) => self.scan_punctuation(&start),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof {
            return None;
        }

        Some(match self.next_token() {
            Ok(token) => Ok(token),

            Err(e) => {
                self.eof = true;

                Err(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        Lexer::new(Cursor::new(text))
            .map(|token| token.expect("unexpected lexical error").kind)
            .collect()
    }

    fn single(text: &str) -> Token<'_> {
        let mut lexer = Lexer::new(Cursor::new(text));
        let token = lexer.next_token().expect("unexpected lexical error");

        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);

        token
    }

    #[test]
    fn whitespace_amount_does_not_matter() {
        let compact = kinds("a+b");
        let spaced = kinds("a          +\n\n\t b");

        assert_eq!(compact, spaced);
        assert_eq!(
            compact,
            [
                TokenKind::Identifier,
                TokenKind::Plus,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn integer_constant() {
        let token = single("123");

        assert_eq!(token.kind, TokenKind::IntConstant);
        assert_eq!(token.lexeme, "123");
    }

    #[test]
    fn float_constant() {
        let token = single("12.5");

        assert_eq!(token.kind, TokenKind::FloatConstant);
        assert_eq!(token.lexeme, "12.5");
    }

    #[test]
    fn float_with_empty_fraction() {
        let token = single("12.");

        assert_eq!(token.kind, TokenKind::FloatConstant);
        assert_eq!(token.lexeme, "12.");
    }

    #[test]
    fn not_equal_is_one_token() {
        let token = single("<>");

        assert_eq!(token.kind, TokenKind::NotEqual);
        assert_eq!(token.lexeme, "<>");
    }

    #[test]
    fn lone_less_than_leaves_the_next_character() {
        assert_eq!(
            kinds("<a"),
            [TokenKind::LessThan, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn string_constant_keeps_its_quotes() {
        let token = single("'abc'");

        assert_eq!(token.kind, TokenKind::StringConstant);
        assert_eq!(token.lexeme, "'abc'");
    }

    #[test]
    fn unterminated_string_is_a_lexical_error() {
        let mut lexer = Lexer::new(Cursor::new("'abc"));
        let err = lexer.next_token().unwrap_err();

        assert_eq!(err.kind, LexerErrorKind::UnterminatedString);
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(
            kinds("foreach item in items"),
            [
                TokenKind::ForeachKeyword,
                TokenKind::Identifier,
                TokenKind::InKeyword,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn identifiers_munch_trailing_digits() {
        let token = single("item2");

        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.lexeme, "item2");
    }

    #[test]
    fn equality_operators() {
        assert_eq!(
            kinds("= =="),
            [TokenKind::Assignation, TokenKind::Equal, TokenKind::Eof]
        );
    }

    #[test]
    fn colon_lexes_to_the_semicolon_kind() {
        assert_eq!(kinds(":"), [TokenKind::Semicolon, TokenKind::Eof]);
    }

    #[test]
    fn unrecognized_character_reports_line_and_column() {
        let mut lexer = Lexer::new(Cursor::new("x\n  ?"));

        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);

        let err = lexer.next_token().unwrap_err();

        // The reported position is the one after the offending character
        // was consumed, like every token position.
        assert_eq!(err.kind, LexerErrorKind::UnrecognizedCharacter('?'));
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 4);
    }

    #[test]
    fn token_positions_follow_the_final_character() {
        let mut lexer = Lexer::new(Cursor::new("ab cd"));
        let first = lexer.next_token().unwrap();
        let second = lexer.next_token().unwrap();

        assert_eq!((first.line(), first.column()), (0, 2));
        assert_eq!((second.line(), second.column()), (0, 5));
    }

    #[test]
    fn the_iterator_fuses_after_eof() {
        let mut lexer = Lexer::new(Cursor::new("x"));

        assert_eq!(lexer.next().unwrap().unwrap().kind, TokenKind::Identifier);
        assert_eq!(lexer.next().unwrap().unwrap().kind, TokenKind::Eof);
        assert!(lexer.next().is_none());
    }
}
