use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use super::lexer::{Lexer, LexerError};
use super::token::{Token, TokenKind};

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("syntax error at line {line}, column {column}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        line: u32,
        column: u32,

        #[label("expected {expected} here")]
        span: SourceSpan,
    },

    #[error("syntax error at line {line}, column {column}: `{lexeme}` does not start a statement")]
    UnrecognizedStatement {
        lexeme: String,
        line: u32,
        column: u32,

        #[label("not a statement")]
        span: SourceSpan,
    },

    #[error("syntax error at line {line}, column {column}: `{lexeme}` is not a type keyword")]
    UnsupportedType {
        lexeme: String,
        line: u32,
        column: u32,

        #[label("expected a type keyword")]
        span: SourceSpan,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexer(#[from] LexerError),
}

/// A recognizer for the template grammar: one method per nonterminal, a
/// single buffered lookahead token, no backtracking.
///
/// On success there is nothing to return; the first mismatch aborts the
/// whole parse with a [`ParserError`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Token<'a>,
}

impl<'a> Parser<'a> {
    /// Creates the parser and primes the lookahead buffer, which can itself
    /// hit a lexical error.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, ParserError> {
        let lookahead = lexer.next_token()?;

        Ok(Self { lexer, lookahead })
    }

    pub fn parse(mut self) -> Result<(), ParserError> {
        self.program()
    }

    fn advance(&mut self) -> Result<(), ParserError> {
        self.lookahead = self.lexer.next_token()?;

        Ok(())
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.lookahead.kind == kind
    }

    fn expect(&mut self, expected: TokenKind) -> Result<(), ParserError> {
        if !self.at(expected) {
            return Err(ParserError::UnexpectedToken {
                expected,
                found: self.lookahead.kind,
                line: self.lookahead.line(),
                column: self.lookahead.column(),
                span: self.lookahead.span(),
            });
        }

        self.advance()
    }

    // Program := Init Template
    fn program(&mut self) -> Result<(), ParserError> {
        self.init()?;
        self.template()
    }

    // Template := Tag InnerTemplate; InnerTemplate recurses iff the
    // lookahead is `<`, which after a complete tag can only start a sibling.
    fn template(&mut self) -> Result<(), ParserError> {
        loop {
            self.tag()?;

            if !self.at(TokenKind::LessThan) {
                return Ok(());
            }
        }
    }

    // Tag := '<' Identifier '>' Stmts '<' '/' Identifier '>'
    //
    // The closing identifier is matched structurally only; it is never
    // compared against the opening one.
    fn tag(&mut self) -> Result<(), ParserError> {
        self.expect(TokenKind::LessThan)?;
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::GreaterThan)?;
        self.stmts()?;
        self.expect(TokenKind::LessThan)?;
        self.expect(TokenKind::Slash)?;
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::GreaterThan)
    }

    fn stmts(&mut self) -> Result<(), ParserError> {
        while self.at(TokenKind::OpenBrace) {
            self.stmt()?;
        }

        Ok(())
    }

    // Stmt := '{' ('{' Eq '}' '}' | IfTail | ForeachTail)
    fn stmt(&mut self) -> Result<(), ParserError> {
        self.expect(TokenKind::OpenBrace)?;

        match self.lookahead.kind {
            TokenKind::OpenBrace => {
                self.expect(TokenKind::OpenBrace)?;
                self.eq()?;
                self.expect(TokenKind::CloseBrace)?;
                self.expect(TokenKind::CloseBrace)
            }

            TokenKind::Percent => self.if_stmt(),
            TokenKind::Hyphen => self.foreach_stmt(),

            _ => Err(ParserError::UnrecognizedStatement {
                lexeme: self.lookahead.lexeme.to_owned(),
                line: self.lookahead.line(),
                column: self.lookahead.column(),
                span: self.lookahead.span(),
            }),
        }
    }

    // IfTail := '%' 'if' Eq '%' '}' Template '{' '%' 'endif' '%' '}'
    fn if_stmt(&mut self) -> Result<(), ParserError> {
        self.expect(TokenKind::Percent)?;
        self.expect(TokenKind::IfKeyword)?;
        self.eq()?;
        self.expect(TokenKind::Percent)?;
        self.expect(TokenKind::CloseBrace)?;
        self.template()?;
        self.expect(TokenKind::OpenBrace)?;
        self.expect(TokenKind::Percent)?;
        self.expect(TokenKind::EndIfKeyword)?;
        self.expect(TokenKind::Percent)?;
        self.expect(TokenKind::CloseBrace)
    }

    // ForeachTail := '-' '%' 'foreach' Identifier 'in' Identifier '%' '}'
    //               Template '{' '%' 'endforeach' '%' '}'
    //
    // Unlike the if statement, a foreach opens with `{-%`. The asymmetry is
    // part of the language.
    fn foreach_stmt(&mut self) -> Result<(), ParserError> {
        self.expect(TokenKind::Hyphen)?;
        self.expect(TokenKind::Percent)?;
        self.expect(TokenKind::ForeachKeyword)?;
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::InKeyword)?;
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Percent)?;
        self.expect(TokenKind::CloseBrace)?;
        self.template()?;
        self.expect(TokenKind::OpenBrace)?;
        self.expect(TokenKind::Percent)?;
        self.expect(TokenKind::EndForeachKeyword)?;
        self.expect(TokenKind::Percent)?;
        self.expect(TokenKind::CloseBrace)
    }

    // Init := '{' '%' 'init' Code '%' '}'
    fn init(&mut self) -> Result<(), ParserError> {
        self.expect(TokenKind::OpenBrace)?;
        self.expect(TokenKind::Percent)?;
        self.expect(TokenKind::InitKeyword)?;
        self.code()?;
        self.expect(TokenKind::Percent)?;
        self.expect(TokenKind::CloseBrace)
    }

    // Code := Decls Assignations
    fn code(&mut self) -> Result<(), ParserError> {
        self.decls()?;
        self.assignations()
    }

    // Decls := Decl InnerDecls; at least one declaration is required.
    fn decls(&mut self) -> Result<(), ParserError> {
        loop {
            self.decl()?;

            if !self.lookahead.kind.is_type_keyword() {
                return Ok(());
            }
        }
    }

    // Decl := TypeKeyword Identifier ';'
    fn decl(&mut self) -> Result<(), ParserError> {
        if !self.lookahead.kind.is_type_keyword() {
            return Err(ParserError::UnsupportedType {
                lexeme: self.lookahead.lexeme.to_owned(),
                line: self.lookahead.line(),
                column: self.lookahead.column(),
                span: self.lookahead.span(),
            });
        }

        self.advance()?;
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Semicolon)
    }

    fn assignations(&mut self) -> Result<(), ParserError> {
        while self.at(TokenKind::Identifier) {
            self.assignation()?;
        }

        Ok(())
    }

    // Assignation := Identifier '=' Eq ';'
    fn assignation(&mut self) -> Result<(), ParserError> {
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Assignation)?;
        self.eq()?;
        self.expect(TokenKind::Semicolon)
    }

    // Eq := Rel (('==' | '<>') Rel)*
    fn eq(&mut self) -> Result<(), ParserError> {
        self.rel()?;

        while self.at(TokenKind::Equal) || self.at(TokenKind::NotEqual) {
            self.advance()?;
            self.rel()?;
        }

        Ok(())
    }

    // Rel := Expr (('<' | '>') Expr)?  -- at most one comparison, unchained
    fn rel(&mut self) -> Result<(), ParserError> {
        self.expr()?;

        if self.at(TokenKind::LessThan) || self.at(TokenKind::GreaterThan) {
            self.advance()?;
            self.expr()?;
        }

        Ok(())
    }

    // Expr := Term (('+' | '-') Term)*
    fn expr(&mut self) -> Result<(), ParserError> {
        self.term()?;

        while self.at(TokenKind::Plus) || self.at(TokenKind::Hyphen) {
            self.advance()?;
            self.term()?;
        }

        Ok(())
    }

    // Term := Factor (('*' | '/') Factor)*
    fn term(&mut self) -> Result<(), ParserError> {
        self.factor()?;

        while self.at(TokenKind::Asterisk) || self.at(TokenKind::Slash) {
            self.advance()?;
            self.factor()?;
        }

        Ok(())
    }

    // Factor := '(' Eq ')' | IntConstant | FloatConstant | StringConstant
    //         | '[' ExprList ']' | Identifier
    fn factor(&mut self) -> Result<(), ParserError> {
        match self.lookahead.kind {
            TokenKind::LeftParen => {
                self.expect(TokenKind::LeftParen)?;
                self.eq()?;
                self.expect(TokenKind::RightParen)
            }

            TokenKind::IntConstant => self.expect(TokenKind::IntConstant),
            TokenKind::FloatConstant => self.expect(TokenKind::FloatConstant),
            TokenKind::StringConstant => self.expect(TokenKind::StringConstant),

            TokenKind::OpenBracket => {
                self.expect(TokenKind::OpenBracket)?;
                self.expr_list()?;
                self.expect(TokenKind::CloseBracket)
            }

            _ => self.expect(TokenKind::Identifier),
        }
    }

    // ExprList := Eq (',' ExprList)?
    fn expr_list(&mut self) -> Result<(), ParserError> {
        loop {
            self.eq()?;

            if !self.at(TokenKind::Comma) {
                return Ok(());
            }

            self.expect(TokenKind::Comma)?;
        }
    }
}
