use crate::location::Position;

/// An immutable snapshot of the remaining source text.
///
/// Consuming a character never modifies the cursor it was called on; it
/// hands back a new cursor for the residue. Peeking is therefore just
/// consuming and discarding the result, while advancing means rebinding the
/// caller's cursor to the residue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<'a> {
    rest: &'a str,
    pos: Position,
}

/// The outcome of [`Cursor::consume`]: either the next character together
/// with the cursor for what remains, or just the residual cursor when the
/// text is exhausted.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan<'a> {
    Next(char, Cursor<'a>),
    End(Cursor<'a>),
}

impl<'a> Scan<'a> {
    pub fn value(&self) -> Option<char> {
        match *self {
            Scan::Next(c, _) => Some(c),
            Scan::End(_) => None,
        }
    }

    pub fn rest(self) -> Cursor<'a> {
        match self {
            Scan::Next(_, rest) | Scan::End(rest) => rest,
        }
    }
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            pos: Position::START,
        }
    }

    /// Returns the position of the immediately following character.
    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn remaining(&self) -> &'a str {
        self.rest
    }

    pub fn consume(&self) -> Scan<'a> {
        match self.rest.chars().next() {
            Some(c) => Scan::Next(
                c,
                Cursor {
                    rest: &self.rest[c.len_utf8()..],
                    pos: self.pos.advance(c),
                },
            ),

            None => Scan::End(self.clone()),
        }
    }
}
