/// A point in the source text: a byte offset plus the human-readable line
/// and column.
///
/// Line and column both start at 0. Advancing over a newline bumps the line
/// and sets the column to 1; advancing over any other character bumps the
/// column. A `Position` is never mutated in place: `advance` derives the
/// successor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const START: Self = Self {
        offset: 0,
        line: 0,
        column: 0,
    };

    #[must_use = "advance returns a new Position and leaves self untouched"]
    pub fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self {
                offset: self.offset + c.len_utf8(),
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                offset: self.offset + c.len_utf8(),
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}
