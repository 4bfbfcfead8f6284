//! Source coordinates.
//!
//! Every AST node accepted by this crate carries a [`Position`]. Unlike the
//! parser's own `Span` (a start/end range used for pretty-printing source
//! excerpts), the analyser only ever needs a single point to attach a
//! diagnostic to -- the node itself, or the operand that produced the error.

use std::fmt::{self, Display, Formatter};

/// A `(line, column)` pair, both zero-indexed, matching the coordinates handed
/// down by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<(usize, usize)> for Position {
    fn from((line, column): (usize, usize)) -> Self {
        Position { line, column }
    }
}
