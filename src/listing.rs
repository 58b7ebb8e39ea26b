//! Program text split into lines, addressed by (line, column) cursors.
//!
//! Loop skipping, break skipping and inline comments all need the same
//! primitive: walk forward from a position until a predicate accepts a
//! character, optionally crossing line boundaries. [`Listing::scan`] is that
//! primitive.

/// A position in a [`Listing`]. Columns count chars, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position immediately to the right on the same line.
    pub fn next(self) -> Self {
        Self::new(self.line, self.column + 1)
    }
}

/// How far a scan may travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Stop at the end of the starting line.
    Line,
    /// Continue through the following lines to the end of the program.
    Program,
}

#[derive(Debug, Clone)]
pub struct Listing {
    lines: Vec<Vec<char>>,
}

impl Listing {
    pub fn new(code: &str) -> Self {
        let lines = code
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).chars().collect())
            .collect();
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length in chars of line `line`; 0 past the end.
    pub fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, Vec::len)
    }

    pub fn char_at(&self, at: Cursor) -> Option<char> {
        self.lines.get(at.line)?.get(at.column).copied()
    }

    pub fn line_text(&self, line: usize) -> String {
        self.lines
            .get(line)
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }

    /// Walk forward from `from` (inclusive) and return the first position
    /// whose character makes `accept` return true.
    ///
    /// `accept` sees every character in order, so it can keep nesting depth.
    pub fn scan<F>(&self, from: Cursor, reach: Reach, mut accept: F) -> Option<Cursor>
    where
        F: FnMut(char) -> bool,
    {
        let mut at = from;
        while at.line < self.lines.len() {
            let line = &self.lines[at.line];
            while at.column < line.len() {
                if accept(line[at.column]) {
                    return Some(at);
                }
                at.column += 1;
            }
            if reach == Reach::Line {
                return None;
            }
            at = Cursor::new(at.line + 1, 0);
        }
        None
    }

    /// Find the `close` that balances an already-consumed `open`, starting
    /// the search at `from` and crossing lines.
    pub fn find_closing(&self, from: Cursor, open: char, close: char) -> Option<Cursor> {
        let mut depth = 0usize;
        self.scan(from, Reach::Program, |ch| {
            if ch == open {
                depth += 1;
            } else if ch == close {
                if depth == 0 {
                    return true;
                }
                depth -= 1;
            }
            false
        })
    }
}
