//! Growable, wrap-around memory tape.
//!
//! The tape starts as a single zero cell and only ever grows at the high end.
//! Moving right past the last cell appends a fresh zero cell; moving left from
//! cell 0 wraps to the last cell. Cells are unbounded signed integers.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// The engine's linear memory plus its single data pointer.
///
/// Invariants: `cells` is never empty and `pointer < cells.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<BigInt>,
    pointer: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    pub fn new() -> Self {
        Self {
            cells: vec![BigInt::zero()],
            pointer: 0,
        }
    }

    /// Move the pointer one cell right, appending a zero cell when needed.
    pub fn advance(&mut self) {
        self.pointer += 1;
        if self.pointer >= self.cells.len() {
            self.cells.push(BigInt::zero());
        }
    }

    /// Move the pointer one cell left, wrapping to the last cell from cell 0.
    pub fn retreat(&mut self) {
        if self.pointer == 0 {
            self.pointer = self.cells.len() - 1;
        } else {
            self.pointer -= 1;
        }
    }

    pub fn increment(&mut self) {
        self.cells[self.pointer] += BigInt::one();
    }

    pub fn decrement(&mut self) {
        self.cells[self.pointer] -= BigInt::one();
    }

    /// Write each character's code point into consecutive cells starting at
    /// the pointer, growing the tape as needed. The pointer does not move.
    ///
    /// Empty text zeroes the current cell. Cells beyond the burst are left as
    /// they were.
    pub fn write_burst(&mut self, text: &str) {
        if text.is_empty() {
            self.cells[self.pointer] = BigInt::zero();
            return;
        }

        for (offset, ch) in text.chars().enumerate() {
            let index = self.pointer + offset;
            if index >= self.cells.len() {
                self.cells.resize(index + 1, BigInt::zero());
            }
            self.cells[index] = BigInt::from(u32::from(ch));
        }
    }

    pub fn current(&self) -> &BigInt {
        &self.cells[self.pointer]
    }

    pub fn set_current(&mut self, value: BigInt) {
        self.cells[self.pointer] = value;
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Put the pointer back on cell 0 without touching any cell.
    pub fn rewind(&mut self) {
        self.pointer = 0;
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true: the tape always holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[BigInt] {
        &self.cells
    }

    /// Back to a single zero cell with the pointer on it.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.cells.push(BigInt::zero());
        self.pointer = 0;
    }
}

/// Renders as `[0, 72, 3][1]`: the cells followed by the pointer index.
impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, "][{}]", self.pointer)
    }
}
