//! Brainfunc: Brainfuck with unbounded signed cells, comments, a loop break,
//! halting and named functions.
//!
//! Differences from classic Brainfuck:
//! - Cells are arbitrary-precision signed integers; the tape grows to the
//!   right on demand and `<` from cell 0 wraps to the last cell.
//! - `:` prints the current cell as a decimal number.
//! - `,` reads a whole line and writes it onto the tape, one character per
//!   cell, starting at the pointer.
//! - `#` starts a line comment and `%...%` an inline comment.
//! - `~` leaves the enclosing loop when the current cell is above 255.
//! - `!` halts with the current cell as the code.
//! - `$name{body}` defines a function and `(name)` calls it on the same tape.
//!
//! Quick start:
//!
//! ```
//! use bfn::{Brainfunc, FunctionRegistry};
//!
//! let mut bf = Brainfunc::with_functions(FunctionRegistry::with_presets());
//! bf.run("++++++++[>+++++++++<-]>.(resetPointer):").expect("program should run");
//! assert_eq!(bf.output(), "H0");
//! ```

pub mod cli_util;
pub mod config;
pub mod error;
pub mod functions;
pub mod interpreter;
pub mod listing;
pub mod repl;
pub mod tape;
pub mod theme;

pub mod commands {
    pub mod repl;
    pub mod run;
}

pub use error::{BrainfuncError, Location};
pub use functions::{Function, FunctionRegistry};
pub use interpreter::{Brainfunc, Options};
pub use tape::Tape;
