use std::fmt;

use num_bigint::BigInt;

/// Where an error happened: zero-based line/column into the program that was
/// running plus a copy of the offending line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub line_text: String,
}

impl Location {
    pub fn new(line: usize, column: usize, line_text: impl Into<String>) -> Self {
        Self {
            line,
            column,
            line_text: line_text.into(),
        }
    }

    /// One-based line number for messages.
    pub fn human_line(&self) -> usize {
        self.line + 1
    }

    /// One-based column number for messages.
    pub fn human_column(&self) -> usize {
        self.column + 1
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.human_line(), self.human_column())
    }
}

/// Errors that stop a Brainfunc `run`.
///
/// Every variant records the [`Location`] it was raised at. Tape mutations
/// made before the error are kept.
#[derive(Debug, thiserror::Error)]
pub enum BrainfuncError {
    /// `.` on a cell that cannot be shown as a character.
    #[error("Number {value} does not represent an ASCII character")]
    NotAscii { at: Location, value: BigInt },

    /// `!` was executed; `code` is the current cell value.
    #[error("Halted with code {code}")]
    Halt { at: Location, code: BigInt },

    /// A closing symbol without its opener, or a `[` whose `]` never comes.
    #[error("{}", describe_unmatched(.bracket))]
    UnmatchedBracket { at: Location, bracket: char },

    /// `~` outside of a loop.
    #[error("Used break outside of loop")]
    BreakOutOfLoop { at: Location },

    /// A function name that is not `[A-Za-z0-9_]+`.
    #[error("Invalid function name '{name}', consider using '{suggestion}'")]
    InvalidFunctionName {
        at: Location,
        name: String,
        suggestion: String,
    },

    /// `(name)` for a name missing from the registry.
    #[error("Function '{name}' not defined")]
    FunctionNotDefined { at: Location, name: String },

    /// The input provider failed while serving `,`.
    #[error("Failed to read input: {source}")]
    Io {
        at: Location,
        #[source]
        source: std::io::Error,
    },
}

fn describe_unmatched(bracket: &char) -> String {
    match *bracket {
        '[' => "Opening bracket '[' never closed with ']'".to_string(),
        ']' => "Closing bracket ']' not matched with opening bracket '['".to_string(),
        ')' => "Closing bracket ')' not matched with opening bracket '('".to_string(),
        other => format!("Unmatched bracket '{other}'"),
    }
}

impl BrainfuncError {
    /// Stable error name as shown to users, e.g. `HaltError`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotAscii { .. } => "NotASCIIError",
            Self::Halt { .. } => "HaltError",
            Self::UnmatchedBracket { .. } => "UnmatchedBracketError",
            Self::BreakOutOfLoop { .. } => "BreakOutOfLoopError",
            Self::InvalidFunctionName { .. } => "InvalidFunctionNameError",
            Self::FunctionNotDefined { .. } => "FunctionNotDefinedError",
            Self::Io { .. } => "IOError",
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Self::NotAscii { at, .. }
            | Self::Halt { at, .. }
            | Self::UnmatchedBracket { at, .. }
            | Self::BreakOutOfLoop { at }
            | Self::InvalidFunctionName { at, .. }
            | Self::FunctionNotDefined { at, .. }
            | Self::Io { at, .. } => at,
        }
    }

    /// Halting is flow control rather than a fault; shells stop on it.
    pub fn is_halt(&self) -> bool {
        matches!(self, Self::Halt { .. })
    }
}
