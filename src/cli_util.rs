use std::io::{self, Write};

use crate::BrainfuncError;

/// Characters of context shown either side of the caret on long lines.
const WINDOW_CHARS: usize = 32;

/// Print a [`BrainfuncError`] to stderr in the shell's report format.
/// If `program` is `Some("bfn")`, the header is prefixed with "bfn: ".
pub fn print_error(program: Option<&str>, err: &BrainfuncError) {
    let report = format_error(err);
    match program {
        Some(p) => eprint!("{p}: {report}"),
        None => eprint!("{report}"),
    }
    let _ = io::stderr().flush();
}

/// Render an error as
///
/// ```text
/// Brainfunc HaltError @ 1:4:
///     +++!
///        ^
///     Halted with code 3
/// ```
pub fn format_error(err: &BrainfuncError) -> String {
    let at = err.location();
    let (excerpt, caret) = excerpt_with_caret(&at.line_text, at.column);
    format!(
        "Brainfunc {} @ {}:{}:\n    {excerpt}\n    {caret}\n    {err}\n",
        err.name(),
        at.human_line(),
        at.human_column(),
    )
}

/// Cut a window of `line` around char index `column` and build the matching
/// caret line, working with UTF-8 by slicing using char indices.
fn excerpt_with_caret(line: &str, column: usize) -> (String, String) {
    let total_chars = line.chars().count();
    let start_char = column.saturating_sub(WINDOW_CHARS);
    let end_char = (column + WINDOW_CHARS + 1).min(total_chars);

    let start_byte = char_to_byte_index(line, start_char);
    let end_byte = char_to_byte_index(line, end_char.max(start_char));
    let excerpt = line[start_byte..end_byte].to_string();

    let mut caret = " ".repeat(column - start_char);
    caret.push('^');
    (excerpt, caret)
}

/// Convert a char index into a byte index in the given UTF-8 string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(byte_idx, _)| byte_idx)
}
