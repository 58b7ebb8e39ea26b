//! The Brainfunc execution engine.
//!
//! Source text is walked character by character over a [`Listing`]. Nested
//! syntax (loops, function definitions and calls) is tracked on an explicit
//! construct stack, so no parse tree is built up front. Function calls run
//! the callee's body eagerly against the same tape.
//!
//! ```
//! use bfn::{Brainfunc, FunctionRegistry};
//!
//! let mut bf = Brainfunc::with_functions(FunctionRegistry::with_presets());
//! bf.run("$add3{+++}(add3)(add3):").expect("program should run");
//! assert_eq!(bf.output(), "6");
//! ```

use std::io::{self, BufRead};

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use tracing::{debug, trace};

use crate::error::{BrainfuncError, Location};
use crate::functions::{Function, FunctionRegistry, is_valid_function_name, suggest_function_name};
use crate::listing::{Cursor, Listing, Reach};
use crate::tape::Tape;

/// Supplies one line of text per `,`. `Ok(None)` means end of input.
pub type InputProvider = Box<dyn FnMut() -> io::Result<Option<String>>>;

/// Cells above this make `~` break out of the enclosing loop.
const BREAK_THRESHOLD: u32 = 255;

/// Construction-time settings for [`Brainfunc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Display name of the program, used when reporting errors.
    pub source: String,
    /// When true `.` only accepts cell values 0..=255; otherwise any Unicode
    /// scalar value is written as-is.
    pub strict_ascii: bool,
    /// When true characters that are not instructions are copied to the
    /// output instead of being ignored.
    pub echo_unknown: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: "unknown".to_string(),
            strict_ascii: true,
            echo_unknown: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Name,
    Body,
}

/// An open syntactic construct.
#[derive(Debug)]
enum Construct {
    /// `[` entered with a non-zero cell; `start` is the bracket's position.
    Loop { start: Cursor },
    /// `$name{body}` being read.
    Definition { name: String, body: String, phase: Phase },
    /// `(name)` being read.
    Call { name: String },
}

/// What the dispatch loop does after one character.
enum Flow {
    Next,
    /// Ignore the rest of the current line.
    SkipLine,
    /// Continue right after the given position.
    ResumeAfter(Cursor),
}

/// A Brainfunc interpreter: tape, function registry and output buffer.
pub struct Brainfunc {
    options: Options,
    tape: Tape,
    functions: FunctionRegistry,
    output: String,
    input: InputProvider,
}

impl Default for Brainfunc {
    fn default() -> Self {
        Self::new()
    }
}

impl Brainfunc {
    /// An interpreter with default options and an empty registry.
    pub fn new() -> Self {
        Self::with_options(Options::default(), FunctionRegistry::new())
    }

    pub fn with_functions(functions: FunctionRegistry) -> Self {
        Self::with_options(Options::default(), functions)
    }

    pub fn with_options(options: Options, functions: FunctionRegistry) -> Self {
        Self {
            options,
            tape: Tape::new(),
            functions,
            output: String::new(),
            input: Box::new(read_stdin_line),
        }
    }

    /// Replace the source of `,` input (stdin by default).
    pub fn set_input_provider<F>(&mut self, provider: F)
    where
        F: FnMut() -> io::Result<Option<String>> + 'static,
    {
        self.input = Box::new(provider);
    }

    /// Run `code` to completion or until the first error.
    ///
    /// The output buffer is cleared first; read it with [`Brainfunc::output`]
    /// before the next call. Tape changes made before an error are kept.
    pub fn run(&mut self, code: &str) -> Result<(), BrainfuncError> {
        self.output.clear();
        self.execute(code)
    }

    /// Back to a single zero cell with the pointer on it. Functions stay.
    pub fn reset(&mut self) {
        debug!(source = %self.options.source, "resetting tape");
        self.tape.reset();
    }

    /// Output produced by the most recent [`Brainfunc::run`].
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn tape_mut(&mut self) -> &mut Tape {
        &mut self.tape
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn source(&self) -> &str {
        &self.options.source
    }

    /// Interpret `code` without touching the output buffer. Function bodies
    /// come through here recursively, each with its own construct stack.
    fn execute(&mut self, code: &str) -> Result<(), BrainfuncError> {
        let listing = Listing::new(code);
        let mut stack: Vec<Construct> = Vec::new();
        let mut at = Cursor::new(0, 0);

        while at.line < listing.line_count() {
            let Some(ch) = listing.char_at(at) else {
                // End of line. Text being collected for a name or body keeps
                // its line breaks.
                if at.line + 1 < listing.line_count() {
                    accumulate(&mut stack, '\n');
                }
                at = Cursor::new(at.line + 1, 0);
                continue;
            };

            at = match self.step(&listing, &mut stack, at, ch)? {
                Flow::Next => at.next(),
                Flow::SkipLine => Cursor::new(at.line, listing.line_len(at.line)),
                Flow::ResumeAfter(target) => target.next(),
            };
        }

        if !stack.is_empty() {
            debug!(open = stack.len(), "discarding unclosed constructs at end of program");
        }
        Ok(())
    }

    fn step(
        &mut self,
        listing: &Listing,
        stack: &mut Vec<Construct>,
        at: Cursor,
        ch: char,
    ) -> Result<Flow, BrainfuncError> {
        trace!(
            line = at.line,
            column = at.column,
            symbol = %ch,
            pointer = self.tape.pointer(),
            "dispatch"
        );

        // Inside a definition or call everything up to the closer is text.
        if let Some(Construct::Definition { name, body, phase }) = stack.last_mut() {
            match (*phase, ch) {
                (Phase::Name, '{') => {
                    if !is_valid_function_name(name) {
                        return Err(invalid_name(listing, at, name));
                    }
                    *phase = Phase::Body;
                }
                (Phase::Name, _) => name.push(ch),
                (Phase::Body, '}') => {
                    let name = std::mem::take(name);
                    let body = std::mem::take(body);
                    stack.pop();
                    debug!(%name, "defined function");
                    self.functions.define(name, body);
                }
                (Phase::Body, _) => body.push(ch),
            }
            return Ok(Flow::Next);
        }
        if let Some(Construct::Call { name }) = stack.last_mut() {
            if ch != ')' {
                name.push(ch);
                return Ok(Flow::Next);
            }
        }

        match ch {
            '#' => return Ok(Flow::SkipLine),
            '%' => {
                return Ok(match listing.scan(at.next(), Reach::Line, |c| c == '%') {
                    Some(end) => Flow::ResumeAfter(end),
                    None => Flow::SkipLine,
                });
            }
            '>' => self.tape.advance(),
            '<' => self.tape.retreat(),
            '+' => self.tape.increment(),
            '-' => self.tape.decrement(),
            '.' => self.emit_char(listing, at)?,
            ':' => {
                let number = self.tape.current().to_string();
                self.output.push_str(&number);
            }
            ',' => self.read_input(listing, at)?,
            '[' => {
                if self.tape.current().is_zero() {
                    return match listing.find_closing(at.next(), '[', ']') {
                        Some(end) => Ok(Flow::ResumeAfter(end)),
                        None => Err(BrainfuncError::UnmatchedBracket {
                            at: locate(listing, at),
                            bracket: '[',
                        }),
                    };
                }
                stack.push(Construct::Loop { start: at });
            }
            ']' => {
                let Some(&Construct::Loop { start }) = stack.last() else {
                    return Err(BrainfuncError::UnmatchedBracket {
                        at: locate(listing, at),
                        bracket: ']',
                    });
                };
                if !self.tape.current().is_zero() {
                    return Ok(Flow::ResumeAfter(start));
                }
                stack.pop();
            }
            '~' => {
                let Some(&Construct::Loop { start }) = stack.last() else {
                    return Err(BrainfuncError::BreakOutOfLoop { at: locate(listing, at) });
                };
                if *self.tape.current() > BigInt::from(BREAK_THRESHOLD) {
                    let Some(end) = listing.find_closing(at.next(), '[', ']') else {
                        return Err(BrainfuncError::UnmatchedBracket {
                            at: locate(listing, start),
                            bracket: '[',
                        });
                    };
                    stack.pop();
                    return Ok(Flow::ResumeAfter(end));
                }
            }
            '!' => {
                return Err(BrainfuncError::Halt {
                    at: locate(listing, at),
                    code: self.tape.current().clone(),
                });
            }
            '$' => stack.push(Construct::Definition {
                name: String::new(),
                body: String::new(),
                phase: Phase::Name,
            }),
            '(' => stack.push(Construct::Call { name: String::new() }),
            ')' => {
                let name = match stack.pop() {
                    Some(Construct::Call { name }) => name,
                    other => {
                        stack.extend(other);
                        return Err(BrainfuncError::UnmatchedBracket {
                            at: locate(listing, at),
                            bracket: ')',
                        });
                    }
                };
                self.call(listing, at, name)?;
            }
            other => {
                if self.options.echo_unknown {
                    self.output.push(other);
                }
            }
        }
        Ok(Flow::Next)
    }

    fn emit_char(&mut self, listing: &Listing, at: Cursor) -> Result<(), BrainfuncError> {
        let value = self.tape.current();
        let ch = if self.options.strict_ascii {
            value.to_u8().map(char::from)
        } else {
            value.to_u32().and_then(char::from_u32)
        };
        match ch {
            Some(ch) => {
                self.output.push(ch);
                Ok(())
            }
            None => Err(BrainfuncError::NotAscii {
                at: locate(listing, at),
                value: value.clone(),
            }),
        }
    }

    fn read_input(&mut self, listing: &Listing, at: Cursor) -> Result<(), BrainfuncError> {
        let line = (self.input)().map_err(|source| BrainfuncError::Io {
            at: locate(listing, at),
            source,
        })?;
        let line = line.unwrap_or_default();
        let text = line.trim_end_matches(['\n', '\r']);
        trace!(chars = text.chars().count(), pointer = self.tape.pointer(), "input burst");
        self.tape.write_burst(text);
        Ok(())
    }

    fn call(&mut self, listing: &Listing, at: Cursor, name: String) -> Result<(), BrainfuncError> {
        if !is_valid_function_name(&name) {
            return Err(invalid_name(listing, at, &name));
        }
        let Some(function) = self.functions.get(&name).cloned() else {
            return Err(BrainfuncError::FunctionNotDefined {
                at: locate(listing, at),
                name,
            });
        };
        debug!(%name, "calling function");
        match function {
            Function::Source(body) => self.execute(&body),
            Function::Native(hook) => {
                hook(&mut self.tape);
                Ok(())
            }
        }
    }
}

/// Append `ch` to the name or body currently being read, if any.
fn accumulate(stack: &mut [Construct], ch: char) {
    match stack.last_mut() {
        Some(Construct::Definition { name, phase: Phase::Name, .. }) => name.push(ch),
        Some(Construct::Definition { body, phase: Phase::Body, .. }) => body.push(ch),
        Some(Construct::Call { name }) => name.push(ch),
        _ => {}
    }
}

fn locate(listing: &Listing, at: Cursor) -> Location {
    Location::new(at.line, at.column, listing.line_text(at.line))
}

fn invalid_name(listing: &Listing, at: Cursor, name: &str) -> BrainfuncError {
    BrainfuncError::InvalidFunctionName {
        at: locate(listing, at),
        name: name.to_string(),
        suggestion: suggest_function_name(name),
    }
}

fn read_stdin_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn run_fresh(code: &str) -> (Brainfunc, Result<(), BrainfuncError>) {
        let mut bf = Brainfunc::new();
        let result = bf.run(code);
        (bf, result)
    }

    fn feed(bf: &mut Brainfunc, lines: &[&str]) {
        let mut queue: VecDeque<String> = lines.iter().map(|s| s.to_string()).collect();
        bf.set_input_provider(move || Ok(queue.pop_front()));
    }

    fn cell(bf: &Brainfunc) -> i64 {
        i64::try_from(bf.tape().current()).expect("small cell")
    }

    #[test]
    fn ten_increments_print_a_newline() {
        let (bf, result) = run_fresh("++++++++++.");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "\n");
    }

    #[test]
    fn colon_prints_decimal_value() {
        let (bf, result) = run_fresh(&format!("{}:>-:", "+".repeat(300)));
        assert!(result.is_ok());
        assert_eq!(bf.output(), "300-1");
    }

    #[test]
    fn nested_loops_multiply() {
        let (bf, result) = run_fresh("++[>++[>+<-]<-]>>:");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "4");
    }

    #[test]
    fn zero_cell_skips_loop_body() {
        let (bf, result) = run_fresh("[+[+]>>>+]");
        assert!(result.is_ok());
        assert_eq!(bf.tape().len(), 1);
        assert_eq!(bf.tape().pointer(), 0);
        assert_eq!(cell(&bf), 0);
    }

    #[test]
    fn loop_spans_lines() {
        let (bf, result) = run_fresh("+++[\n>+<-\n]>:");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "3");
    }

    #[test]
    fn skipped_loop_spans_lines() {
        let (bf, result) = run_fresh("[\n+++\n]+:");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "1");
    }

    #[test]
    fn comments_are_ignored() {
        let (bf, result) = run_fresh("+# +++ \n+%+++%+:");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "3");
    }

    #[test]
    fn unterminated_inline_comment_ends_at_line_end() {
        let (bf, result) = run_fresh("+%++\n+:");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "2");
    }

    #[test]
    fn break_below_threshold_does_nothing() {
        let (bf, result) = run_fresh("+++++[~-]:");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "0");
    }

    #[test]
    fn break_above_threshold_leaves_loop() {
        // The loop counts up from 1 and breaks once the cell passes 255.
        let mut bf = Brainfunc::new();
        bf.tape_mut().set_current(BigInt::from(300));
        assert!(bf.run("[-]+[+~]").is_ok());
        assert_eq!(cell(&bf), 256);
    }

    #[test]
    fn break_skips_nested_loops_and_continues() {
        let mut bf = Brainfunc::new();
        bf.tape_mut().set_current(BigInt::from(256));
        assert!(bf.run("[~[-]>+<]>+:").is_ok());
        assert_eq!(bf.output(), "1");
        assert_eq!(bf.tape().pointer(), 1);
    }

    #[test]
    fn saturate_preset_sets_exactly_255() {
        let mut bf = Brainfunc::with_functions(FunctionRegistry::with_presets());
        bf.tape_mut().set_current(BigInt::from(300));
        assert!(bf.run("(255)").is_ok());
        assert_eq!(cell(&bf), 255);

        bf.tape_mut().set_current(BigInt::from(0));
        assert!(bf.run("(255):").is_ok());
        assert_eq!(bf.output(), "255");
    }

    #[test]
    fn function_call_matches_inline_code() {
        let mut called = Brainfunc::new();
        assert!(called.run("$add1{+}++(add1):").is_ok());
        let mut inline = Brainfunc::new();
        assert!(inline.run("+++:").is_ok());
        assert_eq!(called.output(), inline.output());
        assert_eq!(called.tape(), inline.tape());
    }

    #[test]
    fn functions_share_the_callers_tape() {
        let (bf, result) = run_fresh("$right{>}(right)(right)+");
        assert!(result.is_ok());
        assert_eq!(bf.tape().pointer(), 2);
        assert_eq!(bf.tape().len(), 3);
        assert_eq!(cell(&bf), 1);
    }

    #[test]
    fn functions_can_call_functions() {
        let (bf, result) = run_fresh("$a{+}$b{(a)(a)}(b)(b):");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "4");
    }

    #[test]
    fn definition_body_is_not_executed() {
        let (bf, result) = run_fresh("$f{+++!]}:");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "0");
        assert!(matches!(bf.functions().get("f"), Some(Function::Source(b)) if b == "+++!]"));
    }

    #[test]
    fn definition_body_may_span_lines() {
        let (bf, result) = run_fresh("$f{+\n+}\n(f):");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "2");
    }

    #[test]
    fn native_function_is_invoked() {
        let mut bf = Brainfunc::with_functions(FunctionRegistry::with_presets());
        assert!(bf.run(">>>+(resetPointer):").is_ok());
        assert_eq!(bf.output(), "0");
        assert_eq!(bf.tape().pointer(), 0);
    }

    #[test]
    fn newline_preset_prints_line_feed() {
        let mut bf = Brainfunc::with_functions(FunctionRegistry::with_presets());
        assert!(bf.run("+++(newline):").is_ok());
        assert_eq!(bf.output(), "\n3");
    }

    #[test]
    fn push_presets_move_values() {
        let mut bf = Brainfunc::with_functions(FunctionRegistry::with_presets());
        assert!(bf.run("+++++(pushR)>:").is_ok());
        assert_eq!(bf.output(), "5");
        assert!(bf.run("(pushL)<:>:").is_ok());
        assert_eq!(bf.output(), "50");
    }

    #[test]
    fn undefined_function_is_reported() {
        let (_, result) = run_fresh("(nope)");
        match result {
            Err(BrainfuncError::FunctionNotDefined { at, name }) => {
                assert_eq!(name, "nope");
                assert_eq!((at.line, at.column), (0, 5));
                assert_eq!(at.line_text, "(nope)");
            }
            other => panic!("expected FunctionNotDefined, got {other:?}"),
        }
    }

    #[test]
    fn undefined_named_undefined() {
        let (_, result) = run_fresh("(undefined)");
        assert!(matches!(result, Err(BrainfuncError::FunctionNotDefined { name, .. }) if name == "undefined"));
    }

    #[test]
    fn stray_closing_bracket_is_unmatched() {
        let (_, result) = run_fresh("]");
        assert!(matches!(result, Err(BrainfuncError::UnmatchedBracket { bracket: ']', .. })));
    }

    #[test]
    fn stray_call_closer_is_unmatched() {
        let (_, result) = run_fresh("+)");
        assert!(matches!(result, Err(BrainfuncError::UnmatchedBracket { bracket: ')', .. })));
    }

    #[test]
    fn stray_braces_are_ignored() {
        let (bf, result) = run_fresh("+ note {x} :");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "1");

        let mut echo = Brainfunc::with_options(
            Options {
                echo_unknown: true,
                ..Options::default()
            },
            FunctionRegistry::new(),
        );
        assert!(echo.run("}+:").is_ok());
        assert_eq!(echo.output(), "}1");
    }

    #[test]
    fn skipping_without_closing_bracket_is_unmatched() {
        let (_, result) = run_fresh("+\n-[+");
        match result {
            Err(BrainfuncError::UnmatchedBracket { at, bracket: '[' }) => {
                assert_eq!((at.human_line(), at.human_column()), (2, 2));
            }
            other => panic!("expected UnmatchedBracket, got {other:?}"),
        }
    }

    #[test]
    fn break_outside_loop_is_reported() {
        let (_, result) = run_fresh("~");
        assert!(matches!(result, Err(BrainfuncError::BreakOutOfLoop { .. })));
    }

    #[test]
    fn break_inside_called_function_is_outside_loop() {
        let (_, result) = run_fresh("$b{~}+[(b)-]");
        assert!(matches!(result, Err(BrainfuncError::BreakOutOfLoop { .. })));
    }

    #[test]
    fn invalid_definition_name_suggests_fix() {
        let (bf, result) = run_fresh("$bad name{+}");
        match result {
            Err(BrainfuncError::InvalidFunctionName { name, suggestion, at }) => {
                assert_eq!(name, "bad name");
                assert_eq!(suggestion, "bad_name");
                assert_eq!(at.column, 9);
            }
            other => panic!("expected InvalidFunctionName, got {other:?}"),
        }
        assert!(bf.functions().is_empty());
    }

    #[test]
    fn invalid_call_name_is_reported() {
        let (_, result) = run_fresh("(a-b)");
        assert!(matches!(
            result,
            Err(BrainfuncError::InvalidFunctionName { suggestion, .. }) if suggestion == "a_b"
        ));
        let (_, result) = run_fresh("()");
        assert!(matches!(result, Err(BrainfuncError::InvalidFunctionName { .. })));
    }

    #[test]
    fn nested_errors_propagate_from_function_bodies() {
        let (_, result) = run_fresh("$bad{+]}(bad)");
        match result {
            Err(BrainfuncError::UnmatchedBracket { at, bracket: ']' }) => {
                assert_eq!(at.line_text, "+]");
                assert_eq!(at.column, 1);
            }
            other => panic!("expected UnmatchedBracket, got {other:?}"),
        }
    }

    #[test]
    fn halt_reports_cell_and_keeps_tape() {
        let (bf, result) = run_fresh("+++!+++");
        match result {
            Err(err @ BrainfuncError::Halt { .. }) => {
                assert!(err.is_halt());
                assert_eq!(err.to_string(), "Halted with code 3");
            }
            other => panic!("expected Halt, got {other:?}"),
        }
        assert_eq!(cell(&bf), 3);
    }

    #[test]
    fn strict_mode_rejects_out_of_range_output() {
        let mut bf = Brainfunc::new();
        bf.tape_mut().set_current(BigInt::from(256));
        let result = bf.run(".");
        assert!(matches!(result, Err(BrainfuncError::NotAscii { ref value, .. }) if *value == BigInt::from(256)));
        assert!(matches!(bf.run("-[-]-."), Err(BrainfuncError::NotAscii { .. })));
    }

    #[test]
    fn strict_mode_accepts_latin1_range() {
        let mut bf = Brainfunc::new();
        bf.tape_mut().set_current(BigInt::from(233));
        assert!(bf.run(".").is_ok());
        assert_eq!(bf.output(), "é");
    }

    #[test]
    fn lenient_mode_writes_raw_code_points() {
        let options = Options {
            strict_ascii: false,
            ..Options::default()
        };
        let mut bf = Brainfunc::with_options(options, FunctionRegistry::new());
        bf.tape_mut().set_current(BigInt::from(0x3bb));
        assert!(bf.run(".").is_ok());
        assert_eq!(bf.output(), "λ");
        bf.tape_mut().set_current(BigInt::from(-1));
        assert!(matches!(bf.run("."), Err(BrainfuncError::NotAscii { .. })));
    }

    #[test]
    fn unknown_characters_are_ignored_by_default() {
        let (bf, result) = run_fresh("hello +:");
        assert!(result.is_ok());
        assert_eq!(bf.output(), "1");
    }

    #[test]
    fn echo_mode_copies_unknown_characters() {
        let options = Options {
            echo_unknown: true,
            ..Options::default()
        };
        let mut bf = Brainfunc::with_options(options, FunctionRegistry::new());
        assert!(bf.run("hi+:").is_ok());
        assert_eq!(bf.output(), "hi1");
    }

    #[test]
    fn input_bursts_onto_tape() {
        let mut bf = Brainfunc::new();
        feed(&mut bf, &["AB\n"]);
        assert!(bf.run(",:>:>").is_ok());
        assert_eq!(bf.output(), "6566");
        assert_eq!(bf.tape().len(), 3);
    }

    #[test]
    fn empty_input_and_eof_zero_the_cell() {
        let mut bf = Brainfunc::new();
        feed(&mut bf, &[""]);
        assert!(bf.run("+++,:").is_ok());
        assert_eq!(bf.output(), "0");
        assert!(bf.run("+++,:").is_ok());
        assert_eq!(bf.output(), "0");
    }

    #[test]
    fn input_errors_are_reported() {
        let mut bf = Brainfunc::new();
        bf.set_input_provider(|| Err(io::Error::other("closed")));
        let result = bf.run(",");
        assert!(matches!(result, Err(BrainfuncError::Io { .. })));
    }

    #[test]
    fn output_is_cleared_per_run_but_tape_persists() {
        let mut bf = Brainfunc::new();
        assert!(bf.run("+:").is_ok());
        assert_eq!(bf.output(), "1");
        assert!(bf.run("+").is_ok());
        assert_eq!(bf.output(), "");
        assert_eq!(cell(&bf), 2);
    }

    #[test]
    fn reset_clears_tape_but_not_functions() {
        let mut bf = Brainfunc::new();
        assert!(bf.run("$f{++}+++>>").is_ok());
        bf.reset();
        assert_eq!(bf.tape(), &Tape::new());
        assert!(bf.run("(f):").is_ok());
        assert_eq!(bf.output(), "2");
    }

    #[test]
    fn errors_keep_earlier_mutations() {
        let (bf, result) = run_fresh("+++>++(missing)+");
        assert!(result.is_err());
        assert_eq!(bf.tape().pointer(), 1);
        assert_eq!(cell(&bf), 2);
    }

    #[test]
    fn unclosed_constructs_are_discarded() {
        let (bf, result) = run_fresh("+[+");
        assert!(result.is_ok());
        assert_eq!(cell(&bf), 2);
        let (bf, result) = run_fresh("$f{+");
        assert!(result.is_ok());
        assert!(bf.functions().is_empty());
    }

    #[test]
    fn source_name_defaults_to_unknown() {
        let bf = Brainfunc::new();
        assert_eq!(bf.source(), "unknown");
        assert!(bf.options().strict_ascii);
    }
}
