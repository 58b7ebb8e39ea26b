use std::cell::RefCell;
use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::rc::Rc;

use nu_ansi_term::Style;
use reedline::{DefaultPrompt, DefaultPromptSegment, Highlighter, Signal, StyledText};
use tracing::debug;

use crate::cli_util::format_error;
use crate::theme::{Palette, SymbolClass};
use crate::Brainfunc;

/// Environment variable selecting the shell mode (`bare` or `editor`).
pub const MODE_ENV: &str = "BFN_REPL_MODE";

/// What the shell should do after a submitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// A line-oriented Brainfunc shell around one persistent engine.
///
/// Every submitted line is a separate `run`, so the tape and any functions
/// defined on earlier lines carry over. Lines starting with `/` are meta
/// commands.
pub struct Shell {
    engine: Brainfunc,
}

impl Shell {
    pub fn new(engine: Brainfunc) -> Self {
        Self { engine }
    }

    pub fn engine_mut(&mut self) -> &mut Brainfunc {
        &mut self.engine
    }

    /// Prompt text: the tape followed by the pointer, e.g. `[0, 3][1]`.
    pub fn prompt(&self) -> String {
        self.engine.tape().to_string()
    }

    /// Handle one submitted line. Program output goes to `out`, error reports
    /// and meta command diagnostics go to `err`.
    pub fn submit<O: Write, E: Write>(
        &mut self,
        line: &str,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<Control> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(Control::Continue);
        }
        if let Some(command) = line.trim().strip_prefix('/') {
            return self.meta(command, out, err);
        }

        let control = match self.engine.run(line) {
            Ok(()) => {
                writeln!(out, "{}", self.engine.output())?;
                Control::Continue
            }
            Err(e) => {
                // Output produced before the error is still shown.
                if !self.engine.output().is_empty() {
                    writeln!(out, "{}", self.engine.output())?;
                }
                write!(err, "{}", format_error(&e))?;
                if e.is_halt() {
                    Control::Exit
                } else {
                    Control::Continue
                }
            }
        };
        out.flush()?;
        err.flush()?;
        Ok(control)
    }

    fn meta<O: Write, E: Write>(
        &mut self,
        command: &str,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<Control> {
        debug!(%command, "meta command");
        match command.trim() {
            "exit" | "quit" => return Ok(Control::Exit),
            "reset" => self.engine.reset(),
            "functions" => {
                for name in self.engine.functions().names() {
                    writeln!(out, "{name}")?;
                }
            }
            "help" => write!(err, "{META_HELP}")?,
            other => writeln!(err, "unknown command: /{other} (try /help)")?,
        }
        out.flush()?;
        err.flush()?;
        Ok(Control::Continue)
    }
}

const META_HELP: &str = "\
Meta commands:
  /reset       Clear the tape (functions are kept)
  /functions   List defined functions
  /exit        Leave the shell
";

/// Read lines from `input` until EOF, `/exit` or a halt.
///
/// `,` inside the submitted programs reads its line from the same `input`,
/// so piped sessions can interleave code and data.
pub fn run_bare<R, O, E>(shell: &mut Shell, input: R, out: &mut O, err: &mut E) -> io::Result<()>
where
    R: BufRead + 'static,
    O: Write,
    E: Write,
{
    let input = Rc::new(RefCell::new(input));
    {
        let input = Rc::clone(&input);
        shell
            .engine_mut()
            .set_input_provider(move || read_line(&mut *input.borrow_mut()));
    }

    loop {
        let Some(line) = read_line(&mut *input.borrow_mut())? else {
            return Ok(());
        };
        if shell.submit(&line, out, err)? == Control::Exit {
            return Ok(());
        }
    }
}

/// One line from `reader` including its terminator; `None` at EOF.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    match reader.read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}

/// Interactive loop with line editing, history and syntax highlighting.
pub fn run_editor(shell: &mut Shell, palette: Palette) -> io::Result<()> {
    let mut editor = init_line_editor(palette)?;

    loop {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(shell.prompt()),
            DefaultPromptSegment::Empty,
        );

        match editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                let stdout = io::stdout();
                let stderr = io::stderr();
                let control = shell.submit(&line, &mut stdout.lock(), &mut stderr.lock())?;
                if control == Control::Exit {
                    return Ok(());
                }
            }
            Ok(Signal::CtrlC) => return Ok(()),
            Ok(Signal::CtrlD) => {
                println!();
                io::stdout().flush()?;
                return Ok(());
            }
            Err(e) => {
                eprintln!("repl: editor error: {e}");
                let _ = io::stderr().flush();
                return Ok(());
            }
        }
    }
}

fn init_line_editor(palette: Palette) -> io::Result<reedline::Reedline> {
    use reedline::{default_emacs_keybindings, Emacs, KeyCode, KeyModifiers, Reedline, ReedlineEvent};

    // Enter submits the line; Alt/Ctrl+Up and Down browse history.
    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(KeyModifiers::ALT, KeyCode::Up, ReedlineEvent::PreviousHistory);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Up, ReedlineEvent::PreviousHistory);
    keybindings.add_binding(KeyModifiers::ALT, KeyCode::Down, ReedlineEvent::NextHistory);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Down, ReedlineEvent::NextHistory);

    let history = reedline::FileBackedHistory::new(1_000)
        .map_err(|e| io::Error::other(e.to_string()))?;

    Ok(Reedline::create()
        .with_highlighter(Box::new(BrainfuncHighlighter::new(palette)))
        .with_history(Box::new(history))
        .with_edit_mode(Box::new(Emacs::new(keybindings))))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    Bare,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlagOverride {
    None,
    Bare,
    Editor,
}

/// Flags win over `BFN_REPL_MODE`, which wins over TTY auto-detection.
pub fn select_mode(flag: ModeFlagOverride) -> Result<ReplMode, String> {
    let stdin_is_tty = io::stdin().is_terminal();
    resolve_mode(flag, env::var(MODE_ENV).ok().as_deref(), stdin_is_tty)
}

fn resolve_mode(
    flag: ModeFlagOverride,
    env_value: Option<&str>,
    stdin_is_tty: bool,
) -> Result<ReplMode, String> {
    match flag {
        ModeFlagOverride::Bare => return Ok(ReplMode::Bare),
        ModeFlagOverride::Editor => {
            if !stdin_is_tty {
                return Err(format!(
                    "cannot start editor: stdin is not a TTY (use --bare or {MODE_ENV}=bare)"
                ));
            }
            return Ok(ReplMode::Editor);
        }
        ModeFlagOverride::None => {}
    }

    if let Some(val) = env_value {
        return match val.trim().to_ascii_lowercase().as_str() {
            "bare" => Ok(ReplMode::Bare),
            "editor" if stdin_is_tty => Ok(ReplMode::Editor),
            "editor" => Err(format!(
                "cannot start editor: stdin is not a TTY (use {MODE_ENV}=bare)"
            )),
            _ => Err(format!(
                "invalid {MODE_ENV} value: {val}, must be 'bare' or 'editor'"
            )),
        };
    }

    if stdin_is_tty {
        Ok(ReplMode::Editor)
    } else {
        Ok(ReplMode::Bare)
    }
}

/// Split a line into runs of one [`SymbolClass`]. `#` comments run to the end
/// of the line and `%...%` comments to their closing `%`.
pub fn classify_line(line: &str) -> Vec<(SymbolClass, String)> {
    let mut runs: Vec<(SymbolClass, String)> = Vec::new();
    let mut push = |class: SymbolClass, ch: char| match runs.last_mut() {
        Some((last, text)) if *last == class => text.push(ch),
        _ => runs.push((class, ch.to_string())),
    };

    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '#' => {
                push(SymbolClass::Comment, ch);
                for rest in chars.by_ref() {
                    push(SymbolClass::Comment, rest);
                }
            }
            '%' => {
                push(SymbolClass::Comment, ch);
                for inner in chars.by_ref() {
                    push(SymbolClass::Comment, inner);
                    if inner == '%' {
                        break;
                    }
                }
            }
            _ => push(SymbolClass::of(ch), ch),
        }
    }
    runs
}

struct BrainfuncHighlighter {
    palette: Palette,
}

impl BrainfuncHighlighter {
    fn new(palette: Palette) -> Self {
        Self { palette }
    }

    fn style_for(&self, class: SymbolClass) -> Style {
        let style = Style::new().fg(self.palette.color_for(class));
        match class {
            SymbolClass::Comment | SymbolClass::Other => style.italic(),
            _ => style.bold(),
        }
    }
}

impl Highlighter for BrainfuncHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut out = StyledText::new();
        for (class, text) in classify_line(line) {
            out.push((self.style_for(class), text));
        }
        out
    }
}
