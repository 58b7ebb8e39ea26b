use std::io::{self, IsTerminal, Write};

use clap::Args;

use crate::config::{Config, Overrides};
use crate::repl::{run_bare, run_editor, select_mode, ModeFlagOverride, ReplMode, Shell};

#[derive(Args, Debug, Default)]
#[command(disable_help_flag = true)]
pub struct ReplArgs {
    /// Force non-interactive bare mode
    #[arg(long = "bare", conflicts_with = "editor")]
    pub bare: bool,

    /// Force interactive mode (errors if stdin is not a TTY)
    #[arg(long = "editor", conflicts_with = "bare")]
    pub editor: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

impl ReplArgs {
    fn mode_flag(&self) -> ModeFlagOverride {
        if self.bare {
            ModeFlagOverride::Bare
        } else if self.editor {
            ModeFlagOverride::Editor
        } else {
            ModeFlagOverride::None
        }
    }
}

/// Entry point for `bfn repl` (and bare `bfn`).
pub fn run(program: &str, args: ReplArgs, config: &Config, overrides: Overrides) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    // Determine mode: flags -> env -> auto-detect via is_terminal()
    let mode = match select_mode(args.mode_flag()) {
        Ok(m) => m,
        Err(msg) => {
            eprintln!("{program}: {msg}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    if let Err(code) = install_ctrlc(program) {
        return code;
    }

    let mut shell = Shell::new(config.build_engine("<stdin>", overrides));

    let result = match mode {
        ReplMode::Editor => {
            if io::stderr().is_terminal() {
                eprintln!("Brainfunc shell. Type /help for meta commands, Ctrl+C to exit");
                let _ = io::stderr().flush();
            }
            run_editor(&mut shell, config.palette.clone())
        }
        ReplMode::Bare => {
            let stdout = io::stdout();
            let stderr = io::stderr();
            run_bare(&mut shell, io::stdin().lock(), &mut stdout.lock(), &mut stderr.lock())
        }
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{program}: REPL error: {e}");
            let _ = io::stderr().flush();
            1
        }
    }
}

/// Flush and exit 0 on SIGINT.
pub(crate) fn install_ctrlc(program: &str) -> Result<(), i32> {
    ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    })
    .map_err(|e| {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        1
    })
}

pub fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} repl [--bare|--editor]   # Start the Brainfunc shell

Options:
  --help,   -h        Show this help
  --bare              Force non-interactive bare mode
  --editor            Force interactive editor mode (errors if stdin is not a TTY)

Description:
  Every line you enter runs against the same tape, so cells and functions
  defined on earlier lines stay available. The prompt shows the tape
  followed by the pointer, e.g. [0, 3][1].

Meta commands (line starts with "/")
  /reset           Clear the tape (functions are kept)
  /functions       List defined functions
  /help            Show meta command help
  /exit            Leave the shell (code 0)

Notes:
    - Errors are printed to stderr; a HaltError (`!`) ends the shell.
    - `,` reads the next line: from the terminal in editor mode, from the
      following stdin line in bare mode.
    - Ctrl+C exits the shell immediately.
    - Mode selection:
        * Flags: --bare|--editor override environment and auto-detection.
        * Env: BFN_REPL_MODE=bare|editor overrides auto-detection.
        * Auto-detect: if stdin is a TTY, starts in interactive editor mode; otherwise, bare mode.
        * Banners are suppressed if stderr is not a TTY.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
