use std::fs;
use std::io::{self, Write};

use clap::Args;
use num_traits::ToPrimitive;
use tracing::debug;

use crate::cli_util::print_error;
use crate::commands::repl::install_ctrlc;
use crate::config::{Config, Overrides};
use crate::BrainfuncError;

#[derive(Args, Debug, Default)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Read Brainfunc code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Text written onto the tape, one character per cell, before the run
    #[arg(short = 'i', long = "input")]
    pub input: Option<String>,

    /// Concatenated Brainfunc code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

/// Entry point for `bfn run`. Returns the process exit code.
pub fn run(program: &str, args: RunArgs, config: &Config, overrides: Overrides) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs {
        file, input, code, ..
    } = args;

    if file.is_none() && code.is_empty() {
        usage_and_exit(program, 2);
    }

    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        usage_and_exit(program, 2);
    }

    let (source, code_str) = match file {
        Some(path) => match fs::read_to_string(&path) {
            Ok(s) => (path, s),
            Err(e) => {
                eprintln!("{program}: failed to read code file as UTF-8: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        },
        None => ("<args>".to_string(), code.join("")),
    };

    if let Err(code) = install_ctrlc(program) {
        return code;
    }

    let mut bf = config.build_engine(&source, overrides);
    if let Some(text) = input {
        bf.tape_mut().write_burst(&text);
    }

    debug!(%source, chars = code_str.chars().count(), "running program");
    let result = bf.run(&code_str);

    // Output produced before an error is still shown; always end with a newline.
    println!("{}", bf.output());
    let _ = io::stdout().flush();

    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(Some(program), &err);
            exit_code_for(&err)
        }
    }
}

/// Halt codes become the exit status when they fit in 0..=255.
pub fn exit_code_for(err: &BrainfuncError) -> i32 {
    match err {
        BrainfuncError::Halt { code, .. } => code.to_u8().map_or(1, i32::from),
        _ => 1,
    }
}

pub fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [--input TEXT] "<code>"
  {0} run [--input TEXT] --file <PATH>

Options:
  --file,  -f <PATH>  Read Brainfunc code from PATH instead of positional "<code>"
  --input, -i <TEXT>  Write TEXT onto the tape (one character per cell) before running
  --help,  -h         Show this help

Notes:
- The whole program runs against one tape; output is printed once it finishes,
  followed by a newline.
- `,` reads one line from stdin and writes it onto the tape from the pointer.
- Exit status: 0 on success, the halt code for `!` (1 if it is outside 0..=255),
  1 for any other error, 2 for usage errors.

Examples:
- Load Brainfunc code from a file:
    {0} run --file ./program.bfn
- Print a number with a user function:
    {0} run '$add3{{+++}}(add3)(add3):'
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
