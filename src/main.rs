use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use bfn::commands::{repl, run};
use bfn::config::{Config, Overrides};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter, e.g. `BFN_LOG=bfn=debug`.
const LOG_ENV: &str = "BFN_LOG";

fn print_top_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [GLOBAL OPTIONS]                              # Start the Brainfunc shell
  {0} [GLOBAL OPTIONS] repl [--bare|--editor]       # Start the Brainfunc shell
  {0} [GLOBAL OPTIONS] run [--input TEXT] "<code>"  # Run Brainfunc code (args are concatenated)
  {0} [GLOBAL OPTIONS] run [--input TEXT] --file <PATH>

Global options:
  --lenient           Let `.` print any Unicode code point, not just 0..=255
  --echo-unknown      Copy non-instruction characters to the output
  --no-presets        Start without the built-in functions
  --config <PATH>     Read settings from PATH instead of bfn.toml in the config dir
  --help,   -h        Show this help

Environment:
  BFN_CONFIG          Config file path (overridden by --config)
  BFN_REPL_MODE       bare|editor shell mode
  BFN_LOG             Log filter for stderr diagnostics (default: warn)

Run "{0} <subcommand> --help" for more info.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "bfn", disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Let `.` print any Unicode code point
    #[arg(long = "lenient", global = true)]
    lenient: bool,

    /// Copy non-instruction characters to the output
    #[arg(long = "echo-unknown", global = true)]
    echo_unknown: bool,

    /// Start without the built-in functions
    #[arg(long = "no-presets", global = true)]
    no_presets: bool,

    /// Config file to use instead of the default location
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Run(run::RunArgs),
    Repl(repl::ReplArgs),
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init();
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("bfn"));

    let cli = Cli::parse();
    init_logging();

    if cli.help {
        print_top_usage_and_exit(&program, 0);
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{program}: {e}");
            let _ = io::stderr().flush();
            std::process::exit(2);
        }
    };

    let overrides = Overrides {
        lenient: cli.lenient,
        echo_unknown: cli.echo_unknown,
        no_presets: cli.no_presets,
    };

    let code = match cli.command {
        Some(Command::Run(args)) => run::run(&program, args, &config, overrides),
        Some(Command::Repl(args)) => repl::run(&program, args, &config, overrides),
        None => repl::run(&program, repl::ReplArgs::default(), &config, overrides),
    };

    std::process::exit(code);
}
