mod debug_report;

use clap::{ArgAction, Parser};
use kak_plumb::{Config, DEFAULT_RULE_FILE, read_input, run};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

/// Resolve the text on standard input into an action using a plumbing rule file.
///
/// Rules are evaluated in order; the first rule whose statements all succeed
/// determines the output. If none succeeds nothing is printed and the exit
/// status is still 0.
#[derive(Parser, Debug)]
#[command(name = "kak-plumb", version, about, long_about = None)]
struct Cli {
    /// The path to the rules file
    #[arg(short = 'r', long = "rule-file", value_name = "PATH", default_value = DEFAULT_RULE_FILE)]
    rule_file: PathBuf,

    /// The path to the directory in which the source is located
    #[arg(short = 'd', long = "working-dir", value_name = "DIR", default_value = ".")]
    working_dir: PathBuf,

    /// The position within the string at which the cursor was, if applicable
    #[arg(short = 'c', long = "cursor", value_name = "N", default_value_t = 0, allow_negative_numbers = true)]
    cursor: i64,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count)]
    verbosity: u8,

    /// Print a per-rule trace of the evaluation to stderr
    #[arg(long)]
    explain: bool,

    /// Force ANSI color in the trace
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Disable ANSI color in the trace
    #[arg(long = "no-color")]
    no_color: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config { rule_file: self.rule_file.clone(), working_dir: self.working_dir.clone(), cursor: self.cursor }
    }

    fn use_color(&self) -> bool {
        if self.no_color {
            false
        } else {
            self.color || io::stderr().is_terminal()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let input = match read_input(io::stdin().lock()) {
        Ok(input) => input,
        Err(err) => return fail(&err),
    };

    let config = cli.config();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(&config, input, &mut out) {
        Ok(result) => {
            if cli.explain {
                debug_report::print_run(&config, &result, cli.use_color());
            }
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("KAK_PLUMB_LOG", default))
        .format_timestamp(None)
        .init();
}

fn fail(err: &dyn std::error::Error) -> ExitCode {
    eprintln!("kak-plumb: {err}");
    ExitCode::FAILURE
}
