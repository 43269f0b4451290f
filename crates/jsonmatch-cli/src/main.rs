// SPDX-License-Identifier: MIT OR Apache-2.0
//! jsonmatch CLI - structural JSON checks from the command line

use clap::{ArgAction, Parser, Subcommand};
use jsonmatch_cli::{EXIT_ERROR, Format, check, load_options, read_input, render};
use jsonmatch_cli::matcher::{Registry, Tester};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jsonmatch")]
#[command(version, about, long_about = None)]
struct Args {
    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that ACTUAL satisfies EXPECTED
    Check {
        /// Expected document, may contain directives (`-` for stdin)
        expected: PathBuf,

        /// Actual document (`-` for stdin)
        actual: PathBuf,

        /// Report every mismatch instead of stopping at the first
        #[arg(long)]
        collect_all: bool,

        /// Largest document matched with a linear scan
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<i64>,

        /// JSON file holding tester options
        #[arg(long)]
        config: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List the registered directive tokens
    Directives,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Check { .. } => handle_check(&args),
        Commands::Directives => handle_directives(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn handle_check(args: &Args) {
    if let Commands::Check {
        expected,
        actual,
        collect_all,
        threshold,
        config,
        format,
    } = &args.command
    {
        match run_check(
            expected,
            actual,
            *collect_all,
            *threshold,
            config.as_deref(),
            *format,
        ) {
            Ok(code) => std::process::exit(code),
            Err(e) => {
                eprintln!("Error: {e:#}");
                std::process::exit(EXIT_ERROR);
            }
        }
    }
}

fn run_check(
    expected: &Path,
    actual: &Path,
    collect_all: bool,
    threshold: Option<i64>,
    config: Option<&Path>,
    format: Format,
) -> anyhow::Result<i32> {
    if expected.as_os_str() == "-" && actual.as_os_str() == "-" {
        anyhow::bail!("only one of EXPECTED and ACTUAL can be read from stdin");
    }
    let options = load_options(config, collect_all, threshold)?;
    let tester = Tester::with_options(options);
    let expected = read_input(expected)?;
    let actual = read_input(actual)?;

    let outcome = check(jsonmatch_cli::matcher::builtin_registry(), &tester, &expected, &actual)?;
    write_output(&render(&outcome, format)?)?;
    Ok(outcome.exit_code())
}

fn handle_directives() {
    let tokens = Registry::builtin().tokens().join("\n");
    if let Err(e) = write_output(&format!("{tokens}\n")) {
        eprintln!("Error: {e}");
        std::process::exit(EXIT_ERROR);
    }
}

fn write_output(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
