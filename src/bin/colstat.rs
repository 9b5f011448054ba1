use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use colstat::{DescribeOptions, DuplicateHeaders, StatsError, describe_file};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_UNEXPECTED: u8 = 1;
const EXIT_USAGE: u8 = 2;
const EXIT_EMPTY_INPUT: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Per-column numeric statistics for CSV files, as JSON.",
    long_about = None,
    disable_help_flag = true
)]
struct Args {
    /// CSV file to describe
    #[arg(short = 'i', long = "input", value_name = "PATH", conflicts_with = "input_path")]
    input: Option<PathBuf>,

    /// CSV file to describe (same as --input)
    #[arg(value_name = "INPUT")]
    input_path: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// How to treat repeated header names
    #[arg(long, value_enum, default_value_t = DuplicateHeaders::Merge)]
    duplicate_headers: DuplicateHeaders,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Print help
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    help: bool,
}

fn init_logging(level: &str, quiet: bool) {
    let effective_level = if quiet { "error" } else { level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    // stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args, input: &Path) -> anyhow::Result<()> {
    let options = DescribeOptions {
        duplicate_headers: args.duplicate_headers,
    };
    let report = describe_file(input, &options)?;
    let json = report.to_json(!args.compact)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "report written");
            eprintln!("wrote report to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet);

    if args.help {
        print!("{}", Args::command().render_help());
    }

    let Some(input) = args.input.as_deref().or(args.input_path.as_deref()) else {
        if !args.help {
            eprint!("{}", Args::command().render_help());
        }
        return ExitCode::from(EXIT_USAGE);
    };

    match run(&args, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<StatsError>() {
            Some(stats_err) if stats_err.is_empty_input() => {
                eprintln!("error: {stats_err}");
                ExitCode::from(EXIT_EMPTY_INPUT)
            }
            _ => {
                eprintln!("unexpected error: {err:#}");
                ExitCode::from(EXIT_UNEXPECTED)
            }
        },
    }
}
