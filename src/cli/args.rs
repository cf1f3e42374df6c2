use crate::constants::{exit_codes, verbosity};
use clap::{CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for config_render.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "config_render",
    author,
    version,
    long_version = crate::metadata::long_version(),
    about,
    long_about = None
)]
pub struct Args {
    /// Template files or directories. Defaults to the manifest's templates.
    #[arg(value_name = "TEMPLATE")]
    pub templates: Vec<PathBuf>,

    /// Output file for a single template, or output directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Data file (JSON, YAML or TOML) merged into the context. Repeatable, `-` reads stdin.
    #[arg(short, long, value_name = "FILE")]
    pub context: Vec<PathBuf>,

    /// Set a context value, e.g. `-D server.port=8080`. Repeatable.
    #[arg(short = 'D', long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Manifest file. Looked up in the working directory when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Run as if started in this directory.
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Template file suffix stripped from output names (default `.j2`).
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Do not expose environment variables as `env`.
    #[arg(long = "no-env")]
    pub no_env: bool,

    /// Fail on undefined variables.
    #[arg(long)]
    pub strict: bool,

    /// Overwrite changed output files without asking.
    #[arg(short, long)]
    pub force: bool,

    /// Never prompt. Changed files are skipped unless `--force` is given.
    #[arg(long = "non-interactive")]
    pub non_interactive: bool,

    /// Preview actions without touching the filesystem.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Exit with an error when any output file is out of date. Writes nothing.
    #[arg(long, conflicts_with = "stdout")]
    pub check: bool,

    /// Print rendered output instead of writing files.
    #[arg(long)]
    pub stdout: bool,

    /// Print the merged context as JSON and exit.
    #[arg(long = "print-context")]
    pub print_context: bool,

    /// Print package information and exit.
    #[arg(long)]
    pub about: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments, exiting through clap on invalid input.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| e.exit())
}

/// Prints usage and exits with a failure code. Used when there is nothing to render.
pub fn print_help_and_exit() -> ! {
    let mut command = Args::command().help_template(HELP_TEMPLATE);
    if let Err(print_err) = command.print_help() {
        eprintln!("Failed to display help information: {print_err}");
    } else {
        println!();
    }
    std::process::exit(exit_codes::FAILURE);
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
