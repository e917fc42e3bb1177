//! beacon CLI - Fetch records from the NIST randomness beacon.

use anyhow::Result;
use beacon_lib::url::BASE_URL;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "beacon")]
#[command(about = "Fetch records from the NIST randomness beacon", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (only log errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Options shared by every command that fetches records.
#[derive(Args)]
struct FetchArgs {
    /// Start of the range (RFC 3339, "YYYY-MM-DD HH:MM[:SS]" in UTC, YYYY-MM-DD or epoch seconds)
    #[arg(short, long)]
    from: String,

    /// End of the range, inclusive. Defaults to now.
    #[arg(short, long)]
    to: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout: f64,

    /// Maximum concurrent requests
    #[arg(long, default_value = "10")]
    concurrency: usize,

    /// Base URL of the record service
    #[arg(long, default_value = BASE_URL)]
    base_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch records and write them as JSON
    Fetch {
        #[command(flatten)]
        args: FetchArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "ndjson")]
        format: Format,

        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize the records published in a range
    Summarize {
        #[command(flatten)]
        args: FetchArgs,
    },
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Fetch {
            args,
            format,
            output,
        } => commands::fetch::fetch(&args, format, output).await,
        Commands::Summarize { args } => commands::summarize::summarize(&args).await,
    }
}
