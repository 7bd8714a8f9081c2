use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use schoolatlas::error::AppError;

use crate::report::run_rating_report;
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "School Atlas Directory",
    about = "Run the school directory rating service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute and print the rating for one school from a roll export
    Rate(RateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// School roll CSV to preload into the directory
    #[arg(long)]
    pub(crate) schools: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RateArgs {
    /// School roll CSV export (provides the target and its cohort)
    #[arg(long)]
    pub(crate) schools: PathBuf,
    /// URN (or UAI) of the school to rate
    #[arg(long)]
    pub(crate) urn: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rate(args) => run_rating_report(args),
    }
}
