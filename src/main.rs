//! xgo - CGO cross compiler front end
//!
//! CLI entry point that dispatches to subcommands. This is the only place
//! that decides the process exit status.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use xgo::cli::{Cli, Commands};
use xgo::config::ConfigFile;
use xgo::error::XgoResult;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> XgoResult<()> {
    let cli = Cli::parse();

    // 0 = info, 1 = debug, 2+ = trace; XGO_LOG wins when set
    let filter = EnvFilter::try_from_env("XGO_LOG").unwrap_or_else(|_| match cli.debug {
        0 => EnvFilter::new("xgo=info"),
        1 => EnvFilter::new("xgo=debug"),
        _ => EnvFilter::new("xgo=trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let file = ConfigFile::locate(cli.config);
    let config = file.load().await?;

    match cli.command {
        Commands::Build(args) => xgo::cli::commands::build(args, &config).await,
        Commands::Cache(args) => xgo::cli::commands::cache(args, &config).await,
        Commands::Config(args) => xgo::cli::commands::config(args, &config, &file).await,
    }
}
