//! satip-detect - Find SAT>IP servers on the local network.
//!
//! Sends one SSDP search for SAT>IP servers, fetches every advertised
//! description, and prints each server's name with its frontend counts per
//! delivery system.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use error::{exit_codes, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose);

    let result = run(&cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None | Some(Commands::Discover) => commands::run_discover(cli).await,
        Some(Commands::Describe(args)) => commands::run_describe(args, cli).await,
    }
}
