mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    if let Err(e) = run_app(cli) {
        error!("Command failed: {}", e);
        if !quiet {
            eprintln!("Error: {}", e);
        }
        std::process::exit(e.exit_code());
    }
}

fn run_app(cli: Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("RICE++ CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let quiet = cli.quiet;
    let result = match cli.command {
        Commands::Contacts(args) => {
            info!("Dispatching to 'contacts' command.");
            commands::contacts::run(args, quiet)
        }
        Commands::Design(args) => {
            info!("Dispatching to 'design' command.");
            commands::design::run(args, quiet)
        }
    };

    if result.is_ok() {
        info!("Command completed successfully.");
    }
    result
}
