//! Snippet Collector CLI
//!
//! Extracts marked blocks from theme style sheets into standalone snippet
//! files and keeps them in step with their sources.

mod cli;
mod commands;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::ExtractArgs;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Snippet Collector CLI", "snip".green().bold());
            println!();
            println!("Run {} for available commands.", "snip --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Extract {
            config,
            yes,
            accept_ambiguous,
            prune,
            dry_run,
            json,
            source,
        } => commands::run_extract(
            &cwd,
            &config,
            &ExtractArgs {
                yes,
                accept_ambiguous,
                prune,
                dry_run,
                json,
                source,
            },
        ),
        Commands::Status { config, json } => commands::run_status(&cwd, &config, json),
    }
}
