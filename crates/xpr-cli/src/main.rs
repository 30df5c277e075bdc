//! Vivado project manager CLI
//!
//! The command-line interface for checking Vivado projects into and out of
//! a version-controlled repository.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            // No command provided - show help hint
            println!("{} Vivado project manager", "xpr".green().bold());
            println!();
            println!("Run {} for available commands.", "xpr --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Checkin { skip_version_check } => {
            commands::run_checkin(&cwd, skip_version_check)
        }
        Commands::Checkout { skip_version_check } => {
            commands::run_checkout(&cwd, skip_version_check)
        }
        Commands::List { json } => commands::run_list(&cwd, json),
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            clap_complete::generate(shell, &mut Cli::command(), "xpr", &mut std::io::stdout());
            Ok(())
        }
    }
}
