//! rigsync CLI
//!
//! Command-line interface for capturing a subtree of a scene document and
//! reconciling it onto another subtree.

use clap::{Parser, Subcommand};
use rigsync_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "rigsync")]
#[command(about = "rigsync - Copy components between rig hierarchies", long_about = None)]
struct Cli {
    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print what a paste would change without changing anything
    DryRun(commands::sync::SyncArgs),
    /// Paste the captured components and print the resulting destination
    Paste(commands::sync::SyncArgs),
}

fn main() {
    let cli = Cli::parse();
    if cli.verbose {
        init(Profile::Development);
    }

    let result = match cli.command {
        Commands::DryRun(args) => commands::sync::execute_dry_run(args),
        Commands::Paste(args) => commands::sync::execute_paste(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
