//! Command-line entry point for typographe

use clap::Parser;

use typographe_cli::commands::{self, Commands};

/// Locale-aware typographic correction for plain text documents
#[derive(Debug, Parser)]
#[command(name = "typographe", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    match commands::dispatch(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    }
}
