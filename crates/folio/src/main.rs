//! Folio CLI - documentation site macros.
//!
//! Provides commands for:
//! - `expand`: Expand the macros of one document from a catalog snapshot
//! - `index`: Build an ordered docs index from a page list
//! - `pipeline validate`: Check a pipeline configuration against its schema
//! - `url`: Compute the relative URL between two published pages

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExpandArgs, IndexArgs, PipelineCommand, UrlArgs};
use output::Output;

/// Folio - documentation site macros.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable verbose output (resolution warnings and matches).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand the macros of one document.
    Expand(ExpandArgs),
    /// Build an ordered docs index.
    Index(IndexArgs),
    /// Pipeline configuration commands.
    #[command(subcommand)]
    Pipeline(PipelineCommand),
    /// Compute a relative URL between two published pages.
    Url(UrlArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Expand(args) => args.execute(),
        Commands::Index(args) => args.execute(),
        Commands::Pipeline(cmd) => cmd.execute(),
        Commands::Url(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
