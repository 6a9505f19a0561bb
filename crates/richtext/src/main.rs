//! richtext CLI - render rich-text JSON documents to HTML.
//!
//! Provides commands for:
//! - `render`: Render a JSON document to HTML
//! - `schema`: List the node and mark types of the effective schema

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, SchemaArgs};
use output::Output;

/// richtext - schema-driven rich-text to HTML renderer.
#[derive(Parser)]
#[command(name = "richtext", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON document to HTML.
    Render(RenderArgs),
    /// List node and mark types of the effective schema.
    Schema(SchemaArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for render command
    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Schema(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
