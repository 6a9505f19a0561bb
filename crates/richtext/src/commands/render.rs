//! `richtext render` command implementation.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use richtext_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON document to render (default: stdin, also `-`).
    input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover richtext.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Escape attribute values (overrides config).
    #[arg(long)]
    escape_attributes: bool,

    /// Maximum node nesting depth (overrides config).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, rendering or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            escape_attributes: self.escape_attributes.then_some(true),
            max_depth: self.max_depth,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let json = read_input(self.input.as_deref())?;
        let html = config.resolver().render_json(&json)?;
        tracing::info!(bytes = html.len(), "Rendered document");

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                Output::new().success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

/// Read the document from a file, or stdin for `None` and `-`.
fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut json = String::new();
            io::stdin().read_to_string(&mut json)?;
            Ok(json)
        }
    }
}
