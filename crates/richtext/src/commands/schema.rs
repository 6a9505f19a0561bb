//! `richtext schema` command implementation.

use std::path::PathBuf;

use clap::Args;
use richtext_config::Config;
use richtext_render::Resolver;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the schema command.
#[derive(Args)]
pub(crate) struct SchemaArgs {
    /// Path to configuration file (default: auto-discover richtext.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Effective node and mark types of a resolver.
#[derive(Debug, PartialEq, Eq)]
struct SchemaListing {
    nodes: Vec<String>,
    marks: Vec<String>,
    escape_attributes: bool,
}

impl SchemaListing {
    fn from_resolver(resolver: &Resolver) -> Self {
        let schema = resolver.schema();
        Self {
            nodes: schema.node_names().into_iter().map(str::to_owned).collect(),
            marks: schema.mark_names().into_iter().map(str::to_owned).collect(),
            escape_attributes: resolver.serializer().escapes_attributes(),
        }
    }
}

impl SchemaArgs {
    /// Execute the schema command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let listing = SchemaListing::from_resolver(&config.resolver());

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        if listing.escape_attributes {
            output.info("Attribute values are escaped");
        }

        output.highlight("Nodes");
        for name in &listing.nodes {
            output.info(&format!("  {name}"));
        }
        output.highlight("Marks");
        for name in &listing.marks {
            output.info(&format!("  {name}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EMPTY_BASE: &str = r#"
[render]
escape_attributes = true

[schema]
base = "empty"

[schema.marks.highlight]
tag = "mark"
"#;

    fn write_config(toml: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("richtext.toml");
        std::fs::write(&path, toml).unwrap();
        (dir, path)
    }

    #[test]
    fn test_schema_command_with_empty_base() {
        let (_dir, path) = write_config(EMPTY_BASE);

        SchemaArgs {
            config: Some(path.clone()),
        }
        .execute()
        .unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();
        let listing = SchemaListing::from_resolver(&config.resolver());
        assert_eq!(
            listing,
            SchemaListing {
                nodes: Vec::new(),
                marks: vec!["highlight".to_owned()],
                escape_attributes: true,
            }
        );
    }

    #[test]
    fn test_schema_listing_defaults() {
        let (_dir, path) = write_config("");
        let config = Config::load(Some(path.as_path()), None).unwrap();
        let listing = SchemaListing::from_resolver(&config.resolver());

        assert!(!listing.escape_attributes);
        assert!(listing.nodes.iter().any(|name| name == "paragraph"));
        assert!(listing.marks.iter().any(|name| name == "link"));
    }

    #[test]
    fn test_schema_command_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaArgs {
            config: Some(dir.path().join("missing.toml")),
        }
        .execute()
        .unwrap_err();

        assert!(matches!(err, CliError::Config(_)));
    }
}
