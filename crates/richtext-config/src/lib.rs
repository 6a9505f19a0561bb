//! Configuration management for the richtext renderer.
//!
//! Parses `richtext.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [render]
//! escape_attributes = true
//! max_depth = 128
//!
//! [schema]
//! base = "default"
//! disable_nodes = ["image"]
//!
//! [schema.nodes.callout]
//! tag = [{ tag = "div", attrs = { class = "callout" } }]
//!
//! [schema.marks.highlight]
//! tag = "mark"
//! ```
//!
//! Node and mark overrides use the tag descriptor shapes (`tag`,
//! `single_tag`, `html`) and always resolve to the same descriptor.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use richtext_render::{HtmlSerializer, Resolver, Schema, TagDescriptor};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override attribute escaping.
    pub escape_attributes: Option<bool>,
    /// Override the nesting limit.
    pub max_depth: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "richtext.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering options.
    pub render: RenderConfig,
    /// Schema adjustments.
    pub schema: SchemaConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Escape attribute values like text content.
    pub escape_attributes: bool,
    /// Maximum node nesting depth. Unlimited when unset.
    pub max_depth: Option<usize>,
}

/// Which table the schema starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaBase {
    /// The standard rich-text table.
    #[default]
    Default,
    /// No entries; everything renders as passthrough unless overridden.
    Empty,
}

/// Schema adjustments applied on top of the base table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Starting table.
    pub base: SchemaBase,
    /// Node types removed from the base table.
    pub disable_nodes: Vec<String>,
    /// Mark types removed from the base table.
    pub disable_marks: Vec<String>,
    /// Static node overrides, keyed by node type.
    pub nodes: BTreeMap<String, TagDescriptor>,
    /// Static mark overrides, keyed by mark type.
    pub marks: BTreeMap<String, TagDescriptor>,
}

impl SchemaConfig {
    /// Build the effective schema.
    ///
    /// Removals are applied before overrides, so a type can be both disabled
    /// in the base table and redefined.
    #[must_use]
    pub fn build(&self) -> Schema {
        let mut schema = match self.base {
            SchemaBase::Default => Schema::default(),
            SchemaBase::Empty => Schema::empty(),
        };
        for name in &self.disable_nodes {
            schema = schema.without_node(name);
        }
        for name in &self.disable_marks {
            schema = schema.without_mark(name);
        }
        for (name, descriptor) in &self.nodes {
            schema = schema.with_static_node(name.as_str(), descriptor.clone());
        }
        for (name, descriptor) in &self.marks {
            schema = schema.with_static_mark(name.as_str(), descriptor.clone());
        }
        schema
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `richtext.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            tracing::debug!(path = %discovered.display(), "Discovered configuration file");
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Build a resolver from this configuration.
    #[must_use]
    pub fn resolver(&self) -> Resolver {
        let serializer = if self.render.escape_attributes {
            HtmlSerializer::new().with_escaped_attributes()
        } else {
            HtmlSerializer::new()
        };
        let resolver = Resolver::new()
            .with_schema(self.schema.build())
            .with_serializer(serializer);
        match self.render.max_depth {
            Some(limit) => resolver.with_max_depth(limit),
            None => resolver,
        }
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.max_depth == Some(0) {
            return Err(ConfigError::Validation(
                "render.max_depth must be greater than 0".to_owned(),
            ));
        }

        let names = self
            .schema
            .nodes
            .keys()
            .map(|name| ("schema.nodes", name))
            .chain(self.schema.marks.keys().map(|name| ("schema.marks", name)));
        for (section, name) in names {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{section} cannot contain an empty type name"
                )));
            }
        }

        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(escape_attributes) = settings.escape_attributes {
            self.render.escape_attributes = escape_attributes;
        }
        if let Some(max_depth) = settings.max_depth {
            self.render.max_depth = Some(max_depth);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }
}
