//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [site]
//! title = "Revapi"
//! url = "https://revapi.org"
//!
//! [attributes]
//! news-feed-title = "Revapi News"
//! news-feed-max-items = 10
//!
//! [build]
//! catalog = "build/catalog.json"
//! output_dir = "build/site"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `site.url`
//! - every string value in `[attributes]`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site URL.
    pub site_url: Option<String>,
    /// Override catalog snapshot path.
    pub catalog: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Attribute that limits news listings and feeds.
const MAX_ITEMS_ATTRIBUTE: &str = "news-feed-max-items";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration.
    pub site: SiteConfig,
    /// Document attributes as written in TOML.
    #[serde(rename = "attributes")]
    attributes_raw: BTreeMap<String, AttributeValue>,
    /// Build paths (relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved document attributes (set after loading).
    #[serde(skip)]
    pub attributes: BTreeMap<String, String>,
    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Site configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, exposed as the `site-title` attribute.
    pub title: Option<String>,
    /// Public site URL, exposed as the `site-url` attribute.
    pub url: Option<String>,
}

/// Attribute value as written in TOML.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AttributeValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl AttributeValue {
    fn into_string(self, field: &str) -> Result<String, ConfigError> {
        match self {
            Self::String(value) => expand::expand_env(&value, field),
            Self::Integer(value) => Ok(value.to_string()),
            Self::Boolean(value) => Ok(value.to_string()),
        }
    }
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BuildConfigRaw {
    catalog: Option<String>,
    output_dir: Option<String>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Catalog snapshot (JSON) to read.
    pub catalog: Option<PathBuf>,
    /// Directory for generated files.
    pub output_dir: PathBuf,
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(site_url) = &settings.site_url {
            self.site.url = Some(site_url.clone());
        }
        if let Some(catalog) = &settings.catalog {
            self.build_resolved.catalog = Some(catalog.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Document attributes handed to macros.
    ///
    /// `[attributes]` entries plus `site-url` and `site-title` from `[site]`.
    /// An explicit attribute of the same name wins.
    #[must_use]
    pub fn document_attributes(&self) -> BTreeMap<String, String> {
        let mut attributes = self.attributes.clone();
        if let Some(url) = &self.site.url {
            attributes
                .entry("site-url".to_owned())
                .or_insert_with(|| url.clone());
        }
        if let Some(title) = &self.site.title {
            attributes
                .entry("site-title".to_owned())
                .or_insert_with(|| title.clone());
        }
        attributes
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.site.url {
            require_http_url(url, "site.url")?;
        }
        if let Some(value) = self.attributes.get(MAX_ITEMS_ATTRIBUTE)
            && value.trim().parse::<usize>().is_err()
        {
            return Err(ConfigError::Validation(format!(
                "attributes.{MAX_ITEMS_ATTRIBUTE} must be a non-negative integer, got '{value}'"
            )));
        }
        Ok(())
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            build_resolved: BuildConfig {
                catalog: None,
                output_dir: base.join("build").join("site"),
            },
            ..Self::default()
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Expand environment variable references and resolve attributes.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(title) = &self.site.title {
            self.site.title = Some(expand::expand_env(title, "site.title")?);
        }
        if let Some(url) = &self.site.url {
            self.site.url = Some(expand::expand_env(url, "site.url")?);
        }

        self.attributes = std::mem::take(&mut self.attributes_raw)
            .into_iter()
            .map(|(name, value)| {
                let field = format!("attributes.{name}");
                value.into_string(&field).map(|value| (name, value))
            })
            .collect::<Result<_, _>>()?;

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.build_resolved = BuildConfig {
            catalog: self.build.catalog.as_deref().map(|p| config_dir.join(p)),
            output_dir: config_dir.join(self.build.output_dir.as_deref().unwrap_or("build/site")),
        };
    }
}

/// Search for the config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
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
