//! Typed pipeline configuration.

use serde::Deserialize;
use serde_json::Value;

use crate::schema::{Violation, validate};

/// Pipeline configuration error.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Input is not JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input does not conform to the schema.
    #[error("Invalid pipeline configuration: {}", format_violations(.0))]
    Schema(Vec<Violation>),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single extension id or a list of them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdList {
    One(String),
    Many(Vec<String>),
}

impl IdList {
    /// The ids as a slice.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        match self {
            Self::One(id) => std::slice::from_ref(id),
            Self::Many(ids) => ids,
        }
    }
}

/// Include/exclude lists for one kind of extension.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ExtensionFilter {
    #[serde(default)]
    include: Option<IdList>,
    #[serde(default)]
    exclude: Option<IdList>,
}

impl ExtensionFilter {
    /// Explicitly included ids. Empty means every extension.
    #[must_use]
    pub fn includes(&self) -> &[String] {
        self.include.as_ref().map(IdList::ids).unwrap_or_default()
    }

    /// Explicitly excluded ids.
    #[must_use]
    pub fn excludes(&self) -> &[String] {
        self.exclude.as_ref().map(IdList::ids).unwrap_or_default()
    }

    /// Whether the extension `id` takes part in the pipeline.
    ///
    /// An exclusion always wins over an inclusion.
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        if self.excludes().iter().any(|e| e == id) {
            return false;
        }
        let includes = self.includes();
        includes.is_empty() || includes.iter().any(|i| i == id)
    }
}

/// Which extensions an analysis pipeline uses.
///
/// # Example
///
/// ```
/// use folio_pipeline::PipelineConfiguration;
///
/// let config = PipelineConfiguration::from_json(
///     r#"{"reporters": {"include": "revapi.reporter.text"}}"#,
/// ).unwrap();
/// assert!(config.reporters.is_enabled("revapi.reporter.text"));
/// assert!(!config.reporters.is_enabled("revapi.reporter.json"));
/// assert!(config.analyzers.is_enabled("revapi.java"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfiguration {
    /// Groups of transforms applied together, in order.
    pub transform_blocks: Vec<Vec<String>>,
    pub analyzers: ExtensionFilter,
    pub filters: ExtensionFilter,
    pub transforms: ExtensionFilter,
    pub reporters: ExtensionFilter,
    pub matchers: ExtensionFilter,
}

impl PipelineConfiguration {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Json`] for malformed JSON and
    /// [`PipelineError::Schema`] listing every schema violation.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Validate and convert a parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Schema`] listing every schema violation.
    pub fn from_value(value: Value) -> Result<Self, PipelineError> {
        let violations = validate(&value);
        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "Pipeline configuration rejected");
            return Err(PipelineError::Schema(violations));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Distinct transform blocks in declaration order.
    #[must_use]
    pub fn distinct_transform_blocks(&self) -> Vec<&[String]> {
        let mut blocks: Vec<&[String]> = Vec::new();
        for block in &self.transform_blocks {
            if !blocks.contains(&block.as_slice()) {
                blocks.push(block);
            }
        }
        blocks
    }
}
