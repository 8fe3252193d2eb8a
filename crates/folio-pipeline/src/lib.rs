//! Analysis pipeline configuration for Folio.
//!
//! A pipeline configuration selects which analyzers, filters, transforms,
//! reporters and matchers take part in an analysis, and how transforms are
//! grouped into blocks:
//!
//! ```json
//! {
//!   "transformBlocks": [["revapi.versions", "revapi.reclassify"]],
//!   "analyzers": {"include": ["revapi.java"]},
//!   "reporters": {"exclude": "revapi.reporter.json"}
//! }
//! ```
//!
//! Documents are checked against an embedded JSON schema ([`SCHEMA_JSON`])
//! before they are converted to [`PipelineConfiguration`].

mod model;
mod schema;

pub use model::{ExtensionFilter, IdList, PipelineConfiguration, PipelineError};
pub use schema::{SCHEMA_JSON, Violation, schema, validate, validate_against};
