//! CLI command implementations.

pub(crate) mod expand;
pub(crate) mod index;
pub(crate) mod pipeline;
pub(crate) mod url;

pub(crate) use expand::ExpandArgs;
pub(crate) use index::IndexArgs;
pub(crate) use pipeline::PipelineCommand;
pub(crate) use url::UrlArgs;
