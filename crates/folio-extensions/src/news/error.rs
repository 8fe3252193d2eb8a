//! News generation errors.

use folio_catalog::CatalogError;

/// Error that fails a `news::generate[]` pass.
///
/// Publish date problems are authoring errors and name the offending
/// source file.
#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    /// A news entry has no `:page-publish_date:` attribute.
    #[error("Publish date not defined in news article: {path}")]
    MissingPublishDate {
        /// Source path of the news entry.
        path: String,
    },

    /// The publish date attribute is not a recognizable date.
    #[error("Cannot parse publish date '{value}' in {path}")]
    InvalidPublishDate {
        /// Source path of the news entry.
        path: String,
        /// Raw attribute value.
        value: String,
    },

    /// The feed could not be registered in the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Feed serialization failed.
    #[error("Failed to write news feed: {0}")]
    Feed(#[from] std::io::Error),

    /// Serialized feed is not valid UTF-8.
    #[error("News feed is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
