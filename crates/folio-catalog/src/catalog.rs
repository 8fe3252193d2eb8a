//! Catalog capability trait and error type.

use crate::model::{Component, ContentFile, Family, FileSrc};

/// Catalog error.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A file with the same resource id is already registered.
    #[error("Duplicate resource: {id}")]
    Duplicate {
        /// Fully qualified resource id.
        id: String,
    },
    /// The host catalog cannot serve the request.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Content catalog owned by the host site generator.
///
/// This is the single capability the extensions depend on. Hosts adapt
/// their own catalog to it; [`MemoryCatalog`](crate::MemoryCatalog) is the
/// in-process implementation.
///
/// All methods take `&self`. Implementations that accept new files must use
/// interior mutability, so a catalog can be shared by every macro of a
/// document pass.
pub trait ContentCatalog: Send + Sync {
    /// All entries, in catalog order.
    fn files(&self) -> Vec<ContentFile>;

    /// Look up a component by name.
    fn component(&self, name: &str) -> Option<Component>;

    /// Resolve a resource reference relative to the calling document.
    ///
    /// Omitted reference parts are inherited from `context`; a missing
    /// family falls back to `default_family`. Returns `None` when nothing
    /// matches.
    fn resolve_resource(
        &self,
        reference: &str,
        context: &FileSrc,
        default_family: Family,
    ) -> Option<ContentFile>;

    /// Register a new entry (e.g. a generated attachment).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Duplicate`] if the resource id is taken.
    fn add_file(&self, file: ContentFile) -> Result<(), CatalogError>;

    /// Resolve a page reference relative to the calling document.
    fn resolve_page(&self, reference: &str, context: &FileSrc) -> Option<ContentFile> {
        self.resolve_resource(reference, context, Family::Page)
    }
}
