//! In-memory content catalog.
//!
//! Provides [`MemoryCatalog`] for tests and for tooling that works from a
//! serialized catalog snapshot instead of a live host.

use std::sync::{PoisonError, RwLock};

use serde::Deserialize;

use crate::catalog::{CatalogError, ContentCatalog};
use crate::model::{Component, ContentFile, Family, FileSrc};
use crate::resource_ref::ResourceRef;

/// Serialized form of a catalog.
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    components: Vec<Component>,
    #[serde(default)]
    files: Vec<ContentFile>,
}

/// Catalog held in memory.
///
/// Files registered through [`ContentCatalog::add_file`] are kept apart so
/// callers can collect the artifacts generated during a pass.
///
/// # Example
///
/// ```
/// use folio_catalog::{ContentCatalog, ContentFile, Family, FileSrc, MemoryCatalog};
///
/// let catalog = MemoryCatalog::new().with_file(ContentFile::new(
///     FileSrc::new("docs", "1.0", "ROOT", Family::Page, "index.adoc"),
///     "= Home",
/// ));
///
/// let context = FileSrc::new("docs", "1.0", "ROOT", Family::Page, "other.adoc");
/// assert!(catalog.resolve_page("index.adoc", &context).is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    components: Vec<Component>,
    files: RwLock<Vec<ContentFile>>,
    added: RwLock<Vec<ContentFile>>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON snapshot with `components` and `files` arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self {
            components: snapshot.components,
            files: RwLock::new(snapshot.files),
            added: RwLock::new(Vec::new()),
        })
    }

    /// Add a component.
    #[must_use]
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Add a file.
    #[must_use]
    pub fn with_file(self, file: ContentFile) -> Self {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(file);
        self
    }

    /// Files registered through [`ContentCatalog::add_file`], in order.
    #[must_use]
    pub fn added_files(&self) -> Vec<ContentFile> {
        self.added
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn find(&self, src: &FileSrc) -> Option<ContentFile> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files
            .iter()
            .find(|f| {
                f.src.same_module(src) && f.src.family == src.family && f.src.relative == src.relative
            })
            .cloned()
    }
}

impl ContentCatalog for MemoryCatalog {
    fn files(&self) -> Vec<ContentFile> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn component(&self, name: &str) -> Option<Component> {
        self.components.iter().find(|c| c.name == name).cloned()
    }

    fn resolve_resource(
        &self,
        reference: &str,
        context: &FileSrc,
        default_family: Family,
    ) -> Option<ContentFile> {
        let location = ResourceRef::parse(reference)?.resolve_against(context, default_family)?;
        let found = self.find(&location);
        if found.is_none() {
            tracing::debug!(reference, resolved = %location, "Resource not found in catalog");
        }
        found
    }

    fn add_file(&self, file: ContentFile) -> Result<(), CatalogError> {
        if self.find(&file.src).is_some() {
            return Err(CatalogError::Duplicate {
                id: file.src.to_string(),
            });
        }
        tracing::debug!(id = %file.src, "Registered catalog entry");
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(file.clone());
        self.added
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(file);
        Ok(())
    }
}
