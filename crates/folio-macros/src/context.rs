//! Macro processing context.
//!
//! Gives handlers read access to the host catalog, the calling document
//! and the site attributes.

use std::collections::BTreeMap;

use folio_catalog::{ContentCatalog, ContentFile};

/// The document being processed and the host services around it.
///
/// Created once per document pass by the host.
#[derive(Clone, Copy)]
pub struct DocumentScope<'a> {
    /// Host content catalog.
    pub catalog: &'a dyn ContentCatalog,
    /// Catalog entry of the document being processed.
    pub file: &'a ContentFile,
    /// Site-wide document attributes (e.g. `site-url`).
    pub attributes: &'a BTreeMap<String, String>,
}

/// Context passed to a macro handler for one invocation.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use folio_catalog::{ContentFile, Family, FileSrc, MemoryCatalog};
/// use folio_macros::{DocumentScope, MacroContext};
///
/// let catalog = MemoryCatalog::new();
/// let file = ContentFile::new(FileSrc::new("docs", "1.0", "ROOT", Family::Page, "a.adoc"), "")
///     .with_publication("/docs/1.0/a.html", ".");
/// let attributes = BTreeMap::from([("site-url".to_owned(), "https://example.com".to_owned())]);
/// let scope = DocumentScope { catalog: &catalog, file: &file, attributes: &attributes };
///
/// let ctx = MacroContext::new(&scope, 3, 1);
/// assert_eq!(ctx.attribute("site-url"), Some("https://example.com"));
/// assert_eq!(ctx.module_root_path(), ".");
/// ```
pub struct MacroContext<'a> {
    pub catalog: &'a dyn ContentCatalog,
    pub file: &'a ContentFile,
    pub attributes: &'a BTreeMap<String, String>,
    /// Line number where the macro appears (1-indexed).
    pub line: usize,
    /// Level of the enclosing section (0 = document title).
    pub section_level: usize,
}

impl<'a> MacroContext<'a> {
    /// Create a context for a macro found at `line`.
    #[must_use]
    pub fn new(scope: &DocumentScope<'a>, line: usize, section_level: usize) -> Self {
        Self {
            catalog: scope.catalog,
            file: scope.file,
            attributes: scope.attributes,
            line,
            section_level,
        }
    }

    /// Look up a site attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Path from the calling document's published URL to its module root.
    ///
    /// Falls back to `.` for unpublished documents.
    #[must_use]
    pub fn module_root_path(&self) -> &'a str {
        self.file
            .publication
            .as_ref()
            .map_or(".", |p| p.module_root_path.as_str())
    }
}
