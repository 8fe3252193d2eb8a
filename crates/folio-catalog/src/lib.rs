//! Content catalog abstraction for Folio site extensions.
//!
//! The host site generator owns the catalog of every source document and
//! asset in a build. This crate describes that catalog through the
//! [`ContentCatalog`] trait so the extensions never depend on a concrete
//! host. It also provides the pure pieces that sit on top of the catalog:
//!
//! - [`ResourceRef`]: parser for `version@component:module:family$relative`
//! - [`match_files`]: glob-style selection of catalog entries
//! - [`compute_relative_url_path`]: shortest path between two published URLs
//! - [`build_index`]: ordered docs index under a path prefix
//! - [`MemoryCatalog`]: in-memory implementation for tests and tooling
//!
//! # Example
//!
//! ```
//! use folio_catalog::{ContentCatalog, ContentFile, Family, FileSrc, MemoryCatalog, match_files};
//!
//! let catalog = MemoryCatalog::new()
//!     .with_file(ContentFile::new(
//!         FileSrc::new("docs", "1.0", "ROOT", Family::Page, "news/2024-01-01-release.adoc"),
//!         "= Release",
//!     ));
//!
//! let context = FileSrc::new("docs", "1.0", "ROOT", Family::Page, "index.adoc");
//! let matches = match_files(&catalog, "news/*.adoc", &context);
//! assert_eq!(matches.len(), 1);
//! ```

mod catalog;
mod index;
mod memory;
mod model;
mod resource_ref;
mod select;
mod url;

pub use catalog::{CatalogError, ContentCatalog};
pub use index::{IndexPage, build_index};
pub use memory::MemoryCatalog;
pub use model::{Component, ComponentVersion, ContentFile, Family, FileSrc, Publication};
pub use resource_ref::ResourceRef;
pub use select::{match_files, split_fragment};
pub use url::compute_relative_url_path;
