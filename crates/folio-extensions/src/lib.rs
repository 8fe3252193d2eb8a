//! Documentation site macros for Folio.
//!
//! | Macro | Kind | Output |
//! |-------|------|--------|
//! | `component:<name>[@<version>][<field>]` | inline | Component version metadata |
//! | `news::generate[refs=<glob>]` | block | News listing sections, registers `news.atom` |
//! | `news:feed[<text>]` | inline | Link to the news feed |
//! | `fref:<reference>[<text>]` | inline | Relative link to any catalog resource |
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use folio_catalog::{Component, ComponentVersion, ContentFile, Family, FileSrc, MemoryCatalog};
//! use folio_macros::{DocumentScope, MacroProcessor};
//!
//! let catalog = MemoryCatalog::new().with_component(Component {
//!     name: "revapi".to_owned(),
//!     title: "Revapi".to_owned(),
//!     versions: vec![ComponentVersion::new("0.15", "0.15", "Revapi")],
//!     latest: None,
//! });
//! let file = ContentFile::new(FileSrc::new("revapi", "0.15", "ROOT", Family::Page, "index.adoc"), "");
//! let attributes = BTreeMap::new();
//! let scope = DocumentScope { catalog: &catalog, file: &file, attributes: &attributes };
//!
//! let mut processor = folio_extensions::register_all(MacroProcessor::new());
//! let output = processor.process("Version component:revapi[version]", &scope).unwrap();
//! assert_eq!(output, "Version 0.15");
//! ```

mod component;
mod fref;
pub mod news;

pub use component::ComponentMacro;
pub use fref::FrefMacro;
pub use news::{NewsBlockMacro, NewsError, NewsInlineMacro};

use folio_macros::MacroProcessor;

/// Register every Folio macro on `processor`.
#[must_use]
pub fn register_all(processor: MacroProcessor) -> MacroProcessor {
    processor
        .with_inline(ComponentMacro)
        .with_inline(FrefMacro)
        .with_inline(NewsInlineMacro)
        .with_block(NewsBlockMacro::new())
}
