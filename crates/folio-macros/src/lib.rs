//! Pluggable macros for AsciiDoc-style document sources.
//!
//! Handlers expand two macro shapes:
//!
//! - **Inline** ([`InlineMacro`]): `name:target[attrs]` anywhere in a line
//! - **Block** ([`BlockMacro`]): `name::target[attrs]` on a line of its own
//!
//! Attribute lists keep their order and distinguish an attribute that is
//! present without a value from one that is absent (see [`MacroAttributes`]).
//!
//! Every handler receives a [`MacroContext`] giving read access to the
//! host's content catalog, the calling document and the site attributes.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use folio_catalog::{ContentFile, Family, FileSrc, MemoryCatalog};
//! use folio_macros::{DocumentScope, InlineMacro, MacroArgs, MacroContext, MacroOutput, MacroProcessor};
//!
//! struct KbdMacro;
//!
//! impl InlineMacro for KbdMacro {
//!     fn name(&self) -> &str { "kbd" }
//!
//!     fn process(&mut self, args: MacroArgs, _ctx: &MacroContext<'_>) -> MacroOutput {
//!         MacroOutput::text(format!("<kbd>{}</kbd>", args.target))
//!     }
//! }
//!
//! let catalog = MemoryCatalog::new();
//! let file = ContentFile::new(FileSrc::new("docs", "1.0", "ROOT", Family::Page, "a.adoc"), "");
//! let attributes = BTreeMap::new();
//! let scope = DocumentScope { catalog: &catalog, file: &file, attributes: &attributes };
//!
//! let mut processor = MacroProcessor::new().with_inline(KbdMacro);
//! let output = processor.process("Press kbd:Ctrl+C[] to copy.", &scope).unwrap();
//! assert_eq!(output, "Press <kbd>Ctrl+C</kbd> to copy.");
//! ```

mod args;
mod block;
mod context;
mod error;
mod fence;
mod inline;
mod output;
mod parser;
mod processor;

pub use args::{AttributeKey, MacroArgs, MacroAttributes};
pub use block::BlockMacro;
pub use context::{DocumentScope, MacroContext};
pub use error::{BoxError, MacroError};
pub use inline::InlineMacro;
pub use output::MacroOutput;
pub use processor::{MacroProcessor, MacroProcessorConfig};
