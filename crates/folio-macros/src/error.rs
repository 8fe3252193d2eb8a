//! Macro processing errors.

/// Boxed error returned by block macro handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error that aborts a document pass.
#[derive(Debug, thiserror::Error)]
pub enum MacroError {
    /// A block macro handler failed.
    #[error("{name}:: macro failed in {document} at line {line}: {source}")]
    Block {
        /// Macro name.
        name: String,
        /// Source path of the document being processed.
        document: String,
        /// Line of the macro (1-indexed).
        line: usize,
        source: BoxError,
    },
}
