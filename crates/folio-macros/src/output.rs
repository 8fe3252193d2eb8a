//! Macro output types.

/// Output from macro processing.
///
/// - [`Text`](Self::Text): replaces the macro verbatim
/// - [`Markup`](Self::Markup): replaces the macro and is scanned again for macros
/// - [`Skip`](Self::Skip): leaves the macro source untouched
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MacroOutput {
    Text(String),
    Markup(String),
    Skip,
}

impl MacroOutput {
    /// Create a text output.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create a markup output.
    #[must_use]
    pub fn markup(s: impl Into<String>) -> Self {
        Self::Markup(s.into())
    }

    /// Empty replacement.
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(MacroOutput::text("a"), MacroOutput::Text("a".to_owned()));
        assert_eq!(MacroOutput::markup("== A"), MacroOutput::Markup("== A".to_owned()));
        assert_eq!(MacroOutput::empty(), MacroOutput::Text(String::new()));
    }
}
