//! Block macro trait.
//!
//! Block macros use double-colon syntax on a line of their own:
//! `name::target[attrs]`

use crate::{BoxError, MacroArgs, MacroContext, MacroOutput};

/// Handler for block macros: `name::target[attrs]`
///
/// Block macros usually return [`MacroOutput::Markup`] so that the
/// generated content is itself scanned for macros. A handler error aborts
/// the whole document pass.
pub trait BlockMacro: Send {
    /// Macro name, matched against `name::` in the source.
    fn name(&self) -> &str;

    /// Expand one invocation.
    fn process(&mut self, args: MacroArgs, ctx: &MacroContext<'_>) -> Result<MacroOutput, BoxError>;
}
