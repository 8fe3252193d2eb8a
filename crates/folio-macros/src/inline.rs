//! Inline macro trait.
//!
//! Inline macros use single-colon syntax: `name:target[attrs]`

use crate::{MacroArgs, MacroContext, MacroOutput};

/// Handler for inline macros: `name:target[attrs]`
///
/// Inline macros cannot fail. Handlers degrade to empty or fallback
/// output instead.
pub trait InlineMacro: Send {
    /// Macro name, matched against `name:` in the source.
    fn name(&self) -> &str;

    /// Expand one invocation.
    fn process(&mut self, args: MacroArgs, ctx: &MacroContext<'_>) -> MacroOutput;
}
