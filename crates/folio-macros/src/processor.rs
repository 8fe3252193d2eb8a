//! Macro processor for AsciiDoc-style sources.
//!
//! Scans a document line by line, expanding block macros that occupy a
//! whole line and inline macros anywhere else.

use crate::fence::FenceTracker;
use crate::parser::{ParsedMacro, find_inline, parse_block_line};
use crate::{BlockMacro, DocumentScope, InlineMacro, MacroContext, MacroError, MacroOutput};

/// Configuration for the macro processor.
#[derive(Debug)]
pub struct MacroProcessorConfig {
    /// Maximum nesting of [`MacroOutput::Markup`] expansion.
    ///
    /// Default: 10
    pub max_depth: usize,
}

impl Default for MacroProcessorConfig {
    fn default() -> Self {
        Self { max_depth: 10 }
    }
}

impl MacroProcessorConfig {
    /// Set the maximum expansion depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Per-source scanning state.
struct Pass {
    fence: FenceTracker,
    section_level: usize,
}

/// Processor holding the registered macro handlers.
///
/// One processor may be reused for several documents; no state survives
/// between [`process`](Self::process) calls.
pub struct MacroProcessor {
    config: MacroProcessorConfig,
    inline_handlers: Vec<Box<dyn InlineMacro>>,
    block_handlers: Vec<Box<dyn BlockMacro>>,
}

impl Default for MacroProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroProcessor {
    /// Create a processor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MacroProcessorConfig::default())
    }

    /// Create a processor with custom configuration.
    #[must_use]
    pub fn with_config(config: MacroProcessorConfig) -> Self {
        Self {
            config,
            inline_handlers: Vec::new(),
            block_handlers: Vec::new(),
        }
    }

    /// Register an inline macro handler.
    #[must_use]
    pub fn with_inline<M: InlineMacro + 'static>(mut self, handler: M) -> Self {
        self.inline_handlers.push(Box::new(handler));
        self
    }

    /// Register a block macro handler.
    #[must_use]
    pub fn with_block<M: BlockMacro + 'static>(mut self, handler: M) -> Self {
        self.block_handlers.push(Box::new(handler));
        self
    }

    /// Expand every registered macro in `input`.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::Block`] when a block macro handler fails.
    pub fn process(&mut self, input: &str, scope: &DocumentScope<'_>) -> Result<String, MacroError> {
        self.process_with_depth(input, scope, 0, 0)
    }

    fn process_with_depth(
        &mut self,
        input: &str,
        scope: &DocumentScope<'_>,
        depth: usize,
        section_level: usize,
    ) -> Result<String, MacroError> {
        if depth > self.config.max_depth {
            tracing::warn!(
                document = %scope.file.src,
                max_depth = self.config.max_depth,
                "Maximum macro expansion depth exceeded"
            );
            return Ok(input.to_owned());
        }

        let mut pass = Pass {
            fence: FenceTracker::new(),
            section_level,
        };
        let mut output = String::with_capacity(input.len());
        let lines: Vec<&str> = input.lines().collect();
        let line_count = lines.len();

        for (idx, line) in lines.iter().enumerate() {
            let processed = self.process_line(line, idx + 1, &mut pass, scope, depth)?;
            output.push_str(&processed);

            // Preserve line endings
            if idx + 1 < line_count || input.ends_with('\n') {
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn process_line(
        &mut self,
        line: &str,
        line_num: usize,
        pass: &mut Pass,
        scope: &DocumentScope<'_>,
        depth: usize,
    ) -> Result<String, MacroError> {
        if pass.fence.update(line) || pass.fence.in_fence() {
            return Ok(line.to_owned());
        }

        let trimmed = line.trim_start();
        if trimmed.starts_with("//") {
            return Ok(line.to_owned());
        }
        if let Some(level) = heading_level(line) {
            pass.section_level = level;
        }

        if let Some(parsed) = parse_block_line(line)
            && let Some(handler) = self.block_handler(&parsed.name)
        {
            let ctx = MacroContext::new(scope, line_num, pass.section_level);
            let ParsedMacro { name, args } = parsed;
            let output = self.block_handlers[handler]
                .process(args, &ctx)
                .map_err(|source| MacroError::Block {
                    name,
                    document: scope.file.src.source_path(),
                    line: line_num,
                    source,
                })?;
            return match output {
                MacroOutput::Text(text) => Ok(text),
                MacroOutput::Markup(markup) => {
                    let expanded =
                        self.process_with_depth(&markup, scope, depth + 1, pass.section_level)?;
                    Ok(expanded.trim_end_matches('\n').to_owned())
                }
                MacroOutput::Skip => Ok(line.to_owned()),
            };
        }

        self.process_inline_macros(line, line_num, pass.section_level, scope, depth)
    }

    fn process_inline_macros(
        &mut self,
        line: &str,
        line_num: usize,
        section_level: usize,
        scope: &DocumentScope<'_>,
        depth: usize,
    ) -> Result<String, MacroError> {
        if self.inline_handlers.is_empty() {
            return Ok(line.to_owned());
        }
        let owned_names: Vec<String> = self
            .inline_handlers
            .iter()
            .map(|h| h.name().to_owned())
            .collect();
        let names: Vec<&str> = owned_names.iter().map(String::as_str).collect();

        let mut result = String::with_capacity(line.len());
        let mut remaining = line;

        while let Some((parsed, start, end)) = find_inline(remaining, &names) {
            result.push_str(&remaining[..start]);

            let ctx = MacroContext::new(scope, line_num, section_level);
            let output = self
                .inline_handlers
                .iter_mut()
                .find(|h| h.name() == parsed.name)
                .map_or(MacroOutput::Skip, |h| h.process(parsed.args, &ctx));

            match output {
                MacroOutput::Text(text) => result.push_str(&text),
                MacroOutput::Markup(markup) => {
                    let expanded =
                        self.process_with_depth(&markup, scope, depth + 1, section_level)?;
                    result.push_str(expanded.trim_end_matches('\n'));
                }
                MacroOutput::Skip => result.push_str(&remaining[start..end]),
            }

            remaining = &remaining[end..];
        }
        result.push_str(remaining);

        Ok(result)
    }

    fn block_handler(&self, name: &str) -> Option<usize> {
        self.block_handlers.iter().position(|h| h.name() == name)
    }
}

/// Section level of an AsciiDoc heading line (`= Title` is level 0).
fn heading_level(line: &str) -> Option<usize> {
    let markers = line.chars().take_while(|&c| c == '=').count();
    if markers == 0 || markers > 6 {
        return None;
    }
    let rest = &line[markers..];
    (rest.starts_with(' ') && !rest.trim().is_empty()).then_some(markers - 1)
}
