//! Delimited block tracking for macro scanning.
//!
//! Macros are not expanded inside verbatim blocks: AsciiDoc listing
//! (`----`), literal (`....`), passthrough (`++++`) and comment (`////`)
//! blocks, and backtick code fences.

/// Characters that open an AsciiDoc verbatim block when repeated 4+ times.
const BLOCK_CHARS: [char; 4] = ['-', '.', '+', '/'];

/// Tracks delimited block state during line-by-line processing.
///
/// AsciiDoc blocks close on a line identical to the opening delimiter.
/// Backtick fences close on a fence at least as long as the opening one.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    /// Character of the open delimiter.
    fence_char: Option<char>,
    /// Length of the opening delimiter.
    fence_len: usize,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if currently inside a delimited block.
    pub(crate) fn in_fence(&self) -> bool {
        self.fence_char.is_some()
    }

    /// Update state with the next line. Returns `true` if the line is a
    /// delimiter (opening or closing).
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim();

        if let Some(fence_char) = self.fence_char {
            if is_closing(trimmed, fence_char, self.fence_len) {
                self.fence_char = None;
                self.fence_len = 0;
                return true;
            }
            return false;
        }

        if let Some((ch, len)) = detect_opening(trimmed) {
            self.fence_char = Some(ch);
            self.fence_len = len;
            return true;
        }
        false
    }
}

fn run_length(s: &str, ch: char) -> usize {
    s.chars().take_while(|&c| c == ch).count()
}

fn detect_opening(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next()?;
    let count = run_length(trimmed, first);

    if first == '`' {
        return (count >= 3).then_some((first, count));
    }
    // AsciiDoc delimiters are the character alone, repeated.
    (BLOCK_CHARS.contains(&first) && count >= 4 && count == trimmed.chars().count())
        .then_some((first, count))
}

fn is_closing(trimmed: &str, expected: char, open_len: usize) -> bool {
    if !trimmed.starts_with(expected) {
        return false;
    }
    let count = run_length(trimmed, expected);
    let only_delimiter = count == trimmed.chars().count();
    if expected == '`' {
        only_delimiter && count >= open_len
    } else {
        only_delimiter && count == open_len
    }
}
