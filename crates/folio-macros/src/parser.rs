//! Macro syntax parsing.
//!
//! Parses `name::target[attrs]` block lines and `name:target[attrs]`
//! inline occurrences.

use crate::MacroArgs;

/// Macro found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedMacro {
    pub(crate) name: String,
    pub(crate) args: MacroArgs,
}

/// Parse a whole line as a block macro.
///
/// The line must consist of `name::target[attrs]` and nothing else apart
/// from surrounding whitespace. The target may be empty.
pub(crate) fn parse_block_line(line: &str) -> Option<ParsedMacro> {
    let trimmed = line.trim();
    let (name, rest) = trimmed.split_once("::")?;
    if !is_valid_macro_name(name) {
        return None;
    }

    let bracket = rest.find('[')?;
    let target = &rest[..bracket];
    if target.chars().any(char::is_whitespace) {
        return None;
    }

    let (attrlist, consumed) = parse_brackets(&rest[bracket..])?;
    if bracket + consumed != rest.len() {
        return None;
    }

    Some(ParsedMacro {
        name: name.to_owned(),
        args: MacroArgs::parse(target, &attrlist),
    })
}

/// Find the first inline macro with one of `names` in `line`.
///
/// Returns the macro with its byte range in `line`. A name only matches at
/// a word boundary, and the target must be non-empty without whitespace.
pub(crate) fn find_inline(line: &str, names: &[&str]) -> Option<(ParsedMacro, usize, usize)> {
    for (start, _) in line.char_indices() {
        if start > 0 && line[..start].chars().next_back().is_some_and(is_word_char) {
            continue;
        }
        for name in names {
            if let Some((args, len)) = parse_inline_at(&line[start..], name) {
                let parsed = ParsedMacro {
                    name: (*name).to_owned(),
                    args,
                };
                return Some((parsed, start, start + len));
            }
        }
    }
    None
}

/// Parse `name:target[attrs]` at the start of `s`.
fn parse_inline_at(s: &str, name: &str) -> Option<(MacroArgs, usize)> {
    let rest = s.strip_prefix(name)?.strip_prefix(':')?;
    if rest.starts_with(':') {
        return None;
    }

    let bracket = rest.find(|c: char| c == '[' || c.is_whitespace())?;
    if bracket == 0 || !rest[bracket..].starts_with('[') {
        return None;
    }
    let target = &rest[..bracket];

    let (attrlist, consumed) = parse_brackets(&rest[bracket..])?;
    let len = name.len() + 1 + bracket + consumed;
    Some((MacroArgs::parse(target, &attrlist), len))
}

/// Parse `[attrlist]`, honouring `\]` escapes.
///
/// Returns (attrlist, `bytes_consumed`).
fn parse_brackets(s: &str) -> Option<(String, usize)> {
    let inner = s.strip_prefix('[')?;
    let mut content = String::new();
    let mut escaped = false;

    for (i, c) in inner.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            ']' if !escaped => return Some((content, i + 2)),
            _ => {
                if escaped && c != ']' {
                    content.push('\\');
                }
                content.push(c);
                escaped = false;
            }
        }
    }
    None
}

/// Valid names start with a letter and contain letters, digits, `-` or `_`.
fn is_valid_macro_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(char::is_alphabetic)
        && chars.all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\\'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_line() {
        let parsed = parse_block_line("news::generate[refs=news/*.adoc]").unwrap();
        assert_eq!(parsed.name, "news");
        assert_eq!(parsed.args.target, "generate");
        assert_eq!(parsed.args.attrs.named("refs"), Some(Some("news/*.adoc")));
    }

    #[test]
    fn test_block_line_empty_target() {
        let parsed = parse_block_line("  toc::[]  ").unwrap();
        assert_eq!(parsed.name, "toc");
        assert_eq!(parsed.args.target, "");
        assert!(parsed.args.attrs.is_empty());
    }

    #[test]
    fn test_block_line_rejects_trailing_text() {
        assert!(parse_block_line("news::generate[] and more").is_none());
        assert!(parse_block_line("news::gen erate[]").is_none());
        assert!(parse_block_line("news::generate").is_none());
        assert!(parse_block_line("1news::generate[]").is_none());
        assert!(parse_block_line("plain text").is_none());
    }

    #[test]
    fn test_inline_found() {
        let line = "Latest is component:revapi@latest[version] today.";
        let (parsed, start, end) = find_inline(line, &["component"]).unwrap();
        assert_eq!(parsed.name, "component");
        assert_eq!(parsed.args.target, "revapi@latest");
        assert_eq!(parsed.args.attrs.single_positional(), Some(Some("version")));
        assert_eq!(&line[start..end], "component:revapi@latest[version]");
    }

    #[test]
    fn test_inline_requires_word_boundary() {
        assert!(find_inline("subcomponent:foo[title]", &["component"]).is_none());
        assert!(find_inline(r"\component:foo[title]", &["component"]).is_none());
        assert!(find_inline("(component:foo[title])", &["component"]).is_some());
    }

    #[test]
    fn test_inline_requires_target() {
        assert!(find_inline("component:[title]", &["component"]).is_none());
        assert!(find_inline("component: foo[title]", &["component"]).is_none());
        assert!(find_inline("component::foo[title]", &["component"]).is_none());
    }

    #[test]
    fn test_inline_unclosed_bracket() {
        assert!(find_inline("fref:a.adoc[text", &["fref"]).is_none());
    }

    #[test]
    fn test_inline_picks_leftmost_of_any_name() {
        let line = "fref:a.adoc[A] news:feed[Feed]";
        let (parsed, start, _) = find_inline(line, &["news", "fref"]).unwrap();
        assert_eq!(parsed.name, "fref");
        assert_eq!(start, 0);
    }

    #[test]
    fn test_inline_target_with_fragment() {
        let (parsed, _, _) = find_inline("see fref:api:a.adoc#sec[Section]", &["fref"]).unwrap();
        assert_eq!(parsed.args.target, "api:a.adoc#sec");
    }

    #[test]
    fn test_escaped_bracket_in_text() {
        assert_eq!(
            parse_brackets(r"[a \] b] rest"),
            Some(("a ] b".to_owned(), 8))
        );
        assert_eq!(parse_brackets(r"[a\b]"), Some((r"a\b".to_owned(), 5)));
        assert_eq!(parse_brackets("no"), None);
    }

    #[test]
    fn test_is_valid_macro_name() {
        assert!(is_valid_macro_name("news"));
        assert!(is_valid_macro_name("my-macro_2"));
        assert!(!is_valid_macro_name(""));
        assert!(!is_valid_macro_name("2news"));
        assert!(!is_valid_macro_name("a b"));
    }
}
