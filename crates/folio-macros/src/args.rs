//! Macro argument parsing.
//!
//! Parses the `[attrlist]` part of `name:target[attrlist]`.

/// Key of a macro attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeKey {
    /// Unnamed attribute, numbered from 1 by its slot in the list.
    Positional(usize),
    /// `key=value` attribute.
    Named(String),
}

/// Ordered macro attributes.
///
/// Each entry maps a key to an optional value. An empty positional slot
/// (`[,second]`) is *present without a value*, which is different from
/// the slot being absent altogether.
///
/// # Example
///
/// ```
/// use folio_macros::MacroAttributes;
///
/// let attrs = MacroAttributes::parse(r#"version, , refs="news/*""#);
/// assert_eq!(attrs.len(), 3);
/// assert_eq!(attrs.positional(1), Some(Some("version")));
/// assert_eq!(attrs.positional(2), Some(None));
/// assert_eq!(attrs.positional(4), None);
/// assert_eq!(attrs.named("refs"), Some(Some("news/*")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MacroAttributes {
    entries: Vec<(AttributeKey, Option<String>)>,
}

impl MacroAttributes {
    /// Parse an attribute list (without the surrounding brackets).
    ///
    /// Entries are separated by commas outside of quotes. An entry of the
    /// form `name=value` is named; anything else is positional. Quoted
    /// values lose their quotes.
    #[must_use]
    pub fn parse(attrlist: &str) -> Self {
        let mut attrs = Self::default();
        if attrlist.trim().is_empty() {
            return attrs;
        }

        for (idx, entry) in split_entries(attrlist).into_iter().enumerate() {
            let entry = entry.trim();
            if let Some((key, value)) = parse_named(entry) {
                attrs.push(AttributeKey::Named(key.to_owned()), Some(unquote(value).to_owned()));
            } else {
                let value = unquote(entry);
                let value = (!value.is_empty()).then(|| value.to_owned());
                attrs.push(AttributeKey::Positional(idx + 1), value);
            }
        }
        attrs
    }

    /// Append an entry.
    pub fn push(&mut self, key: AttributeKey, value: Option<String>) {
        self.entries.push((key, value));
    }

    /// Number of entries, named and positional.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry.
    ///
    /// Returns `None` when the key is absent and `Some(None)` when it is
    /// present without a value.
    #[must_use]
    pub fn get(&self, key: &AttributeKey) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// Whether the key is present, with or without a value.
    #[must_use]
    pub fn is_present(&self, key: &AttributeKey) -> bool {
        self.get(key).is_some()
    }

    /// Look up a positional entry (1-based).
    #[must_use]
    pub fn positional(&self, position: usize) -> Option<Option<&str>> {
        self.get(&AttributeKey::Positional(position))
    }

    /// Look up a named entry.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| matches!(k, AttributeKey::Named(n) if n == name))
            .map(|(_, v)| v.as_deref())
    }

    /// The sole entry when the list holds exactly one positional attribute.
    ///
    /// `[text]` yields `Some(Some("text"))`. `[]` and `[a,b]` yield `None`.
    #[must_use]
    pub fn single_positional(&self) -> Option<Option<&str>> {
        match self.entries.as_slice() {
            [(AttributeKey::Positional(1), value)] => Some(value.as_deref()),
            _ => None,
        }
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeKey, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k, v.as_deref()))
    }
}

/// Parsed macro invocation: `name:target[attrlist]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MacroArgs {
    /// Text between the colon(s) and the opening bracket.
    pub target: String,
    pub attrs: MacroAttributes,
}

impl MacroArgs {
    /// Build arguments from a target and a raw attribute list.
    #[must_use]
    pub fn parse(target: &str, attrlist: &str) -> Self {
        Self {
            target: target.to_owned(),
            attrs: MacroAttributes::parse(attrlist),
        }
    }
}

/// Split on commas outside single or double quotes.
fn split_entries(attrlist: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in attrlist.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, ',') => {
                entries.push(&attrlist[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&attrlist[start..]);
    entries
}

/// Parse `name=value` where name starts with a letter or underscore.
fn parse_named(entry: &str) -> Option<(&str, &str)> {
    let (key, value) = entry.split_once('=')?;
    let key = key.trim();
    let mut chars = key.chars();
    let first = chars.next()?;
    let valid = (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    valid.then(|| (key, value.trim()))
}

/// Strip one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        let attrs = MacroAttributes::parse("");
        assert!(attrs.is_empty());
        assert_eq!(attrs.positional(1), None);

        assert!(MacroAttributes::parse("   ").is_empty());
    }

    #[test]
    fn test_single_positional() {
        let attrs = MacroAttributes::parse("version");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.single_positional(), Some(Some("version")));
    }

    #[test]
    fn test_present_without_value() {
        let attrs = MacroAttributes::parse(",title");
        assert_eq!(attrs.positional(1), Some(None));
        assert!(attrs.is_present(&AttributeKey::Positional(1)));
        assert_eq!(attrs.positional(2), Some(Some("title")));
        assert!(!attrs.is_present(&AttributeKey::Positional(3)));
    }

    #[test]
    fn test_single_positional_rejects_multiple() {
        assert_eq!(MacroAttributes::parse("a,b").single_positional(), None);
        assert_eq!(MacroAttributes::parse("").single_positional(), None);
        assert_eq!(MacroAttributes::parse("a=b").single_positional(), None);
    }

    #[test]
    fn test_named_values() {
        let attrs = MacroAttributes::parse(r#"refs=news/*.adoc, role="lead", empty="#);
        assert_eq!(attrs.named("refs"), Some(Some("news/*.adoc")));
        assert_eq!(attrs.named("role"), Some(Some("lead")));
        assert_eq!(attrs.named("empty"), Some(Some("")));
        assert_eq!(attrs.named("missing"), None);
    }

    #[test]
    fn test_positions_count_named_slots() {
        let attrs = MacroAttributes::parse("a, key=v, c");
        assert_eq!(attrs.positional(1), Some(Some("a")));
        assert_eq!(attrs.positional(2), None);
        assert_eq!(attrs.positional(3), Some(Some("c")));
    }

    #[test]
    fn test_quoted_comma_is_not_a_separator() {
        let attrs = MacroAttributes::parse(r#""Hello, world""#);
        assert_eq!(attrs.single_positional(), Some(Some("Hello, world")));
    }

    #[test]
    fn test_text_with_equals_is_positional() {
        let attrs = MacroAttributes::parse("1 + 1 = 2");
        assert_eq!(attrs.single_positional(), Some(Some("1 + 1 = 2")));
    }

    #[test]
    fn test_iter_preserves_order() {
        let attrs = MacroAttributes::parse("z=1, y, x=2");
        let keys: Vec<_> = attrs.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            keys,
            vec![
                AttributeKey::Named("z".to_owned()),
                AttributeKey::Positional(2),
                AttributeKey::Named("x".to_owned()),
            ]
        );
    }

    #[test]
    fn test_macro_args_parse() {
        let args = MacroArgs::parse("generate", "refs=news/*");
        assert_eq!(args.target, "generate");
        assert_eq!(args.attrs.named("refs"), Some(Some("news/*")));
    }
}
