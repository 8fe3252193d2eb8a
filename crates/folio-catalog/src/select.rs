//! Selecting catalog entries from references.

use crate::catalog::ContentCatalog;
use crate::model::{ContentFile, FileSrc};
use crate::resource_ref::ResourceRef;

/// Select every catalog entry matching a glob-style reference.
///
/// The relative part of `glob` is split on `*` into literal fragments. An
/// entry matches when its location equals the reference (with omitted parts
/// inherited from `context`, including the family) and its relative path
/// contains every fragment, each one first occurring after the previous.
/// Entries are returned in catalog order.
///
/// A reference that does not parse selects nothing.
pub fn match_files(catalog: &dyn ContentCatalog, glob: &str, context: &FileSrc) -> Vec<ContentFile> {
    let Some(reference) = ResourceRef::parse(glob) else {
        tracing::warn!(glob, "Reference has no relative path, nothing to match");
        return Vec::new();
    };
    let Some(location) = reference.resolve_against(context, context.family) else {
        tracing::warn!(glob, "Reference names an unknown family");
        return Vec::new();
    };
    let fragments: Vec<&str> = location
        .relative
        .split('*')
        .filter(|s| !s.is_empty())
        .collect();

    let matches: Vec<ContentFile> = catalog
        .files()
        .into_iter()
        .filter(|file| {
            let src = &file.src;
            src.same_module(&location)
                && src.family == location.family
                && contains_in_order(&src.relative, &fragments)
        })
        .collect();

    tracing::debug!(glob, count = matches.len(), "Matched catalog entries");
    matches
}

/// Check that each fragment's first occurrence starts after the previous one.
fn contains_in_order(haystack: &str, fragments: &[&str]) -> bool {
    let mut last: Option<usize> = None;
    fragments.iter().all(|fragment| match haystack.find(fragment) {
        Some(idx) if last.is_none_or(|prev| idx > prev) => {
            last = Some(idx);
            true
        }
        _ => false,
    })
}

/// Split an optional `#fragment` suffix from a link target.
///
/// The returned hash keeps its leading `#` and is empty when absent.
///
/// # Example
///
/// ```
/// use folio_catalog::split_fragment;
///
/// assert_eq!(split_fragment("guide.adoc#install"), ("guide.adoc", "#install"));
/// assert_eq!(split_fragment("guide.adoc"), ("guide.adoc", ""));
/// ```
#[must_use]
pub fn split_fragment(target: &str) -> (&str, &str) {
    match target.find('#') {
        Some(idx) => target.split_at(idx),
        None => (target, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Family, MemoryCatalog};

    fn page(module: &str, relative: &str) -> ContentFile {
        ContentFile::new(FileSrc::new("docs", "1.0", module, Family::Page, relative), "")
    }

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_file(page("ROOT", "news/2024-06-01-b.adoc"))
            .with_file(page("ROOT", "index.adoc"))
            .with_file(page("ROOT", "news/2023-01-01-a.adoc"))
            .with_file(page("api", "news/2022-01-01-c.adoc"))
            .with_file(ContentFile::new(
                FileSrc::new("docs", "1.0", "ROOT", Family::Attachment, "news/x.adoc"),
                "",
            ))
    }

    fn context() -> FileSrc {
        FileSrc::new("docs", "1.0", "ROOT", Family::Page, "news.adoc")
    }

    fn relatives(files: &[ContentFile]) -> Vec<&str> {
        files.iter().map(|f| f.src.relative.as_str()).collect()
    }

    #[test]
    fn test_glob_keeps_catalog_order() {
        let files = match_files(&catalog(), "news/*.adoc", &context());
        assert_eq!(
            relatives(&files),
            vec!["news/2024-06-01-b.adoc", "news/2023-01-01-a.adoc"]
        );
    }

    #[test]
    fn test_glob_with_explicit_module() {
        let files = match_files(&catalog(), "api:news/*", &context());
        assert_eq!(relatives(&files), vec!["news/2022-01-01-c.adoc"]);
    }

    #[test]
    fn test_glob_with_explicit_family() {
        let files = match_files(&catalog(), "attachment$news/*", &context());
        assert_eq!(relatives(&files), vec!["news/x.adoc"]);
    }

    #[test]
    fn test_star_alone_matches_everything_in_location() {
        let files = match_files(&catalog(), "*", &context());
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_unparsable_glob_matches_nothing() {
        assert!(match_files(&catalog(), "1.0@", &context()).is_empty());
    }

    #[test]
    fn test_fragments_must_be_ordered() {
        assert!(contains_in_order("news/2024-a.adoc", &["news", "2024", ".adoc"]));
        assert!(!contains_in_order("news/2024-a.adoc", &[".adoc", "news"]));
        assert!(!contains_in_order("news/2024-a.adoc", &["news", "missing"]));
        assert!(contains_in_order("anything", &[]));
    }

    #[test]
    fn test_fragment_uses_first_occurrence() {
        // "a" first occurs at 0, which is not after "b" at 1.
        assert!(!contains_in_order("aba", &["b", "a"]));
    }

    #[test]
    fn test_split_fragment() {
        assert_eq!(split_fragment("a.adoc#sec"), ("a.adoc", "#sec"));
        assert_eq!(split_fragment("#top"), ("", "#top"));
        assert_eq!(split_fragment("a.adoc"), ("a.adoc", ""));
    }
}
