//! Docs index: ordered listing of the pages under a path prefix.

use serde::{Deserialize, Serialize};

/// A page as seen by the docs index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPage {
    /// Source path (e.g. `docs/guide/install.md`).
    pub path: String,
    #[serde(default)]
    pub title: String,
    /// Explicit position within the index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    /// Navigational link, assigned by [`build_index`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Build the index of pages under `prefix`.
///
/// Keeps pages whose path starts with `prefix/`, sets each `href` to the
/// page path and orders them by explicit index. Pages without an index
/// come after every indexed page. Pages with equal keys keep their input
/// order.
///
/// # Example
///
/// ```
/// use folio_catalog::{IndexPage, build_index};
///
/// let page = |path: &str, index| IndexPage {
///     path: path.to_owned(),
///     title: String::new(),
///     index,
///     href: None,
/// };
/// let pages = vec![page("docs/b.md", None), page("docs/a.md", Some(1)), page("blog/c.md", Some(0))];
///
/// let index = build_index(&pages, "docs");
/// let paths: Vec<_> = index.iter().map(|p| p.path.as_str()).collect();
/// assert_eq!(paths, vec!["docs/a.md", "docs/b.md"]);
/// ```
pub fn build_index(pages: &[IndexPage], prefix: &str) -> Vec<IndexPage> {
    let dir = format!("{prefix}/");
    let mut selected: Vec<IndexPage> = pages
        .iter()
        .filter(|page| page.path.starts_with(&dir))
        .map(|page| IndexPage {
            href: Some(page.path.clone()),
            ..page.clone()
        })
        .collect();

    selected.sort_by_key(|page| (page.index.is_none(), page.index.unwrap_or_default()));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str, index: Option<i64>) -> IndexPage {
        IndexPage {
            path: path.to_owned(),
            title: path.to_owned(),
            index,
            href: None,
        }
    }

    fn paths(pages: &[IndexPage]) -> Vec<&str> {
        pages.iter().map(|p| p.path.as_str()).collect()
    }

    #[test]
    fn test_filters_by_prefix_directory() {
        let pages = vec![
            page("docs/a.md", None),
            page("docsx/b.md", None),
            page("docs", None),
            page("other/docs/c.md", None),
        ];
        assert_eq!(paths(&build_index(&pages, "docs")), vec!["docs/a.md"]);
    }

    #[test]
    fn test_href_is_source_path() {
        let index = build_index(&[page("docs/a.md", None)], "docs");
        assert_eq!(index[0].href.as_deref(), Some("docs/a.md"));
    }

    #[test]
    fn test_sorted_by_index() {
        let pages = vec![
            page("docs/c.md", Some(3)),
            page("docs/a.md", Some(1)),
            page("docs/b.md", Some(2)),
        ];
        assert_eq!(
            paths(&build_index(&pages, "docs")),
            vec!["docs/a.md", "docs/b.md", "docs/c.md"]
        );
    }

    #[test]
    fn test_unindexed_after_indexed() {
        let pages = vec![
            page("docs/none.md", None),
            page("docs/hundred.md", Some(100)),
            page("docs/one.md", Some(1)),
        ];
        assert_eq!(
            paths(&build_index(&pages, "docs")),
            vec!["docs/one.md", "docs/hundred.md", "docs/none.md"]
        );
    }

    #[test]
    fn test_unindexed_after_large_index() {
        let pages = vec![page("docs/none.md", None), page("docs/late.md", Some(500))];
        assert_eq!(
            paths(&build_index(&pages, "docs")),
            vec!["docs/late.md", "docs/none.md"]
        );
    }

    #[test]
    fn test_unindexed_keep_input_order() {
        let pages = vec![page("docs/z.md", None), page("docs/a.md", None)];
        assert_eq!(
            paths(&build_index(&pages, "docs")),
            vec!["docs/z.md", "docs/a.md"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(build_index(&[], "docs").is_empty());
    }
}
