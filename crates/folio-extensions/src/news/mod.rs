//! News listing and feed macros.
//!
//! - `news::generate[refs=<glob>]` expands into one section per matching
//!   news entry, newest first, and registers an RSS feed as the
//!   `news.atom` attachment of the calling module.
//! - `news:feed[<text>]` links to that feed.
//!
//! Site attributes consulted:
//!
//! | Attribute | Use |
//! |-----------|-----|
//! | `news-feed-title` | Channel title |
//! | `news-feed-description` | Channel description |
//! | `site-url` | Channel link and base of item URLs |
//! | `news-feed-max-items` | Entry limit for the listing and the feed (default 20) |

mod document;
mod error;
mod feed;
mod render;
mod summary;

use chrono::{DateTime, Utc};
use folio_catalog::{ContentFile, Family, FileSrc, match_files};
use folio_macros::{BlockMacro, BoxError, InlineMacro, MacroArgs, MacroContext, MacroOutput};

pub use document::{NewsDocument, parse_document};
pub use error::NewsError;
pub use feed::{FEED_MEDIA_TYPE, FEED_RELATIVE, Feed, FeedItem, absolute_url};
pub use render::render_sections;
pub use summary::{PUBLISH_DATE_ATTRIBUTE, Summary, parse_publish_date, summarize};

/// Entry limit when `news-feed-max-items` is not set.
pub const DEFAULT_MAX_ITEMS: usize = 20;

const MACRO_NAME: &str = "news";

/// Block macro `news::generate[refs=<glob>]`.
#[derive(Debug, Default)]
pub struct NewsBlockMacro {
    build_date: Option<DateTime<Utc>>,
}

impl NewsBlockMacro {
    /// Create the macro. The feed build date is the time of generation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed feed build date.
    #[must_use]
    pub fn with_build_date(mut self, date: DateTime<Utc>) -> Self {
        self.build_date = Some(date);
        self
    }

    /// Summarize the entries matching `refs`, register the feed and return
    /// the listing markup.
    fn generate(&self, refs: &str, ctx: &MacroContext<'_>) -> Result<String, NewsError> {
        let context = &ctx.file.src;
        let files = match_files(ctx.catalog, refs, context);
        tracing::debug!(refs, document = %context, matched = files.len(), "Generating news");

        let summaries = summarize(&files, context)?;
        let max_items = max_items(ctx);
        let listed = &summaries[..summaries.len().min(max_items)];

        let feed = self.build_feed(&summaries, max_items, ctx);
        let feed_file = ContentFile::new(
            FileSrc::new(
                &context.component,
                &context.version,
                &context.module,
                Family::Attachment,
                FEED_RELATIVE,
            )
            .with_media_type(FEED_MEDIA_TYPE),
            feed.to_xml()?,
        );
        ctx.catalog.add_file(feed_file)?;

        Ok(render_sections(listed, ctx.section_level))
    }

    fn build_feed(&self, summaries: &[Summary], max_items: usize, ctx: &MacroContext<'_>) -> Feed {
        let site_url = ctx.attribute("site-url").unwrap_or_default();
        let items = summaries
            .iter()
            .take(max_items)
            .filter_map(|summary| {
                let Some(publication) = ctx
                    .catalog
                    .resolve_page(&summary.xref, &ctx.file.src)
                    .and_then(|page| page.publication)
                else {
                    tracing::warn!(xref = %summary.xref, "News entry is not published, leaving it out of the feed");
                    return None;
                };
                Some(FeedItem {
                    title: summary.title.clone(),
                    description: summary.summary.clone(),
                    url: absolute_url(site_url, &publication.url),
                    date: summary.date,
                })
            })
            .collect();

        Feed {
            title: ctx.attribute("news-feed-title").unwrap_or_default().to_owned(),
            description: ctx
                .attribute("news-feed-description")
                .unwrap_or_default()
                .to_owned(),
            site_url: site_url.to_owned(),
            build_date: self.build_date.unwrap_or_else(Utc::now),
            items,
        }
    }
}

impl BlockMacro for NewsBlockMacro {
    fn name(&self) -> &'static str {
        MACRO_NAME
    }

    fn process(&mut self, args: MacroArgs, ctx: &MacroContext<'_>) -> Result<MacroOutput, BoxError> {
        if args.target != "generate" {
            return Ok(MacroOutput::empty());
        }
        let Some(refs) = args.attrs.named("refs").flatten().filter(|r| !r.is_empty()) else {
            return Ok(MacroOutput::empty());
        };
        Ok(MacroOutput::markup(self.generate(refs, ctx)?))
    }
}

/// Inline macro `news:feed[<text>]`.
///
/// Links to the feed attachment of the calling module. Other targets are
/// left untouched.
#[derive(Debug, Default)]
pub struct NewsInlineMacro;

impl InlineMacro for NewsInlineMacro {
    fn name(&self) -> &'static str {
        MACRO_NAME
    }

    fn process(&mut self, args: MacroArgs, ctx: &MacroContext<'_>) -> MacroOutput {
        if args.target != "feed" {
            return MacroOutput::Skip;
        }
        let text = args.attrs.single_positional().flatten().unwrap_or_default();
        MacroOutput::text(format!(
            r#"<a href="{}/_attachments/{FEED_RELATIVE}">{text}</a>"#,
            ctx.module_root_path()
        ))
    }
}

/// Entry limit from `news-feed-max-items`.
fn max_items(ctx: &MacroContext<'_>) -> usize {
    let Some(value) = ctx.attribute("news-feed-max-items") else {
        return DEFAULT_MAX_ITEMS;
    };
    value.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(value, "Invalid news-feed-max-items, using {DEFAULT_MAX_ITEMS}");
        DEFAULT_MAX_ITEMS
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::TimeZone;
    use folio_catalog::{ContentCatalog, MemoryCatalog};
    use folio_macros::{DocumentScope, MacroError, MacroProcessor};
    use pretty_assertions::assert_eq;

    use super::*;

    fn src(relative: &str) -> FileSrc {
        FileSrc::new("revapi", "main", "ROOT", Family::Page, relative)
    }

    fn news_entry(slug: &str, date: &str) -> ContentFile {
        ContentFile::new(
            src(&format!("news/{slug}.adoc")),
            format!("= {slug}\n:page-publish_date: {date}\n\nAbout {slug}.\n"),
        )
        .with_publication(format!("/revapi/news/{slug}.html"), "..")
    }

    fn news_page() -> ContentFile {
        ContentFile::new(src("news.adoc"), "").with_publication("/revapi/news.html", ".")
    }

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_file(news_page())
            .with_file(news_entry("a", "2023-01-01"))
            .with_file(news_entry("b", "2024-06-01"))
            .with_file(news_entry("c", "2022-03-03"))
    }

    fn attributes(max_items: Option<&str>) -> BTreeMap<String, String> {
        let mut attributes = BTreeMap::from([
            ("site-url".to_owned(), "https://revapi.org".to_owned()),
            ("news-feed-title".to_owned(), "Revapi News".to_owned()),
            ("news-feed-description".to_owned(), "What's new".to_owned()),
        ]);
        if let Some(max) = max_items {
            attributes.insert("news-feed-max-items".to_owned(), max.to_owned());
        }
        attributes
    }

    fn processor() -> MacroProcessor {
        let build_date = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
        MacroProcessor::new()
            .with_block(NewsBlockMacro::new().with_build_date(build_date))
            .with_inline(NewsInlineMacro)
    }

    fn run(
        catalog: &MemoryCatalog,
        input: &str,
        attributes: &BTreeMap<String, String>,
    ) -> Result<String, MacroError> {
        let file = news_page();
        let scope = DocumentScope {
            catalog,
            file: &file,
            attributes,
        };
        processor().process(input, &scope)
    }

    #[test]
    fn test_generate_newest_first_with_limit() {
        let catalog = catalog();
        let output = run(&catalog, "= News\n\nnews::generate[refs=news/*.adoc]\n", &attributes(Some("2"))).unwrap();

        let expected = "\
= News

== xref:news/b.adoc[b]

[.news-date]
Sat, 01 Jun 2024

[.news-summary]
About b.

== xref:news/a.adoc[a]

[.news-date]
Sun, 01 Jan 2023

[.news-summary]
About a.
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_generate_registers_feed() {
        let catalog = catalog();
        run(&catalog, "news::generate[refs=news/*]", &attributes(Some("2"))).unwrap();

        let added = catalog.added_files();
        assert_eq!(added.len(), 1);
        let feed = &added[0];
        assert_eq!(
            feed.src,
            FileSrc::new("revapi", "main", "ROOT", Family::Attachment, "news.atom")
                .with_media_type("application/rss+xml")
        );
        assert!(feed.contents.contains("<title>Revapi News</title>"));
        assert!(feed.contents.contains("<link>https://revapi.org/revapi/news/b.html</link>"));
        assert!(feed.contents.contains("<link>https://revapi.org/revapi/news/a.html</link>"));
        assert!(!feed.contents.contains("news/c.html"));
        let b = feed.contents.find("news/b.html").unwrap();
        let a = feed.contents.find("news/a.html").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_default_limit_lists_everything() {
        let catalog = catalog();
        let output = run(&catalog, "news::generate[refs=news/*]", &attributes(None)).unwrap();
        assert_eq!(output.matches("[.news-summary]").count(), 3);
    }

    #[test]
    fn test_invalid_limit_falls_back_to_default() {
        let catalog = catalog();
        let output = run(&catalog, "news::generate[refs=news/*]", &attributes(Some("many"))).unwrap();
        assert_eq!(output.matches("[.news-summary]").count(), 3);
    }

    #[test]
    fn test_other_targets_are_noops() {
        let catalog = catalog();
        let attributes = attributes(None);
        assert_eq!(run(&catalog, "news::list[refs=news/*]", &attributes).unwrap(), "");
        assert_eq!(run(&catalog, "news::generate[]", &attributes).unwrap(), "");
        assert!(catalog.added_files().is_empty());
    }

    #[test]
    fn test_missing_publish_date_fails_pass() {
        let catalog = catalog().with_file(
            ContentFile::new(src("news/undated.adoc"), "= Undated\n\nText.")
                .with_publication("/revapi/news/undated.html", ".."),
        );
        let err = run(&catalog, "news::generate[refs=news/*]", &attributes(None)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("main@revapi:ROOT:page$news/undated.adoc"), "{message}");
        assert!(catalog.added_files().is_empty());
    }

    #[test]
    fn test_second_feed_in_module_is_rejected() {
        let catalog = catalog();
        let attributes = attributes(None);
        run(&catalog, "news::generate[refs=news/*]", &attributes).unwrap();
        assert!(run(&catalog, "news::generate[refs=news/*]", &attributes).is_err());
    }

    #[test]
    fn test_unpublished_entry_left_out_of_feed() {
        let catalog = MemoryCatalog::new().with_file(news_page()).with_file(ContentFile::new(
            src("news/draft.adoc"),
            "= Draft\n:page-publish_date: 2024-01-01\n\nSoon.",
        ));
        let output = run(&catalog, "news::generate[refs=news/*]", &attributes(None)).unwrap();
        assert!(output.contains("xref:news/draft.adoc[Draft]"));
        assert!(!catalog.added_files()[0].contents.contains("<item>"));
    }

    #[test]
    fn test_feed_link() {
        let catalog = MemoryCatalog::new();
        let file = ContentFile::new(src("index.adoc"), "").with_publication("/revapi/index.html", "..");
        let attributes = BTreeMap::new();
        let scope = DocumentScope {
            catalog: &catalog,
            file: &file,
            attributes: &attributes,
        };
        let mut processor = MacroProcessor::new().with_inline(NewsInlineMacro);

        let output = processor
            .process("Subscribe to news:feed[our feed] or news:other[x].", &scope)
            .unwrap();
        assert_eq!(
            output,
            r#"Subscribe to <a href="../_attachments/news.atom">our feed</a> or news:other[x]."#
        );
        assert_eq!(
            processor.process("news:feed[]", &scope).unwrap(),
            r#"<a href="../_attachments/news.atom"></a>"#
        );
    }

    #[test]
    fn test_feed_registered_in_catalog_files() {
        let catalog = catalog();
        run(&catalog, "news::generate[refs=news/*]", &attributes(None)).unwrap();
        let context = src("news.adoc");
        assert!(
            catalog
                .resolve_resource("attachment$news.atom", &context, Family::Page)
                .is_some()
        );
    }
}
