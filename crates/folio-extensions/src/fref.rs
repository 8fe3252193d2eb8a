//! Family-aware cross reference macro.
//!
//! `fref:<reference>[<text>]` links to any catalog resource, not only pages:
//!
//! ```text
//! fref:attachment$report.json[Sample report]
//! fref:revapi-java::configuration.adoc#filters[]
//! ```
//!
//! The family defaults to `page`. A resource that cannot be resolved is
//! linked as `#<reference>` so the build keeps going.

use folio_catalog::{Family, compute_relative_url_path, split_fragment};
use folio_macros::{InlineMacro, MacroArgs, MacroContext, MacroOutput};

/// Inline macro `fref:<reference>[<text>]`.
#[derive(Debug, Default)]
pub struct FrefMacro;

impl InlineMacro for FrefMacro {
    fn name(&self) -> &'static str {
        "fref"
    }

    fn process(&mut self, args: MacroArgs, ctx: &MacroContext<'_>) -> MacroOutput {
        let target = args.target.as_str();
        let (link, hash) = split_fragment(target);
        let text = args.attrs.single_positional().flatten();

        let resolved = ctx
            .catalog
            .resolve_resource(link, &ctx.file.src, Family::Page)
            .and_then(|file| file.publication);
        let Some(publication) = resolved else {
            tracing::warn!(
                reference = target,
                document = %ctx.file.src,
                line = ctx.line,
                "Unresolved fref target"
            );
            return MacroOutput::text(format!(
                r##"<a href="#{target}">{}</a>"##,
                text.unwrap_or(target)
            ));
        };

        let url = match &ctx.file.publication {
            Some(from) => compute_relative_url_path(&from.url, &publication.url, hash),
            None => format!("{}{hash}", publication.url),
        };
        MacroOutput::text(format!(r#"<a href="{url}">{}</a>"#, text.unwrap_or(&url)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use folio_catalog::{ContentFile, FileSrc, MemoryCatalog};
    use folio_macros::{DocumentScope, MacroProcessor};
    use pretty_assertions::assert_eq;

    use super::*;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_file(
                ContentFile::new(
                    FileSrc::new("revapi", "main", "ROOT", Family::Page, "guide/filters.adoc"),
                    "",
                )
                .with_publication("/revapi/guide/filters.html", ".."),
            )
            .with_file(
                ContentFile::new(
                    FileSrc::new("revapi", "main", "ROOT", Family::Attachment, "report.json"),
                    "{}",
                )
                .with_publication("/revapi/_attachments/report.json", ".."),
            )
            .with_file(
                ContentFile::new(
                    FileSrc::new("revapi-java", "0.28", "ROOT", Family::Page, "index.adoc"),
                    "",
                )
                .with_publication("/revapi-java/0.28/", "."),
            )
            .with_file(ContentFile::new(
                FileSrc::new("revapi", "main", "ROOT", Family::Page, "draft.adoc"),
                "",
            ))
    }

    fn expand(input: &str) -> String {
        let catalog = catalog();
        let file = ContentFile::new(
            FileSrc::new("revapi", "main", "ROOT", Family::Page, "index.adoc"),
            "",
        )
        .with_publication("/revapi/index.html", ".");
        let attributes = BTreeMap::new();
        let scope = DocumentScope {
            catalog: &catalog,
            file: &file,
            attributes: &attributes,
        };
        MacroProcessor::new()
            .with_inline(FrefMacro)
            .process(input, &scope)
            .unwrap()
    }

    #[test]
    fn test_page_link_with_fragment() {
        assert_eq!(
            expand("See fref:guide/filters.adoc#regex[filters]."),
            r##"See <a href="guide/filters.html#regex">filters</a>."##
        );
    }

    #[test]
    fn test_attachment_link() {
        assert_eq!(
            expand("fref:attachment$report.json[Sample]"),
            r#"<a href="_attachments/report.json">Sample</a>"#
        );
    }

    #[test]
    fn test_directory_target_without_text_uses_url() {
        assert_eq!(
            expand("fref:0.28@revapi-java::index.adoc[]"),
            r#"<a href="../revapi-java/0.28/">../revapi-java/0.28/</a>"#
        );
    }

    #[test]
    fn test_unresolved_falls_back_to_raw_link() {
        assert_eq!(
            expand("fref:missing.adoc#top[Missing]"),
            r##"<a href="#missing.adoc#top">Missing</a>"##
        );
        assert_eq!(
            expand("fref:missing.adoc[]"),
            r##"<a href="#missing.adoc">missing.adoc</a>"##
        );
    }

    #[test]
    fn test_unpublished_target_falls_back() {
        assert_eq!(
            expand("fref:draft.adoc[Draft]"),
            r##"<a href="#draft.adoc">Draft</a>"##
        );
    }
}
