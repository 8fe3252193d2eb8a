//! News listing markup.

use std::fmt::Write;

use super::summary::Summary;

/// Render summaries as AsciiDoc sections one level below `section_level`.
///
/// Each section heading links to the entry and is followed by a
/// `.news-date` paragraph and a `.news-summary` paragraph.
#[must_use]
pub fn render_sections(summaries: &[Summary], section_level: usize) -> String {
    let marker = "=".repeat(section_level + 2);
    let mut out = String::new();

    for summary in summaries {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{marker} xref:{}[{}]\n\n[.news-date]\n{}\n\n[.news-summary]\n{}\n",
            summary.xref,
            escape_link_text(&summary.title),
            summary.date.format("%a, %d %b %Y"),
            summary.summary,
        );
    }
    out
}

fn escape_link_text(text: &str) -> String {
    text.replace(']', "\\]")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn summary(xref: &str, title: &str, day: u32) -> Summary {
        Summary {
            date: Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap(),
            title: title.to_owned(),
            summary: format!("About {title}."),
            xref: xref.to_owned(),
        }
    }

    #[test]
    fn test_render_sections() {
        let summaries = [
            summary("news/b.adoc", "Second", 2),
            summary("news/a.adoc", "First [beta]", 1),
        ];
        let expected = "\
=== xref:news/b.adoc[Second]

[.news-date]
Sun, 02 Jun 2024

[.news-summary]
About Second.

=== xref:news/a.adoc[First [beta\\]]

[.news-date]
Sat, 01 Jun 2024

[.news-summary]
About First [beta].
";
        assert_eq!(render_sections(&summaries, 1), expected);
    }

    #[test]
    fn test_render_top_level() {
        let out = render_sections(&[summary("a.adoc", "A", 1)], 0);
        assert!(out.starts_with("== xref:a.adoc[A]\n"));
    }

    #[test]
    fn test_render_nothing() {
        assert_eq!(render_sections(&[], 1), "");
    }
}
