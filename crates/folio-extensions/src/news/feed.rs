//! RSS 2.0 feed serialization.

use std::io;

use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::error::NewsError;

/// Relative path of the registered feed within the attachment family.
pub const FEED_RELATIVE: &str = "news.atom";

/// Media type of the registered feed.
pub const FEED_MEDIA_TYPE: &str = "application/rss+xml";

const GENERATOR: &str = concat!("folio ", env!("CARGO_PKG_VERSION"));

/// Feed channel metadata and items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feed {
    pub title: String,
    pub description: String,
    /// Site URL used as the channel link.
    pub site_url: String,
    /// Channel build date.
    pub build_date: DateTime<Utc>,
    pub items: Vec<FeedItem>,
}

/// One feed entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    /// Absolute URL of the published entry.
    pub url: String,
    pub date: DateTime<Utc>,
}

impl Feed {
    /// Serialize to an indented RSS 2.0 document.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML writer fails.
    pub fn to_xml(&self) -> Result<String, NewsError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("rss").with_attributes([("version", "2.0")]),
        ))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        write_text_element(&mut writer, "title", &self.title)?;
        write_text_element(&mut writer, "description", &self.description)?;
        write_text_element(&mut writer, "link", &self.site_url)?;
        write_text_element(&mut writer, "generator", GENERATOR)?;
        write_text_element(&mut writer, "lastBuildDate", &rss_date(self.build_date))?;
        write_text_element(&mut writer, "pubDate", &rss_date(self.build_date))?;

        for item in &self.items {
            write_item(&mut writer, item)?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn write_item(writer: &mut Writer<Vec<u8>>, item: &FeedItem) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;
    write_text_element(writer, "title", &item.title)?;
    write_text_element(writer, "description", &item.description)?;
    write_text_element(writer, "link", &item.url)?;

    writer.write_event(Event::Start(
        BytesStart::new("guid").with_attributes([("isPermaLink", "true")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new(&item.url)))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    write_text_element(writer, "pubDate", &rss_date(item.date))?;
    writer.write_event(Event::End(BytesEnd::new("item")))
}

/// Write `<name>text</name>` with `text` escaped.
fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}

/// Date in the RFC 822 form used by RSS readers.
fn rss_date(date: DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Join the site URL and a root-relative publish URL.
#[must_use]
pub fn absolute_url(site_url: &str, publish_url: &str) -> String {
    format!(
        "{}/{}",
        site_url.trim_end_matches('/'),
        publish_url.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn feed() -> Feed {
        Feed {
            title: "Revapi News".to_owned(),
            description: "Releases & announcements".to_owned(),
            site_url: "https://revapi.org".to_owned(),
            build_date: Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap(),
            items: vec![FeedItem {
                title: "Release <1.0>".to_owned(),
                description: "First stable release.".to_owned(),
                url: "https://revapi.org/revapi/news/release.html".to_owned(),
                date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            }],
        }
    }

    #[test]
    fn test_channel_metadata() {
        let xml = feed().to_xml().unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<rss version="2.0">"#));
        assert!(xml.contains("<title>Revapi News</title>"));
        assert!(xml.contains("<description>Releases &amp; announcements</description>"));
        assert!(xml.contains("<link>https://revapi.org</link>"));
        assert!(xml.contains("<lastBuildDate>Sun, 02 Jun 2024 12:00:00 GMT</lastBuildDate>"));
    }

    #[test]
    fn test_items_are_escaped_and_indented() {
        let xml = feed().to_xml().unwrap();
        assert!(xml.contains("        <item>\n"));
        assert!(xml.contains("<title>Release &lt;1.0&gt;</title>"));
        assert!(xml.contains(
            r#"<guid isPermaLink="true">https://revapi.org/revapi/news/release.html</guid>"#
        ));
        assert!(xml.contains("<pubDate>Sat, 01 Jun 2024 00:00:00 GMT</pubDate>"));
    }

    #[test]
    fn test_empty_feed() {
        let xml = Feed::default().to_xml().unwrap();
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://revapi.org/", "/revapi/news.html"),
            "https://revapi.org/revapi/news.html"
        );
        assert_eq!(
            absolute_url("https://revapi.org", "revapi/news.html"),
            "https://revapi.org/revapi/news.html"
        );
    }
}
