//! News entry summaries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use folio_catalog::{ContentFile, FileSrc};

use super::document::parse_document;
use super::error::NewsError;

/// Attribute holding the publication date of a news entry.
pub const PUBLISH_DATE_ATTRIBUTE: &str = "page-publish_date";

/// What a news listing shows for one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub date: DateTime<Utc>,
    /// Document title. Empty when the entry has none.
    pub title: String,
    /// Text of the first content block.
    pub summary: String,
    /// Page reference to the entry, relative to the calling document.
    pub xref: String,
}

impl Summary {
    /// Summarize a news entry.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::MissingPublishDate`] or
    /// [`NewsError::InvalidPublishDate`] naming the entry's source path.
    pub fn from_file(file: &ContentFile, context: &FileSrc) -> Result<Self, NewsError> {
        let doc = parse_document(&file.contents);

        let raw = doc
            .attribute(PUBLISH_DATE_ATTRIBUTE)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| NewsError::MissingPublishDate {
                path: file.src.source_path(),
            })?;
        let date = parse_publish_date(raw).ok_or_else(|| NewsError::InvalidPublishDate {
            path: file.src.source_path(),
            value: raw.to_owned(),
        })?;

        Ok(Self {
            date,
            title: doc.title.clone().unwrap_or_default(),
            summary: doc.summary(),
            xref: file.src.xref_from(context),
        })
    }
}

/// Parse a publish date.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD` and `YYYY-MM-DD HH:MM[:SS]`.
/// Dates without an offset are taken as UTC.
#[must_use]
pub fn parse_publish_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.and_utc())
}

/// Summarize `files`, newest first.
///
/// # Errors
///
/// Fails on the first entry without a usable publish date.
pub fn summarize(files: &[ContentFile], context: &FileSrc) -> Result<Vec<Summary>, NewsError> {
    let mut summaries = files
        .iter()
        .map(|file| Summary::from_file(file, context))
        .collect::<Result<Vec<_>, _>>()?;
    summaries.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(summaries)
}
