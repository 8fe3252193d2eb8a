//! Resource reference grammar.
//!
//! A reference has the shape `version@component:module:family$relative`
//! where every part except `relative` may be omitted:
//!
//! | Reference                         | Parts                            |
//! |-----------------------------------|----------------------------------|
//! | `news/a.adoc`                     | relative                         |
//! | `api:a.adoc`                      | module, relative                 |
//! | `core:api:a.adoc`                 | component, module, relative      |
//! | `2.0@core:api:attachment$a.zip`   | all parts                        |

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Family, FileSrc};

static RESOURCE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:([^@:$]+)@)?(?:(?:([^@:$]+):)?(?:([^@:$]+))?:)?(?:([^@:$]+)\$)?([^@:$]+)$",
    )
    .expect("invalid resource id regex")
});

/// Parsed resource reference. Omitted parts are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceRef {
    pub version: Option<String>,
    pub component: Option<String>,
    pub module: Option<String>,
    pub family: Option<String>,
    pub relative: String,
}

impl ResourceRef {
    /// Parse a reference. Returns `None` if the text does not follow the
    /// grammar (for example when the relative part is missing).
    ///
    /// # Example
    ///
    /// ```
    /// use folio_catalog::ResourceRef;
    ///
    /// let r = ResourceRef::parse("1.0@docs:ROOT:news/*.adoc").unwrap();
    /// assert_eq!(r.version.as_deref(), Some("1.0"));
    /// assert_eq!(r.component.as_deref(), Some("docs"));
    /// assert_eq!(r.module.as_deref(), Some("ROOT"));
    /// assert_eq!(r.relative, "news/*.adoc");
    /// ```
    #[must_use]
    pub fn parse(reference: &str) -> Option<Self> {
        let caps = RESOURCE_ID.captures(reference)?;
        let group = |idx: usize| caps.get(idx).map(|m| m.as_str().to_owned());
        Some(Self {
            version: group(1),
            component: group(2),
            module: group(3),
            family: group(4),
            relative: group(5)?,
        })
    }

    /// Fill omitted parts from the calling document's location.
    ///
    /// Returns `None` when the family part names an unknown family.
    #[must_use]
    pub fn resolve_against(&self, context: &FileSrc, default_family: Family) -> Option<FileSrc> {
        let family = match &self.family {
            Some(name) => Family::parse(name)?,
            None => default_family,
        };
        Some(FileSrc::new(
            self.component.as_deref().unwrap_or(&context.component),
            self.version.as_deref().unwrap_or(&context.version),
            self.module.as_deref().unwrap_or(&context.module),
            family,
            self.relative.as_str(),
        ))
    }
}
