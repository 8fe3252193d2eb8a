//! Content model shared with the host catalog.
//!
//! These records are owned by the host. Extensions read and filter them
//! and never mutate an existing entry.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Resource family within a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Page,
    Partial,
    Example,
    Image,
    Attachment,
    Nav,
}

impl Family {
    /// Parse a family name as written in a resource reference.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "page" => Some(Self::Page),
            "partial" => Some(Self::Partial),
            "example" => Some(Self::Example),
            "image" => Some(Self::Image),
            "attachment" => Some(Self::Attachment),
            "nav" => Some(Self::Nav),
            _ => None,
        }
    }

    /// Name used in resource references.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Partial => "partial",
            Self::Example => "example",
            Self::Image => "image",
            Self::Attachment => "attachment",
            Self::Nav => "nav",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of a content entry inside the catalog.
///
/// The tuple (component, version, module, family, relative) is unique
/// within a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSrc {
    pub component: String,
    pub version: String,
    pub module: String,
    pub family: Family,
    /// Path relative to the family directory (e.g. `news/2024-01-01.adoc`).
    pub relative: String,
    /// Explicit media type. Guessed from the extension when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Absolute path of the source file on disk, when the host knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abspath: Option<PathBuf>,
}

impl FileSrc {
    /// Create a source location.
    #[must_use]
    pub fn new(
        component: impl Into<String>,
        version: impl Into<String>,
        module: impl Into<String>,
        family: Family,
        relative: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            version: version.into(),
            module: module.into(),
            family,
            relative: relative.into(),
            media_type: None,
            abspath: None,
        }
    }

    /// Set an explicit media type.
    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Set the absolute source path.
    #[must_use]
    pub fn with_abspath(mut self, abspath: impl Into<PathBuf>) -> Self {
        self.abspath = Some(abspath.into());
        self
    }

    /// Last path segment of `relative`.
    #[must_use]
    pub fn basename(&self) -> &str {
        self.relative
            .rsplit_once('/')
            .map_or(self.relative.as_str(), |(_, name)| name)
    }

    /// Basename without its extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        let basename = self.basename();
        match basename.rfind('.') {
            Some(0) | None => basename,
            Some(idx) => &basename[..idx],
        }
    }

    /// Media type, explicit or guessed from the extension.
    #[must_use]
    pub fn media_type(&self) -> &str {
        if let Some(media_type) = &self.media_type {
            return media_type;
        }
        match self.basename().rsplit_once('.').map(|(_, ext)| ext) {
            Some("adoc" | "asciidoc") => "text/asciidoc",
            Some("html") => "text/html",
            Some("xml") => "application/xml",
            Some("json") => "application/json",
            Some("png") => "image/png",
            Some("svg") => "image/svg+xml",
            Some("pdf") => "application/pdf",
            _ => "application/octet-stream",
        }
    }

    /// Source path for diagnostics: the absolute path if known, otherwise
    /// the fully qualified resource id.
    #[must_use]
    pub fn source_path(&self) -> String {
        self.abspath
            .as_ref()
            .map_or_else(|| self.to_string(), |p| p.display().to_string())
    }

    /// Whether both locations share component, version and module.
    #[must_use]
    pub fn same_module(&self, other: &Self) -> bool {
        self.component == other.component
            && self.version == other.version
            && self.module == other.module
    }

    /// Shortest page reference that resolves to `self` from `context`.
    ///
    /// Parts equal to the calling document's location are omitted. When the
    /// component differs the module is always spelled out, because the
    /// reference grammar cannot name a component without a module slot.
    #[must_use]
    pub fn xref_from(&self, context: &FileSrc) -> String {
        let mut xref = String::new();
        let other_component = self.component != context.component;

        if other_component || self.version != context.version {
            xref.push_str(&self.version);
            xref.push('@');
        }
        if other_component {
            xref.push_str(&self.component);
            xref.push(':');
            xref.push_str(&self.module);
            xref.push(':');
        } else if self.module != context.module {
            xref.push_str(&self.module);
            xref.push(':');
        }
        if self.family != Family::Page {
            xref.push_str(self.family.as_str());
            xref.push('$');
        }
        xref.push_str(&self.relative);
        xref
    }
}

impl fmt::Display for FileSrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}:{}${}",
            self.version, self.component, self.module, self.family, self.relative
        )
    }
}

/// Publish metadata assigned by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    /// Root-relative URL of the published file (e.g. `/docs/1.0/news.html`).
    pub url: String,
    /// Relative path from the published file to its module root (e.g. `..`).
    pub module_root_path: String,
}

/// A catalog entry: location, raw contents and publish metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFile {
    pub src: FileSrc,
    #[serde(default)]
    pub contents: String,
    #[serde(default, rename = "pub", skip_serializing_if = "Option::is_none")]
    pub publication: Option<Publication>,
}

impl ContentFile {
    /// Create an unpublished entry.
    #[must_use]
    pub fn new(src: FileSrc, contents: impl Into<String>) -> Self {
        Self {
            src,
            contents: contents.into(),
            publication: None,
        }
    }

    /// Attach publish metadata.
    #[must_use]
    pub fn with_publication(
        mut self,
        url: impl Into<String>,
        module_root_path: impl Into<String>,
    ) -> Self {
        self.publication = Some(Publication {
            url: url.into(),
            module_root_path: module_root_path.into(),
        });
        self
    }
}

/// One release of a component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentVersion {
    pub version: String,
    pub display_version: String,
    pub title: String,
}

impl ComponentVersion {
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        display_version: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            display_version: display_version.into(),
            title: title.into(),
        }
    }
}

/// A documentation product and its releases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub title: String,
    /// Releases in catalog order (newest first by host convention).
    pub versions: Vec<ComponentVersion>,
    /// Version string of the designated latest release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
}

impl Component {
    /// The designated latest release, falling back to the first listed one.
    #[must_use]
    pub fn latest_version(&self) -> Option<&ComponentVersion> {
        self.latest
            .as_deref()
            .and_then(|latest| self.version(latest))
            .or_else(|| self.versions.first())
    }

    /// Find a release by its exact version string.
    #[must_use]
    pub fn version(&self, version: &str) -> Option<&ComponentVersion> {
        self.versions.iter().find(|v| v.version == version)
    }
}
