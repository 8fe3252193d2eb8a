//! Component metadata macro.
//!
//! `component:<name>[@<version>][<field>]` expands to one field of a
//! component version from the catalog:
//!
//! ```text
//! component:revapi-java[version]            latest version string
//! component:revapi-java@latest[title]       latest, skipping a leading "main"
//! component:revapi-java@0.28[displayVersion]
//! ```
//!
//! Anything that does not resolve expands to nothing.

use folio_catalog::{Component, ComponentVersion};
use folio_macros::{InlineMacro, MacroArgs, MacroContext, MacroOutput};

/// Version name of the development line skipped by `@latest`.
const DEVELOPMENT_VERSION: &str = "main";

/// Inline macro `component:<name>[@<version>][<field>]`.
#[derive(Debug, Default)]
pub struct ComponentMacro;

/// Field of a component version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Version,
    DisplayVersion,
    Title,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "version" => Some(Self::Version),
            "displayVersion" => Some(Self::DisplayVersion),
            "title" => Some(Self::Title),
            _ => None,
        }
    }

    fn extract(self, version: &ComponentVersion) -> &str {
        match self {
            Self::Version => &version.version,
            Self::DisplayVersion => &version.display_version,
            Self::Title => &version.title,
        }
    }
}

/// Pick the version a target refers to.
fn select_version<'a>(component: &'a Component, version: Option<&str>) -> Option<&'a ComponentVersion> {
    match version {
        None => component.latest_version(),
        Some("latest") => match component.versions.as_slice() {
            [first, second, ..] if first.version == DEVELOPMENT_VERSION => Some(second),
            versions => versions.first(),
        },
        Some(version) => component.version(version),
    }
}

impl InlineMacro for ComponentMacro {
    fn name(&self) -> &'static str {
        "component"
    }

    fn process(&mut self, args: MacroArgs, ctx: &MacroContext<'_>) -> MacroOutput {
        let Some(Some(field_name)) = args.attrs.single_positional() else {
            return MacroOutput::empty();
        };
        let Some(field) = Field::parse(field_name) else {
            tracing::debug!(field = field_name, "Unknown component field");
            return MacroOutput::empty();
        };

        let (name, version) = match args.target.split_once('@') {
            Some((name, version)) => (name, Some(version)),
            None => (args.target.as_str(), None),
        };

        let Some(component) = ctx.catalog.component(name) else {
            tracing::debug!(component = name, "Component not found");
            return MacroOutput::empty();
        };
        let Some(selected) = select_version(&component, version) else {
            tracing::debug!(component = name, version, "Component version not found");
            return MacroOutput::empty();
        };

        MacroOutput::text(field.extract(selected))
    }
}
