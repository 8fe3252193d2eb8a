//! `folio expand` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use folio_catalog::{ContentCatalog, ContentFile, Family, FileSrc, MemoryCatalog};
use folio_config::{CliSettings, Config};
use folio_macros::{DocumentScope, MacroProcessor};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the expand command.
#[derive(Args)]
pub(crate) struct ExpandArgs {
    /// Resource id of the document (e.g. `1.0@docs:ROOT:page$news.adoc`).
    document: String,

    /// Catalog snapshot JSON (overrides config).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory for generated files such as feeds (overrides config).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Public site URL (overrides config).
    #[arg(long, env = "FOLIO_SITE_URL")]
    site_url: Option<String>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ExpandArgs {
    /// Execute the expand command.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded, the document is
    /// missing or a block macro fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            site_url: self.site_url.clone(),
            catalog: self.catalog.clone(),
            output_dir: self.out_dir.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let catalog_path = config.build_resolved.catalog.as_deref().ok_or_else(|| {
            CliError::Validation(
                "catalog snapshot required: pass --catalog or set build.catalog in folio.toml"
                    .to_owned(),
            )
        })?;
        let catalog = MemoryCatalog::from_json(&std::fs::read_to_string(catalog_path)?)?;
        let file = find_document(&catalog, &self.document)?;

        let attributes = config.document_attributes();
        let scope = DocumentScope {
            catalog: &catalog,
            file: &file,
            attributes: &attributes,
        };
        let mut processor = folio_extensions::register_all(MacroProcessor::new());
        let expanded = processor.process(&file.contents, &scope)?;
        output.result(&expanded)?;

        let added_files = catalog.added_files();
        tracing::debug!(document = %file.src, generated = added_files.len(), "Expanded document");
        for added in added_files {
            let path = artifact_path(&config.build_resolved.output_dir, &added.src);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &added.contents)?;
            output.success(&format!("Wrote {} ({})", path.display(), added.src));
        }

        Ok(())
    }
}

/// Find a catalog entry by its fully qualified resource id.
fn find_document(catalog: &MemoryCatalog, id: &str) -> Result<ContentFile, CliError> {
    catalog
        .files()
        .into_iter()
        .find(|f| f.src.to_string() == id)
        .ok_or_else(|| CliError::Validation(format!("document not found in catalog: {id}")))
}

/// Output location of a generated file.
///
/// Attachments land in the module's `_attachments` directory, the same
/// place `news:feed[]` links to.
fn artifact_path(output_dir: &Path, src: &FileSrc) -> PathBuf {
    let family_dir = match src.family {
        Family::Attachment => "_attachments".to_owned(),
        Family::Image => "_images".to_owned(),
        other => other.to_string(),
    };
    output_dir
        .join(&src.component)
        .join(&src.version)
        .join(&src.module)
        .join(family_dir)
        .join(&src.relative)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_artifact_path() {
        let src = FileSrc::new("revapi", "main", "ROOT", Family::Attachment, "news.atom");
        assert_eq!(
            artifact_path(Path::new("/out"), &src),
            PathBuf::from("/out/revapi/main/ROOT/_attachments/news.atom")
        );

        let src = FileSrc::new("revapi", "main", "ROOT", Family::Page, "a/b.adoc");
        assert_eq!(
            artifact_path(Path::new("/out"), &src),
            PathBuf::from("/out/revapi/main/ROOT/page/a/b.adoc")
        );
    }

    #[test]
    fn test_find_document() {
        let catalog = MemoryCatalog::from_json(
            r#"{"files": [{"src": {"component": "revapi", "version": "main", "module": "ROOT",
                "family": "page", "relative": "news.adoc"}, "contents": "= News"}]}"#,
        )
        .unwrap();
        let file = find_document(&catalog, "main@revapi:ROOT:page$news.adoc").unwrap();
        assert_eq!(file.contents, "= News");
        assert!(find_document(&catalog, "main@revapi:ROOT:page$other.adoc").is_err());
    }
}
