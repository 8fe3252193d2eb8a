//! `folio index` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_catalog::{IndexPage, build_index};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the index command.
#[derive(Args)]
pub(crate) struct IndexArgs {
    /// JSON file with an array of pages (`path`, `title`, optional `index`).
    pages: PathBuf,

    /// Only pages below this path prefix are listed.
    #[arg(short, long)]
    prefix: String,
}

impl IndexArgs {
    /// Execute the index command.
    ///
    /// # Errors
    ///
    /// Returns an error if the page list cannot be read or parsed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let pages: Vec<IndexPage> = serde_json::from_str(&std::fs::read_to_string(&self.pages)?)?;
        let index = build_index(&pages, &self.prefix);
        if index.is_empty() {
            output.warning(&format!("No pages below {}/", self.prefix));
        }

        output.result(&serde_json::to_string_pretty(&index)?)?;
        Ok(())
    }
}
