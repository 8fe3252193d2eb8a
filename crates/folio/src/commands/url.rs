//! `folio url` command implementation.

use clap::Args;
use folio_catalog::compute_relative_url_path;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the url command.
#[derive(Args)]
pub(crate) struct UrlArgs {
    /// Root-relative URL of the linking page.
    from: String,

    /// Root-relative URL of the target.
    to: String,

    /// Fragment to append, including the leading `#`.
    #[arg(default_value = "")]
    hash: String,
}

impl UrlArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let url = compute_relative_url_path(&self.from, &self.to, &self.hash);
        Output::new().result(&url)?;
        Ok(())
    }
}
