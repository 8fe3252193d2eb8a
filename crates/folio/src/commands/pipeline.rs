//! `folio pipeline` command implementations.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use folio_pipeline::{PipelineConfiguration, PipelineError};

use crate::error::CliError;
use crate::output::Output;

/// Pipeline configuration commands.
#[derive(Subcommand)]
pub(crate) enum PipelineCommand {
    /// Validate a pipeline configuration file.
    Validate(ValidateArgs),
}

impl PipelineCommand {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Validate(args) => args.execute(),
        }
    }
}

/// Arguments for the pipeline validate command.
#[derive(Args)]
pub(crate) struct ValidateArgs {
    /// Pipeline configuration JSON file.
    file: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let json = std::fs::read_to_string(&self.file)?;

        match PipelineConfiguration::from_json(&json) {
            Ok(config) => {
                output.success(&format!("{} is valid", self.file.display()));
                let blocks = config.distinct_transform_blocks();
                if !blocks.is_empty() {
                    output.info(&format!("Transform blocks: {}", blocks.len()));
                }
                Ok(())
            }
            Err(PipelineError::Schema(violations)) => {
                for violation in &violations {
                    output.error(&format!("  {violation}"));
                }
                Err(CliError::Validation(format!(
                    "{} has {} schema violation(s)",
                    self.file.display(),
                    violations.len()
                )))
            }
            Err(err) => Err(err.into()),
        }
    }
}
