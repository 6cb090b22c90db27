//! `ink render` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use super::{VaultArgs, Workspace};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown note to render.
    markdown: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail if any transclusion could not be rendered.
    #[arg(long)]
    strict: bool,

    #[command(flatten)]
    vault: VaultArgs,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let workspace = Workspace::load(&self.vault)?;

        let markdown = fs::read_to_string(&self.markdown)?;
        let mut renderer = workspace.default_host(&output).renderer();
        let result = renderer.render_markdown(&markdown);

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        if self.strict && !result.warnings.is_empty() {
            return Err(CliError::Validation(format!(
                "{} transclusion(s) failed in {}",
                result.warnings.len(),
                self.markdown.display()
            )));
        }

        match self.output {
            Some(path) => {
                fs::write(&path, &result.html)?;
                output.success(&format!("Rendered to {}", path.display()));
            }
            None => output.data(result.html.trim_end()),
        }
        Ok(())
    }
}
