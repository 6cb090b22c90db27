//! `ink show` command implementation.

use clap::Args;
use ink_transclude::{Container, RenderOutcome};

use super::{VaultArgs, Workspace};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Transclusion block body, e.g. "[[excalidraw/a.excalidraw|300x200]]".
    source: String,

    #[command(flatten)]
    vault: VaultArgs,
}

impl ShowArgs {
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let workspace = Workspace::load(&self.vault)?;

        let container = Container::new();
        let outcome = workspace
            .plugin
            .transcluder()
            .render(&self.source, &container)
            .await;

        match outcome {
            RenderOutcome::Rendered => {}
            RenderOutcome::Failed(err) => output.warning(&format!("Warning: {err}")),
            RenderOutcome::Discarded => output.warning("Warning: render was discarded"),
        }

        for element in container.children() {
            output.data(&element.to_html());
        }
        Ok(())
    }
}
