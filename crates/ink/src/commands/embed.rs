//! `ink embed` command implementation.

use clap::Args;
use ink_plugin::COMMAND_INSERT_TRANSCLUSION;
use ink_vault::{Entry, normalize_path};

use super::{VaultArgs, Workspace};
use crate::error::CliError;
use crate::host::CliHost;
use crate::output::Output;

/// Arguments for the embed command.
#[derive(Args)]
pub(crate) struct EmbedArgs {
    /// Vault path of the drawing to transclude.
    drawing: String,

    #[command(flatten)]
    vault: VaultArgs,
}

impl EmbedArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let workspace = Workspace::load(&self.vault)?;

        let path = normalize_path(&self.drawing);
        if !matches!(workspace.vault.entry(&path), Some(Entry::File(_))) {
            output.warning(&format!("Warning: {path} does not exist in the vault"));
        }

        let mut host = workspace.host(CliHost::new(output.clone()).with_editor().with_pick(path));
        host.run_command(COMMAND_INSERT_TRANSCLUSION)?;

        if let Some(block) = host.editor_text() {
            output.data(block);
        }
        Ok(())
    }
}
