//! `ink commands` command implementation.

use clap::Args;

use super::{VaultArgs, Workspace};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the commands command.
#[derive(Args)]
pub(crate) struct CommandsArgs {
    #[command(flatten)]
    vault: VaultArgs,
}

impl CommandsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let workspace = Workspace::load(&self.vault)?;
        let host = workspace.default_host(&output);

        if let Some(path) = &workspace.config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        output.highlight("Commands");
        for command in host.commands() {
            output.data(&format!("  {:<34} {}", command.id, command.name));
        }

        output.highlight("Views");
        for (view_type, extensions) in host.view_types() {
            output.data(&format!("  {view_type:<34} .{}", extensions.join(", .")));
        }

        output.highlight("Code blocks");
        for language in host.languages() {
            output.data(&format!("  {language}"));
        }

        output.highlight("Ribbon");
        for (icon, title) in host.ribbon_icons() {
            output.data(&format!("  {icon:<34} {title}"));
        }
        Ok(())
    }
}
