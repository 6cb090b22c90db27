//! `ink new` command implementation.

use clap::Args;
use ink_plugin::{COMMAND_AUTOCREATE, FILE_EXTENSION};

use super::{VaultArgs, Workspace};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the new command.
#[derive(Args)]
pub(crate) struct NewArgs {
    /// Vault path of the new drawing (default: timestamped name in the drawings folder).
    filename: Option<String>,

    #[command(flatten)]
    vault: VaultArgs,
}

impl NewArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let workspace = Workspace::load(&self.vault)?;
        let mut host = workspace.default_host(&output);

        let file = match self.filename {
            Some(filename) => workspace
                .plugin
                .drawings()
                .create_drawing(&mut host, &with_extension(filename))?,
            None => {
                host.run_command(COMMAND_AUTOCREATE)?;
                host.opened().last().cloned().ok_or_else(|| {
                    CliError::Validation("Drawing was created but not opened".to_owned())
                })?
            }
        };

        output.success(&format!("Created {}", file.path));
        Ok(())
    }
}

fn with_extension(filename: String) -> String {
    if filename.ends_with(&format!(".{FILE_EXTENSION}")) {
        filename
    } else {
        format!("{filename}.{FILE_EXTENSION}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_extension() {
        assert_eq!(with_extension("a".to_owned()), "a.excalidraw");
        assert_eq!(with_extension("b.excalidraw".to_owned()), "b.excalidraw");
        assert_eq!(with_extension("notes.md".to_owned()), "notes.md.excalidraw");
    }
}
