//! Plugin error types.

use ink_vault::VaultError;

/// Error raised by a plugin command.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("{0}")]
    Vault(#[from] VaultError),

    #[error("Cannot open {path} in {view_type} view: {reason}")]
    OpenView {
        path: String,
        view_type: String,
        reason: String,
    },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
