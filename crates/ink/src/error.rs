//! CLI error types.

use ink_config::ConfigError;
use ink_plugin::PluginError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Plugin(#[from] PluginError),

    #[error("{0}")]
    Validation(String),
}
