//! CLI command implementations.

mod embed;
mod list;
mod new;
mod render;
mod show;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use ink_config::{CliSettings, Config};
use ink_plugin::{DrawingSettings, ExcalidrawPlugin, PluginSettings};
use ink_transclude::TransclusionSettings;
use ink_vault::{FsVault, Vault};

pub(crate) use embed::EmbedArgs;
pub(crate) use list::CommandsArgs;
pub(crate) use new::NewArgs;
pub(crate) use render::RenderArgs;
pub(crate) use show::ShowArgs;

use crate::error::CliError;
use crate::host::CliHost;
use crate::output::Output;

/// Options shared by every command.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct VaultArgs {
    /// Path to configuration file (default: auto-discover ink.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vault root directory (overrides config).
    #[arg(long, env = "INK_VAULT")]
    vault: Option<PathBuf>,

    /// Default transclusion width (overrides config).
    #[arg(long)]
    default_width: Option<String>,

    /// Folder for new drawings (overrides config).
    #[arg(long)]
    drawings_folder: Option<String>,
}

/// Loaded configuration, vault and plugin for one command run.
pub(crate) struct Workspace {
    pub(crate) config: Config,
    pub(crate) vault: Arc<dyn Vault>,
    pub(crate) plugin: ExcalidrawPlugin,
}

impl Workspace {
    pub(crate) fn load(args: &VaultArgs) -> Result<Self, CliError> {
        let cli_settings = CliSettings {
            vault_root: args.vault.clone(),
            default_width: args.default_width.clone(),
            drawings_folder: args.drawings_folder.clone(),
        };
        let config = Config::load(args.config.as_deref(), Some(&cli_settings))?;

        let root = &config.vault_resolved.root;
        if !root.is_dir() {
            return Err(CliError::Validation(format!(
                "Vault root is not a directory: {}",
                root.display()
            )));
        }
        tracing::info!(root = %root.display(), "Using vault");

        let vault: Arc<dyn Vault> = Arc::new(FsVault::new(root.clone()));
        let plugin = ExcalidrawPlugin::new(Arc::clone(&vault), plugin_settings(&config));

        Ok(Self {
            config,
            vault,
            plugin,
        })
    }

    /// Host with the plugin loaded into it.
    pub(crate) fn host(&self, host: CliHost) -> CliHost {
        let mut host = host;
        self.plugin.on_load(&mut host);
        host
    }

    pub(crate) fn default_host(&self, output: &Output) -> CliHost {
        self.host(CliHost::new(output.clone()))
    }
}

fn plugin_settings(config: &Config) -> PluginSettings {
    PluginSettings {
        drawings: DrawingSettings {
            folder: config.drawings.folder.clone(),
            template_path: config.template_path().map(str::to_owned),
        },
        transclusion: TransclusionSettings {
            default_width: config.transclusion.default_width.clone(),
        },
    }
}
