//! Configuration management for inkvault.
//!
//! Parses `ink.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `vault.root`
//! - `drawings.folder`
//! - `drawings.template`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override vault root directory.
    pub vault_root: Option<PathBuf>,
    /// Override default transclusion width.
    pub default_width: Option<String>,
    /// Override folder for new drawings.
    pub drawings_folder: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "ink.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault configuration (root is a relative string from TOML).
    vault: VaultConfigRaw,
    /// Drawing creation settings.
    pub drawings: DrawingsConfig,
    /// Transclusion rendering settings.
    pub transclusion: TransclusionConfig,

    /// Resolved vault configuration (set after loading).
    #[serde(skip)]
    pub vault_resolved: VaultConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw vault configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct VaultConfigRaw {
    root: Option<String>,
}

/// Resolved vault configuration with absolute paths.
#[derive(Debug, Default)]
pub struct VaultConfig {
    /// Root directory of the vault.
    pub root: PathBuf,
}

/// Drawing creation settings.
///
/// Both paths are vault-relative.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DrawingsConfig {
    /// Folder where new drawings are created.
    pub folder: String,
    /// Template drawing copied into new drawings (empty disables the template).
    pub template: String,
}

impl Default for DrawingsConfig {
    fn default() -> Self {
        Self {
            folder: "excalidraw".to_owned(),
            template: "excalidraw/Template.excalidraw".to_owned(),
        }
    }
}

/// Transclusion rendering settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TransclusionConfig {
    /// Width applied to transcluded drawings without a width directive.
    pub default_width: String,
}

impl Default for TransclusionConfig {
    fn default() -> Self {
        Self {
            default_width: "400".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`vault.root`").
        field: String,
        /// Error message (e.g., "${`VAULT_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `ink.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.vault_root {
            self.vault_resolved.root.clone_from(root);
        }
        if let Some(width) = &settings.default_width {
            self.transclusion.default_width.clone_from(width);
        }
        if let Some(folder) = &settings.drawings_folder {
            self.drawings.folder.clone_from(folder);
        }
    }

    /// Template path, or `None` when templates are disabled.
    #[must_use]
    pub fn template_path(&self) -> Option<&str> {
        let template = self.drawings.template.trim();
        (!template.is_empty()).then_some(template)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            vault: VaultConfigRaw::default(),
            drawings: DrawingsConfig::default(),
            transclusion: TransclusionConfig::default(),
            vault_resolved: VaultConfig {
                root: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.drawings.folder, "drawings.folder")?;
        require_non_empty(
            &self.transclusion.default_width,
            "transclusion.default_width",
        )?;

        if self
            .transclusion
            .default_width
            .chars()
            .any(char::is_whitespace)
        {
            return Err(ConfigError::Validation(
                "transclusion.default_width cannot contain whitespace".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.vault.root {
            self.vault.root = Some(expand::expand_env(root, "vault.root")?);
        }
        self.drawings.folder = expand::expand_env(&self.drawings.folder, "drawings.folder")?;
        self.drawings.template = expand::expand_env(&self.drawings.template, "drawings.template")?;
        self.transclusion.default_width = expand::expand_env(
            &self.transclusion.default_width,
            "transclusion.default_width",
        )?;
        Ok(())
    }

    /// Resolve the vault root relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.vault_resolved = VaultConfig {
            root: config_dir.join(self.vault.root.as_deref().unwrap_or(".")),
        };
    }
}
