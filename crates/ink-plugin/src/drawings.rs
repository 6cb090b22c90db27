//! Drawing file creation and transclusion insertion.

use std::sync::Arc;

use chrono::NaiveDateTime;
use ink_vault::{Entry, Vault, VaultFile, normalize_path};

use crate::consts::{BLANK_DRAWING, CODEBLOCK_LANGUAGE, FILE_EXTENSION, VIEW_TYPE_EXCALIDRAW};
use crate::error::PluginError;
use crate::host::Host;

/// Timestamp format of default drawing names.
const FILENAME_TIMESTAMP: &str = "%Y-%m-%d %H.%M.%S";

/// Where new drawings go and what they start from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawingSettings {
    /// Vault folder for new drawings.
    pub folder: String,
    /// Vault path of the template drawing, if any.
    pub template_path: Option<String>,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            folder: "excalidraw".to_owned(),
            template_path: Some("excalidraw/Template.excalidraw".to_owned()),
        }
    }
}

/// Drawing file management on top of a vault.
pub struct Drawings {
    vault: Arc<dyn Vault>,
    settings: DrawingSettings,
}

impl Drawings {
    #[must_use]
    pub fn new(vault: Arc<dyn Vault>, settings: DrawingSettings) -> Self {
        Self { vault, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &DrawingSettings {
        &self.settings
    }

    /// Path for a new drawing named after `now`.
    ///
    /// Format: `<folder>/Drawing YYYY-MM-DD HH.mm.ss.excalidraw`.
    #[must_use]
    pub fn next_default_filename(&self, now: NaiveDateTime) -> String {
        normalize_path(&format!(
            "{}/Drawing {}.{FILE_EXTENSION}",
            self.settings.folder,
            now.format(FILENAME_TIMESTAMP)
        ))
    }

    /// Content a new drawing starts with.
    ///
    /// Uses the template file if it exists and isn't empty.
    pub fn initial_content(&self) -> Result<String, PluginError> {
        let template = self
            .settings
            .template_path
            .as_deref()
            .and_then(|path| self.vault.entry(&normalize_path(path)))
            .and_then(Entry::into_file);

        let Some(template) = template else {
            return Ok(BLANK_DRAWING.to_owned());
        };

        let content = self.vault.read(&template)?;
        if content.is_empty() {
            tracing::debug!(path = %template.path, "Template is empty, using blank drawing");
            return Ok(BLANK_DRAWING.to_owned());
        }
        Ok(content)
    }

    /// Create a drawing at `filename` and open it.
    ///
    /// The drawings folder is created first if it isn't a folder yet.
    pub fn create_drawing(
        &self,
        host: &mut dyn Host,
        filename: &str,
    ) -> Result<VaultFile, PluginError> {
        let folder = normalize_path(&self.settings.folder);
        if !self.vault.entry(&folder).is_some_and(|entry| entry.is_folder()) {
            self.vault.create_folder(&folder)?;
        }

        let content = self.initial_content()?;
        let file = self.vault.create(filename, &content)?;
        tracing::info!(path = %file.path, "Created drawing");

        host.open_view(VIEW_TYPE_EXCALIDRAW, &file)?;
        Ok(file)
    }

    /// Open the drawing at `path`, creating it when nothing exists there.
    pub fn open_or_create(&self, host: &mut dyn Host, path: &str) -> Result<VaultFile, PluginError> {
        let path = with_drawing_extension(&normalize_path(path));
        if let Some(file) = self.vault.entry(&path).and_then(Entry::into_file) {
            host.open_view(VIEW_TYPE_EXCALIDRAW, &file)?;
            return Ok(file);
        }
        self.create_drawing(host, &path)
    }
}

/// Code block transcluding the drawing at `path`.
#[must_use]
pub fn transclusion_block(path: &str) -> String {
    format!("```{CODEBLOCK_LANGUAGE}\n[[{path}]]\n```")
}

/// Replace the active editor's selection with a transclusion of `path`.
///
/// Returns `false` when there is no active editor.
pub fn insert_transclusion(host: &mut dyn Host, path: &str) -> bool {
    let Some(editor) = host.active_editor() else {
        tracing::debug!("No active editor, transclusion not inserted");
        return false;
    };
    editor.replace_selection(&transclusion_block(path));
    editor.focus();
    true
}

fn with_drawing_extension(path: &str) -> String {
    let suffix = format!(".{FILE_EXTENSION}");
    if path.ends_with(&suffix) {
        path.to_owned()
    } else {
        format!("{path}{suffix}")
    }
}
