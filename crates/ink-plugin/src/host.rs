//! Capabilities a host application offers to the plugin.
//!
//! The plugin never reaches into the host directly. Everything it registers or
//! asks for goes through [`Host`], so any application (an editor, the CLI, a
//! test double) can embed it.

use std::sync::Arc;

use ink_renderer::CodeBlockProcessor;
use ink_vault::VaultFile;

use crate::error::PluginError;

/// Creates a fresh code block processor for each rendered document.
pub type ProcessorFactory = Box<dyn Fn() -> Box<dyn CodeBlockProcessor> + Send + Sync>;

/// Action run by a command or ribbon icon.
pub type CommandCallback = Arc<dyn Fn(&mut dyn Host) -> Result<(), PluginError> + Send + Sync>;

/// Command registered with the host's command palette.
#[derive(Clone)]
pub struct Command {
    /// Stable identifier (e.g., "excalidraw-open").
    pub id: &'static str,
    /// Human-readable name.
    pub name: String,
    pub callback: CommandCallback,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Why the plugin asks the host to pick a drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickPurpose {
    /// Open an existing drawing, or create it if missing.
    Open,
    /// Insert a transclusion of the drawing into the active editor.
    InsertLink,
}

/// Text editor with a selection.
pub trait Editor {
    /// Replace the current selection (or insert at the cursor) with `text`.
    fn replace_selection(&mut self, text: &str);

    fn focus(&mut self);
}

/// Host application surface used by the plugin.
pub trait Host {
    fn register_view_type(&mut self, view_type: &str);

    /// Associate file extensions with a view type.
    fn register_extensions(&mut self, extensions: &[&str], view_type: &str);

    fn register_code_block_processor(&mut self, language: &str, factory: ProcessorFactory);

    fn register_command(&mut self, command: Command);

    fn add_ribbon_icon(&mut self, icon: &str, title: &str, callback: CommandCallback);

    /// Editor of the active markdown view, if any.
    fn active_editor(&mut self) -> Option<&mut dyn Editor>;

    /// Show `file` in a view of the given type.
    fn open_view(&mut self, view_type: &str, file: &VaultFile) -> Result<(), PluginError>;

    /// Ask the user for a drawing path. `None` means the user cancelled.
    fn pick_drawing(&mut self, purpose: PickPurpose) -> Option<String>;
}
