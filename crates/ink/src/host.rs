//! Command-line implementation of the plugin host.
//!
//! The terminal has no workspace, so the host answers the plugin's requests
//! from what the invoked command already knows: the drawing named on the
//! command line is the "picked" file, a text buffer stands in for the active
//! editor, and opening a view reports the file instead of displaying it.

use std::sync::Arc;

use ink_plugin::{
    Command, CommandCallback, Editor, Host, PickPurpose, PluginError, ProcessorFactory,
};
use ink_renderer::MarkdownRenderer;
use ink_vault::VaultFile;

use crate::output::Output;

/// Editor writing into a string buffer.
#[derive(Debug, Default)]
pub(crate) struct BufferEditor {
    buffer: String,
    focused: bool,
}

impl Editor for BufferEditor {
    fn replace_selection(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

pub(crate) struct CliHost {
    output: Output,
    view_types: Vec<(String, Vec<String>)>,
    processors: Vec<(String, ProcessorFactory)>,
    commands: Vec<Command>,
    ribbon_icons: Vec<(String, String)>,
    editor: Option<BufferEditor>,
    pick: Option<String>,
    opened: Vec<VaultFile>,
}

impl CliHost {
    pub(crate) fn new(output: Output) -> Self {
        Self {
            output,
            view_types: Vec::new(),
            processors: Vec::new(),
            commands: Vec::new(),
            ribbon_icons: Vec::new(),
            editor: None,
            pick: None,
            opened: Vec::new(),
        }
    }

    /// Answer the next drawing pick with `path`.
    #[must_use]
    pub(crate) fn with_pick(mut self, path: impl Into<String>) -> Self {
        self.pick = Some(path.into());
        self
    }

    /// Provide an active editor backed by a buffer.
    #[must_use]
    pub(crate) fn with_editor(mut self) -> Self {
        self.editor = Some(BufferEditor::default());
        self
    }

    pub(crate) fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// View types with the file extensions they open.
    pub(crate) fn view_types(&self) -> &[(String, Vec<String>)] {
        &self.view_types
    }

    pub(crate) fn languages(&self) -> impl Iterator<Item = &str> {
        self.processors.iter().map(|(language, _)| language.as_str())
    }

    pub(crate) fn ribbon_icons(&self) -> &[(String, String)] {
        &self.ribbon_icons
    }

    /// Text written to the editor, if an editor was provided.
    pub(crate) fn editor_text(&self) -> Option<&str> {
        self.editor.as_ref().map(|editor| editor.buffer.as_str())
    }

    /// Files the plugin asked to open, in order.
    pub(crate) fn opened(&self) -> &[VaultFile] {
        &self.opened
    }

    /// Markdown renderer with a fresh instance of every registered processor.
    pub(crate) fn renderer(&self) -> MarkdownRenderer {
        self.processors
            .iter()
            .fold(MarkdownRenderer::new(), |renderer, (_, factory)| {
                renderer.with_boxed_processor(factory())
            })
    }

    /// Run a registered command by id.
    pub(crate) fn run_command(&mut self, id: &str) -> Result<(), PluginError> {
        let callback: CommandCallback = self
            .commands
            .iter()
            .find(|command| command.id == id)
            .map(|command| Arc::clone(&command.callback))
            .ok_or_else(|| PluginError::UnknownCommand(id.to_owned()))?;

        tracing::debug!(command = id, "Running command");
        let host: &mut dyn Host = self;
        callback(host)
    }
}

impl Host for CliHost {
    fn register_view_type(&mut self, view_type: &str) {
        if !self.view_types.iter().any(|(name, _)| name == view_type) {
            self.view_types.push((view_type.to_owned(), Vec::new()));
        }
    }

    fn register_extensions(&mut self, extensions: &[&str], view_type: &str) {
        self.register_view_type(view_type);
        if let Some((_, registered)) = self
            .view_types
            .iter_mut()
            .find(|(name, _)| name == view_type)
        {
            registered.extend(extensions.iter().map(|ext| (*ext).to_owned()));
        }
    }

    fn register_code_block_processor(&mut self, language: &str, factory: ProcessorFactory) {
        self.processors.push((language.to_owned(), factory));
    }

    fn register_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    fn add_ribbon_icon(&mut self, icon: &str, title: &str, _callback: CommandCallback) {
        self.ribbon_icons.push((icon.to_owned(), title.to_owned()));
    }

    fn active_editor(&mut self) -> Option<&mut dyn Editor> {
        self.editor.as_mut().map(|editor| editor as &mut dyn Editor)
    }

    fn open_view(&mut self, view_type: &str, file: &VaultFile) -> Result<(), PluginError> {
        let known = self
            .view_types
            .iter()
            .any(|(name, extensions)| name == view_type && extensions.contains(&file.extension));
        if !known {
            return Err(PluginError::OpenView {
                path: file.path.clone(),
                view_type: view_type.to_owned(),
                reason: "no view registered for this file type".to_owned(),
            });
        }

        self.output
            .info(&format!("Open {} in the {view_type} view", file.path));
        self.opened.push(file.clone());
        Ok(())
    }

    fn pick_drawing(&mut self, purpose: PickPurpose) -> Option<String> {
        let picked = self.pick.take();
        tracing::debug!(?purpose, picked = ?picked, "Drawing picked");
        picked
    }
}

#[cfg(test)]
mod tests {
    use ink_plugin::{
        BLANK_DRAWING, COMMAND_AUTOCREATE, COMMAND_INSERT_TRANSCLUSION, ExcalidrawPlugin,
        PluginSettings,
    };
    use ink_vault::{MockVault, Vault};
    use pretty_assertions::assert_eq;

    use super::*;

    fn loaded(host: CliHost, vault: MockVault) -> (Arc<MockVault>, CliHost) {
        let vault = Arc::new(vault);
        let plugin = ExcalidrawPlugin::new(
            Arc::clone(&vault) as Arc<dyn Vault>,
            PluginSettings::default(),
        );
        let mut host = host;
        plugin.on_load(&mut host);
        (vault, host)
    }

    #[test]
    fn test_registrations() {
        let (_, host) = loaded(CliHost::new(Output::new()), MockVault::new());

        assert_eq!(
            host.view_types(),
            &[("excalidraw".to_owned(), vec!["excalidraw".to_owned()])]
        );
        assert_eq!(host.languages().collect::<Vec<_>>(), vec!["excalidraw"]);
        assert_eq!(host.commands().len(), 3);
        assert_eq!(host.ribbon_icons().len(), 1);
    }

    #[test]
    fn test_embed_via_insert_command() {
        let host = CliHost::new(Output::new())
            .with_editor()
            .with_pick("excalidraw/a.excalidraw");
        let (_, mut host) = loaded(host, MockVault::new());

        host.run_command(COMMAND_INSERT_TRANSCLUSION).unwrap();

        assert_eq!(
            host.editor_text(),
            Some("```excalidraw\n[[excalidraw/a.excalidraw]]\n```")
        );
    }

    #[test]
    fn test_autocreate_opens_new_drawing() {
        let (vault, mut host) = loaded(CliHost::new(Output::new()), MockVault::new());

        host.run_command(COMMAND_AUTOCREATE).unwrap();

        let opened = host.opened();
        assert_eq!(opened.len(), 1);
        assert_eq!(vault.content(&opened[0].path).as_deref(), Some(BLANK_DRAWING));
    }

    #[test]
    fn test_open_view_rejects_unregistered_type() {
        let mut host = CliHost::new(Output::new());

        let err = host
            .open_view("excalidraw", &VaultFile::from_path("a.excalidraw"))
            .unwrap_err();

        assert!(matches!(err, PluginError::OpenView { .. }));
    }

    #[test]
    fn test_renderer_uses_registered_processors() {
        let vault = MockVault::new().with_file("d.excalidraw", BLANK_DRAWING);
        let (_, host) = loaded(CliHost::new(Output::new()), vault);

        let result = host
            .renderer()
            .render_markdown("```excalidraw\n[[d.excalidraw]]\n```");

        assert!(result.html.starts_with("<div class=\"excalidraw-svg\">"));
    }

    #[test]
    fn test_unknown_command() {
        let mut host = CliHost::new(Output::new());

        assert!(matches!(
            host.run_command("missing"),
            Err(PluginError::UnknownCommand(_))
        ));
    }
}
