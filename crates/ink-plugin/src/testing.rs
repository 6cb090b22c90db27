//! Recording host for unit tests.

use std::collections::VecDeque;

use ink_vault::VaultFile;

use crate::error::PluginError;
use crate::host::{Command, CommandCallback, Editor, Host, PickPurpose, ProcessorFactory};

#[derive(Debug, Default)]
pub(crate) struct TextEditor {
    pub(crate) text: String,
    pub(crate) focused: bool,
}

impl Editor for TextEditor {
    fn replace_selection(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

#[derive(Default)]
pub(crate) struct RecordingHost {
    pub(crate) view_types: Vec<String>,
    pub(crate) extensions: Vec<(String, String)>,
    pub(crate) processors: Vec<(String, ProcessorFactory)>,
    pub(crate) commands: Vec<Command>,
    pub(crate) ribbon: Vec<(String, String, CommandCallback)>,
    pub(crate) opened: Vec<(String, String)>,
    pub(crate) picks: VecDeque<(PickPurpose, String)>,
    pub(crate) editor: Option<TextEditor>,
}

impl RecordingHost {
    pub(crate) fn with_editor() -> Self {
        Self {
            editor: Some(TextEditor::default()),
            ..Self::default()
        }
    }

    pub(crate) fn will_pick(mut self, purpose: PickPurpose, path: &str) -> Self {
        self.picks.push_back((purpose, path.to_owned()));
        self
    }

    pub(crate) fn run(&mut self, id: &str) -> Result<(), PluginError> {
        let callback = self
            .commands
            .iter()
            .find(|command| command.id == id)
            .map(|command| std::sync::Arc::clone(&command.callback))
            .ok_or_else(|| PluginError::UnknownCommand(id.to_owned()))?;
        let host: &mut dyn Host = self;
        callback(host)
    }
}

impl Host for RecordingHost {
    fn register_view_type(&mut self, view_type: &str) {
        self.view_types.push(view_type.to_owned());
    }

    fn register_extensions(&mut self, extensions: &[&str], view_type: &str) {
        for extension in extensions {
            self.extensions
                .push(((*extension).to_owned(), view_type.to_owned()));
        }
    }

    fn register_code_block_processor(&mut self, language: &str, factory: ProcessorFactory) {
        self.processors.push((language.to_owned(), factory));
    }

    fn register_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    fn add_ribbon_icon(&mut self, icon: &str, title: &str, callback: CommandCallback) {
        self.ribbon
            .push((icon.to_owned(), title.to_owned(), callback));
    }

    fn active_editor(&mut self) -> Option<&mut dyn Editor> {
        self.editor.as_mut().map(|editor| editor as &mut dyn Editor)
    }

    fn open_view(&mut self, view_type: &str, file: &VaultFile) -> Result<(), PluginError> {
        self.opened.push((view_type.to_owned(), file.path.clone()));
        Ok(())
    }

    fn pick_drawing(&mut self, purpose: PickPurpose) -> Option<String> {
        let (expected, path) = self.picks.pop_front()?;
        assert_eq!(expected, purpose, "unexpected pick purpose");
        Some(path)
    }
}
