//! Plugin entry point and registrations.

use std::sync::Arc;

use chrono::Local;
use ink_renderer::CodeBlockProcessor;
use ink_transclude::{Transcluder, TransclusionProcessor, TransclusionSettings};
use ink_vault::Vault;

use crate::consts::{
    CODEBLOCK_LANGUAGE, COMMAND_AUTOCREATE, COMMAND_INSERT_TRANSCLUSION, COMMAND_OPEN,
    FILE_EXTENSION, ICON_NAME, RIBBON_TITLE, VIEW_TYPE_EXCALIDRAW,
};
use crate::drawings::{DrawingSettings, Drawings, insert_transclusion};
use crate::error::PluginError;
use crate::host::{Command, CommandCallback, Host, PickPurpose};

/// Plugin settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PluginSettings {
    pub drawings: DrawingSettings,
    pub transclusion: TransclusionSettings,
}

/// Excalidraw drawing plugin.
///
/// Registers the drawing view, the `excalidraw` code block processor, a ribbon
/// icon and three commands with a [`Host`].
pub struct ExcalidrawPlugin {
    drawings: Arc<Drawings>,
    transcluder: Transcluder,
}

impl ExcalidrawPlugin {
    #[must_use]
    pub fn new(vault: Arc<dyn Vault>, settings: PluginSettings) -> Self {
        let transcluder = Transcluder::with_scene_exporter(Arc::clone(&vault), settings.transclusion);
        Self::with_transcluder(vault, settings.drawings, transcluder)
    }

    /// Create the plugin around an existing transcluder.
    #[must_use]
    pub fn with_transcluder(
        vault: Arc<dyn Vault>,
        drawings: DrawingSettings,
        transcluder: Transcluder,
    ) -> Self {
        Self {
            drawings: Arc::new(Drawings::new(vault, drawings)),
            transcluder,
        }
    }

    #[must_use]
    pub fn drawings(&self) -> &Drawings {
        &self.drawings
    }

    #[must_use]
    pub fn transcluder(&self) -> &Transcluder {
        &self.transcluder
    }

    /// Register everything the plugin provides.
    pub fn on_load(&self, host: &mut dyn Host) {
        host.register_view_type(VIEW_TYPE_EXCALIDRAW);
        host.register_extensions(&[FILE_EXTENSION], VIEW_TYPE_EXCALIDRAW);

        let transcluder = self.transcluder.clone();
        host.register_code_block_processor(
            CODEBLOCK_LANGUAGE,
            Box::new(move || -> Box<dyn CodeBlockProcessor> {
                Box::new(TransclusionProcessor::new(transcluder.clone()))
            }),
        );

        host.add_ribbon_icon(ICON_NAME, RIBBON_TITLE, self.open_callback());

        host.register_command(Command {
            id: COMMAND_OPEN,
            name: "Open an existing drawing or create new one".to_owned(),
            callback: self.open_callback(),
        });

        host.register_command(Command {
            id: COMMAND_INSERT_TRANSCLUSION,
            name: format!("Transclude an .{FILE_EXTENSION} file into a markdown document"),
            callback: Arc::new(|host: &mut dyn Host| -> Result<(), PluginError> {
                if let Some(path) = host.pick_drawing(PickPurpose::InsertLink) {
                    insert_transclusion(host, &path);
                }
                Ok(())
            }),
        });

        let drawings = Arc::clone(&self.drawings);
        host.register_command(Command {
            id: COMMAND_AUTOCREATE,
            name: "Create a new drawing".to_owned(),
            callback: Arc::new(move |host: &mut dyn Host| -> Result<(), PluginError> {
                let filename = drawings.next_default_filename(Local::now().naive_local());
                drawings.create_drawing(host, &filename).map(|_| ())
            }),
        });

        tracing::info!("Excalidraw plugin loaded");
    }

    fn open_callback(&self) -> CommandCallback {
        let drawings = Arc::clone(&self.drawings);
        Arc::new(move |host: &mut dyn Host| -> Result<(), PluginError> {
            let Some(path) = host.pick_drawing(PickPurpose::Open) else {
                return Ok(());
            };
            drawings.open_or_create(host, &path).map(|_| ())
        })
    }
}
