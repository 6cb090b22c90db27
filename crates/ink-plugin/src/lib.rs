//! Excalidraw drawing plugin for inkvault.
//!
//! Wires drawings into a host application through the capabilities in
//! [`Host`]: a view type for `.excalidraw` files, the `excalidraw` code block
//! processor, and commands to open, create and transclude drawings.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ink_plugin::{ExcalidrawPlugin, PluginSettings};
//! use ink_vault::FsVault;
//!
//! let vault = Arc::new(FsVault::new("notes".into()));
//! let plugin = ExcalidrawPlugin::new(vault, PluginSettings::default());
//! plugin.on_load(&mut host);
//! ```

mod consts;
mod drawings;
mod error;
mod host;
mod plugin;
#[cfg(test)]
mod testing;

pub use consts::{
    BLANK_DRAWING, CODEBLOCK_LANGUAGE, COMMAND_AUTOCREATE, COMMAND_INSERT_TRANSCLUSION,
    COMMAND_OPEN, FILE_EXTENSION, ICON_NAME, RIBBON_TITLE, VIEW_TYPE_EXCALIDRAW,
};
pub use drawings::{DrawingSettings, Drawings, insert_transclusion, transclusion_block};
pub use error::PluginError;
pub use host::{Command, CommandCallback, Editor, Host, PickPurpose, ProcessorFactory};
pub use plugin::{ExcalidrawPlugin, PluginSettings};
