//! Plugin identifiers.

pub use ink_transclude::{CODEBLOCK_LANGUAGE, FILE_EXTENSION};

/// View type that opens drawing files.
pub const VIEW_TYPE_EXCALIDRAW: &str = "excalidraw";

/// Icon registered for the ribbon.
pub const ICON_NAME: &str = "excalidraw-icon";

/// Title of the ribbon icon.
pub const RIBBON_TITLE: &str = "Excalidraw";

/// Content of a new drawing when no template is available.
pub const BLANK_DRAWING: &str = r##"{"type":"excalidraw","version":2,"source":"https://excalidraw.com","elements":[],"appState":{"gridSize":null,"viewBackgroundColor":"#ffffff"}}"##;

pub const COMMAND_OPEN: &str = "excalidraw-open";
pub const COMMAND_INSERT_TRANSCLUSION: &str = "excalidraw-insert-transclusion";
pub const COMMAND_AUTOCREATE: &str = "excalidraw-autocreate";
