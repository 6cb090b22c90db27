//! Constants shared by the transclusion pipeline.

/// File extension reserved for drawings.
pub const FILE_EXTENSION: &str = "excalidraw";

/// Fenced code block language that triggers transclusion.
pub const CODEBLOCK_LANGUAGE: &str = "excalidraw";

/// Class of the container holding a rendered drawing.
pub const SVG_CLASS: &str = "excalidraw-svg";

/// Class of the container holding a transclusion error.
pub const ERROR_CLASS: &str = "excalidraw-error";

/// Default width applied when a reference has no width directive.
pub const DEFAULT_WIDTH: &str = "400";

/// Marker inside the HTML comments that stand in for blocks during rendering.
pub(crate) const PLACEHOLDER_MARKER: &str = "excalidraw-transclusion";
