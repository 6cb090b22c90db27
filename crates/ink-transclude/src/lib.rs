//! Excalidraw transclusion for inkvault notes.
//!
//! A transclusion is a fenced `excalidraw` code block whose body names a
//! drawing in the vault, optionally with a display size:
//!
//! ````markdown
//! ```excalidraw
//! [[excalidraw/architecture.excalidraw|600x400]]
//! ```
//! ````
//!
//! # Architecture
//!
//! - [`Reference`]: parsing of `[[path]]`, `[[path|W]]` and `[[path|WxH]]`
//! - [`Transcluder`]: lookup, validation, read and conversion of one block,
//!   rendering failures in place as an error block
//! - [`Container`]: render target that ignores stale or late results
//! - [`VectorImageConverter`] / [`SceneExporter`]: drawing content to SVG
//! - [`TransclusionProcessor`]: `ink-renderer` integration for whole notes
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ink_transclude::{Container, Transcluder, TransclusionSettings};
//! use ink_vault::FsVault;
//!
//! let vault = Arc::new(FsVault::new("notes".into()));
//! let transcluder = Transcluder::with_scene_exporter(vault, TransclusionSettings::default());
//! let container = Container::new();
//! transcluder.render("[[excalidraw/a.excalidraw|300]]", &container).await;
//! println!("{}", container.to_html());
//! ```

mod consts;
mod container;
mod convert;
mod dom;
mod error;
mod processor;
mod reference;
mod scene;
mod svg;
mod transcluder;

pub use consts::{CODEBLOCK_LANGUAGE, DEFAULT_WIDTH, ERROR_CLASS, FILE_EXTENSION, SVG_CLASS};
pub use container::{Container, RenderToken};
pub use convert::{SvgPassthrough, VectorImageConverter};
pub use dom::{Element, Node};
pub use error::TransclusionError;
pub use processor::TransclusionProcessor;
pub use reference::Reference;
pub use scene::SceneExporter;
pub use svg::VectorImage;
pub use transcluder::{RenderOutcome, Transcluder, TransclusionSettings, error_block};
