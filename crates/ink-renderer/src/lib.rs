//! Markdown renderer with pluggable code block processors.
//!
//! This crate provides a [`MarkdownRenderer`] that produces HTML with
//! `pulldown-cmark` and hands fenced code blocks to registered
//! [`CodeBlockProcessor`]s. A processor claims a block with placeholder markup
//! and replaces it in [`CodeBlockProcessor::post_process`] once the document is
//! rendered.
//!
//! # Example
//!
//! ```
//! use ink_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new().render_markdown("# Hello\n\n**Bold** text");
//! assert!(result.html.starts_with("<h1>Hello</h1>"));
//! ```

mod code_block;
mod escape;
mod renderer;

pub use code_block::{CodeBlock, CodeBlockProcessor, ExtractedCodeBlock};
pub use escape::escape_html;
pub use renderer::{MarkdownRenderer, RenderResult};
