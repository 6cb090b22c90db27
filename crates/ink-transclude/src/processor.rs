//! Markdown code block processor for `excalidraw` blocks.
//!
//! Blocks are swapped for `<!--excalidraw-transclusion:<nonce>:<index>-->`
//! comments while the markdown renders, then every placeholder is replaced by
//! its drawing in one pass over the finished HTML. The nonce is fresh for each
//! processor, so a note cannot spell out a placeholder of its own.

use std::collections::HashMap;

use ink_renderer::{CodeBlock, CodeBlockProcessor, ExtractedCodeBlock};
use uuid::Uuid;

use crate::consts::{CODEBLOCK_LANGUAGE, PLACEHOLDER_MARKER};
use crate::transcluder::{Transcluder, error_block};

/// Code block processor rendering drawing transclusions.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use ink_renderer::MarkdownRenderer;
/// use ink_transclude::{TransclusionProcessor, TransclusionSettings, Transcluder};
/// use ink_vault::FsVault;
///
/// let vault = Arc::new(FsVault::new("notes".into()));
/// let transcluder = Transcluder::with_scene_exporter(vault, TransclusionSettings::default());
/// let result = MarkdownRenderer::new()
///     .with_processor(TransclusionProcessor::new(transcluder))
///     .render_markdown("```excalidraw\n[[drawing.excalidraw|300]]\n```");
/// ```
pub struct TransclusionProcessor {
    transcluder: Transcluder,
    placeholder_prefix: String,
    extracted: Vec<ExtractedCodeBlock>,
    warnings: Vec<String>,
}

impl TransclusionProcessor {
    #[must_use]
    pub fn new(transcluder: Transcluder) -> Self {
        Self {
            transcluder,
            placeholder_prefix: format!("<!--{PLACEHOLDER_MARKER}:{}:", Uuid::new_v4().simple()),
            extracted: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl CodeBlockProcessor for TransclusionProcessor {
    fn claim(&mut self, block: &CodeBlock<'_>) -> Option<String> {
        if block.language != CODEBLOCK_LANGUAGE {
            return None;
        }

        self.extracted.push(block.extract());
        Some(format!("{}{}-->", self.placeholder_prefix, block.index))
    }

    fn post_process(&mut self, html: &mut String) {
        let mut replacements =
            Replacements::with_capacity(&self.placeholder_prefix, self.extracted.len());

        for block in &self.extracted {
            let element = match self.transcluder.transclude(&block.source) {
                Ok(element) => element,
                Err(err) => {
                    self.warnings
                        .push(format!("transclusion {}: {err}", block.index));
                    error_block(&block.source, &err)
                }
            };
            replacements.add(block.index, element.to_html());
        }

        replacements.apply(html);
    }

    fn extracted(&self) -> &[ExtractedCodeBlock] {
        &self.extracted
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Placeholder replacements keyed by code block index.
struct Replacements<'p> {
    prefix: &'p str,
    map: HashMap<usize, String>,
}

impl<'p> Replacements<'p> {
    fn with_capacity(prefix: &'p str, capacity: usize) -> Self {
        Self {
            prefix,
            map: HashMap::with_capacity(capacity),
        }
    }

    fn add(&mut self, index: usize, content: String) {
        self.map.insert(index, content);
    }

    /// Replace every known placeholder in a single scan.
    ///
    /// Placeholders with an unknown index are left untouched.
    fn apply(self, html: &mut String) {
        if self.map.is_empty() {
            return;
        }

        let mut result = String::with_capacity(html.len());
        let mut remaining = html.as_str();

        while let Some(start) = remaining.find(self.prefix) {
            result.push_str(&remaining[..start]);
            let after_prefix = &remaining[start + self.prefix.len()..];

            let Some(end) = after_prefix.find("-->") else {
                result.push_str(&remaining[start..]);
                remaining = "";
                break;
            };

            let placeholder_len = self.prefix.len() + end + 3;
            let replacement = after_prefix[..end]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.map.get(&index));
            match replacement {
                Some(content) => result.push_str(content),
                None => result.push_str(&remaining[start..start + placeholder_len]),
            }
            remaining = &remaining[start + placeholder_len..];
        }

        result.push_str(remaining);
        *html = result;
    }
}
