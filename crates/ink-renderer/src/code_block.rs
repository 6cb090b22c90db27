//! Fenced code blocks handed to processors.
//!
//! Rendering a block usually needs the vault, so a processor never renders
//! while the markdown is parsed. It claims the block by returning placeholder
//! markup, remembers the block, and swaps the placeholder for real content in
//! [`CodeBlockProcessor::post_process`] once the whole document is HTML.
//!
//! Processors are asked in registration order and the first claim wins.
//! Unclaimed blocks render as ordinary `<pre><code>` blocks.

/// Fenced code block as seen by a processor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeBlock<'a> {
    /// First word of the fence info string, e.g. `excalidraw`.
    pub language: &'a str,
    /// Raw text between the fences, including the trailing newline.
    pub source: &'a str,
    /// Position among all fenced blocks of the document, counting from zero.
    pub index: usize,
}

impl CodeBlock<'_> {
    /// Copy the block out for use after rendering.
    #[must_use]
    pub fn extract(&self) -> ExtractedCodeBlock {
        ExtractedCodeBlock {
            index: self.index,
            source: self.source.to_owned(),
        }
    }
}

/// Block claimed by a processor, kept until `post_process`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedCodeBlock {
    pub index: usize,
    pub source: String,
}

/// Handler for fenced code blocks of particular languages.
pub trait CodeBlockProcessor {
    /// Claim a block by returning the placeholder markup that stands in for it.
    ///
    /// Returning `None` leaves the block to later processors and finally to
    /// the default code block rendering.
    fn claim(&mut self, block: &CodeBlock<'_>) -> Option<String>;

    /// Replace this processor's placeholders in the finished HTML.
    fn post_process(&mut self, html: &mut String);

    /// Blocks claimed so far.
    fn extracted(&self) -> &[ExtractedCodeBlock];

    /// Problems worth reporting that did not abort rendering.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

/// Language of a fence info string: its first whitespace separated word.
pub(crate) fn fence_language(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("excalidraw"), "excalidraw");
        assert_eq!(fence_language("  excalidraw title=x "), "excalidraw");
        assert_eq!(fence_language("   "), "");
    }

    #[test]
    fn test_extract_copies_index_and_source() {
        let block = CodeBlock {
            language: "excalidraw",
            source: "[[a.excalidraw]]\n",
            index: 3,
        };

        assert_eq!(
            block.extract(),
            ExtractedCodeBlock {
                index: 3,
                source: "[[a.excalidraw]]\n".to_owned(),
            }
        );
    }
}
