//! Markdown renderer with pluggable code block processors.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::code_block::{CodeBlock, CodeBlockProcessor, ExtractedCodeBlock, fence_language};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Warnings generated by processors during rendering.
    pub warnings: Vec<String>,
}

/// Markdown renderer producing HTML.
///
/// Standard markdown is rendered by `pulldown-cmark`. Fenced code blocks are
/// offered to the registered processors first; the first to claim a block
/// replaces it with its placeholder.
pub struct MarkdownRenderer {
    processors: Vec<Box<dyn CodeBlockProcessor>>,
    code_block_index: usize,
    gfm: bool,
}

/// Fenced code block being collected.
struct PendingBlock<'a> {
    info: String,
    source: String,
    events: Vec<Event<'a>>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
            code_block_index: 0,
            gfm: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Add a code block processor.
    ///
    /// # Example
    ///
    /// ```
    /// use ink_renderer::{CodeBlock, CodeBlockProcessor, ExtractedCodeBlock, MarkdownRenderer};
    ///
    /// #[derive(Default)]
    /// struct Shout {
    ///     blocks: Vec<ExtractedCodeBlock>,
    /// }
    ///
    /// impl CodeBlockProcessor for Shout {
    ///     fn claim(&mut self, block: &CodeBlock<'_>) -> Option<String> {
    ///         (block.language == "shout").then(|| {
    ///             self.blocks.push(block.extract());
    ///             format!("<!--shout {}-->", block.index)
    ///         })
    ///     }
    ///
    ///     fn post_process(&mut self, html: &mut String) {
    ///         for block in &self.blocks {
    ///             let loud = format!("<p>{}</p>", block.source.trim().to_uppercase());
    ///             *html = html.replace(&format!("<!--shout {}-->", block.index), &loud);
    ///         }
    ///     }
    ///
    ///     fn extracted(&self) -> &[ExtractedCodeBlock] {
    ///         &self.blocks
    ///     }
    /// }
    ///
    /// let result = MarkdownRenderer::new()
    ///     .with_processor(Shout::default())
    ///     .render_markdown("```shout\nhi\n```");
    /// assert_eq!(result.html, "<p>HI</p>");
    /// ```
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(self, processor: P) -> Self {
        self.with_boxed_processor(Box::new(processor))
    }

    /// Add an already boxed code block processor.
    #[must_use]
    pub fn with_boxed_processor(mut self, processor: Box<dyn CodeBlockProcessor>) -> Self {
        self.processors.push(processor);
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Get all extracted code blocks from all processors.
    pub fn extracted_code_blocks(&self) -> impl Iterator<Item = ExtractedCodeBlock> + '_ {
        self.processors.iter().flat_map(|p| p.extracted()).cloned()
    }

    /// Get all warnings from all processors.
    pub fn processor_warnings(&self) -> impl Iterator<Item = String> + '_ {
        self.processors.iter().flat_map(|p| p.warnings()).cloned()
    }

    /// Render markdown text to HTML.
    ///
    /// Calls `post_process` on all registered processors to replace
    /// placeholders with their final content.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let events = self.route_code_blocks(parser);

        let mut html = String::with_capacity(markdown.len() * 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        for processor in &mut self.processors {
            processor.post_process(&mut html);
        }

        RenderResult {
            html,
            warnings: self.processor_warnings().collect(),
        }
    }

    /// Replace fenced code blocks claimed by a processor with raw HTML events.
    fn route_code_blocks<'a, I>(&mut self, events: I) -> Vec<Event<'a>>
    where
        I: Iterator<Item = Event<'a>>,
    {
        let mut output = Vec::new();
        let mut pending: Option<PendingBlock<'a>> = None;

        for event in events {
            if let Some(mut block) = pending.take() {
                match event {
                    Event::End(TagEnd::CodeBlock) => {
                        block.events.push(event);
                        self.finish_block(block, &mut output);
                    }
                    Event::Text(ref text) => {
                        block.source.push_str(text);
                        block.events.push(event);
                        pending = Some(block);
                    }
                    _ => {
                        block.events.push(event);
                        pending = Some(block);
                    }
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref info))) => {
                    pending = Some(PendingBlock {
                        info: info.to_string(),
                        source: String::new(),
                        events: vec![event],
                    });
                }
                _ => output.push(event),
            }
        }

        // Unterminated block: render as-is
        if let Some(block) = pending {
            output.extend(block.events);
        }

        output
    }

    fn finish_block<'a>(&mut self, block: PendingBlock<'a>, output: &mut Vec<Event<'a>>) {
        let index = self.code_block_index;
        self.code_block_index += 1;

        let code_block = CodeBlock {
            language: fence_language(&block.info),
            source: &block.source,
            index,
        };
        if !code_block.language.is_empty() {
            let claimed = self
                .processors
                .iter_mut()
                .find_map(|processor| processor.claim(&code_block));
            if let Some(placeholder) = claimed {
                output.push(Event::Html(CowStr::from(placeholder)));
                return;
            }
        }

        output.extend(block.events);
    }
}
