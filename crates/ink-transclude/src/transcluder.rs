//! Resolution and rendering of a single transclusion block.
//!
//! Every failure is rendered in place as an error block; nothing escapes to
//! the caller as an `Err`.

use std::sync::Arc;

use ink_vault::{Entry, Vault, VaultError, VaultErrorKind, VaultFile};

use crate::consts::{DEFAULT_WIDTH, ERROR_CLASS, FILE_EXTENSION, SVG_CLASS};
use crate::container::Container;
use crate::convert::VectorImageConverter;
use crate::dom::Element;
use crate::error::TransclusionError;
use crate::reference::Reference;
use crate::scene::SceneExporter;

/// Instruction shown above every transclusion error.
const USAGE_HINT: &str = "Please provide a link to an excalidraw file: [[file.excalidraw]]";

/// Settings for transclusion rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransclusionSettings {
    /// Width used when a reference has no size directive.
    pub default_width: String,
}

impl Default for TransclusionSettings {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_WIDTH.to_owned(),
        }
    }
}

/// How an asynchronous render ended.
#[derive(Debug)]
pub enum RenderOutcome {
    /// The drawing was committed to the container.
    Rendered,
    /// An error block was committed to the container.
    Failed(TransclusionError),
    /// Nothing was committed: the container was detached or a newer render
    /// started before this one finished.
    Discarded,
}

/// Renders transclusion blocks into drawings.
#[derive(Clone)]
pub struct Transcluder {
    vault: Arc<dyn Vault>,
    converter: Arc<dyn VectorImageConverter>,
    settings: TransclusionSettings,
}

impl Transcluder {
    #[must_use]
    pub fn new(
        vault: Arc<dyn Vault>,
        converter: Arc<dyn VectorImageConverter>,
        settings: TransclusionSettings,
    ) -> Self {
        Self {
            vault,
            converter,
            settings,
        }
    }

    /// Create a transcluder using the built-in [`SceneExporter`].
    #[must_use]
    pub fn with_scene_exporter(vault: Arc<dyn Vault>, settings: TransclusionSettings) -> Self {
        Self::new(vault, Arc::new(SceneExporter::new()), settings)
    }

    #[must_use]
    pub fn settings(&self) -> &TransclusionSettings {
        &self.settings
    }

    /// Render `source` into `container`.
    ///
    /// The reference is parsed and validated before the first await point; the
    /// file read then runs on the blocking pool. The result is committed only
    /// if the container is still attached and no newer render has started.
    pub async fn render(&self, source: &str, container: &Container) -> RenderOutcome {
        let token = container.begin_render();

        let result = match self.resolve(source) {
            Ok((reference, file)) => {
                let path = file.path.clone();
                match self.read_in_background(file).await {
                    Ok(content) => self.build(&reference, &content),
                    Err(e) => Err(read_failed(path, e)),
                }
            }
            Err(err) => Err(err),
        };

        let (element, outcome) = match result {
            Ok(element) => (element, RenderOutcome::Rendered),
            Err(err) => (error_block(source, &err), RenderOutcome::Failed(err)),
        };

        if container.commit(token, element) {
            log_outcome(&outcome);
            outcome
        } else {
            tracing::debug!("Discarded transclusion render");
            RenderOutcome::Discarded
        }
    }

    /// Render `source` synchronously into a detached block.
    #[must_use]
    pub fn render_blocking(&self, source: &str) -> Element {
        self.transclude(source)
            .unwrap_or_else(|err| error_block(source, &err))
    }

    /// Render `source` synchronously, returning the failure instead of an
    /// error block.
    ///
    /// # Errors
    ///
    /// Returns the [`TransclusionError`] that the error block would display.
    pub fn transclude(&self, source: &str) -> Result<Element, TransclusionError> {
        let (reference, file) = self.resolve(source)?;
        let content = self
            .vault
            .read(&file)
            .map_err(|e| read_failed(file.path.clone(), e))?;
        let result = self.build(&reference, &content);
        match &result {
            Ok(_) => tracing::debug!(path = %reference.path, "Rendered transclusion"),
            Err(err) => tracing::debug!(error = %err, "Transclusion failed"),
        }
        result
    }

    /// Parse the reference and check the target is an existing drawing.
    fn resolve(&self, source: &str) -> Result<(Reference, VaultFile), TransclusionError> {
        let reference = Reference::parse(source, &self.settings.default_width)?;

        let file = self
            .vault
            .entry(&reference.path)
            .and_then(Entry::into_file)
            .ok_or_else(|| TransclusionError::FileNotFound {
                path: reference.path.clone(),
            })?;

        if file.extension != FILE_EXTENSION {
            return Err(TransclusionError::WrongExtension {
                extension: file.extension,
            });
        }

        Ok((reference, file))
    }

    async fn read_in_background(&self, file: VaultFile) -> Result<String, VaultError> {
        let vault = Arc::clone(&self.vault);
        let path = file.path.clone();
        match tokio::task::spawn_blocking(move || vault.read(&file)).await {
            Ok(result) => result,
            Err(e) => Err(VaultError::new(VaultErrorKind::Other)
                .with_path(path)
                .with_source(e)),
        }
    }

    fn build(&self, reference: &Reference, content: &str) -> Result<Element, TransclusionError> {
        let mut image = self
            .converter
            .convert(content)
            .ok_or(TransclusionError::ParseError)?;
        image.apply_size(reference);

        Ok(Element::div(SVG_CLASS).with_child(image.into_element()))
    }
}

impl std::fmt::Debug for Transcluder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcluder")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Build the in-place error block for a failed transclusion.
#[must_use]
pub fn error_block(source: &str, err: &TransclusionError) -> Element {
    Element::div(ERROR_CLASS)
        .with_child(Element::new("p").with_text(USAGE_HINT))
        .with_child(Element::new("p").with_text(err.to_string()))
        .with_child(Element::new("p").with_text(source))
}

fn read_failed(path: String, source: VaultError) -> TransclusionError {
    tracing::warn!(path = %path, error = %source, "Failed to read drawing");
    TransclusionError::ReadFailed { path, source }
}

fn log_outcome(outcome: &RenderOutcome) {
    match outcome {
        RenderOutcome::Rendered => tracing::debug!("Rendered transclusion"),
        RenderOutcome::Failed(err) => tracing::debug!(error = %err, "Transclusion failed"),
        RenderOutcome::Discarded => {}
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::svg::VectorImage;

    struct FixedConverter(Option<&'static str>);

    impl VectorImageConverter for FixedConverter {
        fn convert(&self, _content: &str) -> Option<VectorImage> {
            self.0.and_then(VectorImage::parse)
        }
    }

    struct EmptyVault;

    impl Vault for EmptyVault {
        fn entry(&self, _path: &str) -> Option<Entry> {
            None
        }

        fn read(&self, file: &VaultFile) -> Result<String, VaultError> {
            Err(VaultError::not_found(file.path.clone()))
        }

        fn create(&self, path: &str, _content: &str) -> Result<VaultFile, VaultError> {
            Err(VaultError::new(VaultErrorKind::Other).with_path(path))
        }

        fn create_folder(&self, path: &str) -> Result<ink_vault::VaultFolder, VaultError> {
            Err(VaultError::new(VaultErrorKind::Other).with_path(path))
        }
    }

    #[test]
    fn test_error_block_structure() {
        let block = error_block("[[x]]", &TransclusionError::MissingReference);

        assert_eq!(
            block.to_html(),
            "<div class=\"excalidraw-error\">\
             <p>Please provide a link to an excalidraw file: [[file.excalidraw]]</p>\
             <p>No link to file found in codeblock.</p>\
             <p>[[x]]</p></div>"
        );
    }

    #[test]
    fn test_missing_file_renders_error_block() {
        let transcluder = Transcluder::new(
            Arc::new(EmptyVault),
            Arc::new(FixedConverter(Some("<svg/>"))),
            TransclusionSettings::default(),
        );

        let block = transcluder.render_blocking("[[gone.excalidraw]]");

        assert!(block.has_class(ERROR_CLASS));
        assert!(
            block
                .text_content()
                .contains("File does not exist. gone.excalidraw")
        );
    }

    #[test]
    fn test_default_settings() {
        assert_eq!(TransclusionSettings::default().default_width, "400");
    }
}
