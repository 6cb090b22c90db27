//! Conversion of drawing content into a vector image.

use crate::svg::VectorImage;

/// Converts the text content of a drawing file into a vector image.
///
/// Implementations must not touch the vault; they receive content that was
/// already read. Returning `None` means the content is not a drawing.
pub trait VectorImageConverter: Send + Sync {
    fn convert(&self, content: &str) -> Option<VectorImage>;
}

/// Accepts content that already is SVG markup.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgPassthrough;

impl VectorImageConverter for SvgPassthrough {
    fn convert(&self, content: &str) -> Option<VectorImage> {
        VectorImage::parse(content)
    }
}

/// Returns `true` if content looks like SVG markup rather than a JSON scene.
pub(crate) fn looks_like_markup(content: &str) -> bool {
    content.trim_start().starts_with('<')
}
