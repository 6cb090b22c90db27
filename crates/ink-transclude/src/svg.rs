//! Root `<svg>` element of a converted drawing.
//!
//! Only the root element is parsed. Its content is kept verbatim, so sizing a
//! drawing never re-serializes the shapes inside it.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::dom::{Element, parse_style};
use crate::reference::Reference;

/// Vector image produced by a converter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorImage {
    root: Element,
}

impl VectorImage {
    /// Parse SVG markup.
    ///
    /// Returns `None` if the first element isn't `<svg>` or the markup is
    /// malformed.
    #[must_use]
    pub fn parse(markup: &str) -> Option<Self> {
        let mut reader = Reader::from_str(markup);

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let mut root = decode_root(&e)?;
                    let inner_start = usize::try_from(reader.buffer_position()).ok()?;
                    let inner_end = markup.rfind("</svg")?;
                    if inner_end < inner_start {
                        return None;
                    }
                    let inner = &markup[inner_start..inner_end];
                    if !inner.is_empty() {
                        root.push_raw(inner);
                    }
                    return Some(Self { root });
                }
                Ok(Event::Empty(e)) => return decode_root(&e).map(|root| Self { root }),
                Ok(Event::Text(text)) => {
                    if !text.iter().all(u8::is_ascii_whitespace) {
                        return None;
                    }
                }
                Ok(Event::Decl(_) | Event::Comment(_) | Event::DocType(_) | Event::PI(_)) => {}
                Ok(_) | Err(_) => return None,
            }
        }
    }

    /// Wrap an already built `<svg>` element.
    #[must_use]
    pub(crate) fn from_element(root: Element) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.root.attribute(name)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.root.remove_attribute(name)
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.root.style(property)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.root.set_style(property, value);
    }

    /// Size the image for display.
    ///
    /// Intrinsic `width`/`height` attributes are dropped so the inline style
    /// decides the displayed size. The style height is only set when the
    /// reference asks for one; otherwise the aspect ratio is kept.
    pub fn apply_size(&mut self, reference: &Reference) {
        self.remove_attribute("width");
        self.remove_attribute("height");
        self.set_style("width", reference.width.as_str());
        if let Some(height) = &reference.height {
            self.set_style("height", height.as_str());
        }
    }

    /// Serialize back to SVG markup.
    #[must_use]
    pub fn to_markup(&self) -> String {
        self.root.to_html()
    }

    #[must_use]
    pub fn as_element(&self) -> &Element {
        &self.root
    }

    #[must_use]
    pub fn into_element(self) -> Element {
        self.root
    }
}

fn decode_root(e: &BytesStart<'_>) -> Option<Element> {
    if e.local_name().as_ref() != b"svg" {
        return None;
    }

    let mut root = Element::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            Cow::into_owned,
        );

        if key == "style" {
            for (property, value) in parse_style(&value) {
                root.set_style(&property, value);
            }
        } else {
            root.set_attribute(&key, value);
        }
    }
    Some(root)
}

impl std::fmt::Display for VectorImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_markup())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DRAWING: &str = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50" width="100" height="50"><rect x="1" y="2"/></svg>"#;

    fn reference(width: &str, height: Option<&str>) -> Reference {
        Reference {
            path: "a.excalidraw".to_owned(),
            width: width.to_owned(),
            height: height.map(str::to_owned),
        }
    }

    #[test]
    fn test_parse_keeps_attributes_and_content() {
        let image = VectorImage::parse(DRAWING).unwrap();

        assert_eq!(image.attribute("viewBox"), Some("0 0 100 50"));
        assert_eq!(image.attribute("width"), Some("100"));
        assert_eq!(
            image.to_markup(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 50\" width=\"100\" height=\"50\"><rect x=\"1\" y=\"2\"/></svg>"
        );
    }

    #[test]
    fn test_parse_self_closing_root() {
        let image = VectorImage::parse("<svg width=\"1\"/>").unwrap();

        assert_eq!(image.to_markup(), "<svg width=\"1\"></svg>");
    }

    #[test]
    fn test_parse_rejects_non_svg() {
        assert!(VectorImage::parse("<html></html>").is_none());
        assert!(VectorImage::parse("not markup").is_none());
        assert!(VectorImage::parse("").is_none());
    }

    #[test]
    fn test_parse_existing_style() {
        let image = VectorImage::parse("<svg style=\"background: white\"></svg>").unwrap();

        assert_eq!(image.style("background"), Some("white"));
    }

    #[test]
    fn test_apply_size_width_only() {
        let mut image = VectorImage::parse(DRAWING).unwrap();

        image.apply_size(&reference("300", None));

        assert_eq!(image.attribute("width"), None);
        assert_eq!(image.attribute("height"), None);
        assert_eq!(image.style("width"), Some("300"));
        assert_eq!(image.style("height"), None);
        assert!(image.to_markup().starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 50\" style=\"width: 300;\">"));
    }

    #[test]
    fn test_apply_size_width_and_height() {
        let mut image = VectorImage::parse(DRAWING).unwrap();

        image.apply_size(&reference("300", Some("200")));

        assert_eq!(image.style("width"), Some("300"));
        assert_eq!(image.style("height"), Some("200"));
        assert!(image.to_markup().contains("style=\"width: 300; height: 200;\""));
    }
}
