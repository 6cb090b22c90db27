//! SVG export of Excalidraw scenes.
//!
//! Supports the element types a hand-drawn diagram is built from: rectangles,
//! ellipses, diamonds, lines, arrows, freehand strokes and text. Shapes are
//! drawn with clean geometry; the hand-drawn roughness of the editor is not
//! reproduced.

use std::fmt::Write;

use ink_renderer::escape_html;
use serde::Deserialize;

use crate::convert::{VectorImageConverter, looks_like_markup};
use crate::dom::Element;
use crate::svg::VectorImage;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const SCENE_TYPE: &str = "excalidraw";
const DEFAULT_PADDING: f64 = 10.0;
const LINE_HEIGHT: f64 = 1.25;
const ARROWHEAD_LENGTH: f64 = 15.0;
const ARROWHEAD_SPREAD_DEGREES: f64 = 25.0;

/// Default converter: exports scenes, passes SVG markup through.
#[derive(Clone, Copy, Debug)]
pub struct SceneExporter {
    padding: f64,
}

impl Default for SceneExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneExporter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            padding: DEFAULT_PADDING,
        }
    }

    /// Space kept around the drawing, in scene units.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    fn export(&self, scene: &Scene) -> VectorImage {
        let visible: Vec<&SceneElement> = scene
            .elements
            .iter()
            .filter(|element| !element.is_deleted && element.kind != ElementKind::Unsupported)
            .collect();

        let bounds = visible
            .iter()
            .map(|element| element.bounds())
            .reduce(Bounds::union)
            .unwrap_or_default();

        let width = bounds.width() + self.padding * 2.0;
        let height = bounds.height() + self.padding * 2.0;
        let offset = (self.padding - bounds.min_x, self.padding - bounds.min_y);

        let mut root = Element::new("svg");
        root.set_attribute("xmlns", SVG_NAMESPACE);
        root.set_attribute("version", "1.1");
        root.set_attribute("viewBox", format!("0 0 {} {}", num(width), num(height)));
        root.set_attribute("width", num(width));
        root.set_attribute("height", num(height));

        let mut body = String::new();
        if let Some(background) = scene.app_state.background() {
            write!(
                body,
                r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"></rect>"#,
                num(width),
                num(height),
                escape_html(background)
            )
            .unwrap();
        }
        for element in visible {
            element.write_svg(&mut body, offset);
        }
        if !body.is_empty() {
            root.push_raw(body);
        }

        tracing::debug!(
            elements = scene.elements.len(),
            width = %num(width),
            height = %num(height),
            "Exported scene"
        );
        VectorImage::from_element(root)
    }
}

impl VectorImageConverter for SceneExporter {
    fn convert(&self, content: &str) -> Option<VectorImage> {
        if looks_like_markup(content) {
            return VectorImage::parse(content);
        }

        let scene: Scene = match serde_json::from_str(content) {
            Ok(scene) => scene,
            Err(e) => {
                tracing::debug!(error = %e, "Drawing content is not a scene");
                return None;
            }
        };
        if scene.kind != SCENE_TYPE {
            tracing::debug!(kind = %scene.kind, "Unexpected scene type");
            return None;
        }

        Some(self.export(&scene))
    }
}

#[derive(Debug, Deserialize)]
struct Scene {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    elements: Vec<SceneElement>,
    #[serde(default, rename = "appState")]
    app_state: AppState,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppState {
    #[serde(default)]
    view_background_color: Option<String>,
    #[serde(default)]
    export_background: Option<bool>,
}

impl AppState {
    fn background(&self) -> Option<&str> {
        if self.export_background == Some(false) {
            return None;
        }
        self.view_background_color
            .as_deref()
            .filter(|color| !is_transparent(color))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ElementKind {
    Rectangle,
    Ellipse,
    Diamond,
    Line,
    Arrow,
    Freedraw,
    Text,
    #[serde(other)]
    Unsupported,
}

impl ElementKind {
    fn is_linear(self) -> bool {
        matches!(self, Self::Line | Self::Arrow | Self::Freedraw)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneElement {
    #[serde(rename = "type")]
    kind: ElementKind,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    /// Rotation in radians around the element center.
    #[serde(default)]
    angle: f64,
    #[serde(default = "default_stroke_color")]
    stroke_color: String,
    #[serde(default = "default_background_color")]
    background_color: String,
    #[serde(default = "default_stroke_width")]
    stroke_width: f64,
    #[serde(default)]
    stroke_style: Option<String>,
    /// Opacity from 0 to 100.
    #[serde(default = "default_opacity")]
    opacity: f64,
    /// Points relative to `(x, y)`, for linear elements.
    #[serde(default)]
    points: Vec<[f64; 2]>,
    #[serde(default)]
    text: String,
    #[serde(default = "default_font_size")]
    font_size: f64,
    #[serde(default)]
    font_family: Option<u8>,
    #[serde(default)]
    text_align: Option<String>,
    #[serde(default)]
    is_deleted: bool,
}

fn default_stroke_color() -> String {
    "#000000".to_owned()
}

fn default_background_color() -> String {
    "transparent".to_owned()
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    100.0
}

fn default_font_size() -> f64 {
    20.0
}

impl SceneElement {
    /// Outline in element-local coordinates, before rotation.
    fn outline(&self) -> Vec<(f64, f64)> {
        if self.kind.is_linear() && !self.points.is_empty() {
            self.points.iter().map(|[x, y]| (*x, *y)).collect()
        } else {
            vec![
                (0.0, 0.0),
                (self.width, 0.0),
                (self.width, self.height),
                (0.0, self.height),
            ]
        }
    }

    /// Rotation center in element-local coordinates.
    fn local_center(&self) -> (f64, f64) {
        if self.kind.is_linear() && !self.points.is_empty() {
            let bounds = Bounds::of(self.outline());
            (
                (bounds.min_x + bounds.max_x) / 2.0,
                (bounds.min_y + bounds.max_y) / 2.0,
            )
        } else {
            (self.width / 2.0, self.height / 2.0)
        }
    }

    /// Scene-space bounding box, including rotation.
    fn bounds(&self) -> Bounds {
        let center = self.local_center();
        Bounds::of(
            self.outline()
                .into_iter()
                .map(|point| rotate(point, center, self.angle))
                .map(|(x, y)| (x + self.x, y + self.y)),
        )
    }

    fn write_svg(&self, out: &mut String, offset: (f64, f64)) {
        write!(
            out,
            r#"<g transform="translate({} {})"#,
            num(self.x + offset.0),
            num(self.y + offset.1)
        )
        .unwrap();
        if self.angle != 0.0 {
            let (cx, cy) = self.local_center();
            write!(
                out,
                " rotate({} {} {})",
                num(self.angle.to_degrees()),
                num(cx),
                num(cy)
            )
            .unwrap();
        }
        out.push('"');
        if self.opacity < 100.0 {
            write!(out, r#" opacity="{}""#, num(self.opacity.max(0.0) / 100.0)).unwrap();
        }
        out.push('>');

        match self.kind {
            ElementKind::Rectangle => write!(
                out,
                r#"<rect x="0" y="0" width="{}" height="{}"{}></rect>"#,
                num(self.width),
                num(self.height),
                self.paint(true)
            )
            .unwrap(),
            ElementKind::Ellipse => write!(
                out,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}"{}></ellipse>"#,
                num(self.width / 2.0),
                num(self.height / 2.0),
                num(self.width / 2.0),
                num(self.height / 2.0),
                self.paint(true)
            )
            .unwrap(),
            ElementKind::Diamond => {
                let (w, h) = (self.width, self.height);
                let points = [(w / 2.0, 0.0), (w, h / 2.0), (w / 2.0, h), (0.0, h / 2.0)];
                write!(
                    out,
                    r#"<polygon points="{}"{}></polygon>"#,
                    format_points(&points),
                    self.paint(true)
                )
                .unwrap();
            }
            ElementKind::Line | ElementKind::Freedraw => self.write_polyline(out),
            ElementKind::Arrow => {
                self.write_polyline(out);
                self.write_arrowhead(out);
            }
            ElementKind::Text => self.write_text(out),
            ElementKind::Unsupported => {}
        }

        out.push_str("</g>");
    }

    fn write_polyline(&self, out: &mut String) {
        write!(
            out,
            r#"<polyline points="{}" stroke-linecap="round" stroke-linejoin="round"{}></polyline>"#,
            format_points(&self.outline()),
            self.paint(false)
        )
        .unwrap();
    }

    fn write_arrowhead(&self, out: &mut String) {
        let [.., from, to] = self.points.as_slice() else {
            return;
        };
        let direction = (from[1] - to[1]).atan2(from[0] - to[0]);
        let spread = ARROWHEAD_SPREAD_DEGREES.to_radians();
        let wing = |angle: f64| {
            (
                to[0] + ARROWHEAD_LENGTH * angle.cos(),
                to[1] + ARROWHEAD_LENGTH * angle.sin(),
            )
        };
        let points = [wing(direction + spread), (to[0], to[1]), wing(direction - spread)];
        write!(
            out,
            r#"<polyline points="{}" stroke-linecap="round" stroke-linejoin="round"{}></polyline>"#,
            format_points(&points),
            self.paint(false)
        )
        .unwrap();
    }

    fn write_text(&self, out: &mut String) {
        let (anchor, x) = match self.text_align.as_deref() {
            Some("center") => ("middle", self.width / 2.0),
            Some("right") => ("end", self.width),
            _ => ("start", 0.0),
        };
        let mut baseline = self.font_size;

        for line in self.text.lines() {
            write!(
                out,
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" fill="{}" text-anchor="{anchor}">{}</text>"#,
                num(x),
                num(baseline),
                font_family(self.font_family),
                num(self.font_size),
                escape_html(&self.stroke_color),
                escape_html(line)
            )
            .unwrap();
            baseline += self.font_size * LINE_HEIGHT;
        }
    }

    /// Stroke and fill attributes.
    fn paint(&self, filled: bool) -> String {
        let fill = if filled && !is_transparent(&self.background_color) {
            escape_html(&self.background_color)
        } else {
            "none".to_owned()
        };
        let mut paint = format!(
            r#" stroke="{}" stroke-width="{}" fill="{fill}""#,
            escape_html(&self.stroke_color),
            num(self.stroke_width)
        );
        match self.stroke_style.as_deref() {
            Some("dashed") => paint.push_str(r#" stroke-dasharray="8 8""#),
            Some("dotted") => paint.push_str(r#" stroke-dasharray="1.5 6""#),
            _ => {}
        }
        paint
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    fn of(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        points
            .into_iter()
            .map(|(x, y)| Self {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            })
            .reduce(Self::union)
            .unwrap_or_default()
    }

    fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

fn rotate((x, y): (f64, f64), (cx, cy): (f64, f64), angle: f64) -> (f64, f64) {
    if angle == 0.0 {
        return (x, y);
    }
    let (sin, cos) = angle.sin_cos();
    let (dx, dy) = (x - cx, y - cy);
    (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
}

fn is_transparent(color: &str) -> bool {
    color.is_empty() || color.eq_ignore_ascii_case("transparent")
}

fn font_family(id: Option<u8>) -> &'static str {
    match id {
        Some(2) => "Helvetica, Segoe UI Emoji",
        Some(3) => "Cascadia, Segoe UI Emoji",
        _ => "Virgil, Segoe UI Emoji",
    }
}

fn format_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{},{}", num(*x), num(*y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a coordinate with at most two decimals.
fn num(value: f64) -> String {
    // Adding zero turns -0 into 0
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn convert(content: &str) -> Option<VectorImage> {
        SceneExporter::new().convert(content)
    }

    fn scene(elements: &str) -> String {
        format!(
            r##"{{"type":"excalidraw","version":2,"elements":[{elements}],"appState":{{"viewBackgroundColor":"#ffffff"}}}}"##
        )
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(10.504), "10.5");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_blank_scene() {
        let image = convert(&scene("")).unwrap();

        assert_eq!(image.attribute("width"), Some("20"));
        assert_eq!(image.attribute("height"), Some("20"));
        assert_eq!(image.attribute("viewBox"), Some("0 0 20 20"));
        assert!(image.to_markup().contains(r##"fill="#ffffff""##));
    }

    #[test]
    fn test_rectangle_with_padding() {
        let image = convert(&scene(
            r##"{"type":"rectangle","x":100,"y":50,"width":200,"height":80,"strokeColor":"#1e1e1e","backgroundColor":"#a5d8ff"}"##,
        ))
        .unwrap();

        assert_eq!(image.attribute("width"), Some("220"));
        assert_eq!(image.attribute("height"), Some("100"));
        let markup = image.to_markup();
        assert!(markup.contains(r#"<g transform="translate(10 10)">"#), "{markup}");
        assert!(markup.contains(
            r##"<rect x="0" y="0" width="200" height="80" stroke="#1e1e1e" stroke-width="1" fill="#a5d8ff"></rect>"##
        ));
    }

    #[test]
    fn test_deleted_and_unsupported_elements_skipped() {
        let image = convert(&scene(
            r#"{"type":"rectangle","x":0,"y":0,"width":10,"height":10},
               {"type":"ellipse","x":500,"y":500,"width":10,"height":10,"isDeleted":true},
               {"type":"image","x":900,"y":900,"width":10,"height":10}"#,
        ))
        .unwrap();

        assert_eq!(image.attribute("width"), Some("30"));
        assert!(!image.to_markup().contains("<ellipse"));
    }

    #[test]
    fn test_rotation_and_opacity() {
        let image = convert(&scene(
            r#"{"type":"rectangle","x":0,"y":0,"width":100,"height":100,"angle":1.5707963267948966,"opacity":50}"#,
        ))
        .unwrap();

        let markup = image.to_markup();
        assert!(markup.contains("rotate(90 50 50)"), "{markup}");
        assert!(markup.contains(r#"opacity="0.5""#));
        assert_eq!(image.attribute("width"), Some("120"));
    }

    #[test]
    fn test_arrow_has_head() {
        let image = convert(&scene(
            r#"{"type":"arrow","x":0,"y":0,"width":100,"height":0,"points":[[0,0],[100,0]]}"#,
        ))
        .unwrap();

        let markup = image.to_markup();
        assert_eq!(markup.matches("<polyline").count(), 2);
        assert!(markup.contains(r#"points="0,0 100,0""#));
    }

    #[test]
    fn test_text_lines_escaped() {
        let image = convert(&scene(
            r#"{"type":"text","x":0,"y":0,"width":50,"height":50,"text":"a < b\nsecond","fontSize":20,"textAlign":"center"}"#,
        ))
        .unwrap();

        let markup = image.to_markup();
        assert!(markup.contains(">a &lt; b</text>"));
        assert!(markup.contains(r#"y="45""#));
        assert!(markup.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_dashed_stroke() {
        let image = convert(&scene(
            r#"{"type":"diamond","x":0,"y":0,"width":40,"height":20,"strokeStyle":"dashed"}"#,
        ))
        .unwrap();

        let markup = image.to_markup();
        assert!(markup.contains(r#"points="20,0 40,10 20,20 0,10""#));
        assert!(markup.contains(r#"stroke-dasharray="8 8""#));
    }

    #[test]
    fn test_transparent_background_omitted() {
        let content = r#"{"type":"excalidraw","elements":[],"appState":{"viewBackgroundColor":"transparent"}}"#;

        let image = convert(content).unwrap();

        assert!(!image.to_markup().contains("<rect"));
    }

    #[test]
    fn test_svg_content_passes_through() {
        let image = convert("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"7\"><g/></svg>").unwrap();

        assert_eq!(image.attribute("width"), Some("7"));
    }

    #[test]
    fn test_invalid_content() {
        assert!(convert("not json").is_none());
        assert!(convert("{\"type\":\"other\",\"elements\":[]}").is_none());
        assert!(convert("{\"elements\":[]}").is_none());
        assert!(convert("<html></html>").is_none());
    }
}
