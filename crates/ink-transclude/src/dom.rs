//! Minimal element tree used as the render output.

use ink_renderer::escape_html;

/// Child of an [`Element`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Text, escaped on serialization.
    Text(String),
    /// Markup inserted verbatim.
    Raw(String),
}

/// HTML element with classes, attributes, inline style and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a `<div>` with a single class.
    #[must_use]
    pub fn div(class: &str) -> Self {
        Self::new("div").with_class(class)
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Append a child element and return `self`.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append a text child and return `self`.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Append verbatim markup.
    pub fn push_raw(&mut self, markup: impl Into<String>) {
        self.children.push(Node::Raw(markup.into()));
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        lookup(&self.attributes, name)
    }

    /// Attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        upsert(&mut self.attributes, name, value.into());
    }

    /// Remove an attribute. Returns the previous value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let position = self.attributes.iter().position(|(k, _)| k == name)?;
        Some(self.attributes.remove(position).1)
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        lookup(&self.style, property)
    }

    /// Set an inline style property, replacing an existing value in place.
    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        upsert(&mut self.style, property, value.into());
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text and raw markup.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) | Node::Raw(_) => None,
        })
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(element) => element.collect_text(out),
                Node::Text(text) => out.push_str(text),
                Node::Raw(_) => {}
            }
        }
    }

    /// Serialize to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            push_attribute(out, "class", &self.classes.join(" "));
        }
        for (name, value) in &self.attributes {
            push_attribute(out, name, value);
        }
        if !self.style.is_empty() {
            push_attribute(out, "style", &format_style(&self.style));
        }
        out.push('>');

        for child in &self.children {
            match child {
                Node::Element(element) => element.write_html(out),
                Node::Text(text) => out.push_str(&escape_html(text)),
                Node::Raw(markup) => out.push_str(markup),
            }
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Serialize style declarations as `name: value;` pairs.
fn format_style(style: &[(String, String)]) -> String {
    style
        .iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse an inline `style` attribute into declarations.
pub(crate) fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim();
            (!property.is_empty()).then(|| (property.to_owned(), value.trim().to_owned()))
        })
        .collect()
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

fn lookup<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn upsert(pairs: &mut Vec<(String, String)>, name: &str, value: String) {
    match pairs.iter_mut().find(|(k, _)| k == name) {
        Some((_, existing)) => *existing = value,
        None => pairs.push((name.to_owned(), value)),
    }
}
