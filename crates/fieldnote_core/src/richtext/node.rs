//! In-memory rich-text tree.
//!
//! # Responsibility
//! - Represent surface content as text and element nodes.
//! - Serialize nodes back to embeddable markup.
//!
//! # Invariants
//! - Serialized output always has balanced tags; void elements never carry
//!   children in output.
//! - Text and attribute values are escaped on output.

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// One node of the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(value) => out.push_str(value),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            Self::Text(value) => out.push_str(&escape_text(value)),
            Self::Element(element) => element.write_markup(out),
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

/// Element node with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Sets or replaces an attribute, keeping first-seen order.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attr("class", classes);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|value| value.split_whitespace().any(|item| item == class))
    }

    pub fn is_void(&self) -> bool {
        is_void_tag(&self.tag)
    }

    /// Copy of tag and attributes without children.
    pub fn shallow_clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attrs: self.attrs.clone(),
            children: Vec::new(),
        }
    }

    /// Serialized markup of this element's children.
    pub fn inner_markup(&self) -> String {
        serialize_nodes(&self.children)
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');
        if self.is_void() {
            return;
        }
        for child in &self.children {
            child.write_markup(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

pub(crate) fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

/// Serializes a node list (for example a detached fragment) to markup.
pub fn serialize_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_markup(&mut out);
    }
    out
}

/// Escapes text content for embedding between tags.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes a double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::{escape_attr, serialize_nodes, Element, Node};

    #[test]
    fn void_elements_serialize_without_closing_tag() {
        let nodes = vec![
            Node::text("a"),
            Element::new("br").into(),
            Element::new("IMG").with_attr("src", "x.png").into(),
        ];
        assert_eq!(serialize_nodes(&nodes), "a<br><img src=\"x.png\">");
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let link = Element::new("a")
            .with_attr("href", "https://example.com/?a=1&b=\"2\"")
            .with_children(vec![Node::text("<tag> & more")]);
        assert_eq!(
            serialize_nodes(&[link.into()]),
            "<a href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\">&lt;tag&gt; &amp; more</a>"
        );
        assert_eq!(escape_attr("plain"), "plain");
    }

    #[test]
    fn add_class_appends_once() {
        let mut img = Element::new("img").with_attr("class", "wide");
        img.add_class("uploaded");
        img.add_class("uploaded");
        assert_eq!(img.attr("class"), Some("wide uploaded"));
        assert!(img.has_class("uploaded"));
    }

    #[test]
    fn text_content_walks_descendants() {
        let node: Node = Element::new("p")
            .with_children(vec![
                Node::text("one "),
                Element::new("b").with_children(vec![Node::text("two")]).into(),
            ])
            .into();
        assert_eq!(node.text_content(), "one two");
    }
}
