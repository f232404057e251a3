//! In-memory page the renderer writes into.
//!
//! The body is a small tree of [`Node`]s. Elements that UI behaviors need to
//! reach are stored once in an id-keyed registry and referenced from the tree,
//! so class or text changes made after rendering show up in [`Document::to_html`].

use std::collections::{BTreeMap, BTreeSet};

/// Which attribute identifies a `<meta>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub attr: MetaAttr,
    pub key: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Escaped text
    Text(String),
    /// Anonymous element
    Tag(Element),
    /// Element stored in the document registry under this id
    Ref(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    /// Text rendered before the children
    pub text: String,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        for c in class.split_whitespace() {
            self.classes.insert(c.to_string());
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) -> bool {
        self.classes.insert(class.to_string())
    }

    pub fn remove_class(&mut self, class: &str) -> bool {
        self.classes.remove(class)
    }

    /// Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if !self.classes.remove(class) {
            self.classes.insert(class.to_string());
            return true;
        }
        false
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Tag(element)
    }
}

/// Body markup together with the addressable elements it references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    pub nodes: Vec<Node>,
    pub elements: BTreeMap<String, Element>,
}

impl Markup {
    /// Register an addressable element and get a node referring to it.
    pub fn register(&mut self, id: impl Into<String>, element: Element) -> Node {
        let id = id.into();
        self.elements.insert(id.clone(), element);
        Node::Ref(id)
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub lang: String,
    meta: Vec<MetaTag>,
    body: Markup,
    service_workers: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lang: String::new(),
            meta: Vec::new(),
            body: Markup::default(),
            service_workers: Vec::new(),
        }
    }

    pub fn meta(&self, attr: MetaAttr, key: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|m| m.attr == attr && m.key == key)
            .map(|m| m.content.as_str())
    }

    pub fn meta_tags(&self) -> &[MetaTag] {
        &self.meta
    }

    /// Create or update a `<meta>` tag. Empty content leaves the head untouched.
    pub fn set_meta(&mut self, attr: MetaAttr, key: &str, content: &str) {
        if content.is_empty() {
            return;
        }
        match self.meta.iter_mut().find(|m| m.attr == attr && m.key == key) {
            Some(existing) => existing.content = content.to_string(),
            None => self.meta.push(MetaTag {
                attr,
                key: key.to_string(),
                content: content.to_string(),
            }),
        }
    }

    /// Replace the `#app` contents.
    pub fn set_body(&mut self, markup: Markup) {
        self.body = markup;
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.body.elements.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.elements.get_mut(id)
    }

    pub fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.body
            .elements
            .iter()
            .filter(|(_, e)| e.has_class(class))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn register_service_worker(&mut self, scope: impl Into<String>) {
        self.service_workers.push(scope.into());
    }

    pub fn service_workers(&self) -> &[String] {
        &self.service_workers
    }

    /// Drop every active service worker registration, returning how many there were.
    pub fn unregister_service_workers(&mut self) -> usize {
        let count = self.service_workers.len();
        self.service_workers.clear();
        count
    }

    pub fn body_html(&self) -> String {
        let mut out = String::new();
        for node in &self.body.nodes {
            self.write_node(&mut out, node, None);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        out.push_str(&format!("<html lang=\"{}\">\n<head>\n", escape_html(&self.lang)));
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        for tag in &self.meta {
            out.push_str(&format!(
                "<meta {}=\"{}\" content=\"{}\">\n",
                tag.attr.as_str(),
                escape_html(&tag.key),
                escape_html(&tag.content)
            ));
        }
        out.push_str("</head>\n<body>\n<div id=\"app\">");
        out.push_str(&self.body_html());
        out.push_str("</div>\n</body>\n</html>\n");
        out
    }

    fn write_node(&self, out: &mut String, node: &Node, id: Option<&str>) {
        match node {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Tag(element) => self.write_element(out, element, id),
            Node::Ref(ref_id) => {
                if let Some(element) = self.body.elements.get(ref_id) {
                    self.write_element(out, element, Some(ref_id));
                }
            }
        }
    }

    fn write_element(&self, out: &mut String, element: &Element, id: Option<&str>) {
        out.push('<');
        out.push_str(&element.tag);
        if let Some(id) = id {
            out.push_str(&format!(" id=\"{}\"", escape_html(id)));
        }
        if !element.classes.is_empty() {
            let classes: Vec<&str> = element.classes.iter().map(String::as_str).collect();
            out.push_str(&format!(" class=\"{}\"", escape_html(&classes.join(" "))));
        }
        for (name, value) in &element.attrs {
            out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        out.push('>');
        out.push_str(&escape_html(&element.text));
        for child in &element.children {
            self.write_node(out, child, None);
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_meta_creates_then_updates() {
        let mut doc = Document::new("Old");
        doc.set_meta(MetaAttr::Name, "description", "first");
        doc.set_meta(MetaAttr::Name, "description", "second");
        doc.set_meta(MetaAttr::Property, "og:title", "Site");
        doc.set_meta(MetaAttr::Name, "keywords", "");

        assert_eq!(doc.meta_tags().len(), 2);
        assert_eq!(doc.meta(MetaAttr::Name, "description"), Some("second"));
        assert_eq!(doc.meta(MetaAttr::Property, "og:title"), Some("Site"));
        assert_eq!(doc.meta(MetaAttr::Name, "og:title"), None);
        assert_eq!(doc.meta(MetaAttr::Name, "keywords"), None);
    }

    #[test]
    fn test_registered_elements_render_current_state() {
        let mut markup = Markup::default();
        let heading = markup.register("title", Element::new("h1").class("glitch").text("Hi"));
        markup.push(Element::new("header").child(heading).into());

        let mut doc = Document::new("t");
        doc.set_body(markup);
        doc.element_mut("title").unwrap().add_class("visible");
        doc.element_mut("title").unwrap().text = "H".to_string();

        assert_eq!(
            doc.body_html(),
            r#"<header><h1 id="title" class="glitch visible">H</h1></header>"#
        );
    }

    #[test]
    fn test_escaping() {
        let mut markup = Markup::default();
        markup.push(
            Element::new("a")
                .attr("href", "#x\"y")
                .text("<b>Tom & Jerry</b>")
                .into(),
        );
        let mut doc = Document::new("A < B");
        doc.lang = "fr".to_string();
        doc.set_body(markup);

        let html = doc.to_html();
        assert!(html.contains("<title>A &lt; B</title>"));
        assert!(html.contains(r##"<a href="#x&quot;y">&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</a>"##));
        assert!(html.contains(r#"<html lang="fr">"#));
    }

    #[test]
    fn test_toggle_class() {
        let mut element = Element::new("ul");
        assert!(element.toggle_class("active"));
        assert!(element.has_class("active"));
        assert!(!element.toggle_class("active"));
        assert!(!element.has_class("active"));
    }

    #[test]
    fn test_service_workers() {
        let mut doc = Document::default();
        doc.register_service_worker("/");
        doc.register_service_worker("/blog/");
        assert_eq!(doc.unregister_service_workers(), 2);
        assert!(doc.service_workers().is_empty());
        assert_eq!(doc.unregister_service_workers(), 0);
    }
}
