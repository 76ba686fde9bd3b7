//! A generic structured-document tree.
//!
//! [`Element`] is the in-memory shape of an XML document: a named node with
//! ordered attributes, ordered children and optional text content. The
//! translator builds and reads this tree; turning it into text (and back)
//! is the job of the parser crate.
//!
//! Element names keep their namespace prefix (`bpmndi:BPMNShape`).
//! [`Element::local_name`] strips it, which lets readers accept both
//! prefixed and unprefixed documents.
//!
//! # Example
//!
//! ```
//! # use transit_core::document::Element;
//! let process = Element::new("bpmn:process")
//!     .with_attribute("id", "order")
//!     .with_child(Element::new("bpmn:task").with_attribute("id", "pack"));
//!
//! assert_eq!(process.local_name(), "process");
//! assert_eq!(process.attribute("id"), Some("order"));
//! assert_eq!(process.children_named("task").count(), 1);
//! ```

use indexmap::IndexMap;

/// A node in a structured document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    /// Creates an element with no attributes, children or text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute (builder style). A later value for the same key wins.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Adds a child element (builder style).
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends every child from the iterator (builder style).
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Sets the text content (builder style).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Appends text content, concatenating with any existing text.
    pub fn push_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// The qualified name, including any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name with any namespace prefix removed.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Children whose local name equals `local`.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children
            .iter()
            .filter(move |child| child.local_name() == local)
    }

    /// The first child whose local name equals `local`.
    pub fn child(&self, local: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.local_name() == local)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }
}

/// Strips a namespace prefix from a qualified name.
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}
