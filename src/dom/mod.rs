//! In-memory document tree.
//!
//! The page runtime keeps the hosted markup in an arena of [`Element`]s
//! addressed by [`ElementId`]. Every behavior component reads and mutates the
//! same document: classes, inline style, text and form values.
//!
//! Removing an element only detaches it from its parent; its id stays valid
//! and [`Document::is_connected`] reports `false` afterwards. The arena never
//! reclaims slots, so removed elements stay in memory for the document's
//! lifetime.

pub mod css;
pub mod parser;

use std::collections::HashMap;

use css::InlineStyle;

/// Handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single element with its attributes, inline style and direct text.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub style: InlineStyle,
    pub text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: HashMap::new(),
            style: InlineStyle::default(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut list: Vec<&str> = self.classes().collect();
        list.push(class);
        let joined = list.join(" ");
        self.set_attr("class", joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let joined = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("class", joined);
    }

    /// Toggle `class`, returning whether it is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    /// Whether this is a form control that carries a submittable value.
    pub fn is_form_field(&self) -> bool {
        match self.tag.as_str() {
            "textarea" | "select" => self.has_attr("name"),
            "input" => {
                self.has_attr("name")
                    && !matches!(self.attr("type"), Some("submit" | "button" | "reset"))
            }
            _ => false,
        }
    }

    /// Current value of a form control (`value` attribute, or text for `<textarea>`).
    pub fn field_value(&self) -> &str {
        if self.tag == "textarea" {
            &self.text
        } else {
            self.attr("value").unwrap_or_default()
        }
    }

    pub fn set_field_value(&mut self, value: impl Into<String>) {
        if self.tag == "textarea" {
            self.text = value.into();
        } else {
            self.set_attr("value", value);
        }
    }
}

/// Arena-backed document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: ElementId,
    pub title: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty `<html>` document with `<head>` and `<body>`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Element::new("html")],
            root: ElementId(0),
            title: String::new(),
        };
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.append_child(doc.root, head);
        doc.append_child(doc.root, body);
        doc
    }

    /// A document whose root element is `root_tag` and nothing else.
    pub(crate) fn with_root(root_tag: &str) -> Self {
        Self {
            nodes: vec![Element::new(root_tag)],
            root: ElementId(0),
            title: String::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Panics if `id` was not created by this document.
    pub fn element(&self, id: ElementId) -> &Element {
        &self.nodes[id.0]
    }

    /// Panics if `id` was not created by this document.
    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Element::new(tag));
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Detach `id` from the tree. Returns `false` if it was not attached.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.root {
            return false;
        }
        self.detach(id)
    }

    fn detach(&mut self, id: ElementId) -> bool {
        let Some(parent) = self.nodes[id.0].parent.take() else {
            return false;
        };
        self.nodes[parent.0].children.retain(|c| *c != id);
        true
    }

    /// Whether `id` is reachable from the document root.
    pub fn is_connected(&self, id: ElementId) -> bool {
        let mut cur = id;
        loop {
            if cur == self.root {
                return true;
            }
            match self.nodes[cur.0].parent {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    /// Pre-order descendants of `scope` (excluding `scope` itself).
    pub fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    /// All connected elements matching `pred`, in document order.
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|id| pred(&self.nodes[id.0]))
            .collect()
    }

    /// First connected element matching `pred`, in document order.
    pub fn find_first(&self, pred: impl Fn(&Element) -> bool) -> Option<ElementId> {
        self.find_in(self.root, pred)
    }

    /// First element inside `scope` (inclusive) matching `pred`.
    pub fn find_in(&self, scope: ElementId, pred: impl Fn(&Element) -> bool) -> Option<ElementId> {
        std::iter::once(scope)
            .chain(self.descendants(scope))
            .find(|id| pred(&self.nodes[id.0]))
    }

    /// `id` itself or its nearest ancestor matching `pred`.
    pub fn closest(&self, id: ElementId, pred: impl Fn(&Element) -> bool) -> Option<ElementId> {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if pred(&self.nodes[c.0]) {
                return Some(c);
            }
            cur = self.nodes[c.0].parent;
        }
        None
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.find_first(|el| el.id() == Some(id))
    }

    pub fn elements_by_class(&self, class: &str) -> Vec<ElementId> {
        self.find_all(|el| el.has_class(class))
    }

    pub fn elements_by_tag(&self, tag: &str) -> Vec<ElementId> {
        self.find_all(|el| el.tag == tag)
    }

    pub fn head(&self) -> Option<ElementId> {
        self.find_first(|el| el.tag == "head")
    }

    pub fn body(&self) -> Option<ElementId> {
        self.find_first(|el| el.tag == "body")
    }

    /// Submittable fields of `form`, in document order.
    pub fn form_fields(&self, form: ElementId) -> Vec<ElementId> {
        self.descendants(form)
            .into_iter()
            .filter(|id| self.nodes[id.0].is_form_field())
            .collect()
    }

    /// Field named `name` inside `form`.
    pub fn form_field(&self, form: ElementId, name: &str) -> Option<ElementId> {
        self.form_fields(form)
            .into_iter()
            .find(|id| self.nodes[id.0].attr("name") == Some(name))
    }

    /// Concatenated text of `id` and all its descendants.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut buf = String::new();
        for el in std::iter::once(id).chain(self.descendants(id)) {
            let text = self.nodes[el.0].text.trim();
            if text.is_empty() {
                continue;
            }
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(text);
        }
        buf
    }

    /// Number of connected elements.
    pub fn node_count(&self) -> usize {
        1 + self.descendants(self.root).len()
    }
}
