//! Typed presentation tree.
//!
//! Toasts are rendered into a small element tree instead of markup strings:
//! each [`Element`] has a tag, an ordered class list, attributes, children,
//! and optionally an [`Action`] that runs when the element is activated
//! (clicked). Renderers walk the tree; [`Element::to_markup`] serializes it.

use crate::toast::ToastId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Behaviour wired to an activatable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Action {
    /// Remove the toast with this id
    Remove(ToastId),
}

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    fn text_into(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.text_into(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_activate: Option<Action>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            on_activate: None,
        }
    }

    // ============ Builder ============

    /// Add a class; blank names and duplicates are ignored
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        self.add_class(class.as_ref());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child only when `child` is `Some`
    pub fn child_opt(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn on_activate(mut self, action: Action) -> Self {
        self.on_activate = Some(action);
        self
    }

    // ============ Classes and attributes ============

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        let class = class.trim();
        if !class.is_empty() && !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    // ============ Queries ============

    /// Child elements, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First element in document order (self included) matching `predicate`
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(predicate))
    }

    pub fn find_mut(&mut self, predicate: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if predicate(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(element) = child {
                if let Some(found) = element.find_mut(predicate) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// All elements in document order (self included) matching `predicate`
    pub fn find_all(&self, predicate: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_into(predicate, &mut found);
        found
    }

    fn collect_into<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if predicate(self) {
            out.push(self);
        }
        for child in self.child_elements() {
            child.collect_into(predicate, out);
        }
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|e| e.has_class(class))
    }

    /// Like [`Element::find_by_class`], but never matches `self`
    pub fn find_descendant_by_class(&self, class: &str) -> Option<&Element> {
        self.child_elements()
            .find_map(|child| child.find(&|e| e.has_class(class)))
    }

    pub fn find_all_by_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(&|e| e.has_class(class))
    }

    /// Concatenated text of every descendant text node
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.text_into(&mut out);
        }
        out
    }

    /// Remove the first direct child element matching `predicate`
    pub fn remove_child(&mut self, predicate: &dyn Fn(&Element) -> bool) -> Option<Element> {
        let index = self
            .children
            .iter()
            .position(|child| matches!(child, Node::Element(e) if predicate(e)))?;
        match self.children.remove(index) {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    // ============ Output ============

    /// Serialize as HTML; text and attribute values are escaped
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&escape(text)),
                Node::Element(element) => element.write_markup(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("div")
            .class("outer")
            .child(Element::new("span").class("a").text("Hello"))
            .child(
                Element::new("div")
                    .class("a")
                    .class("b")
                    .text(", ")
                    .child(Element::new("em").text("world")),
            )
    }

    #[test]
    fn test_class_ignores_duplicates_and_blanks() {
        let element = Element::new("div").class("x").class("x").class("  ");
        assert_eq!(element.classes, vec!["x".to_string()]);
    }

    #[test]
    fn test_find_all_by_class_in_document_order() {
        let tree = sample();
        let found = tree.find_all_by_class("a");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].tag, "span");
        assert!(found[1].has_class("b"));
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        assert_eq!(sample().text_content(), "Hello, world");
    }

    #[test]
    fn test_find_mut_allows_class_changes() {
        let mut tree = sample();
        tree.find_mut(&|e| e.tag == "em").unwrap().add_class("loud");
        assert!(tree.find_by_class("loud").is_some());
    }

    #[test]
    fn test_find_descendant_by_class_skips_self() {
        let tree = sample();
        assert!(tree.find_by_class("outer").is_some());
        assert!(tree.find_descendant_by_class("outer").is_none());
        assert_eq!(tree.find_descendant_by_class("a").unwrap().tag, "span");
    }

    #[test]
    fn test_remove_child_only_looks_at_direct_children() {
        let mut tree = sample();
        assert!(tree.remove_child(&|e| e.tag == "em").is_none());
        let removed = tree.remove_child(&|e| e.tag == "span").unwrap();
        assert_eq!(removed.text_content(), "Hello");
        assert_eq!(tree.child_elements().count(), 1);
    }

    #[test]
    fn test_markup_escapes_text_and_attributes() {
        let element = Element::new("div")
            .class("t")
            .attr("data-x", "a\"b")
            .text("<b>&</b>");
        assert_eq!(
            element.to_markup(),
            "<div class=\"t\" data-x=\"a&quot;b\">&lt;b&gt;&amp;&lt;/b&gt;</div>"
        );
    }
}
