//! In-memory document.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::{Document, Element, SelectOption, Selector};

const BODY: usize = 0;

#[derive(Debug, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    value: String,
    text: String,
    disabled: bool,
    options: Vec<SelectOption>,
    parent: Option<usize>,
    children: Vec<usize>,
}

type Arena = Rc<RefCell<Vec<Node>>>;

/// A document tree held in memory, rooted at `<body>`.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Arena,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        let body = Node {
            tag: "body".into(),
            ..Node::default()
        };
        Self {
            nodes: Rc::new(RefCell::new(vec![body])),
        }
    }

    pub fn body(&self) -> MemoryElement {
        MemoryElement {
            nodes: Rc::clone(&self.nodes),
            index: BODY,
        }
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        let body = self.body();
        body.descendants()
            .into_iter()
            .find(|&index| {
                self.nodes.borrow()[index].attributes.get("id").map(String::as_str) == Some(id)
            })
            .map(|index| body.handle(index))
    }

    fn query_selector_all(&self, selector: &str) -> Vec<MemoryElement> {
        self.body().query_selector_all(selector)
    }
}

/// Handle to one node of a [`MemoryDocument`].
#[derive(Clone)]
pub struct MemoryElement {
    nodes: Arena,
    index: usize,
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes = self.nodes.borrow();
        let node = &nodes[self.index];
        f.debug_struct("MemoryElement")
            .field("index", &self.index)
            .field("tag", &node.tag)
            .field("id", &node.attributes.get("id"))
            .finish()
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.nodes, &other.nodes) && self.index == other.index
    }
}

impl MemoryElement {
    /// Create a child element at the end of this element's children.
    ///
    /// A `value` attribute also seeds the control's current value.
    pub fn append(&self, tag: &str, attributes: &[(&str, &str)]) -> MemoryElement {
        let mut nodes = self.nodes.borrow_mut();
        let index = nodes.len();
        let attributes: BTreeMap<String, String> = attributes
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            value: attributes.get("value").cloned().unwrap_or_default(),
            disabled: attributes.contains_key("disabled"),
            attributes,
            parent: Some(self.index),
            ..Node::default()
        });
        nodes[self.index].children.push(index);
        drop(nodes);
        self.handle(index)
    }

    pub fn tag(&self) -> String {
        self.nodes.borrow()[self.index].tag.clone()
    }

    pub fn set_text(&self, text: &str) {
        self.nodes.borrow_mut()[self.index].text = text.to_string();
    }

    /// Simulate user input.
    pub fn set_value(&self, value: &str) {
        self.nodes.borrow_mut()[self.index].value = value.to_string();
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.nodes.borrow()[self.index].style.get(property).cloned()
    }

    pub fn is_disabled(&self) -> bool {
        self.nodes.borrow()[self.index].disabled
    }

    pub fn options(&self) -> Vec<SelectOption> {
        self.nodes.borrow()[self.index].options.clone()
    }

    fn handle(&self, index: usize) -> MemoryElement {
        MemoryElement {
            nodes: Rc::clone(&self.nodes),
            index,
        }
    }

    /// Descendant indices in document order.
    fn descendants(&self) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<usize> = nodes[self.index].children.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            out.push(index);
            stack.extend(nodes[index].children.iter().rev().copied());
        }
        out
    }

    fn with_classes(&self, f: impl FnOnce(&mut Vec<String>)) {
        let mut nodes = self.nodes.borrow_mut();
        let attributes = &mut nodes[self.index].attributes;
        let mut classes: Vec<String> = attributes
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        f(&mut classes);
        attributes.insert("class".into(), classes.join(" "));
    }
}

impl Element for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.nodes.borrow()[self.index].attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.nodes.borrow_mut()[self.index]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn value(&self) -> String {
        self.nodes.borrow()[self.index].value.clone()
    }

    fn text_content(&self) -> String {
        self.nodes.borrow()[self.index].text.clone()
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    fn add_class(&self, class: &str) {
        self.with_classes(|classes| {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, class: &str) {
        self.with_classes(|classes| classes.retain(|c| c != class));
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let style = &mut nodes[self.index].style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    fn set_disabled(&self, disabled: bool) {
        self.nodes.borrow_mut()[self.index].disabled = disabled;
    }

    fn replace_options(&self, options: &[SelectOption]) {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[self.index];
        node.options = options.to_vec();
        node.value = options.first().map(|o| o.value.clone()).unwrap_or_default();
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        let Some(selector) = Selector::parse(selector) else {
            tracing::debug!(selector, "Unsupported selector in memory document");
            return Vec::new();
        };

        let matching: Vec<usize> = {
            let nodes = self.nodes.borrow();
            self.descendants()
                .into_iter()
                .filter(|&index| {
                    let node = &nodes[index];
                    selector.matches(&node.tag, |name| node.attributes.get(name).cloned())
                })
                .collect()
        };

        matching.into_iter().map(|index| self.handle(index)).collect()
    }

    fn is_connected(&self) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = self.index;
        loop {
            if current == BODY {
                return true;
            }
            match nodes[current].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn remove(&self) {
        if self.index == BODY {
            return;
        }
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[self.index].parent.take() {
            nodes[parent].children.retain(|&child| child != self.index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_in_document_order() {
        let doc = MemoryDocument::new();
        let body = doc.body();
        let first = body.append("div", &[("class", "flash-message"), ("id", "a")]);
        first.append("span", &[("class", "flash-message"), ("id", "b")]);
        body.append("div", &[("class", "flash-message"), ("id", "c")]);

        let ids: Vec<_> = doc
            .query_selector_all(".flash-message")
            .iter()
            .filter_map(|e| e.id())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_element_by_id_and_field() {
        let doc = MemoryDocument::new();
        let form = doc.body().append("form", &[("id", "competitionForm")]);
        form.append("input", &[("name", "start_date"), ("value", "2026-05-01")]);

        let form = doc.element_by_id("competitionForm").unwrap();
        assert_eq!(form.tag(), "form");
        assert_eq!(form.field("start_date").unwrap().value(), "2026-05-01");
        assert!(form.field("end_date").is_none());
        assert!(doc.element_by_id("missing").is_none());
    }

    #[test]
    fn test_class_list() {
        let doc = MemoryDocument::new();
        let el = doc.body().append("button", &[("class", "hamburger")]);

        assert!(el.toggle_class("active"));
        assert_eq!(el.attribute("class").as_deref(), Some("hamburger active"));
        assert!(!el.toggle_class("active"));
        assert!(el.has_class("hamburger"));
        assert!(!el.has_class("active"));
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let doc = MemoryDocument::new();
        let outer = doc.body().append("div", &[]);
        let inner = outer.append("p", &[("class", "flash-message")]);

        assert!(inner.is_connected());
        outer.remove();
        assert!(!outer.is_connected());
        assert!(!inner.is_connected());
        assert!(doc.query_selector(".flash-message").is_none());

        // Removing twice is harmless.
        outer.remove();
    }

    #[test]
    fn test_replace_options_resets_value() {
        let doc = MemoryDocument::new();
        let select = doc.body().append("select", &[("id", "club")]);
        select.set_value("old");

        select.replace_options(&[
            SelectOption::placeholder("Select Club"),
            SelectOption::new("A", "A"),
        ]);
        assert_eq!(select.options().len(), 2);
        assert_eq!(select.value(), "");
    }

    #[test]
    fn test_style_clear() {
        let doc = MemoryDocument::new();
        let input = doc.body().append("input", &[]);
        input.set_style("border-color", "#ef4444");
        assert_eq!(input.style("border-color").as_deref(), Some("#ef4444"));
        input.set_style("border-color", "");
        assert!(input.style("border-color").is_none());
    }
}
