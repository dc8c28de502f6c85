//! Document access capability.
//!
//! Every page handler is written against these traits instead of reaching for
//! a global `document`. The browser build implements them over `web-sys`
//! (`crate::web`); [`MemoryDocument`] implements them in memory so handlers
//! run natively in tests.
//!
//! # Architecture
//!
//! - [`Document`]: element lookup by id and selector
//! - [`Element`]: the handful of element operations the handlers need
//! - [`Selector`]: the selector subset understood by the in-memory document
//!
//! # Example
//!
//! ```rust
//! use tamaula_ui::dom::{Document, Element, MemoryDocument};
//!
//! let doc = MemoryDocument::new();
//! let menu = doc.body().append("nav", &[("class", "nav-menu")]);
//! menu.toggle_class("active");
//!
//! let found = doc.query_selector(".nav-menu").unwrap();
//! assert!(found.has_class("active"));
//! ```

mod memory;
mod selector;

pub use memory::MemoryDocument;
pub use memory::MemoryElement;
pub use selector::Selector;

/// One `<option>` of a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An option with an empty value, shown as a prompt or status line.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new("", label)
    }
}

/// Element operations used by the page handlers.
///
/// Handles are cheap to clone and refer to the same underlying node.
pub trait Element: Clone + PartialEq + std::fmt::Debug + 'static {
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn id(&self) -> Option<String> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    /// Current value of a form control; empty for other elements.
    fn value(&self) -> String;

    fn text_content(&self) -> String;

    fn has_class(&self, class: &str) -> bool;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Toggle `class`, returning whether it is now present.
    fn toggle_class(&self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    /// Set an inline style property. An empty value clears it.
    fn set_style(&self, property: &str, value: &str);

    fn set_disabled(&self, disabled: bool);

    /// Replace every `<option>` of a `<select>`.
    fn replace_options(&self, options: &[SelectOption]);

    /// Descendants matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self>;

    /// The descendant form control named `name`.
    fn field(&self, name: &str) -> Option<Self> {
        self.query_selector_all(&format!("[name=\"{name}\"]"))
            .into_iter()
            .next()
    }

    /// Whether the element is still attached to the document.
    fn is_connected(&self) -> bool;

    /// Detach the element from the document.
    fn remove(&self);
}

/// Document-level lookups.
pub trait Document {
    type Element: Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// All elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    fn query_selector(&self, selector: &str) -> Option<Self::Element> {
        self.query_selector_all(selector).into_iter().next()
    }
}
