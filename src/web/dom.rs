//! `Document`/`Element` over `web-sys`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement, HtmlTextAreaElement,
    NodeList,
};

use crate::dom::{Document, Element, SelectOption};

/// Log a rejected DOM call; these only fail on malformed input we control.
fn log_rejection(operation: &'static str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::warn!(name: "ui.dom.rejected", operation, error = ?e, "DOM call rejected");
    }
}

fn elements(list: &NodeList) -> Vec<WebElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .map(WebElement)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebDocument(web_sys::Document);

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self(document)
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.0.get_element_by_id(id).map(WebElement)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<WebElement> {
        match self.0.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(e) => {
                tracing::warn!(name: "ui.dom.bad_selector", selector, error = ?e, "Invalid selector");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebElement(web_sys::Element);

impl WebElement {
    pub fn inner(&self) -> &web_sys::Element {
        &self.0
    }
}

impl Element for WebElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        log_rejection("set_attribute", self.0.set_attribute(name, value));
    }

    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(textarea) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else {
            String::new()
        }
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        log_rejection("add_class", self.0.class_list().add_1(class));
    }

    fn remove_class(&self, class: &str) {
        log_rejection("remove_class", self.0.class_list().remove_1(class));
    }

    fn toggle_class(&self, class: &str) -> bool {
        match self.0.class_list().toggle(class) {
            Ok(present) => present,
            Err(e) => {
                log_rejection("toggle_class", Err(e));
                self.has_class(class)
            }
        }
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(element) = self.0.dyn_ref::<HtmlElement>() {
            log_rejection("set_style", element.style().set_property(property, value));
        }
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            select.set_disabled(disabled);
        } else if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if disabled {
            log_rejection("set_disabled", self.0.set_attribute("disabled", ""));
        } else {
            log_rejection("set_disabled", self.0.remove_attribute("disabled"));
        }
    }

    fn replace_options(&self, options: &[SelectOption]) {
        self.0.set_inner_html("");
        for option in options {
            let result = HtmlOptionElement::new_with_text_and_value(&option.label, &option.value)
                .and_then(|element| self.0.append_child(&element).map(|_| ()));
            log_rejection("append_option", result);
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        match self.0.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(e) => {
                tracing::warn!(name: "ui.dom.bad_selector", selector, error = ?e, "Invalid selector");
                Vec::new()
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }

    fn remove(&self) {
        self.0.remove();
    }
}
