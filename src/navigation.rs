//! Mobile navigation toggle.

use crate::config::NavigationConfig;
use crate::dom::{Document, Element};

/// Hamburger trigger, the menu it opens, and the links that close it.
#[derive(Debug, Clone)]
pub struct NavToggle<E> {
    trigger: Option<E>,
    menu: Option<E>,
    links: Vec<E>,
    active_class: String,
}

impl<E: Element> NavToggle<E> {
    pub fn find<D>(doc: &D, config: &NavigationConfig) -> Self
    where
        D: Document<Element = E>,
    {
        Self {
            trigger: doc.query_selector(&config.trigger_selector),
            menu: doc.query_selector(&config.menu_selector),
            links: doc.query_selector_all(&config.link_selector),
            active_class: config.active_class.clone(),
        }
    }

    /// The trigger, when it and the menu both exist.
    pub fn trigger(&self) -> Option<&E> {
        self.menu.as_ref().and(self.trigger.as_ref())
    }

    pub fn links(&self) -> &[E] {
        &self.links
    }

    /// Trigger activated: flip the menu open or closed.
    pub fn toggle(&self) {
        if let (Some(trigger), Some(menu)) = (&self.trigger, &self.menu) {
            trigger.toggle_class(&self.active_class);
            let open = menu.toggle_class(&self.active_class);
            tracing::debug!(name: "ui.nav.toggled", open, "Navigation menu toggled");
        }
    }

    /// A navigation link was activated: close the menu.
    pub fn close(&self) {
        for element in self.trigger.iter().chain(&self.menu) {
            element.remove_class(&self.active_class);
        }
    }

    pub fn is_open(&self) -> bool {
        self.menu
            .as_ref()
            .is_some_and(|menu| menu.has_class(&self.active_class))
    }
}
