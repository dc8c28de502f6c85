//! Required-field validation for every form on the page.

use crate::Submission;
use crate::config::RequiredConfig;
use crate::dom::{Document, Element};
use crate::services::Dialogs;

/// Submit handler checking the `[required]` fields of one form.
#[derive(Debug, Clone)]
pub struct RequiredFields<E> {
    form: E,
    config: RequiredConfig,
}

impl<E: Element> RequiredFields<E> {
    pub fn new(form: E, config: RequiredConfig) -> Self {
        Self { form, config }
    }

    /// One handler per form, skipping the excluded form id.
    pub fn find_all<D>(doc: &D, config: &RequiredConfig) -> Vec<Self>
    where
        D: Document<Element = E>,
    {
        doc.query_selector_all(&config.form_selector)
            .into_iter()
            .filter(|form| form.id().as_deref() != Some(config.excluded_form_id.as_str()))
            .map(|form| Self::new(form, config.clone()))
            .collect()
    }

    pub fn form(&self) -> &E {
        &self.form
    }

    /// Flag blank required fields, clear the flag on filled ones, and alert
    /// once if anything is missing.
    pub fn submit(&self, dialogs: &dyn Dialogs) -> Submission {
        let mut missing = 0usize;

        for field in self.form.query_selector_all(&self.config.field_selector) {
            if field.value().trim().is_empty() {
                missing += 1;
                field.set_style("border-color", &self.config.invalid_border_color);
            } else {
                field.set_style("border-color", "");
            }
        }

        if missing == 0 {
            return Submission::Proceed;
        }

        tracing::debug!(
            name: "ui.required.missing",
            form = ?self.form.id(),
            missing,
            "Required fields left blank"
        );
        dialogs.alert(&self.config.message);
        Submission::Cancel
    }
}
