//! Image preview for file inputs.

use std::rc::Rc;

use crate::config::PreviewConfig;
use crate::dom::{Document, Element};
use crate::services::FileLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The input names no preview target, or the target is not on the page.
    NoTarget,
    NoFile,
    Shown,
    ReadFailed,
}

/// A file input that previews its selected image in another element.
pub struct ImagePreview<D: Document> {
    input: D::Element,
    doc: D,
    loader: Rc<dyn FileLoader<D::Element>>,
    target_attribute: String,
}

impl<D> std::fmt::Debug for ImagePreview<D>
where
    D: Document,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePreview")
            .field("input", &self.input)
            .field("target_attribute", &self.target_attribute)
            .finish_non_exhaustive()
    }
}

impl<D> ImagePreview<D>
where
    D: Document + Clone,
{
    /// One preview handler per matching file input.
    pub fn find_all(
        doc: &D,
        config: &PreviewConfig,
        loader: &Rc<dyn FileLoader<D::Element>>,
    ) -> Vec<Self> {
        doc.query_selector_all(&config.input_selector)
            .into_iter()
            .map(|input| Self {
                input,
                doc: doc.clone(),
                loader: Rc::clone(loader),
                target_attribute: config.target_attribute.clone(),
            })
            .collect()
    }

    pub fn input(&self) -> &D::Element {
        &self.input
    }

    /// Handle a change of the file input.
    pub async fn on_change(&self) -> PreviewOutcome {
        let Some(target_id) = self.input.attribute(&self.target_attribute) else {
            return PreviewOutcome::NoTarget;
        };
        let Some(target) = self.doc.element_by_id(&target_id) else {
            tracing::debug!(name: "ui.preview.no_target", target = %target_id, "Preview target missing");
            return PreviewOutcome::NoTarget;
        };

        match self.loader.read_data_url(&self.input).await {
            Ok(Some(data_url)) => {
                target.set_attribute("src", &data_url);
                target.set_style("display", "block");
                PreviewOutcome::Shown
            }
            Ok(None) => PreviewOutcome::NoFile,
            Err(e) => {
                tracing::warn!(
                    name: "ui.preview.read_failed",
                    target = %target_id,
                    error = %e,
                    "Failed to read selected file"
                );
                PreviewOutcome::ReadFailed
            }
        }
    }
}
