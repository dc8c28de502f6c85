//! Flash message auto-dismissal.

use std::rc::Rc;
use std::time::Duration;

use crate::config::FlashConfig;
use crate::dom::{Document, Element};
use crate::services::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashOutcome {
    Removed,
    /// Something else removed the message first.
    AlreadyGone,
}

/// Fades out and removes one flash message.
pub struct FlashDismissal<E> {
    message: E,
    timer: Rc<dyn Timer>,
    fade_delay: Duration,
    removal_delay: Duration,
}

impl<E: Element> std::fmt::Debug for FlashDismissal<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashDismissal")
            .field("message", &self.message)
            .field("fade_delay", &self.fade_delay)
            .field("removal_delay", &self.removal_delay)
            .finish_non_exhaustive()
    }
}

impl<E: Element> FlashDismissal<E> {
    pub fn find_all<D>(doc: &D, config: &FlashConfig, timer: &Rc<dyn Timer>) -> Vec<Self>
    where
        D: Document<Element = E>,
    {
        doc.query_selector_all(&config.selector)
            .into_iter()
            .map(|message| Self {
                message,
                timer: Rc::clone(timer),
                fade_delay: config.fade_delay(),
                removal_delay: config.removal_delay(),
            })
            .collect()
    }

    /// Wait, fade, wait for the transition, then remove if still attached.
    pub async fn run(self) -> FlashOutcome {
        self.timer.sleep(self.fade_delay).await;
        self.message.set_style("opacity", "0");

        self.timer.sleep(self.removal_delay).await;
        if !self.message.is_connected() {
            return FlashOutcome::AlreadyGone;
        }
        self.message.remove();
        FlashOutcome::Removed
    }
}
