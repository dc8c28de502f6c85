//! Injected capabilities besides the document itself.
//!
//! Handlers never call `alert`, read the clock, sleep, or touch a
//! `FileReader` directly; they go through these traits so the browser build
//! and native tests share one code path.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::Result;

/// Blocking user dialogs.
pub trait Dialogs {
    fn alert(&self, message: &str);

    /// Ask a yes/no question; `true` means the user confirmed.
    fn confirm(&self, message: &str) -> bool;
}

/// Source of the current local date and time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Async delay.
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// Reads the file selected in a file input.
#[async_trait(?Send)]
pub trait FileLoader<E> {
    /// Read the first selected file of `input` as a `data:` URL.
    ///
    /// Returns `Ok(None)` when no file is selected.
    async fn read_data_url(&self, input: &E) -> Result<Option<String>>;
}

/// Local time from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock stuck on one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Dialogs that record every message and answer confirmations from a queue.
///
/// When the queue is empty, confirmations are declined.
#[derive(Debug, Default)]
pub struct RecordingDialogs {
    alerts: RefCell<Vec<String>>,
    confirms: RefCell<Vec<String>>,
    answers: RefCell<VecDeque<bool>>,
}

impl RecordingDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next confirmation.
    pub fn answer_next(&self, confirmed: bool) {
        self.answers.borrow_mut().push_back(confirmed);
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }
}

impl Dialogs for RecordingDialogs {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(false)
    }
}

/// Timer backed by `tokio::time`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_dialogs_answers_in_order() {
        let dialogs = RecordingDialogs::new();
        dialogs.answer_next(true);

        assert!(dialogs.confirm("first?"));
        assert!(!dialogs.confirm("second?"));
        dialogs.alert("done");

        assert_eq!(dialogs.confirms(), vec!["first?", "second?"]);
        assert_eq!(dialogs.alerts(), vec!["done"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_timer_sleeps() {
        let start = tokio::time::Instant::now();
        TokioTimer.sleep(Duration::from_millis(250)).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
