//! Browser implementations of the injected services.

use std::time::Duration;

use async_trait::async_trait;
use js_sys::{Function, Promise};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FileReader, HtmlInputElement, Window};

use super::dom::WebElement;
use crate::error::{Result, UiError};
use crate::services::{Dialogs, FileLoader, Timer};

pub(crate) fn js_error(value: &JsValue) -> UiError {
    UiError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// `window.alert` / `window.confirm`.
#[derive(Debug, Clone)]
pub struct WebDialogs {
    window: Window,
}

impl WebDialogs {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Dialogs for WebDialogs {
    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::warn!(name: "ui.dialog.failed", error = ?e, "alert() rejected");
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }
}

/// `setTimeout` wrapped in a promise.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebTimer;

#[async_trait(?Send)]
impl Timer for WebTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
            let scheduled = web_sys::window().map(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            });
            settle_if_unscheduled(scheduled, &resolve, millis);
        });
        let _ = JsFuture::from(promise).await;
    }
}

/// Resolve right away when `setTimeout` could not be scheduled, so the
/// sleeper never waits on a promise nothing will settle.
fn settle_if_unscheduled(scheduled: Option<Result<i32, JsValue>>, resolve: &Function, millis: i32) {
    if matches!(scheduled, Some(Ok(_))) {
        return;
    }
    tracing::warn!(name: "ui.timer.failed", millis, "setTimeout unavailable, not waiting");
    if let Err(e) = resolve.call0(&JsValue::UNDEFINED) {
        tracing::warn!(name: "ui.timer.failed", error = ?e, "Cannot resolve timer promise");
    }
}

/// `FileReader.readAsDataURL` on the first selected file.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebFileLoader;

#[async_trait(?Send)]
impl FileLoader<WebElement> for WebFileLoader {
    async fn read_data_url(&self, input: &WebElement) -> Result<Option<String>> {
        let Some(input) = input.inner().dyn_ref::<HtmlInputElement>() else {
            return Ok(None);
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return Ok(None);
        };

        let reader = FileReader::new().map_err(|e| js_error(&e))?;
        let loaded = Promise::new(&mut |resolve: Function, reject: Function| {
            reader.set_onload(Some(&resolve));
            reader.set_onerror(Some(&reject));
        });
        reader.read_as_data_url(&file).map_err(|e| js_error(&e))?;

        JsFuture::from(loaded)
            .await
            .map_err(|e| UiError::FileRead(format!("{e:?}")))?;

        let result = reader.result().map_err(|e| js_error(&e))?;
        Ok(result.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    async fn settles(scheduled: Option<Result<i32, JsValue>>) -> bool {
        let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
            settle_if_unscheduled(scheduled.clone(), &resolve, 5000);
        });
        let pending = Promise::resolve(&JsValue::from_str("pending"));
        let raced = Promise::race(&js_sys::Array::of2(&promise, &pending));
        let winner = JsFuture::from(raced).await.unwrap();
        winner.is_undefined()
    }

    #[wasm_bindgen_test]
    async fn test_missing_window_resolves_immediately() {
        assert!(settles(None).await);
    }

    #[wasm_bindgen_test]
    async fn test_rejected_set_timeout_resolves_immediately() {
        assert!(settles(Some(Err(JsValue::from_str("blocked")))).await);
    }

    #[wasm_bindgen_test]
    async fn test_scheduled_timeout_is_left_alone() {
        assert!(!settles(Some(Ok(1))).await);
    }

    #[wasm_bindgen_test]
    async fn test_web_timer_sleeps() {
        WebTimer.sleep(Duration::from_millis(10)).await;
    }
}
