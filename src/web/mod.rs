//! Browser entry point.
//!
//! Builds the [`Page`] over the live document and attaches its handlers to
//! DOM events. Compiled only with the `web` feature on `wasm32`.

mod dom;
mod services;

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, Window};

use crate::Submission;
use crate::clubs::HttpClubSource;
use crate::config::UiConfig;
use crate::error::Result;
use crate::page::{Page, Services, load_config};
use crate::services::SystemClock;
use crate::telemetry;

pub use dom::{WebDocument, WebElement};
pub use services::{WebDialogs, WebFileLoader, WebTimer};

use services::js_error;

/// Entry point for the WASM module.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let doc = WebDocument::new(document.clone());

    let config = match load_config(&doc) {
        Ok(config) => {
            telemetry::init(&config.log_filter);
            config
        }
        Err(e) => {
            let config = UiConfig::default();
            telemetry::init(&config.log_filter);
            tracing::warn!(name: "ui.config.invalid", error = %e, "Ignoring page configuration");
            config
        }
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once(move |_: Event| mount_or_log(&window, &doc, &config));
        if let Err(e) = document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        ) {
            tracing::error!(name: "ui.page.listen_failed", error = ?e, "Cannot wait for DOMContentLoaded");
        }
        on_ready.forget();
    } else {
        mount_or_log(&window, &doc, &config);
    }
}

fn mount_or_log(window: &Window, doc: &WebDocument, config: &UiConfig) {
    if let Err(e) = mount(window, doc, config) {
        tracing::error!(name: "ui.page.mount_failed", error = %e, "Failed to attach page handlers");
    }
}

fn mount(window: &Window, doc: &WebDocument, config: &UiConfig) -> Result<()> {
    let origin = window.location().origin().map_err(|e| js_error(&e))?;
    let services = Services {
        dialogs: Rc::new(WebDialogs::new(window.clone())),
        clock: Rc::new(SystemClock),
        timer: Rc::new(WebTimer),
        files: Rc::new(WebFileLoader),
        clubs: Rc::new(HttpClubSource::new(&origin, &config.clubs.endpoint)?),
    };

    let mut page = Page::init(doc, config, services);

    for dismissal in page.take_flash_messages() {
        spawn_local(async move {
            dismissal.run().await;
        });
    }

    let page = Rc::new(page);
    attach_submit(&page)?;
    attach_navigation(&page)?;
    attach_clubs(&page)?;
    attach_previews(&page)?;
    Ok(())
}

fn listen(target: &WebElement, event: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .inner()
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| js_error(&e))?;
    closure.forget();
    Ok(())
}

fn attach_submit(page: &Rc<Page<WebDocument>>) -> Result<()> {
    let mut forms: Vec<WebElement> = page
        .required_forms
        .iter()
        .map(|r| r.form().clone())
        .collect();
    if let Some(competition) = &page.competition {
        if !forms.contains(competition.form()) {
            forms.push(competition.form().clone());
        }
    }

    for form in forms {
        let page = Rc::clone(page);
        let target = form.clone();
        listen(&target, "submit", move |event| {
            if page.submit(&form) == Submission::Cancel {
                event.prevent_default();
            }
        })?;
    }
    Ok(())
}

fn attach_navigation(page: &Rc<Page<WebDocument>>) -> Result<()> {
    if let Some(trigger) = page.navigation.trigger() {
        let page = Rc::clone(page);
        listen(trigger, "click", move |_| page.navigation.toggle())?;
    }

    for link in page.navigation.links() {
        let page = Rc::clone(page);
        listen(link, "click", move |_| page.navigation.close())?;
    }
    Ok(())
}

fn attach_clubs(page: &Rc<Page<WebDocument>>) -> Result<()> {
    let Some(dropdown) = &page.clubs else {
        return Ok(());
    };

    let handler = dropdown.clone();
    listen(dropdown.primary(), "change", move |_| {
        let dropdown = handler.clone();
        spawn_local(async move {
            dropdown.on_change().await;
        });
    })
}

fn attach_previews(page: &Rc<Page<WebDocument>>) -> Result<()> {
    for (index, preview) in page.previews.iter().enumerate() {
        let page = Rc::clone(page);
        listen(preview.input(), "change", move |_| {
            let page = Rc::clone(&page);
            spawn_local(async move {
                page.previews[index].on_change().await;
            });
        })?;
    }
    Ok(())
}
