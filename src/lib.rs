//! TAMAULA page layer
//!
//! Form validation and small interactive behaviors for the server-rendered
//! TAMAULA pages, compiled to WebAssembly and started once the page loads.
//!
//! # Architecture
//!
//! - **Capabilities**: handlers see the page only through [`dom::Document`]
//!   and the traits in [`services`], so they run unchanged against the live
//!   DOM or the in-memory [`dom::MemoryDocument`]
//! - **Handlers**: one type per behavior, built by [`page::Page::init`]
//! - **Browser glue**: `web` (feature `web`, `wasm32` only) attaches the
//!   handlers to DOM events
//!
//! # Modules
//!
//! - [`competition`]: competition date checks
//! - [`navigation`]: mobile navigation toggle
//! - [`clubs`]: club dropdown fed by the local government selector
//! - [`required`]: required-field validation
//! - [`preview`]: image preview for file inputs
//! - [`flash`]: flash message auto-dismissal

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod clubs;
pub mod competition;
pub mod config;
pub mod dom;
pub mod error;
pub mod flash;
pub mod navigation;
pub mod page;
pub mod preview;
pub mod required;
pub mod services;
pub mod telemetry;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use error::{Result, UiError};

/// Decision of a submit handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Proceed,
    /// Stop the browser from submitting the form.
    Cancel,
}
