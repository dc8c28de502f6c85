//! Tracing subscriber setup.
//!
//! Natively events go to stdout through the `fmt` layer; in the browser the
//! same layer writes to the developer console.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Later calls are no-ops.
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
pub fn init(directives: &str) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter(directives))
        .try_init();
}

/// Install the global subscriber. Later calls are no-ops.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub fn init(directives: &str) {
    let console = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(tracing_web::MakeWebConsoleWriter::new());

    let _ = tracing_subscriber::registry()
        .with(console)
        .with(filter(directives))
        .try_init();
}
