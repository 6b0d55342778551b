//! Client-side core for a patient health dashboard.
//!
//! Session-gated access to the backend's CRUD collections (medications,
//! appointments, health metrics) and the AI assistant, with one generic
//! fetch-render-mutate controller instead of four near-identical page
//! implementations. Presentation renders from controller state; nothing
//! here draws anything.

pub mod chat_session; // AI assistant transcript controller
pub mod client; // Authenticated REST client + resource descriptors
pub mod config;
pub mod error;
pub mod list_controller; // Generic fetch/mutate cycle per collection
pub mod models;
pub mod session; // Token holding + page-mount guard

use tracing_subscriber::EnvFilter;

/// Initialize tracing for a host binary. Honors `RUST_LOG`, falling back
/// to the crate default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
