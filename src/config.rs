use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Vitalink";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path prefix all backend routes live under.
pub const API_PREFIX: &str = "/api/v1";

/// Backend base URL when `VITALINK_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Request timeout applied to every backend call. The backend either
/// answers within this window or the call is treated as failed.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend base URL, from `VITALINK_API_URL` or the default.
pub fn api_url() -> String {
    std::env::var("VITALINK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}
