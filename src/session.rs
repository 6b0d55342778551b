//! Session token holding and the page-mount session guard.
//!
//! The backend issues an opaque bearer token at login (out of scope here);
//! this module owns it for the lifetime of the session:
//! - Token exists only in memory — never persisted, never logged
//! - Token bytes zeroed via `Zeroize` on replacement or clear
//! - Controllers receive an explicit `AuthContext` at construction instead
//!   of reading ambient storage at call time
//! - `require_session` gates page mount: no token, no page, one redirect

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use zeroize::Zeroize;

// ═══════════════════════════════════════════════════════════
// SessionToken — zeroed on drop
// ═══════════════════════════════════════════════════════════

/// Opaque bearer token — zeroed on drop to prevent memory leakage.
///
/// No format validation happens client-side; the backend's 401 is the only
/// judge of validity.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    // Redacted — tokens must never reach logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionToken(***)")
    }
}

// ═══════════════════════════════════════════════════════════
// AuthContext — explicit shared token holder
// ═══════════════════════════════════════════════════════════

/// Shared authentication context, threaded to every controller and client
/// at construction.
///
/// Only the login flow writes the token and only logout clears it; resource
/// calls read it. Share via `Arc<AuthContext>`.
pub struct AuthContext {
    token: RwLock<Option<SessionToken>>,
    /// Latch so a failure streak redirects to login exactly once.
    redirected: AtomicBool,
}

impl AuthContext {
    /// Create a context with no session.
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
            redirected: AtomicBool::new(false),
        }
    }

    /// Create a context already holding a token (e.g. restored session).
    pub fn with_token(token: SessionToken) -> Self {
        let ctx = Self::new();
        ctx.set(token);
        ctx
    }

    /// Store a token (login). The previous token, if any, is zeroed on drop.
    pub fn set(&self, token: SessionToken) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token);
        }
        self.redirected.store(false, Ordering::SeqCst);
        tracing::debug!("session token set");
    }

    /// Clear the token (logout). Zeroed on drop.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
        tracing::debug!("session token cleared");
    }

    /// Is a session present?
    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Current token value for the `Authorization` header.
    ///
    /// Returns `None` when signed out — callers must fail fast with
    /// `ApiError::Auth` rather than send an unauthenticated request.
    pub fn bearer(&self) -> Option<String> {
        self.token
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|t| t.0.clone()))
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Session guard
// ═══════════════════════════════════════════════════════════

/// Navigation side effect the host supplies (router push, window location).
pub trait Navigator {
    /// Send the user to the login entry point.
    fn redirect_to_login(&self);
}

/// Errors from the session guard.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// No token present. The caller must treat this as terminal and render
    /// nothing further.
    #[error("Not authorized")]
    NotAuthorized,
}

/// Gate a protected page on an existing session.
///
/// Absent token: fires `redirect_to_login` — at most once per failure
/// streak, so repeated guard calls stay idempotent — and returns
/// `NotAuthorized`. The latch resets when a token is set again.
pub fn require_session(ctx: &AuthContext, navigator: &impl Navigator) -> Result<(), SessionError> {
    if ctx.is_authenticated() {
        ctx.redirected.store(false, Ordering::SeqCst);
        return Ok(());
    }
    if !ctx.redirected.swap(true, Ordering::SeqCst) {
        tracing::warn!("no session token, redirecting to login");
        navigator.redirect_to_login();
    }
    Err(SessionError::NotAuthorized)
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
