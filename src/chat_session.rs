//! Chat session controller for the AI health assistant page.
//!
//! Not a CRUD collection: the transcript is append-only and lives only for
//! the session. `send` appends the user's message immediately, asks the
//! assistant, and appends the reply. A failed call leaves the user's
//! message in place (never rolled back) and fills the error slot instead
//! of appending an assistant entry. At most one request is in flight —
//! sends while pending are rejected outright, not queued.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::Utc;

use crate::client::AssistantGateway;
use crate::models::ChatMessage;

/// Greeting shown before the first exchange.
const GREETING: &str = "Hello! I'm your AI health assistant. I can help you with:\n\n\
    • Medication reminders and information\n\
    • Health tips and advice\n\
    • Understanding your symptoms\n\
    • General wellness guidance\n\n\
    How can I assist you today?";

/// What became of a `send` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// User message and assistant reply both appended.
    Delivered,
    /// User message appended; the assistant call failed and the error slot
    /// holds the message.
    Failed,
    /// Whitespace-only input — transcript untouched, no request issued.
    EmptyInput,
    /// A request is already in flight — rejected, transcript untouched.
    Busy,
}

struct ChatState {
    transcript: Vec<ChatMessage>,
    error: Option<String>,
}

/// One chat session with the assistant.
///
/// Shareable behind `Arc`; methods take `&self` so the input handler can
/// call `send` without exclusive access.
pub struct ChatSession<G: AssistantGateway> {
    gateway: G,
    state: Mutex<ChatState>,
    pending: AtomicBool,
    /// Tie-breaker so two messages in the same millisecond still get
    /// distinct, ordered ids.
    seq: AtomicU64,
}

impl<G: AssistantGateway> ChatSession<G> {
    /// Start with an empty transcript.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: Mutex::new(ChatState {
                transcript: Vec::new(),
                error: None,
            }),
            pending: AtomicBool::new(false),
            seq: AtomicU64::new(0),
        }
    }

    /// Start with the assistant's greeting already in the transcript, the
    /// way the dashboard opens the chat page.
    pub fn with_greeting(gateway: G) -> Self {
        let session = Self::new(gateway);
        let id = session.next_id();
        if let Ok(mut state) = session.state.lock() {
            state.transcript.push(ChatMessage::assistant(id, GREETING));
        }
        session
    }

    /// Send a message to the assistant.
    ///
    /// The user entry is appended before the remote call so it renders
    /// immediately; it stays in the transcript whatever happens next.
    pub async fn send(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::EmptyInput;
        }
        if self.pending.swap(true, Ordering::SeqCst) {
            tracing::debug!("send rejected, request already in flight");
            return SendOutcome::Busy;
        }

        let user_id = self.next_id();
        if let Ok(mut state) = self.state.lock() {
            state.transcript.push(ChatMessage::user(user_id, text));
            state.error = None;
        }

        let outcome = match self.gateway.ask(text).await {
            Ok(reply) => {
                let reply_id = self.next_id();
                if let Ok(mut state) = self.state.lock() {
                    state.transcript.push(ChatMessage::assistant(reply_id, reply));
                }
                SendOutcome::Delivered
            }
            Err(err) => {
                tracing::warn!(error = %err, "assistant call failed");
                if let Ok(mut state) = self.state.lock() {
                    state.error = Some(err.to_string());
                }
                SendOutcome::Failed
            }
        };

        // Pending always clears on settlement, success or failure.
        self.pending.store(false, Ordering::SeqCst);
        outcome
    }

    // ── Observable state ─────────────────────────────────────

    /// Snapshot of the transcript, in append order.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.state
            .lock()
            .map(|s| s.transcript.clone())
            .unwrap_or_default()
    }

    /// Is a request in flight? The input control should be disabled while
    /// true — though `send` enforces the guard regardless.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Most recent failure message, if any.
    pub fn error(&self) -> Option<String> {
        self.state.lock().ok().and_then(|s| s.error.clone())
    }

    // ── Internal ─────────────────────────────────────────────

    /// Client-generated message id: timestamp millis plus a session-local
    /// sequence number, monotonic within the session.
    fn next_id(&self) -> String {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", Utc::now().timestamp_millis(), seq)
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
