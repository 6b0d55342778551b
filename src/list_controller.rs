//! Fetch-render-mutate controller, one instance per dashboard page.
//!
//! Generalizes the loop every CRUD page runs: fetch the collection, render
//! it, open a create form, submit or delete, then refetch. The server's
//! list is the only authoritative view — every successful mutation triggers
//! an unconditional refetch instead of editing the collection in place
//! (consistency over latency).
//!
//! State machine: `Loading -> Ready` on initial load, `Ready -> Submitting
//! -> Ready` for the create/update cycle, `Ready -> Deleting -> Ready` for
//! the delete cycle. Every failure path lands back in `Ready` with the
//! error slot populated; nothing is terminal. At most one mutation is in
//! flight per controller — a second one is dropped while the first is
//! outstanding.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::client::{Resource, ResourceGateway};
use crate::models::Draft;

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Where the controller is in its fetch/mutate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Collection fetch in progress (initial load or standalone refresh).
    Loading,
    /// Idle; collection renderable.
    Ready,
    /// Create or update round trip in progress.
    Submitting,
    /// Delete round trip in progress.
    Deleting,
}

/// Blocking confirmation the host supplies (native dialog, inline prompt).
/// Every delete is preceded by one — there is no undo.
pub trait ConfirmPrompt {
    fn confirm(&self, prompt: &str) -> bool;
}

struct ListState<D: Resource> {
    records: Vec<D::Record>,
    phase: Phase,
    /// Most recent failure, overwritten by the next one.
    error: Option<String>,
    filter: D::Filter,
    /// `Some` while the create form is open.
    form: Option<D::Draft>,
}

// ═══════════════════════════════════════════════════════════
// ListController
// ═══════════════════════════════════════════════════════════

/// Controller for one resource collection.
///
/// Shareable behind `Arc`; all methods take `&self` so a UI event loop can
/// invoke them without exclusive access. Errors never propagate out of the
/// controller — they land in the error slot as a user-facing message.
pub struct ListController<D: Resource, G: ResourceGateway<D>> {
    gateway: G,
    state: Mutex<ListState<D>>,
    /// One mutation in flight per controller.
    busy: AtomicBool,
}

impl<D: Resource, G: ResourceGateway<D>> ListController<D, G> {
    /// Create a controller with the resource's default filter. Starts in
    /// `Loading`; call `refresh` to perform the initial fetch.
    pub fn new(gateway: G) -> Self {
        Self::with_filter(gateway, D::Filter::default())
    }

    pub fn with_filter(gateway: G, filter: D::Filter) -> Self {
        Self {
            gateway,
            state: Mutex::new(ListState {
                records: Vec::new(),
                phase: Phase::Loading,
                error: None,
                filter,
                form: None,
            }),
            busy: AtomicBool::new(false),
        }
    }

    // ── Cycle operations ─────────────────────────────────────

    /// Fetch-and-replace the collection. `Loading` for the duration, back
    /// to `Ready` whatever the outcome; failure populates the error slot
    /// and leaves the previous collection in place.
    pub async fn refresh(&self) {
        self.set_phase(Phase::Loading);
        self.fetch_collection().await;
        self.set_phase(Phase::Ready);
    }

    /// Open the create form with an initial draft.
    pub fn begin_create(&self, draft: D::Draft) {
        if let Ok(mut state) = self.state.lock() {
            state.form = Some(draft);
        }
    }

    /// Close the create form, discarding the draft.
    pub fn cancel_create(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.form = None;
        }
    }

    /// Mutate the open draft (form field edits). No-op when no form is open.
    pub fn edit_draft(&self, edit: impl FnOnce(&mut D::Draft)) {
        if let Ok(mut state) = self.state.lock() {
            if let Some(draft) = state.form.as_mut() {
                edit(draft);
            }
        }
    }

    /// Submit the open create form.
    ///
    /// Validates required fields first — an invalid draft sets the error
    /// and issues no request. On success the form closes, the draft is
    /// discarded, and the collection is refetched. On failure the form and
    /// draft stay so the user can correct and resubmit.
    pub async fn submit_create(&self) {
        if self.busy.swap(true, Ordering::SeqCst) {
            tracing::debug!(collection = D::COLLECTION, "create dropped, mutation in flight");
            return;
        }

        let draft = {
            let Ok(mut state) = self.state.lock() else {
                self.busy.store(false, Ordering::SeqCst);
                return;
            };
            state.error = None;
            state.form.clone()
        };
        let Some(draft) = draft else {
            self.busy.store(false, Ordering::SeqCst);
            return;
        };

        if let Err(message) = draft.validate() {
            if let Ok(mut state) = self.state.lock() {
                state.error = Some(message);
            }
            self.busy.store(false, Ordering::SeqCst);
            return;
        }

        self.set_phase(Phase::Submitting);
        match self.gateway.create(&draft).await {
            Ok(()) => {
                if let Ok(mut state) = self.state.lock() {
                    state.form = None;
                }
                self.fetch_collection().await;
            }
            Err(err) => {
                tracing::warn!(collection = D::COLLECTION, error = %err, "create failed");
                if let Ok(mut state) = self.state.lock() {
                    state.error = Some(err.to_string());
                }
            }
        }
        self.set_phase(Phase::Ready);
        self.busy.store(false, Ordering::SeqCst);
    }

    /// Delete a record after a blocking confirmation. The busy check runs
    /// first, so the user is never asked to confirm an action that would
    /// then be dropped. Declined means no-op with no request. Success
    /// refetches the collection; there is no in-place removal and no
    /// tombstone.
    pub async fn request_delete(&self, id: &str, confirm: &impl ConfirmPrompt) {
        if self.busy.swap(true, Ordering::SeqCst) {
            tracing::debug!(collection = D::COLLECTION, "delete rejected, mutation in flight");
            return;
        }
        let prompt = format!("Are you sure you want to delete this {}?", D::ITEM_NAME);
        if !confirm.confirm(&prompt) {
            self.busy.store(false, Ordering::SeqCst);
            return;
        }

        self.set_phase(Phase::Deleting);
        match self.gateway.remove(id).await {
            Ok(()) => self.fetch_collection().await,
            Err(err) => {
                tracing::warn!(collection = D::COLLECTION, error = %err, "delete failed");
                if let Ok(mut state) = self.state.lock() {
                    state.error = Some(err.to_string());
                }
            }
        }
        self.set_phase(Phase::Ready);
        self.busy.store(false, Ordering::SeqCst);
    }

    /// PATCH a record, then refetch. Same cycle discipline as create.
    pub async fn submit_update(&self, id: &str, patch: &D::Patch) {
        if self.busy.swap(true, Ordering::SeqCst) {
            tracing::debug!(collection = D::COLLECTION, "update dropped, mutation in flight");
            return;
        }

        self.set_phase(Phase::Submitting);
        match self.gateway.update(id, patch).await {
            Ok(()) => self.fetch_collection().await,
            Err(err) => {
                tracing::warn!(collection = D::COLLECTION, error = %err, "update failed");
                if let Ok(mut state) = self.state.lock() {
                    state.error = Some(err.to_string());
                }
            }
        }
        self.set_phase(Phase::Ready);
        self.busy.store(false, Ordering::SeqCst);
    }

    // ── Observable state ─────────────────────────────────────

    /// Snapshot of the collection, in server order.
    pub fn records(&self) -> Vec<D::Record> {
        self.state
            .lock()
            .map(|s| s.records.clone())
            .unwrap_or_default()
    }

    pub fn phase(&self) -> Phase {
        self.state
            .lock()
            .map(|s| s.phase)
            .unwrap_or(Phase::Ready)
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == Phase::Loading
    }

    /// Is a mutation currently in flight?
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Most recent failure message, if any.
    pub fn error(&self) -> Option<String> {
        self.state.lock().ok().and_then(|s| s.error.clone())
    }

    /// Dismiss the visible error.
    pub fn clear_error(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.error = None;
        }
    }

    pub fn is_form_open(&self) -> bool {
        self.state
            .lock()
            .map(|s| s.form.is_some())
            .unwrap_or(false)
    }

    /// Snapshot of the open draft, if the form is open.
    pub fn draft(&self) -> Option<D::Draft> {
        self.state.lock().ok().and_then(|s| s.form.clone())
    }

    pub fn filter(&self) -> D::Filter {
        self.state
            .lock()
            .map(|s| s.filter.clone())
            .unwrap_or_default()
    }

    /// Change the list filter. Takes effect on the next `refresh`.
    pub fn set_filter(&self, filter: D::Filter) {
        if let Ok(mut state) = self.state.lock() {
            state.filter = filter;
        }
    }

    // ── Internal ─────────────────────────────────────────────

    /// Fetch without touching the phase — mutation cycles stay in their own
    /// phase for the trailing refetch.
    async fn fetch_collection(&self) {
        let filter = self.filter();
        match self.gateway.list(&filter).await {
            Ok(records) => {
                if let Ok(mut state) = self.state.lock() {
                    state.records = records;
                }
            }
            Err(err) => {
                tracing::warn!(collection = D::COLLECTION, error = %err, "list failed");
                if let Ok(mut state) = self.state.lock() {
                    state.error = Some(err.to_string());
                }
            }
        }
    }

    fn set_phase(&self, phase: Phase) {
        if let Ok(mut state) = self.state.lock() {
            state.phase = phase;
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
