//! The mutation dispatcher: one state machine per remote invocation.
//!
//! ```text
//! Idle -> Pending -> Committed      (payload, no app error: updaters applied)
//!                 -> RolledBack     (transport error or app error: any
//!                                    optimistic patch exactly reversed)
//! ```
//!
//! The optimistic patch, when present, is applied under a cache patch guard
//! so the journal captures its exact inverse; the rollback path replays that
//! journal and nothing else. Exactly one of the caller's `on_completed` /
//! `on_error` callbacks fires, exactly once per invocation. `on_completed`
//! fires even when the payload carries an application-level error field -
//! the caller, not the dispatcher, decides whether that is a failure for UI
//! purposes.

use crate::apply::apply_confirmed;
use crate::optimistic::OptimisticPatch;
use crate::transport::Transport;
use huddle_cache::CacheStore;
use huddle_core::{AppError, MutationPayload, MutationRequest, TransportError, UserId};
use tracing::{debug, warn};

/// Terminal and intermediate states of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Pending,
    Committed,
    RolledBack,
}

/// Caller-supplied completion callbacks. Either may be absent; an unmounted
/// consumer simply ignores the settle.
#[derive(Default)]
pub struct MutationHandlers<'a> {
    pub on_completed: Option<Box<dyn FnOnce(&MutationPayload, Option<&AppError>) + Send + 'a>>,
    pub on_error: Option<Box<dyn FnOnce(&TransportError) + Send + 'a>>,
}

impl<'a> MutationHandlers<'a> {
    pub fn on_completed(
        mut self,
        f: impl FnOnce(&MutationPayload, Option<&AppError>) + Send + 'a,
    ) -> Self {
        self.on_completed = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnOnce(&TransportError) + Send + 'a) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }
}

/// How one invocation settled.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub state: DispatchState,
    /// The confirmed payload, when the transport produced one (present even
    /// for payloads carrying an application error).
    pub payload: Option<MutationPayload>,
    /// The transport error, when the call itself failed.
    pub error: Option<TransportError>,
}

impl MutationOutcome {
    /// True when confirmed updaters were applied and side effects may run.
    pub fn is_committed(&self) -> bool {
        self.state == DispatchState::Committed
    }
}

/// Orchestrates one remote call: optional optimistic patch, confirmed
/// application, rollback on failure.
pub struct MutationDispatcher<T: Transport> {
    transport: T,
}

impl<T: Transport> MutationDispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Submit one mutation. The cache is mutated in place: speculatively
    /// before the call resolves when `optimistic` is given, and with the
    /// confirmed payload when it resolves cleanly.
    pub async fn commit(
        &self,
        request: MutationRequest,
        optimistic: Option<OptimisticPatch>,
        cache: &mut CacheStore,
        viewer_id: &UserId,
        handlers: MutationHandlers<'_>,
    ) -> MutationOutcome {
        debug!(operation = request.operation_name(), "dispatching mutation");

        let journal = optimistic.as_ref().map(|patch| {
            cache.begin_patch();
            patch.apply(cache, viewer_id);
            cache.end_patch()
        });

        match self.transport.invoke(&request).await {
            Ok(payload) if !payload.answers(&request) => {
                // A payload for a different operation can only be a transport
                // layer mixup; treat it as such and restore the cache.
                let error = TransportError::Serialization {
                    operation: request.operation_name().to_string(),
                    reason: format!(
                        "payload answers {} instead",
                        payload.operation_name()
                    ),
                };
                warn!(%error, "mismatched payload");
                self.roll_back(cache, journal);
                if let Some(on_error) = handlers.on_error {
                    on_error(&error);
                }
                MutationOutcome {
                    state: DispatchState::RolledBack,
                    payload: None,
                    error: Some(error),
                }
            }
            Ok(payload) => {
                let state = if let Some(app_error) = payload.app_error().cloned() {
                    // The server refused the operation: it applied nothing,
                    // so neither do we. Any speculation is reversed.
                    debug!(
                        operation = request.operation_name(),
                        error = %app_error,
                        "application error, reversing speculation"
                    );
                    self.roll_back(cache, journal);
                    if let Some(on_completed) = handlers.on_completed {
                        on_completed(&payload, Some(&app_error));
                    }
                    DispatchState::RolledBack
                } else {
                    apply_confirmed(&payload, cache, viewer_id);
                    if let Some(on_completed) = handlers.on_completed {
                        on_completed(&payload, None);
                    }
                    DispatchState::Committed
                };
                MutationOutcome {
                    state,
                    payload: Some(payload),
                    error: None,
                }
            }
            Err(error) => {
                warn!(operation = request.operation_name(), %error, "transport error");
                self.roll_back(cache, journal);
                if let Some(on_error) = handlers.on_error {
                    on_error(&error);
                }
                MutationOutcome {
                    state: DispatchState::RolledBack,
                    payload: None,
                    error: Some(error),
                }
            }
        }
    }

    fn roll_back(&self, cache: &mut CacheStore, journal: Option<huddle_cache::ChangeJournal>) {
        if let Some(journal) = journal {
            cache.rollback(journal);
        }
    }
}
