//! Dispatcher + coordinator composition.
//!
//! The dispatcher commits the cache; the coordinator fires the user-visible
//! consequences. This wrapper runs the two in order for one invocation, so
//! call sites do not hand-sequence them (and cannot get the order wrong).

use crate::coordinator::{run_app_error_effects, run_side_effects, EffectContext};
use crate::sinks::EffectSinks;
use huddle_cache::CacheStore;
use huddle_core::MutationRequest;
use huddle_sync::{
    MutationDispatcher, MutationHandlers, MutationOutcome, OptimisticPatch, Transport,
};

/// Commit one mutation and, when it lands, run its side effects.
///
/// Success path: confirmed updaters, then toasts/navigation/session.
/// Application error: speculation reversed by the dispatcher, then the
/// error's own effects (specific toast, benefit-of-the-doubt redirect).
/// Transport error: speculation reversed, no effects beyond the caller's
/// `on_error`.
pub async fn commit_with_effects<T: Transport>(
    dispatcher: &MutationDispatcher<T>,
    request: MutationRequest,
    optimistic: Option<OptimisticPatch>,
    cache: &mut CacheStore,
    ctx: &EffectContext<'_>,
    sinks: &mut EffectSinks<'_>,
    handlers: MutationHandlers<'_>,
) -> MutationOutcome {
    let outcome = dispatcher
        .commit(request, optimistic, cache, ctx.viewer_id, handlers)
        .await;

    if let Some(payload) = &outcome.payload {
        if outcome.is_committed() {
            run_side_effects(payload, cache, ctx, sinks);
        } else if let Some(error) = payload.app_error() {
            run_app_error_effects(payload, error, ctx, sinks);
        }
    }

    outcome
}
