//! huddle-effects - Side-Effect Coordinator
//!
//! After a successful mutation commit, this crate derives and fires the
//! user-visible consequences: toast notifications, navigation redirects,
//! session-token refresh, and local reconciliation of the viewer's position
//! inside an in-progress meeting.
//!
//! The toast queue, router and session store are external collaborators
//! reached through the sink traits in [`sinks`]; they are fire-and-forget
//! and never fail.

pub mod coordinator;
pub mod dispatch;
pub mod meeting;
pub mod routes;
pub mod sinks;

pub use coordinator::{run_app_error_effects, run_side_effects, EffectContext};
pub use dispatch::commit_with_effects;
pub use meeting::{reconcile_local_stage, set_local_stage_and_phase};
pub use routes::on_ex_team_route;
pub use sinks::{EffectSinks, Navigator, SessionSink, ToastSink, ToastSpec};
