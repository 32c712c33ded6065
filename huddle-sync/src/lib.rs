//! huddle-sync - Entity Updaters and Mutation Dispatcher
//!
//! This crate owns the two middle layers of the sync engine: the library of
//! per-family entity updaters that perform cache surgery, and the mutation
//! dispatcher that drives one remote call through its
//! `Idle -> Pending -> {Committed | RolledBack}` lifecycle, including the
//! optimistic patch and its exact rollback.
//!
//! The [`Transport`] trait is the only boundary to the outside world; the
//! side-effect layer (toasts, navigation, session) lives in `huddle-effects`
//! and runs strictly after a commit.

pub mod apply;
pub mod dispatcher;
pub mod optimistic;
pub mod subject;
pub mod transport;
pub mod updaters;

pub use apply::apply_confirmed;
pub use dispatcher::{DispatchState, MutationDispatcher, MutationHandlers, MutationOutcome};
pub use optimistic::OptimisticPatch;
pub use subject::{resolve_subject, Subject};
pub use transport::Transport;
