//! huddle-cache - Normalized Object Cache
//!
//! The single source of truth for all entity data shown in the UI: a
//! mapping from entity id to entity record, plus ordered edge lists
//! (connections) attached to parent entity fields.
//!
//! The cache is an explicit store passed by reference into every updater
//! call - never a module-level singleton. All mutation goes through its
//! typed `put`/`delete`/edge operations so the no-dangling-edge invariant
//! is enforced centrally.
//!
//! While a patch guard is active (see [`CacheStore::begin_patch`]), every
//! mutating operation records its exact inverse into a [`ChangeJournal`].
//! Rolling the journal back replays the inverses in reverse order, which
//! restores the store to structural equality with its pre-patch state
//! without touching writes committed by overlapping invocations.

pub mod journal;
pub mod store;

pub use journal::{ChangeJournal, InverseOp};
pub use store::{CacheStore, ConnectionKey};
