//! Entity updaters: one pure function per family and direction.
//!
//! Uniform rules across the library:
//!
//! - Upsert updaters `put` the record, then append an edge into every
//!   connection that logically contains it. Re-applying the same input
//!   leaves the cache unchanged.
//! - Removal updaters tolerate empty input, detach edges before deleting
//!   the record (no view ever observes a dangling reference), and never
//!   raise: a missing id is already satisfied and is a trace-logged no-op.
//!   The same updater runs on the optimistic path, the confirmed path, and
//!   retried requests, so this tolerance is load-bearing, not politeness.
//! - Removals of memberships branch on the resolved subject: the viewer
//!   losing a membership cascades to the containing aggregate, anyone else
//!   losing one detaches a single edge.

mod invitations;
mod members;
mod notifications;
mod organizations;
mod tasks;
mod teams;

pub use invitations::remove_invitations;
pub use members::{
    accept_team_member, add_team_members, remove_soft_team_members, remove_team_members,
};
pub use notifications::{add_notifications, remove_notifications};
pub use organizations::{remove_org_members, remove_organization};
pub use tasks::{remove_tasks, upsert_tasks};
pub use teams::{add_teams, remove_teams};
