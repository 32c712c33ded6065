//! Optimistic patches: speculative cache mutations applied before the
//! remote call resolves.
//!
//! Only effects that are locally derivable without server data qualify - a
//! removal whose id is already known, never an insert whose record the
//! server will shape. The closed set keeps the speculative surface small
//! and each variant maps onto the same updaters the confirmed path uses,
//! which is what makes the optimistic-then-confirmed overlap converge.

use crate::updaters;
use huddle_cache::CacheStore;
use huddle_core::{NotificationId, OrgId, TeamId, UserId};

/// A locally derivable, speculative change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimisticPatch {
    /// The viewer dismissed a notification; assume the server will agree.
    RemoveNotification { notification_id: NotificationId },
    /// The viewer left (or was told they are leaving) an organization.
    RemoveOrganization { org_id: OrgId },
    /// The viewer left a single team.
    RemoveTeam { team_id: TeamId },
}

impl OptimisticPatch {
    /// Apply the speculative change through the regular updaters. The
    /// caller is expected to hold a patch guard on the cache so the journal
    /// captures the exact inverse.
    pub fn apply(&self, cache: &mut CacheStore, viewer_id: &UserId) {
        match self {
            OptimisticPatch::RemoveNotification { notification_id } => {
                updaters::remove_notifications(
                    std::slice::from_ref(notification_id),
                    cache,
                    viewer_id,
                );
            }
            OptimisticPatch::RemoveOrganization { org_id } => {
                updaters::remove_organization(org_id, cache, viewer_id);
            }
            OptimisticPatch::RemoveTeam { team_id } => {
                updaters::remove_teams(std::slice::from_ref(team_id), cache, viewer_id);
            }
        }
    }
}
