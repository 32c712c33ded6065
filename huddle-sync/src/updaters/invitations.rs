//! Invitation updaters.

use huddle_cache::CacheStore;
use huddle_core::{ConnectionField, Entity, EntityIdType, InvitationId};
use tracing::trace;

/// Remove invitations from their team's outstanding list, then delete the
/// records. An invitation consumed by an acceptance elsewhere may already be
/// gone; that is fine.
pub fn remove_invitations(invitation_ids: &[InvitationId], cache: &mut CacheStore) {
    for invitation_id in invitation_ids {
        match cache.get(invitation_id.as_str()) {
            Some(Entity::Invitation(invitation)) => {
                let team_id = invitation.team_id.clone();
                cache.remove_edge(
                    team_id.as_str(),
                    ConnectionField::TeamInvitations,
                    invitation_id.as_str(),
                );
                cache.delete(invitation_id.as_str());
            }
            _ => {
                trace!(invitation_id = %invitation_id, "remove_invitations: absent, already satisfied")
            }
        }
    }
}
