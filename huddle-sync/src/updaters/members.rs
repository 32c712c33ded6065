//! Team membership updaters, hard and soft.

use crate::subject::resolve_subject;
use crate::updaters::teams::remove_teams;
use huddle_cache::CacheStore;
use huddle_core::{
    ConnectionField, Entity, EntityIdType, SoftTeamMemberId, TeamMember, TeamMemberId, UserId,
};
use tracing::trace;

/// Upsert confirmed memberships and attach them to their team's member list.
pub fn add_team_members(members: &[TeamMember], cache: &mut CacheStore) {
    for member in members {
        cache.put(Entity::TeamMember(member.clone()));
        cache.append_edge(
            member.team_id.as_str(),
            ConnectionField::TeamMembers,
            member.id.as_str(),
        );
    }
}

/// Remove confirmed memberships. When the departing member is the viewer the
/// whole team leaves the viewer's graph (cascade); anyone else only loses
/// their member edge.
pub fn remove_team_members(member_ids: &[TeamMemberId], cache: &mut CacheStore, viewer_id: &UserId) {
    for member_id in member_ids {
        let member = match cache.get(member_id.as_str()) {
            Some(Entity::TeamMember(member)) => member.clone(),
            _ => {
                trace!(member_id = %member_id, "remove_team_members: member absent, already satisfied");
                continue;
            }
        };

        let subject = resolve_subject(Some(&member.user_id), viewer_id);
        if subject.is_viewer {
            remove_teams(std::slice::from_ref(&member.team_id), cache, viewer_id);
        } else {
            cache.remove_edge(
                member.team_id.as_str(),
                ConnectionField::TeamMembers,
                member_id.as_str(),
            );
            cache.delete(member_id.as_str());
        }
    }
}

/// Remove pending memberships: detach from the team's soft member list,
/// then delete the record.
pub fn remove_soft_team_members(member_ids: &[SoftTeamMemberId], cache: &mut CacheStore) {
    for member_id in member_ids {
        let member = match cache.get(member_id.as_str()) {
            Some(Entity::SoftTeamMember(member)) => member.clone(),
            _ => {
                trace!(member_id = %member_id, "remove_soft_team_members: absent, already satisfied");
                continue;
            }
        };
        cache.remove_edge(
            member.team_id.as_str(),
            ConnectionField::SoftTeamMembers,
            member_id.as_str(),
        );
        cache.delete(member_id.as_str());
    }
}

/// The soft-to-hard transition of an accepted invitation: the pending record
/// is removed and the confirmed record added as one logical step, so the
/// cache never holds both for the same person.
pub fn accept_team_member(
    member: &TeamMember,
    removed_soft_member_id: Option<&SoftTeamMemberId>,
    cache: &mut CacheStore,
) {
    if let Some(soft_id) = removed_soft_member_id {
        remove_soft_team_members(std::slice::from_ref(soft_id), cache);
    }
    add_team_members(std::slice::from_ref(member), cache);
}
