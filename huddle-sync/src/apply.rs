//! Confirmed payload application: one typed dispatcher from payload variant
//! to the family updaters it touches.
//!
//! All families of one payload are applied in a single synchronous pass over
//! the cache. Updaters are infallible (precondition misses are no-ops), so a
//! commit is all-or-nothing by construction: no view can observe a payload
//! half-applied.

use crate::subject::resolve_subject;
use crate::updaters;
use huddle_cache::CacheStore;
use huddle_core::{
    AcceptTeamInvitePayload, ClearNotificationPayload, Entity, LeaveTeamPayload, MutationPayload,
    RemoveOrgUserPayload, TaskId, TeamId, TeamMemberId, UserId,
};
use tracing::debug;

/// Apply every entity family a confirmed payload carries.
///
/// Callers must not invoke this for payloads carrying an application-level
/// error; in that case the server applied nothing and neither do we.
pub fn apply_confirmed(payload: &MutationPayload, cache: &mut CacheStore, viewer_id: &UserId) {
    debug!(operation = payload.operation_name(), "applying confirmed payload");
    match payload {
        MutationPayload::AcceptTeamInvite(p) => apply_accept_team_invite(p, cache, viewer_id),
        MutationPayload::RemoveOrgUser(p) => apply_remove_org_user(p, cache, viewer_id),
        MutationPayload::ClearNotification(p) => apply_clear_notification(p, cache, viewer_id),
        MutationPayload::LeaveTeam(p) => apply_leave_team(p, cache, viewer_id),
    }
}

fn apply_accept_team_invite(
    p: &AcceptTeamInvitePayload,
    cache: &mut CacheStore,
    viewer_id: &UserId,
) {
    if let Some(team) = &p.team {
        updaters::add_teams(std::slice::from_ref(team), cache, viewer_id);
    }
    if let Some(meeting) = &p.meeting {
        cache.put(Entity::Meeting(meeting.clone()));
    }
    if let Some(user) = &p.user {
        cache.put(Entity::User(user.clone()));
    }
    if let Some(member) = &p.team_member {
        updaters::accept_team_member(member, p.removed_soft_team_member_id.as_ref(), cache);
    }
    updaters::remove_invitations(p.removed_invitation_id.as_slice(), cache);
    updaters::remove_notifications(p.removed_notification_id.as_slice(), cache, viewer_id);
    updaters::upsert_tasks(&p.hardened_tasks, cache, viewer_id);
}

fn apply_remove_org_user(p: &RemoveOrgUserPayload, cache: &mut CacheStore, viewer_id: &UserId) {
    let subject = resolve_subject(p.user.as_ref().map(|u| &u.id), viewer_id);

    // Panel surgery is the same on both branches.
    updaters::remove_notifications(&p.removed_team_notification_ids, cache, viewer_id);
    updaters::remove_notifications(&p.removed_org_notification_ids, cache, viewer_id);
    updaters::add_notifications(&p.kick_out_notifications, cache, viewer_id);

    if subject.is_viewer {
        if let Some(org) = &p.organization {
            updaters::remove_organization(&org.id, cache, viewer_id);
        }
        // The payload names the teams explicitly; the cascade above may
        // have missed ones the cache never linked to the org.
        let team_ids: Vec<TeamId> = p.teams.iter().map(|t| t.id.clone()).collect();
        updaters::remove_teams(&team_ids, cache, viewer_id);

        let task_ids: Vec<TaskId> = p.updated_tasks.iter().map(|t| t.id.clone()).collect();
        updaters::remove_tasks(&task_ids, cache, viewer_id);
    } else {
        if let Some(org) = &p.organization {
            updaters::remove_org_members(&org.id, subject.subject_id.as_ref(), cache);
        }
        let member_ids: Vec<TeamMemberId> = p.team_members.iter().map(|m| m.id.clone()).collect();
        updaters::remove_team_members(&member_ids, cache, viewer_id);

        for meeting in &p.meetings {
            cache.put(Entity::Meeting(meeting.clone()));
        }
        updaters::upsert_tasks(&p.updated_tasks, cache, viewer_id);
    }
}

fn apply_clear_notification(
    p: &ClearNotificationPayload,
    cache: &mut CacheStore,
    viewer_id: &UserId,
) {
    updaters::remove_notifications(p.removed_notification_id.as_slice(), cache, viewer_id);
}

fn apply_leave_team(p: &LeaveTeamPayload, cache: &mut CacheStore, viewer_id: &UserId) {
    let subject = resolve_subject(p.user.as_ref().map(|u| &u.id), viewer_id);
    if subject.is_viewer {
        if let Some(team) = &p.team {
            updaters::remove_teams(std::slice::from_ref(&team.id), cache, viewer_id);
        }
    } else {
        if let Some(team) = &p.team {
            cache.put(Entity::Team(team.clone()));
        }
        if let Some(member_id) = &p.removed_team_member_id {
            updaters::remove_team_members(std::slice::from_ref(member_id), cache, viewer_id);
        }
    }
}
