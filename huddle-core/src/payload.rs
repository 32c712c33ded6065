//! Mutation requests and their confirmed payloads.
//!
//! Each remote operation declares, as a closed struct, the maximal set of
//! entity families its payload may contain. Absent fields mean "unaffected",
//! never an error. Updater dispatch is a typed match over
//! [`MutationPayload`], not speculative field probing.

use crate::{
    AppError, InvitationId, Meeting, Notification, NotificationId, OrgId, Organization,
    SoftTeamMemberId, Task, Team, TeamId, TeamMember, TeamMemberId, User, UserId,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variables for one remote call, tagged by operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum MutationRequest {
    /// Accept a team invitation, either from a notification or from an
    /// out-of-band invite token. Exactly one of the two should be set.
    #[serde(rename_all = "camelCase")]
    AcceptTeamInvite {
        notification_id: Option<NotificationId>,
        invite_token: Option<String>,
    },
    /// Remove a user from an organization (self-removal is leaving).
    #[serde(rename_all = "camelCase")]
    RemoveOrgUser { org_id: OrgId, user_id: UserId },
    /// Dismiss one notification from the viewer's panel.
    #[serde(rename_all = "camelCase")]
    ClearNotification { notification_id: NotificationId },
    /// Remove a user from a single team.
    #[serde(rename_all = "camelCase")]
    LeaveTeam { team_id: TeamId, user_id: UserId },
}

impl MutationRequest {
    /// The wire name of the operation.
    pub fn operation_name(&self) -> &'static str {
        match self {
            MutationRequest::AcceptTeamInvite { .. } => "acceptTeamInvite",
            MutationRequest::RemoveOrgUser { .. } => "removeOrgUser",
            MutationRequest::ClearNotification { .. } => "clearNotification",
            MutationRequest::LeaveTeam { .. } => "leaveTeam",
        }
    }
}

impl fmt::Display for MutationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation_name())
    }
}

/// Payload of a completed `acceptTeamInvite` call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcceptTeamInvitePayload {
    pub error: Option<AppError>,
    /// The joined team, complete enough to render its dashboard.
    pub team: Option<Team>,
    /// The in-progress meeting on that team, if one is running.
    pub meeting: Option<Meeting>,
    /// The new hard membership.
    pub team_member: Option<TeamMember>,
    /// The soft membership this acceptance replaces.
    pub removed_soft_team_member_id: Option<SoftTeamMemberId>,
    /// The invitation consumed by the acceptance.
    pub removed_invitation_id: Option<InvitationId>,
    /// The invite notification consumed by the acceptance.
    pub removed_notification_id: Option<NotificationId>,
    /// Tasks that were soft-assigned to the invitee, now hardened.
    pub hardened_tasks: Vec<Task>,
    /// Reissued session token reflecting the new team membership.
    pub auth_token: Option<String>,
    /// The viewer's user record, refreshed.
    pub user: Option<User>,
}

/// Payload of a completed `removeOrgUser` call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoveOrgUserPayload {
    pub error: Option<AppError>,
    pub organization: Option<Organization>,
    /// The removed user (may be the viewer or another member).
    pub user: Option<User>,
    /// Teams of the organization the user was removed from.
    pub teams: Vec<Team>,
    /// Meetings in progress on those teams.
    pub meetings: Vec<Meeting>,
    /// The user's memberships on those teams.
    pub team_members: Vec<TeamMember>,
    /// Tasks reassigned or orphaned by the removal.
    pub updated_tasks: Vec<Task>,
    pub removed_team_notification_ids: Vec<NotificationId>,
    pub removed_org_notification_ids: Vec<NotificationId>,
    /// Notifications telling the removed viewer which teams they lost.
    pub kick_out_notifications: Vec<Notification>,
}

/// Payload of a completed `clearNotification` call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClearNotificationPayload {
    pub error: Option<AppError>,
    pub removed_notification_id: Option<NotificationId>,
}

/// Payload of a completed `leaveTeam` call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaveTeamPayload {
    pub error: Option<AppError>,
    pub team: Option<Team>,
    /// The departed user.
    pub user: Option<User>,
    pub removed_team_member_id: Option<TeamMemberId>,
}

/// The confirmed result of one remote call, tagged by operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum MutationPayload {
    AcceptTeamInvite(AcceptTeamInvitePayload),
    RemoveOrgUser(RemoveOrgUserPayload),
    ClearNotification(ClearNotificationPayload),
    LeaveTeam(LeaveTeamPayload),
}

impl MutationPayload {
    /// The wire name of the operation this payload answers.
    pub fn operation_name(&self) -> &'static str {
        match self {
            MutationPayload::AcceptTeamInvite(_) => "acceptTeamInvite",
            MutationPayload::RemoveOrgUser(_) => "removeOrgUser",
            MutationPayload::ClearNotification(_) => "clearNotification",
            MutationPayload::LeaveTeam(_) => "leaveTeam",
        }
    }

    /// Application-level error carried inside the payload, if any.
    pub fn app_error(&self) -> Option<&AppError> {
        match self {
            MutationPayload::AcceptTeamInvite(p) => p.error.as_ref(),
            MutationPayload::RemoveOrgUser(p) => p.error.as_ref(),
            MutationPayload::ClearNotification(p) => p.error.as_ref(),
            MutationPayload::LeaveTeam(p) => p.error.as_ref(),
        }
    }

    /// True when the payload answers the given request's operation.
    pub fn answers(&self, request: &MutationRequest) -> bool {
        self.operation_name() == request.operation_name()
    }
}
