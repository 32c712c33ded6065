//! Enumerations shared across the sync engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity family discriminator for polymorphic references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    User,
    Team,
    TeamMember,
    SoftTeamMember,
    Task,
    Notification,
    Organization,
    Invitation,
    Meeting,
}

/// Status of a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Active,
    Stuck,
    Done,
    Future,
}

impl TaskStatus {
    /// Convert to the wire string representation.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Stuck => "stuck",
            TaskStatus::Done => "done",
            TaskStatus::Future => "future",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

/// Kind of notification shown in the viewer's panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// The viewer was removed from an organization and its teams.
    KickedOut,
    /// The viewer was invited to join a team.
    TeamInvite,
    /// A task the viewer is involved in changed.
    TaskInvolves,
    /// Catch-all for kinds this client version does not special-case.
    Generic,
}

impl NotificationKind {
    /// Convert to the wire string representation.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            NotificationKind::KickedOut => "KICKED_OUT",
            NotificationKind::TeamInvite => "TEAM_INVITE",
            NotificationKind::TaskInvolves => "TASK_INVOLVES",
            NotificationKind::Generic => "GENERIC",
        }
    }

    /// Parse from the wire string representation.
    pub fn from_wire_str(s: &str) -> Result<Self, NotificationKindParseError> {
        match s {
            "KICKED_OUT" => Ok(NotificationKind::KickedOut),
            "TEAM_INVITE" => Ok(NotificationKind::TeamInvite),
            "TASK_INVOLVES" => Ok(NotificationKind::TaskInvolves),
            "GENERIC" => Ok(NotificationKind::Generic),
            _ => Err(NotificationKindParseError(s.to_string())),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for NotificationKind {
    type Err = NotificationKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire_str(s)
    }
}

/// Error when parsing an invalid notification kind string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationKindParseError(pub String);

impl fmt::Display for NotificationKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid notification kind: {}", self.0)
    }
}

impl std::error::Error for NotificationKindParseError {}

/// Connection fields: the ordered edge lists a parent entity can hold.
///
/// The set is closed. Updaters name the connections they touch through this
/// enum, which is what lets the cache enforce the no-dangling-edge invariant
/// centrally instead of per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionField {
    /// Teams the viewer belongs to (parent: User).
    Teams,
    /// The viewer's notification panel (parent: User).
    Notifications,
    /// Tasks assigned to or involving the viewer (parent: User).
    Tasks,
    /// Organizations the viewer belongs to (parent: User).
    Organizations,
    /// Teams under an organization (parent: Organization).
    OrgTeams,
    /// User ids of an organization's members (parent: Organization).
    OrgMembers,
    /// Confirmed members of a team (parent: Team).
    TeamMembers,
    /// Pending (invited, not yet accepted) members of a team (parent: Team).
    SoftTeamMembers,
    /// Tasks on a team board (parent: Team).
    TeamTasks,
    /// Outstanding invitations for a team (parent: Team).
    TeamInvitations,
}
