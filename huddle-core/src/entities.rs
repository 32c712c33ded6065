//! Core entity structures.
//!
//! These are the cacheable records of the client object graph. Every record
//! is identified by a server-assigned string id and owned by the cache once
//! stored. Field-level `merge` implements the rule that a confirmed payload
//! wins over any optimistic value for the fields it carries, while fields it
//! omits keep their cached value.

use crate::{
    EntityIdType, EntityType, InvitationId, MeetingId, NotificationId, NotificationKind, OrgId,
    SoftTeamMemberId, StageId, TaskId, TaskStatus, TeamId, TeamMemberId, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

macro_rules! merge_opt {
    ($dst:expr, $src:expr) => {
        if $src.is_some() {
            $dst = $src;
        }
    };
}

/// A user account. The viewer is the user whose session drives
/// self-vs-other branching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub preferred_name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

impl User {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            preferred_name: None,
            email: None,
            picture: None,
        }
    }

    pub fn with_preferred_name(mut self, name: impl Into<String>) -> Self {
        self.preferred_name = Some(name.into());
        self
    }

    fn merge(&mut self, incoming: Self) {
        merge_opt!(self.preferred_name, incoming.preferred_name);
        merge_opt!(self.email, incoming.email);
        merge_opt!(self.picture, incoming.picture);
    }
}

/// A team inside an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub org_id: Option<OrgId>,
    /// Id of the in-progress meeting, if one is running.
    pub new_meeting_id: Option<MeetingId>,
    pub is_archived: bool,
    pub updated_at: Option<Timestamp>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            org_id: None,
            new_meeting_id: None,
            is_archived: false,
            updated_at: None,
        }
    }

    pub fn with_org(mut self, org_id: impl Into<OrgId>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    pub fn with_meeting(mut self, meeting_id: impl Into<MeetingId>) -> Self {
        self.new_meeting_id = Some(meeting_id.into());
        self
    }

    fn merge(&mut self, incoming: Self) {
        self.name = incoming.name;
        self.is_archived = incoming.is_archived;
        merge_opt!(self.org_id, incoming.org_id);
        merge_opt!(self.new_meeting_id, incoming.new_meeting_id);
        merge_opt!(self.updated_at, incoming.updated_at);
    }
}

/// A confirmed team membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub team_id: TeamId,
    pub user_id: UserId,
    pub preferred_name: Option<String>,
    pub picture: Option<String>,
    pub is_lead: bool,
}

impl TeamMember {
    pub fn new(
        id: impl Into<TeamMemberId>,
        team_id: impl Into<TeamId>,
        user_id: impl Into<UserId>,
    ) -> Self {
        Self {
            id: id.into(),
            team_id: team_id.into(),
            user_id: user_id.into(),
            preferred_name: None,
            picture: None,
            is_lead: false,
        }
    }

    pub fn with_preferred_name(mut self, name: impl Into<String>) -> Self {
        self.preferred_name = Some(name.into());
        self
    }

    fn merge(&mut self, incoming: Self) {
        self.team_id = incoming.team_id;
        self.user_id = incoming.user_id;
        self.is_lead = incoming.is_lead;
        merge_opt!(self.preferred_name, incoming.preferred_name);
        merge_opt!(self.picture, incoming.picture);
    }
}

/// A pending (invited, not yet accepted) team membership.
///
/// A soft member and a hard member for the same person must never coexist;
/// the accept-invite updater removes the soft record in the same transition
/// that adds the hard one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftTeamMember {
    pub id: SoftTeamMemberId,
    pub team_id: TeamId,
    pub preferred_name: Option<String>,
    pub email: Option<String>,
}

impl SoftTeamMember {
    pub fn new(id: impl Into<SoftTeamMemberId>, team_id: impl Into<TeamId>) -> Self {
        Self {
            id: id.into(),
            team_id: team_id.into(),
            preferred_name: None,
            email: None,
        }
    }

    fn merge(&mut self, incoming: Self) {
        self.team_id = incoming.team_id;
        merge_opt!(self.preferred_name, incoming.preferred_name);
        merge_opt!(self.email, incoming.email);
    }
}

/// A task card on a team board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub team_id: TeamId,
    /// Owner of the task. Soft-assigned tasks carry the soft member's id
    /// here once hardened.
    pub user_id: Option<UserId>,
    pub content: Option<String>,
    pub status: TaskStatus,
    pub sort_order: f64,
    pub updated_at: Option<Timestamp>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, team_id: impl Into<TeamId>) -> Self {
        Self {
            id: id.into(),
            team_id: team_id.into(),
            user_id: None,
            content: None,
            status: TaskStatus::Active,
            sort_order: 0.0,
            updated_at: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    fn merge(&mut self, incoming: Self) {
        self.team_id = incoming.team_id;
        self.status = incoming.status;
        self.sort_order = incoming.sort_order;
        merge_opt!(self.user_id, incoming.user_id);
        merge_opt!(self.content, incoming.content);
        merge_opt!(self.updated_at, incoming.updated_at);
    }
}

/// A notification in the viewer's panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    /// Organization context, set for org-scoped kinds such as `KickedOut`.
    pub org_id: Option<OrgId>,
    /// Team context, set for team-scoped kinds. The kicked-out redirect
    /// walk reads this field.
    pub team_id: Option<TeamId>,
    pub started_at: Option<Timestamp>,
}

impl Notification {
    pub fn new(id: impl Into<NotificationId>, kind: NotificationKind) -> Self {
        Self {
            id: id.into(),
            kind,
            org_id: None,
            team_id: None,
            started_at: None,
        }
    }

    pub fn with_org(mut self, org_id: impl Into<OrgId>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    pub fn with_team(mut self, team_id: impl Into<TeamId>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    fn merge(&mut self, incoming: Self) {
        self.kind = incoming.kind;
        merge_opt!(self.org_id, incoming.org_id);
        merge_opt!(self.team_id, incoming.team_id);
        merge_opt!(self.started_at, incoming.started_at);
    }
}

/// An organization owning one or more teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrgId,
    pub name: String,
    pub picture: Option<String>,
}

impl Organization {
    pub fn new(id: impl Into<OrgId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            picture: None,
        }
    }

    fn merge(&mut self, incoming: Self) {
        self.name = incoming.name;
        merge_opt!(self.picture, incoming.picture);
    }
}

/// An outstanding invitation to join a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub team_id: TeamId,
    pub email: Option<String>,
}

impl Invitation {
    pub fn new(id: impl Into<InvitationId>, team_id: impl Into<TeamId>) -> Self {
        Self {
            id: id.into(),
            team_id: team_id.into(),
            email: None,
        }
    }

    fn merge(&mut self, incoming: Self) {
        self.team_id = incoming.team_id;
        merge_opt!(self.email, incoming.email);
    }
}

/// A stage inside a meeting phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingStage {
    pub id: StageId,
    pub is_complete: bool,
}

impl MeetingStage {
    pub fn new(id: impl Into<StageId>) -> Self {
        Self {
            id: id.into(),
            is_complete: false,
        }
    }
}

/// A phase of an in-progress meeting, holding an ordered list of stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingPhase {
    pub phase_type: String,
    pub stages: Vec<MeetingStage>,
}

impl MeetingPhase {
    pub fn new(phase_type: impl Into<String>, stages: Vec<MeetingStage>) -> Self {
        Self {
            phase_type: phase_type.into(),
            stages,
        }
    }
}

/// An in-progress collaborative meeting on a team.
///
/// `local_stage_id` is client-local navigation state: the stage the viewer
/// is currently looking at. The server never sends it, so `merge` always
/// preserves the cached value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub team_id: TeamId,
    pub facilitator_stage_id: StageId,
    pub phases: Vec<MeetingPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_stage_id: Option<StageId>,
}

impl Meeting {
    pub fn new(
        id: impl Into<MeetingId>,
        team_id: impl Into<TeamId>,
        facilitator_stage_id: impl Into<StageId>,
    ) -> Self {
        Self {
            id: id.into(),
            team_id: team_id.into(),
            facilitator_stage_id: facilitator_stage_id.into(),
            phases: Vec::new(),
            local_stage_id: None,
        }
    }

    pub fn with_phases(mut self, phases: Vec<MeetingPhase>) -> Self {
        self.phases = phases;
        self
    }

    /// Find a stage (and its phase) by id across all phases.
    pub fn find_stage(&self, stage_id: &StageId) -> Option<(&MeetingPhase, &MeetingStage)> {
        self.phases.iter().find_map(|phase| {
            phase
                .stages
                .iter()
                .find(|stage| &stage.id == stage_id)
                .map(|stage| (phase, stage))
        })
    }

    fn merge(&mut self, incoming: Self) {
        self.team_id = incoming.team_id;
        self.facilitator_stage_id = incoming.facilitator_stage_id;
        self.phases = incoming.phases;
        merge_opt!(self.local_stage_id, incoming.local_stage_id);
    }
}

// ============================================================================
// POLYMORPHIC ENTITY
// ============================================================================

/// Any cacheable record, tagged by family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum Entity {
    User(User),
    Team(Team),
    TeamMember(TeamMember),
    SoftTeamMember(SoftTeamMember),
    Task(Task),
    Notification(Notification),
    Organization(Organization),
    Invitation(Invitation),
    Meeting(Meeting),
}

impl Entity {
    /// The record's globally unique id.
    pub fn id(&self) -> &str {
        match self {
            Entity::User(e) => e.id.as_str(),
            Entity::Team(e) => e.id.as_str(),
            Entity::TeamMember(e) => e.id.as_str(),
            Entity::SoftTeamMember(e) => e.id.as_str(),
            Entity::Task(e) => e.id.as_str(),
            Entity::Notification(e) => e.id.as_str(),
            Entity::Organization(e) => e.id.as_str(),
            Entity::Invitation(e) => e.id.as_str(),
            Entity::Meeting(e) => e.id.as_str(),
        }
    }

    /// The record's family.
    pub fn entity_type(&self) -> EntityType {
        match self {
            Entity::User(_) => EntityType::User,
            Entity::Team(_) => EntityType::Team,
            Entity::TeamMember(_) => EntityType::TeamMember,
            Entity::SoftTeamMember(_) => EntityType::SoftTeamMember,
            Entity::Task(_) => EntityType::Task,
            Entity::Notification(_) => EntityType::Notification,
            Entity::Organization(_) => EntityType::Organization,
            Entity::Invitation(_) => EntityType::Invitation,
            Entity::Meeting(_) => EntityType::Meeting,
        }
    }

    /// Field-level merge: the incoming record wins for every field it
    /// carries, omitted optional fields keep their current value. An id
    /// collision across families replaces the record wholesale (the
    /// confirmed payload is authoritative).
    pub fn merge(&mut self, incoming: Entity) {
        match (self, incoming) {
            (Entity::User(cur), Entity::User(inc)) => cur.merge(inc),
            (Entity::Team(cur), Entity::Team(inc)) => cur.merge(inc),
            (Entity::TeamMember(cur), Entity::TeamMember(inc)) => cur.merge(inc),
            (Entity::SoftTeamMember(cur), Entity::SoftTeamMember(inc)) => cur.merge(inc),
            (Entity::Task(cur), Entity::Task(inc)) => cur.merge(inc),
            (Entity::Notification(cur), Entity::Notification(inc)) => cur.merge(inc),
            (Entity::Organization(cur), Entity::Organization(inc)) => cur.merge(inc),
            (Entity::Invitation(cur), Entity::Invitation(inc)) => cur.merge(inc),
            (Entity::Meeting(cur), Entity::Meeting(inc)) => cur.merge(inc),
            (cur, inc) => *cur = inc,
        }
    }
}

macro_rules! entity_from {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Entity {
            fn from(e: $ty) -> Self {
                Entity::$variant(e)
            }
        }
    };
}

entity_from!(User, User);
entity_from!(Team, Team);
entity_from!(TeamMember, TeamMember);
entity_from!(SoftTeamMember, SoftTeamMember);
entity_from!(Task, Task);
entity_from!(Notification, Notification);
entity_from!(Organization, Organization);
entity_from!(Invitation, Invitation);
entity_from!(Meeting, Meeting);
