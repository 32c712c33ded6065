//! huddle-core - Entity Types
//!
//! Pure data structures with no behavior beyond construction and merging.
//! All other crates depend on this. This crate contains the typed entity
//! ids, the cacheable entity records, the per-operation mutation request
//! and payload variants, session claims, configuration, and the error
//! taxonomy.

pub mod config;
pub mod entities;
pub mod enums;
pub mod error;
pub mod identity;
pub mod payload;
pub mod session;

pub use config::SyncConfig;
pub use entities::{
    Entity, Invitation, Meeting, MeetingPhase, MeetingStage, Notification, Organization,
    SoftTeamMember, Task, Team, TeamMember, User,
};
pub use enums::{
    ConnectionField, EntityType, NotificationKind, NotificationKindParseError, TaskStatus,
};
pub use error::{
    AppError, ConfigError, HuddleError, HuddleResult, SessionError, TransportError,
};
pub use identity::{
    new_optimistic_id, EntityIdType, InvitationId, MeetingId, NotificationId, OrgId,
    SoftTeamMemberId, StageId, TaskId, TeamId, TeamMemberId, Timestamp, UserId,
};
pub use payload::{
    AcceptTeamInvitePayload, ClearNotificationPayload, LeaveTeamPayload, MutationPayload,
    MutationRequest, RemoveOrgUserPayload,
};
pub use session::{decode_session_claims, SessionClaims};
