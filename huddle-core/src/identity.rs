//! Identity types for huddle entities.
//!
//! Entity ids are opaque strings assigned by the server. The client never
//! parses them; it only compares and stores them. Client-generated ids (for
//! optimistic records that have not been confirmed yet) use UUIDv7 so they
//! sort by creation time and cannot collide with server ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Common behavior for strongly-typed entity ids.
pub trait EntityIdType: Sized {
    /// Wrap a raw server-assigned id string.
    fn new(raw: impl Into<String>) -> Self;

    /// Borrow the raw id string.
    fn as_str(&self) -> &str;

    /// Unwrap into the raw id string.
    fn into_inner(self) -> String;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl EntityIdType for $name {
            fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            fn as_str(&self) -> &str {
                &self.0
            }

            fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

entity_id!(
    /// Id of a user account.
    UserId
);
entity_id!(
    /// Id of a team.
    TeamId
);
entity_id!(
    /// Id of a confirmed team membership. Server convention is
    /// `{userId}::{teamId}`, but the client treats it as opaque.
    TeamMemberId
);
entity_id!(
    /// Id of a pending (soft) team membership.
    SoftTeamMemberId
);
entity_id!(
    /// Id of a task card.
    TaskId
);
entity_id!(
    /// Id of a notification.
    NotificationId
);
entity_id!(
    /// Id of an organization.
    OrgId
);
entity_id!(
    /// Id of a team invitation.
    InvitationId
);
entity_id!(
    /// Id of an in-progress meeting.
    MeetingId
);
entity_id!(
    /// Id of a stage within a meeting phase.
    StageId
);

/// Generate a client-side id for an optimistic record (UUIDv7,
/// timestamp-sortable).
pub fn new_optimistic_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_round_trips_through_display() {
        let id = TeamId::new("team123");
        assert_eq!(id.as_str(), "team123");
        assert_eq!(id.to_string(), "team123");
        assert_eq!(TeamId::from("team123"), id);
    }

    #[test]
    fn entity_id_serde_is_transparent() {
        let id = UserId::new("user1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"user1\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn optimistic_ids_are_sortable() {
        let a = new_optimistic_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = new_optimistic_id();
        assert!(a < b, "{a} should sort before {b}");
    }
}
