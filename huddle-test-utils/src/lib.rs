//! huddle Test Utilities
//!
//! Centralized test infrastructure for the huddle workspace:
//! - A scriptable [`MockTransport`] for dispatcher tests
//! - Recording sinks for coordinator assertions
//! - Cache fixture builders for common org/team graphs
//! - A session-token minting helper for claims tests

// Re-export the pieces tests combine most often
pub use huddle_cache::CacheStore;
pub use huddle_core::{
    ConnectionField, Entity, EntityIdType, MutationPayload, MutationRequest, Notification,
    NotificationKind, Organization, SessionClaims, SoftTeamMember, Task, Team, TeamId, TeamMember,
    TransportError, User, UserId,
};
pub use huddle_effects::{EffectSinks, Navigator, SessionSink, ToastSink, ToastSpec};
pub use huddle_sync::Transport;

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// MOCK TRANSPORT
// ============================================================================

/// A transport that answers from a pre-loaded script, in order. Invoking it
/// past the end of the script fails at the transport level, which surfaces
/// as a visible test failure instead of a hang.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<MutationPayload, TransportError>>>,
    invocations: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that will answer the next call with `payload`.
    pub fn replying(payload: MutationPayload) -> Self {
        let transport = Self::new();
        transport.push_payload(payload);
        transport
    }

    /// A transport that will fail the next call with `error`.
    pub fn failing(error: TransportError) -> Self {
        let transport = Self::new();
        transport.push_error(error);
        transport
    }

    pub fn push_payload(&self, payload: MutationPayload) {
        self.script.lock().unwrap().push_back(Ok(payload));
    }

    pub fn push_error(&self, error: TransportError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Number of calls made so far.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn invoke(&self, request: &MutationRequest) -> Result<MutationPayload, TransportError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Network {
                    operation: request.operation_name().to_string(),
                    reason: "unscripted call".to_string(),
                })
            })
    }
}

// ============================================================================
// RECORDING SINKS
// ============================================================================

/// Records every toast pushed at it.
#[derive(Debug, Default)]
pub struct RecordingToasts(pub Vec<ToastSpec>);

impl ToastSink for RecordingToasts {
    fn push(&mut self, toast: ToastSpec) {
        self.0.push(toast);
    }
}

/// Records every navigation issued at it.
#[derive(Debug, Default)]
pub struct RecordingNavigator(pub Vec<String>);

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, path: &str) {
        self.0.push(path.to_string());
    }
}

/// Records session installs and welcome destinations.
#[derive(Debug, Default)]
pub struct RecordingSession {
    pub sessions: Vec<(String, UserId)>,
    pub welcome_destinations: Vec<String>,
}

impl SessionSink for RecordingSession {
    fn set_session(&mut self, token: &str, user_id: &UserId) {
        self.sessions.push((token.to_string(), user_id.clone()));
    }

    fn set_welcome_destination(&mut self, path: &str) {
        self.welcome_destinations.push(path.to_string());
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// The conventional viewer id used across fixtures.
pub fn viewer_id() -> UserId {
    UserId::new("viewer")
}

/// Seed an organization with named teams, a viewer membership on each team,
/// and the org/viewer connections wired up.
pub fn seed_org_with_teams(
    cache: &mut CacheStore,
    org_id: &str,
    org_name: &str,
    teams: &[(&str, &str)],
) {
    let viewer = viewer_id();
    cache.put(Entity::Organization(Organization::new(org_id, org_name)));
    cache.append_edge(viewer.as_str(), ConnectionField::Organizations, org_id);
    cache.append_edge(org_id, ConnectionField::OrgMembers, viewer.as_str());

    for (team_id, team_name) in teams {
        let team = Team::new(*team_id, *team_name).with_org(org_id);
        huddle_sync::updaters::add_teams(std::slice::from_ref(&team), cache, &viewer);

        let member_id = format!("{}::{}", viewer.as_str(), team_id);
        huddle_sync::updaters::add_team_members(
            &[TeamMember::new(member_id, *team_id, viewer.as_str())],
            cache,
        );
    }
}

/// Seed a notification into the viewer's panel.
pub fn seed_notification(cache: &mut CacheStore, id: &str, kind: NotificationKind) {
    let viewer = viewer_id();
    huddle_sync::updaters::add_notifications(
        std::slice::from_ref(&Notification::new(id, kind)),
        cache,
        &viewer,
    );
}

/// Mint a signed session token for the given claims. The signature key is
/// arbitrary: the client decodes claims without verifying.
pub fn mint_session_token(claims: &SessionClaims) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(b"huddle-test-secret"),
    )
    .expect("claims always encode")
}
