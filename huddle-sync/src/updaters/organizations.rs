//! Organization updaters.

use crate::updaters::teams::remove_teams;
use huddle_cache::CacheStore;
use huddle_core::{ConnectionField, EntityIdType, OrgId, TeamId, UserId};
use tracing::trace;

/// Remove an organization from the viewer's graph, cascading through every
/// team under it. Used when the viewer leaves or is removed from the org.
pub fn remove_organization(org_id: &OrgId, cache: &mut CacheStore, viewer_id: &UserId) {
    let team_ids: Vec<TeamId> = cache
        .connection(org_id.as_str(), ConnectionField::OrgTeams)
        .iter()
        .map(|id| TeamId::from(id.clone()))
        .collect();
    remove_teams(&team_ids, cache, viewer_id);

    cache.remove_edge(
        viewer_id.as_str(),
        ConnectionField::Organizations,
        org_id.as_str(),
    );
    cache.drop_connections(org_id.as_str());
    cache.delete(org_id.as_str());
}

/// Detach one member from an organization's member list. The user record
/// itself survives; it may be referenced from other organizations and teams.
pub fn remove_org_members(org_id: &OrgId, user_id: Option<&UserId>, cache: &mut CacheStore) {
    let Some(user_id) = user_id else {
        trace!(org_id = %org_id, "remove_org_members: no subject in payload, nothing to detach");
        return;
    };
    cache.remove_edge(
        org_id.as_str(),
        ConnectionField::OrgMembers,
        user_id.as_str(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updaters::add_teams;
    use huddle_core::{Entity, Organization, Team};

    fn viewer() -> UserId {
        UserId::new("viewer")
    }

    fn org_with_two_teams() -> CacheStore {
        let mut cache = CacheStore::new();
        cache.put(Entity::Organization(Organization::new("o1", "Acme")));
        cache.append_edge("viewer", ConnectionField::Organizations, "o1");
        cache.append_edge("o1", ConnectionField::OrgMembers, "viewer");
        cache.append_edge("o1", ConnectionField::OrgMembers, "other");
        add_teams(
            &[
                Team::new("t1", "Rocket").with_org("o1"),
                Team::new("t2", "Comet").with_org("o1"),
            ],
            &mut cache,
            &viewer(),
        );
        cache
    }

    #[test]
    fn remove_organization_cascades_through_teams() {
        let mut cache = org_with_two_teams();
        remove_organization(&OrgId::new("o1"), &mut cache, &viewer());

        for id in ["o1", "t1", "t2"] {
            assert!(!cache.contains(id), "{id} should be gone");
        }
        assert!(cache.connection("viewer", ConnectionField::Teams).is_empty());
        assert!(cache.connection("viewer", ConnectionField::Organizations).is_empty());
        assert!(cache.connection("o1", ConnectionField::OrgMembers).is_empty());
    }

    #[test]
    fn remove_organization_twice_is_idempotent() {
        let mut cache = org_with_two_teams();
        remove_organization(&OrgId::new("o1"), &mut cache, &viewer());
        let once = cache.clone();
        remove_organization(&OrgId::new("o1"), &mut cache, &viewer());
        assert_eq!(cache, once);
    }

    #[test]
    fn remove_org_members_detaches_only_that_member() {
        let mut cache = org_with_two_teams();
        remove_org_members(&OrgId::new("o1"), Some(&UserId::new("other")), &mut cache);

        assert_eq!(cache.connection("o1", ConnectionField::OrgMembers), ["viewer"]);
        assert!(cache.contains("o1"));
        assert!(cache.contains("t1"), "teams are untouched by another's removal");
    }

    #[test]
    fn remove_org_members_without_subject_is_noop() {
        let mut cache = org_with_two_teams();
        let before = cache.clone();
        remove_org_members(&OrgId::new("o1"), None, &mut cache);
        assert_eq!(cache, before);
    }
}
