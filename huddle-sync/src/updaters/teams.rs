//! Team updaters.

use huddle_cache::CacheStore;
use huddle_core::{ConnectionField, Entity, EntityIdType, Team, TeamId, UserId};
use tracing::trace;

/// Upsert teams and attach them to the viewer's team list (and to their
/// organization's team list when the org is known).
pub fn add_teams(teams: &[Team], cache: &mut CacheStore, viewer_id: &UserId) {
    for team in teams {
        cache.put(Entity::Team(team.clone()));
        cache.append_edge(viewer_id.as_str(), ConnectionField::Teams, team.id.as_str());
        if let Some(org_id) = &team.org_id {
            cache.append_edge(org_id.as_str(), ConnectionField::OrgTeams, team.id.as_str());
        }
    }
}

/// Remove teams from the viewer's graph, cascading to everything the team
/// owns: members, soft members, tasks, invitations, and the in-progress
/// meeting. Edges are detached before the records are deleted.
pub fn remove_teams(team_ids: &[TeamId], cache: &mut CacheStore, viewer_id: &UserId) {
    for team_id in team_ids {
        let team = match cache.get(team_id.as_str()) {
            Some(Entity::Team(team)) => team.clone(),
            _ => {
                trace!(team_id = %team_id, "remove_teams: team absent, already satisfied");
                // The record may be gone while the viewer edge lingers from
                // an interleaved confirmed application.
                cache.remove_edge(viewer_id.as_str(), ConnectionField::Teams, team_id.as_str());
                continue;
            }
        };

        cache.remove_edge(viewer_id.as_str(), ConnectionField::Teams, team_id.as_str());
        if let Some(org_id) = &team.org_id {
            cache.remove_edge(org_id.as_str(), ConnectionField::OrgTeams, team_id.as_str());
        }

        for member_id in cache
            .connection(team_id.as_str(), ConnectionField::TeamMembers)
            .to_vec()
        {
            cache.delete(&member_id);
        }
        for soft_id in cache
            .connection(team_id.as_str(), ConnectionField::SoftTeamMembers)
            .to_vec()
        {
            cache.delete(&soft_id);
        }
        for task_id in cache
            .connection(team_id.as_str(), ConnectionField::TeamTasks)
            .to_vec()
        {
            cache.remove_edge(viewer_id.as_str(), ConnectionField::Tasks, &task_id);
            cache.delete(&task_id);
        }
        for invitation_id in cache
            .connection(team_id.as_str(), ConnectionField::TeamInvitations)
            .to_vec()
        {
            cache.delete(&invitation_id);
        }
        if let Some(meeting_id) = &team.new_meeting_id {
            cache.delete(meeting_id.as_str());
        }

        cache.drop_connections(team_id.as_str());
        cache.delete(team_id.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_core::{Invitation, Meeting, Task, TeamMember};

    fn viewer() -> UserId {
        UserId::new("viewer")
    }

    fn seeded_cache() -> CacheStore {
        let mut cache = CacheStore::new();
        let team = Team::new("t1", "Rocket").with_org("o1").with_meeting("m1");
        add_teams(std::slice::from_ref(&team), &mut cache, &viewer());

        cache.put(Entity::TeamMember(TeamMember::new("m-a", "t1", "other")));
        cache.append_edge("t1", ConnectionField::TeamMembers, "m-a");
        cache.put(Entity::Task(Task::new("task1", "t1").with_user("viewer")));
        cache.append_edge("t1", ConnectionField::TeamTasks, "task1");
        cache.append_edge("viewer", ConnectionField::Tasks, "task1");
        cache.put(Entity::Invitation(Invitation::new("inv1", "t1")));
        cache.append_edge("t1", ConnectionField::TeamInvitations, "inv1");
        cache.put(Entity::Meeting(Meeting::new("m1", "t1", "s1")));
        cache
    }

    #[test]
    fn add_teams_links_viewer_and_org() {
        let mut cache = CacheStore::new();
        let team = Team::new("t1", "Rocket").with_org("o1");
        add_teams(std::slice::from_ref(&team), &mut cache, &viewer());

        assert!(cache.contains("t1"));
        assert_eq!(cache.connection("viewer", ConnectionField::Teams), ["t1"]);
        assert_eq!(cache.connection("o1", ConnectionField::OrgTeams), ["t1"]);
    }

    #[test]
    fn add_teams_twice_is_idempotent() {
        let mut cache = CacheStore::new();
        let team = Team::new("t1", "Rocket").with_org("o1");
        add_teams(std::slice::from_ref(&team), &mut cache, &viewer());
        let once = cache.clone();
        add_teams(std::slice::from_ref(&team), &mut cache, &viewer());
        assert_eq!(cache, once);
    }

    #[test]
    fn remove_teams_cascades_to_owned_records() {
        let mut cache = seeded_cache();
        remove_teams(&[TeamId::new("t1")], &mut cache, &viewer());

        for id in ["t1", "m-a", "task1", "inv1", "m1"] {
            assert!(!cache.contains(id), "{id} should be gone");
        }
        assert!(cache.connection("viewer", ConnectionField::Teams).is_empty());
        assert!(cache.connection("viewer", ConnectionField::Tasks).is_empty());
        assert!(cache.connection("o1", ConnectionField::OrgTeams).is_empty());
        assert!(cache.connection("t1", ConnectionField::TeamMembers).is_empty());
    }

    #[test]
    fn remove_teams_twice_is_idempotent() {
        let mut cache = seeded_cache();
        remove_teams(&[TeamId::new("t1")], &mut cache, &viewer());
        let once = cache.clone();
        remove_teams(&[TeamId::new("t1")], &mut cache, &viewer());
        assert_eq!(cache, once);
    }

    #[test]
    fn remove_teams_with_empty_input_is_noop() {
        let mut cache = seeded_cache();
        let before = cache.clone();
        remove_teams(&[], &mut cache, &viewer());
        assert_eq!(cache, before);
    }
}
