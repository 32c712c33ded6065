//! Property tests for the updater library's uniform rules: idempotence and
//! the no-dangling-edge invariant.

use huddle_cache::CacheStore;
use huddle_core::{
    ConnectionField, Entity, EntityIdType, Invitation, Notification, NotificationId,
    NotificationKind, Organization, Task, TaskId, Team, TeamId, TeamMember, UserId,
};
use huddle_sync::updaters;
use proptest::prelude::*;

fn viewer() -> UserId {
    UserId::new("viewer")
}

/// Build an org graph: `team_count` teams, each with `members_per_team`
/// members (the viewer among them when `viewer_on_team`), plus tasks,
/// invitations and notifications.
fn build_graph(
    team_count: usize,
    members_per_team: usize,
    tasks_per_team: usize,
    viewer_on_team: bool,
) -> CacheStore {
    let mut cache = CacheStore::new();
    let viewer = viewer();
    cache.put(Entity::Organization(Organization::new("o1", "Acme")));
    cache.append_edge(viewer.as_str(), ConnectionField::Organizations, "o1");
    cache.append_edge("o1", ConnectionField::OrgMembers, viewer.as_str());

    for t in 0..team_count {
        let team_id = format!("t{t}");
        let team = Team::new(team_id.clone(), format!("Team {t}")).with_org("o1");
        updaters::add_teams(std::slice::from_ref(&team), &mut cache, &viewer);

        for m in 0..members_per_team {
            let user = if viewer_on_team && m == 0 {
                "viewer".to_string()
            } else {
                format!("user{m}")
            };
            updaters::add_team_members(
                &[TeamMember::new(
                    format!("{user}::{team_id}"),
                    team_id.clone(),
                    user,
                )],
                &mut cache,
            );
        }
        for k in 0..tasks_per_team {
            let task = Task::new(format!("task-{team_id}-{k}"), team_id.clone())
                .with_user(if k % 2 == 0 { "viewer" } else { "user1" });
            updaters::upsert_tasks(std::slice::from_ref(&task), &mut cache, &viewer);
        }
        cache.put(Entity::Invitation(Invitation::new(
            format!("inv-{team_id}"),
            team_id.clone(),
        )));
        cache.append_edge(
            &team_id,
            ConnectionField::TeamInvitations,
            &format!("inv-{team_id}"),
        );
    }

    for n in 0..3 {
        updaters::add_notifications(
            &[Notification::new(format!("n{n}"), NotificationKind::Generic)],
            &mut cache,
            &viewer,
        );
    }
    cache
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Applying the same removal twice leaves the cache identical to
    /// applying it once.
    #[test]
    fn prop_remove_teams_is_idempotent(
        team_count in 1usize..4,
        members in 0usize..3,
        tasks in 0usize..3,
        remove_index in 0usize..4,
    ) {
        let mut cache = build_graph(team_count, members, tasks, true);
        let target = TeamId::new(format!("t{}", remove_index % team_count));

        updaters::remove_teams(std::slice::from_ref(&target), &mut cache, &viewer());
        let once = cache.clone();
        updaters::remove_teams(std::slice::from_ref(&target), &mut cache, &viewer());

        prop_assert_eq!(cache, once);
    }

    /// After a removal updater runs, no connection anywhere references the
    /// removed ids.
    #[test]
    fn prop_removals_leave_no_dangling_edges(
        team_count in 1usize..4,
        members in 0usize..3,
        tasks in 0usize..3,
    ) {
        let mut cache = build_graph(team_count, members, tasks, true);

        // Collect everything the cascade is about to delete.
        let mut doomed: Vec<String> = Vec::new();
        for t in 0..team_count {
            let team_id = format!("t{t}");
            doomed.push(team_id.clone());
            doomed.extend(cache.connection(&team_id, ConnectionField::TeamMembers).to_vec());
            doomed.extend(cache.connection(&team_id, ConnectionField::TeamTasks).to_vec());
            doomed.extend(cache.connection(&team_id, ConnectionField::TeamInvitations).to_vec());
        }

        let team_ids: Vec<TeamId> = (0..team_count).map(|t| TeamId::new(format!("t{t}"))).collect();
        updaters::remove_teams(&team_ids, &mut cache, &viewer());

        for id in &doomed {
            prop_assert!(!cache.contains(id), "{} should be deleted", id);
            prop_assert_eq!(cache.edges_referencing(id), 0, "dangling edge to {}", id);
        }
    }

    /// Notification removals: idempotent and dangling-free for arbitrary
    /// subsets, including ids that never existed.
    #[test]
    fn prop_remove_notifications_tolerates_any_subset(
        ids in prop::collection::vec(0usize..6, 0..8),
    ) {
        let mut cache = build_graph(1, 1, 0, true);
        let targets: Vec<NotificationId> = ids
            .iter()
            .map(|n| NotificationId::new(format!("n{n}")))
            .collect();

        updaters::remove_notifications(&targets, &mut cache, &viewer());
        let once = cache.clone();
        updaters::remove_notifications(&targets, &mut cache, &viewer());

        prop_assert_eq!(&cache, &once);
        for target in &targets {
            prop_assert_eq!(cache.edges_referencing(target.as_str()), 0);
        }
    }

    /// Task removals detach from both the team board and the viewer's list.
    #[test]
    fn prop_remove_tasks_leaves_no_dangling_edges(
        tasks in 1usize..4,
        remove_count in 0usize..4,
    ) {
        let mut cache = build_graph(1, 1, tasks, true);
        let targets: Vec<TaskId> = (0..remove_count.min(tasks))
            .map(|k| TaskId::new(format!("task-t0-{k}")))
            .collect();

        updaters::remove_tasks(&targets, &mut cache, &viewer());

        for target in &targets {
            prop_assert!(!cache.contains(target.as_str()));
            prop_assert_eq!(cache.edges_referencing(target.as_str()), 0);
        }
    }
}

/// Viewer-branch correctness: self-removal empties the viewer's team list
/// of the org's teams; removing another member leaves the viewer's team
/// list untouched.
#[test]
fn viewer_branch_correctness_for_org_removal() {
    use huddle_core::{RemoveOrgUserPayload, User};

    // Self-removal.
    let mut cache = build_graph(2, 2, 1, true);
    let payload = RemoveOrgUserPayload {
        organization: Some(Organization::new("o1", "Acme")),
        user: Some(User::new("viewer")),
        teams: vec![
            Team::new("t0", "Team 0").with_org("o1"),
            Team::new("t1", "Team 1").with_org("o1"),
        ],
        ..Default::default()
    };
    huddle_sync::apply_confirmed(
        &huddle_core::MutationPayload::RemoveOrgUser(payload),
        &mut cache,
        &viewer(),
    );
    assert!(cache.connection("viewer", ConnectionField::Teams).is_empty());
    assert!(!cache.contains("t0"));
    assert!(!cache.contains("t1"));

    // Another member's removal.
    let mut cache = build_graph(2, 2, 1, true);
    let before_teams = cache.connection("viewer", ConnectionField::Teams).to_vec();
    let payload = RemoveOrgUserPayload {
        organization: Some(Organization::new("o1", "Acme")),
        user: Some(User::new("user1")),
        team_members: vec![
            TeamMember::new("user1::t0", "t0", "user1"),
            TeamMember::new("user1::t1", "t1", "user1"),
        ],
        ..Default::default()
    };
    huddle_sync::apply_confirmed(
        &huddle_core::MutationPayload::RemoveOrgUser(payload),
        &mut cache,
        &viewer(),
    );
    assert_eq!(
        cache.connection("viewer", ConnectionField::Teams).to_vec(),
        before_teams,
        "viewer's own team list is unchanged"
    );
    assert!(!cache.contains("user1::t0"));
    assert!(!cache.contains("user1::t1"));
    assert_eq!(cache.edges_referencing("user1::t0"), 0);
}
