//! Route inspection helpers.

use huddle_core::{EntityIdType, SyncConfig, TeamId};

/// True when `pathname` is a route belonging to a team the viewer just lost:
/// the team dashboard or its meeting room.
pub fn on_ex_team_route(pathname: &str, team_id: &TeamId, config: &SyncConfig) -> bool {
    route_names_team(pathname, &config.team_route_prefix, team_id)
        || route_names_team(pathname, &config.meeting_route_prefix, team_id)
}

fn route_names_team(pathname: &str, prefix: &str, team_id: &TeamId) -> bool {
    pathname
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .map(|rest| rest.split('/').next() == Some(team_id.as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SyncConfig {
        SyncConfig::default()
    }

    #[test]
    fn matches_team_dashboard_and_subroutes() {
        let t1 = TeamId::new("t1");
        assert!(on_ex_team_route("/team/t1", &t1, &config()));
        assert!(on_ex_team_route("/team/t1/settings", &t1, &config()));
        assert!(on_ex_team_route("/meeting/t1", &t1, &config()));
    }

    #[test]
    fn does_not_match_other_teams_or_prefix_collisions() {
        let t1 = TeamId::new("t1");
        assert!(!on_ex_team_route("/team/t2", &t1, &config()));
        assert!(!on_ex_team_route("/team/t11", &t1, &config()));
        assert!(!on_ex_team_route("/me", &t1, &config()));
        assert!(!on_ex_team_route("/teams/t1", &t1, &config()));
    }
}
