//! Configuration types.

use crate::{ConfigError, HuddleError, HuddleResult};
use serde::{Deserialize, Serialize};

/// Configuration for the sync engine's user-visible behavior.
///
/// Routes are app-level conventions injected here so the coordinator never
/// hardcodes paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Seconds before a derived toast auto-dismisses.
    pub toast_auto_dismiss_secs: u32,
    /// Safe route when the viewer's current route stops being valid.
    pub default_route: String,
    /// Route for the first-team welcome flow.
    pub settings_route: String,
    /// Route for the benefit-of-the-doubt redirect on ambiguous errors.
    pub home_route: String,
    /// Prefix of team dashboard routes, e.g. `/team/{teamId}`.
    pub team_route_prefix: String,
    /// Prefix of meeting room routes, e.g. `/meeting/{teamId}`.
    pub meeting_route_prefix: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            toast_auto_dismiss_secs: 10,
            default_route: "/me".to_string(),
            settings_route: "/me/settings".to_string(),
            home_route: "/".to_string(),
            team_route_prefix: "/team".to_string(),
            meeting_route_prefix: "/meeting".to_string(),
        }
    }
}

impl SyncConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> HuddleResult<()> {
        if self.toast_auto_dismiss_secs == 0 {
            return Err(HuddleError::Config(ConfigError::InvalidValue {
                field: "toast_auto_dismiss_secs".to_string(),
                value: "0".to_string(),
                reason: "toasts must stay visible for at least one second".to_string(),
            }));
        }

        for (field, value) in [
            ("default_route", &self.default_route),
            ("settings_route", &self.settings_route),
            ("home_route", &self.home_route),
            ("team_route_prefix", &self.team_route_prefix),
            ("meeting_route_prefix", &self.meeting_route_prefix),
        ] {
            if !value.starts_with('/') {
                return Err(HuddleError::Config(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                    reason: "routes must start with /".to_string(),
                }));
            }
        }

        for (field, value) in [
            ("team_route_prefix", &self.team_route_prefix),
            ("meeting_route_prefix", &self.meeting_route_prefix),
        ] {
            if value.len() > 1 && value.ends_with('/') {
                return Err(HuddleError::Config(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                    reason: "route prefixes must not end with /".to_string(),
                }));
            }
        }

        Ok(())
    }
}
