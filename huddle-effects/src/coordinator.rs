//! The side-effect coordinator.
//!
//! Runs only after a commit, reading the confirmed payload plus ambient
//! context (viewer id, current navigation path, config) and firing the
//! user-visible consequences: toasts, at most one redirect, session refresh,
//! and local meeting-stage reconciliation.
//!
//! Every toast decision is a pure predicate over payload fields; a missing
//! expected field suppresses the toast instead of rendering a degenerate
//! message. Session refresh is strictly decode-then-decide: the reissued
//! token's claims are installed before any navigation decision that depends
//! on team membership.

use crate::meeting::reconcile_local_stage;
use crate::routes::on_ex_team_route;
use crate::sinks::{EffectSinks, ToastSpec};
use huddle_cache::CacheStore;
use huddle_core::{
    decode_session_claims, AcceptTeamInvitePayload, AppError, EntityIdType, LeaveTeamPayload,
    MutationPayload, RemoveOrgUserPayload, SyncConfig, UserId,
};
use huddle_sync::resolve_subject;
use tracing::{debug, warn};

/// Ambient context the coordinator reads but never writes.
pub struct EffectContext<'a> {
    pub viewer_id: &'a UserId,
    /// The navigation path the viewer is currently on.
    pub current_path: &'a str,
    pub config: &'a SyncConfig,
}

/// Fire the success-path side effects for a committed payload.
pub fn run_side_effects(
    payload: &MutationPayload,
    cache: &mut CacheStore,
    ctx: &EffectContext<'_>,
    sinks: &mut EffectSinks<'_>,
) {
    debug!(operation = payload.operation_name(), "running side effects");
    match payload {
        MutationPayload::AcceptTeamInvite(p) => accept_team_invite_effects(p, ctx, sinks),
        MutationPayload::RemoveOrgUser(p) => remove_org_user_effects(p, cache, ctx, sinks),
        MutationPayload::ClearNotification(_) => {}
        MutationPayload::LeaveTeam(p) => leave_team_effects(p, ctx, sinks),
    }
}

/// Fire the caller-side effects for a payload that carried an application
/// error: a specific toast (never generic), and for the invite flow the
/// benefit-of-the-doubt redirect home instead of a forced sign-out.
pub fn run_app_error_effects(
    payload: &MutationPayload,
    error: &AppError,
    ctx: &EffectContext<'_>,
    sinks: &mut EffectSinks<'_>,
) {
    sinks.toasts.push(ToastSpec::new(
        error.title.clone().unwrap_or_else(|| "That didn't work".to_string()),
        error.message.clone(),
        ctx.config.toast_auto_dismiss_secs,
    ));
    if matches!(payload, MutationPayload::AcceptTeamInvite(_)) {
        sinks.navigator.navigate(&ctx.config.home_route);
    }
}

fn accept_team_invite_effects(
    p: &AcceptTeamInvitePayload,
    ctx: &EffectContext<'_>,
    sinks: &mut EffectSinks<'_>,
) {
    let subject = resolve_subject(p.team_member.as_ref().map(|m| &m.user_id), ctx.viewer_id);

    if subject.is_viewer {
        viewer_accepted_invite_effects(p, ctx, sinks);
    } else {
        pop_joined_your_team_toast(p, ctx, sinks);
    }
}

/// Someone else accepted an invitation to a team the viewer is on.
fn pop_joined_your_team_toast(
    p: &AcceptTeamInvitePayload,
    ctx: &EffectContext<'_>,
    sinks: &mut EffectSinks<'_>,
) {
    let Some(preferred_name) = p.team_member.as_ref().and_then(|m| m.preferred_name.as_deref())
    else {
        return;
    };
    let Some(team_name) = p.team.as_ref().map(|t| t.name.as_str()) else {
        return;
    };
    sinks.toasts.push(ToastSpec::new(
        "Ahoy, a new crewmate!",
        format!("{preferred_name} just joined team {team_name}"),
        ctx.config.toast_auto_dismiss_secs,
    ));
}

/// The viewer accepted the invitation themselves.
fn viewer_accepted_invite_effects(
    p: &AcceptTeamInvitePayload,
    ctx: &EffectContext<'_>,
    sinks: &mut EffectSinks<'_>,
) {
    let Some(team) = &p.team else {
        return;
    };

    // Decode first: every decision below depends on the fresh claim set.
    let claims = match &p.auth_token {
        Some(token) => match decode_session_claims(token) {
            Ok(claims) => Some(claims),
            Err(error) => {
                warn!(%error, "reissued token did not decode, keeping current session");
                None
            }
        },
        None => None,
    };

    if let (Some(token), Some(user)) = (&p.auth_token, &p.user) {
        sinks.session.set_session(token, &user.id);
    }

    sinks.toasts.push(
        ToastSpec::new(
            "Congratulations!",
            format!("You've been added to team {}", team.name),
            ctx.config.toast_auto_dismiss_secs,
        )
        .with_action("Great!"),
    );

    let team_room = format!("{}/{}", ctx.config.team_route_prefix, team.id.as_str());
    match claims {
        Some(claims) if claims.is_first_team() => {
            sinks.session.set_welcome_destination(&team_room);
            sinks.navigator.navigate(&ctx.config.settings_route);
        }
        _ => sinks.navigator.navigate(&team_room),
    }
}

fn remove_org_user_effects(
    p: &RemoveOrgUserPayload,
    cache: &mut CacheStore,
    ctx: &EffectContext<'_>,
    sinks: &mut EffectSinks<'_>,
) {
    let subject = resolve_subject(p.user.as_ref().map(|u| &u.id), ctx.viewer_id);

    if subject.is_viewer {
        pop_kicked_out_toast(p, ctx, sinks);
    }

    // Meetings that survived the removal may have lost the stage the viewer
    // was on; follow the facilitator. Removed meetings no-op here.
    for meeting in &p.meetings {
        reconcile_local_stage(cache, &meeting.id);
    }
}

fn pop_kicked_out_toast(
    p: &RemoveOrgUserPayload,
    ctx: &EffectContext<'_>,
    sinks: &mut EffectSinks<'_>,
) {
    let Some(org_name) = p.organization.as_ref().map(|o| o.name.as_str()) else {
        return;
    };
    let team_ids: Vec<_> = p
        .kick_out_notifications
        .iter()
        .filter_map(|n| n.team_id.clone())
        .collect();
    if team_ids.is_empty() {
        return;
    }

    sinks.toasts.push(ToastSpec::new(
        "So long!",
        format!("You have been removed from {org_name} and all its teams"),
        ctx.config.toast_auto_dismiss_secs,
    ));

    // At most one redirect: the first lost team whose route the viewer is
    // currently on decides.
    for team_id in &team_ids {
        if on_ex_team_route(ctx.current_path, team_id, ctx.config) {
            sinks.navigator.navigate(&ctx.config.default_route);
            return;
        }
    }
}

fn leave_team_effects(
    p: &LeaveTeamPayload,
    ctx: &EffectContext<'_>,
    sinks: &mut EffectSinks<'_>,
) {
    let subject = resolve_subject(p.user.as_ref().map(|u| &u.id), ctx.viewer_id);
    if !subject.is_viewer {
        return;
    }
    let Some(team) = &p.team else {
        return;
    };
    if on_ex_team_route(ctx.current_path, &team.id, ctx.config) {
        sinks.navigator.navigate(&ctx.config.default_route);
    }
}
