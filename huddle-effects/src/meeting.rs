//! Local meeting-stage reconciliation.
//!
//! The viewer's position inside a live meeting is client-local state on the
//! cached [`huddle_core::Meeting`]. When a participant is removed, the stage
//! the viewer was looking at can stop resolving; the correction is to follow
//! the facilitator. This never re-invokes the remote call.

use huddle_cache::CacheStore;
use huddle_core::{Entity, EntityIdType, MeetingId, StageId};
use tracing::debug;

/// Point the viewer's local stage (and with it, phase) at `stage_id`.
pub fn set_local_stage_and_phase(cache: &mut CacheStore, meeting_id: &MeetingId, stage_id: &StageId) {
    let Some(Entity::Meeting(meeting)) = cache.get(meeting_id.as_str()) else {
        return;
    };
    let mut meeting = meeting.clone();
    meeting.local_stage_id = Some(stage_id.clone());
    cache.put(Entity::Meeting(meeting));
}

/// If the viewer's local stage no longer resolves within the meeting's
/// phases, reassign it to the facilitator's current stage.
pub fn reconcile_local_stage(cache: &mut CacheStore, meeting_id: &MeetingId) {
    let Some(Entity::Meeting(meeting)) = cache.get(meeting_id.as_str()) else {
        return;
    };
    let resolves = meeting
        .local_stage_id
        .as_ref()
        .is_some_and(|stage_id| meeting.find_stage(stage_id).is_some());
    if !resolves {
        let facilitator_stage_id = meeting.facilitator_stage_id.clone();
        debug!(meeting_id = %meeting_id, stage_id = %facilitator_stage_id, "local stage no longer resolves, following facilitator");
        set_local_stage_and_phase(cache, meeting_id, &facilitator_stage_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_core::{Meeting, MeetingPhase, MeetingStage};

    fn meeting_with_stages(local: Option<&str>) -> Meeting {
        Meeting {
            local_stage_id: local.map(StageId::new),
            ..Meeting::new("m1", "t1", "s1")
        }
        .with_phases(vec![MeetingPhase::new(
            "agendaitems",
            vec![MeetingStage::new("s1"), MeetingStage::new("s2")],
        )])
    }

    #[test]
    fn resolving_local_stage_is_left_alone() {
        let mut cache = CacheStore::new();
        cache.put(Entity::Meeting(meeting_with_stages(Some("s2"))));

        reconcile_local_stage(&mut cache, &MeetingId::new("m1"));

        match cache.get("m1").unwrap() {
            Entity::Meeting(m) => assert_eq!(m.local_stage_id, Some(StageId::new("s2"))),
            other => panic!("unexpected entity: {other:?}"),
        }
    }

    #[test]
    fn dangling_local_stage_follows_facilitator() {
        let mut cache = CacheStore::new();
        cache.put(Entity::Meeting(meeting_with_stages(Some("removed-stage"))));

        reconcile_local_stage(&mut cache, &MeetingId::new("m1"));

        match cache.get("m1").unwrap() {
            Entity::Meeting(m) => assert_eq!(m.local_stage_id, Some(StageId::new("s1"))),
            other => panic!("unexpected entity: {other:?}"),
        }
    }

    #[test]
    fn untracked_local_stage_follows_facilitator() {
        let mut cache = CacheStore::new();
        cache.put(Entity::Meeting(meeting_with_stages(None)));

        reconcile_local_stage(&mut cache, &MeetingId::new("m1"));

        match cache.get("m1").unwrap() {
            Entity::Meeting(m) => assert_eq!(m.local_stage_id, Some(StageId::new("s1"))),
            other => panic!("unexpected entity: {other:?}"),
        }
    }

    #[test]
    fn unknown_meeting_is_ignored() {
        let mut cache = CacheStore::new();
        let before = cache.clone();
        reconcile_local_stage(&mut cache, &MeetingId::new("ghost"));
        assert_eq!(cache, before);
    }
}
