//! Property tests for patch recording and rollback.
//!
//! For any sequence of cache operations applied under a patch guard, rolling
//! the journal back must restore the store to structural equality with its
//! pre-patch state - including operations that were suppressed by
//! idempotence and therefore recorded nothing.

use huddle_cache::CacheStore;
use huddle_core::{ConnectionField, Entity, Notification, NotificationKind, Task, Team};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    PutTeam(u8),
    PutTask(u8, u8),
    PutNotification(u8),
    Delete(u8),
    AppendEdge(u8, u8),
    RemoveEdge(u8, u8),
    DropConnections(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8).prop_map(Op::PutTeam),
        (0u8..8, 0u8..4).prop_map(|(a, b)| Op::PutTask(a, b)),
        (0u8..8).prop_map(Op::PutNotification),
        (0u8..8).prop_map(Op::Delete),
        (0u8..4, 0u8..8).prop_map(|(p, c)| Op::AppendEdge(p, c)),
        (0u8..4, 0u8..8).prop_map(|(p, c)| Op::RemoveEdge(p, c)),
        (0u8..4).prop_map(Op::DropConnections),
    ]
}

fn apply(cache: &mut CacheStore, op: &Op) {
    match op {
        Op::PutTeam(n) => cache.put(Entity::Team(Team::new(format!("e{n}"), format!("Team {n}")))),
        Op::PutTask(n, t) => {
            cache.put(Entity::Task(Task::new(format!("e{n}"), format!("e{t}"))));
        }
        Op::PutNotification(n) => cache.put(Entity::Notification(Notification::new(
            format!("e{n}"),
            NotificationKind::Generic,
        ))),
        Op::Delete(n) => cache.delete(&format!("e{n}")),
        Op::AppendEdge(p, c) => {
            cache.append_edge(&format!("e{p}"), ConnectionField::Teams, &format!("e{c}"));
        }
        Op::RemoveEdge(p, c) => {
            cache.remove_edge(&format!("e{p}"), ConnectionField::Teams, &format!("e{c}"));
        }
        Op::DropConnections(p) => cache.drop_connections(&format!("e{p}")),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Rollback exactness: setup ops, then a journaled patch, then rollback
    /// must yield the pre-patch store.
    #[test]
    fn prop_rollback_restores_pre_patch_state(
        setup in prop::collection::vec(op_strategy(), 0..20),
        patch in prop::collection::vec(op_strategy(), 0..20),
    ) {
        let mut cache = CacheStore::new();
        for op in &setup {
            apply(&mut cache, op);
        }
        let before = cache.clone();

        cache.begin_patch();
        for op in &patch {
            apply(&mut cache, op);
        }
        let journal = cache.end_patch();
        cache.rollback(journal);

        prop_assert_eq!(cache, before);
    }

    /// Double rollback of independent patches: patches undo cleanly even
    /// when a second patch is recorded after the first one rolled back.
    #[test]
    fn prop_sequential_patches_roll_back_independently(
        setup in prop::collection::vec(op_strategy(), 0..10),
        patch_a in prop::collection::vec(op_strategy(), 0..10),
        patch_b in prop::collection::vec(op_strategy(), 0..10),
    ) {
        let mut cache = CacheStore::new();
        for op in &setup {
            apply(&mut cache, op);
        }
        let before = cache.clone();

        cache.begin_patch();
        for op in &patch_a {
            apply(&mut cache, op);
        }
        let journal_a = cache.end_patch();
        cache.rollback(journal_a);

        cache.begin_patch();
        for op in &patch_b {
            apply(&mut cache, op);
        }
        let journal_b = cache.end_patch();
        cache.rollback(journal_b);

        prop_assert_eq!(cache, before);
    }
}
