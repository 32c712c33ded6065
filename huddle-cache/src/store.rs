//! The normalized object cache.

use crate::journal::{ChangeJournal, InverseOp};
use huddle_core::{ConnectionField, Entity};
use std::collections::HashMap;
use tracing::trace;

const EMPTY: &[String] = &[];

/// Key of one ordered edge list: a parent entity id plus the field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionKey {
    pub parent: String,
    pub field: ConnectionField,
}

impl ConnectionKey {
    pub fn new(parent: impl Into<String>, field: ConnectionField) -> Self {
        Self {
            parent: parent.into(),
            field,
        }
    }
}

/// In-memory normalized graph store keyed by entity id.
///
/// All callers share one cooperative execution context, so the store has no
/// internal synchronization; it is `&mut` all the way down. Removal
/// operations are no-ops when the target is already absent, which is what
/// makes overlapping confirmed applications for the same entity converge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStore {
    entities: HashMap<String, Entity>,
    connections: HashMap<ConnectionKey, Vec<String>>,
    recording: Option<ChangeJournal>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // ENTITY TABLE
    // ========================================================================

    /// Look up an entity. No panic, no error on miss.
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// True when the id denotes a live entity.
    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Upsert by id. An existing record is field-merged (the incoming,
    /// confirmed record wins for every field it carries); a new record is
    /// inserted as-is.
    pub fn put(&mut self, entity: Entity) {
        let id = entity.id().to_string();
        match self.entities.get_mut(&id) {
            Some(existing) => {
                let prev = existing.clone();
                existing.merge(entity);
                trace!(%id, "merged entity");
                self.record(InverseOp::RestoreEntity(prev));
            }
            None => {
                trace!(%id, entity_type = ?entity.entity_type(), "inserted entity");
                self.entities.insert(id.clone(), entity);
                self.record(InverseOp::RemoveEntity(id));
            }
        }
    }

    /// Remove the record and mark the id absent. Does not scrub dangling
    /// connection edges; detaching edges first is the updater's job.
    pub fn delete(&mut self, id: &str) {
        match self.entities.remove(id) {
            Some(prev) => {
                trace!(%id, "deleted entity");
                self.record(InverseOp::RestoreEntity(prev));
            }
            None => trace!(%id, "delete of absent entity, already satisfied"),
        }
    }

    // ========================================================================
    // CONNECTIONS
    // ========================================================================

    /// The ordered edge list under `(parent, field)`; empty when absent.
    pub fn connection(&self, parent: &str, field: ConnectionField) -> &[String] {
        self.connections
            .get(&ConnectionKey::new(parent, field))
            .map(Vec::as_slice)
            .unwrap_or(EMPTY)
    }

    /// True when the edge list under `(parent, field)` references `id`.
    pub fn connection_contains(&self, parent: &str, field: ConnectionField, id: &str) -> bool {
        self.connection(parent, field).iter().any(|e| e == id)
    }

    /// Count edges referencing `id` across every connection. Zero for any
    /// entity removed through a removal updater - that is the no-dangling
    /// -edge invariant the updaters maintain.
    pub fn edges_referencing(&self, id: &str) -> usize {
        self.connections
            .values()
            .map(|edges| edges.iter().filter(|e| e.as_str() == id).count())
            .sum()
    }

    /// Append an edge. Idempotent: an id already present in the list is
    /// suppressed, never duplicated.
    pub fn append_edge(&mut self, parent: &str, field: ConnectionField, id: &str) {
        let key = ConnectionKey::new(parent, field);
        match self.connections.get_mut(&key) {
            Some(edges) => {
                if edges.iter().any(|e| e == id) {
                    trace!(%parent, ?field, %id, "duplicate edge suppressed");
                    return;
                }
                edges.push(id.to_string());
                self.record(InverseOp::RemoveEdge {
                    parent: parent.to_string(),
                    field,
                    id: id.to_string(),
                });
            }
            None => {
                self.connections.insert(key, vec![id.to_string()]);
                self.record(InverseOp::DropConnection {
                    parent: parent.to_string(),
                    field,
                });
            }
        }
    }

    /// Detach an edge. A no-op, not an error, when the id is absent; this is
    /// what makes retried removals converge.
    pub fn remove_edge(&mut self, parent: &str, field: ConnectionField, id: &str) {
        let key = ConnectionKey::new(parent, field);
        let Some(edges) = self.connections.get_mut(&key) else {
            trace!(%parent, ?field, %id, "remove_edge on absent connection");
            return;
        };
        match edges.iter().position(|e| e == id) {
            Some(index) => {
                edges.remove(index);
                self.record(InverseOp::InsertEdgeAt {
                    parent: parent.to_string(),
                    field,
                    id: id.to_string(),
                    index,
                });
            }
            None => trace!(%parent, ?field, %id, "remove_edge on absent edge, already satisfied"),
        }
    }

    /// Drop every connection list parented by `id`. Used when an aggregate
    /// entity is cascade-removed, so none of its child edge lists survive
    /// the record itself.
    pub fn drop_connections(&mut self, parent: &str) {
        let keys: Vec<ConnectionKey> = self
            .connections
            .keys()
            .filter(|key| key.parent == parent)
            .cloned()
            .collect();
        for key in keys {
            if let Some(edges) = self.connections.remove(&key) {
                trace!(parent = %key.parent, field = ?key.field, "dropped connection");
                self.record(InverseOp::RestoreConnection {
                    parent: key.parent,
                    field: key.field,
                    edges,
                });
            }
        }
    }

    // ========================================================================
    // PATCH RECORDING & ROLLBACK
    // ========================================================================

    /// Start recording a speculative patch. Mutations until [`end_patch`]
    /// record their inverses.
    ///
    /// [`end_patch`]: CacheStore::end_patch
    pub fn begin_patch(&mut self) {
        debug_assert!(self.recording.is_none(), "patch already being recorded");
        self.recording = Some(ChangeJournal::default());
    }

    /// Stop recording and hand the journal to the caller. Returns an empty
    /// journal when no patch was being recorded.
    pub fn end_patch(&mut self) -> ChangeJournal {
        self.recording.take().unwrap_or_default()
    }

    /// Undo a recorded patch by replaying its inverses last-to-first. The
    /// store afterwards is structurally equal to its pre-patch state.
    pub fn rollback(&mut self, journal: ChangeJournal) {
        trace!(ops = journal.len(), "rolling back patch");
        for op in journal.inverses.into_iter().rev() {
            self.apply_inverse(op);
        }
    }

    fn apply_inverse(&mut self, op: InverseOp) {
        match op {
            InverseOp::RestoreEntity(entity) => {
                self.entities.insert(entity.id().to_string(), entity);
            }
            InverseOp::RemoveEntity(id) => {
                self.entities.remove(&id);
            }
            InverseOp::RemoveEdge { parent, field, id } => {
                if let Some(edges) = self.connections.get_mut(&ConnectionKey::new(parent, field)) {
                    edges.retain(|e| e != &id);
                }
            }
            InverseOp::DropConnection { parent, field } => {
                self.connections.remove(&ConnectionKey::new(parent, field));
            }
            InverseOp::InsertEdgeAt {
                parent,
                field,
                id,
                index,
            } => {
                let edges = self
                    .connections
                    .entry(ConnectionKey::new(parent, field))
                    .or_default();
                let index = index.min(edges.len());
                edges.insert(index, id);
            }
            InverseOp::RestoreConnection {
                parent,
                field,
                edges,
            } => {
                self.connections
                    .insert(ConnectionKey::new(parent, field), edges);
            }
        }
    }

    fn record(&mut self, op: InverseOp) {
        if let Some(journal) = self.recording.as_mut() {
            journal.inverses.push(op);
        }
    }
}
